//! Toast notification slot.

use crate::widgets::{Notification, NotificationVariant};

use super::escape;

/// Empty slot rendered with the page.
#[must_use]
pub fn empty_slot() -> &'static str {
    r#"<div id="toasts" class="toasts" aria-live="assertive"></div>"#
}

/// Out-of-band replacement for `#toasts`.
///
/// Swapping an empty slot clears the previous toast.
#[must_use]
pub fn toast_slot(notification: Option<&Notification>) -> String {
    let body = notification.map(render).unwrap_or_default();
    format!(
        r#"<div id="toasts" class="toasts" aria-live="assertive" hx-swap-oob="true">{body}</div>"#
    )
}

fn render(n: &Notification) -> String {
    let variant = match n.variant {
        NotificationVariant::Default => "toast",
        NotificationVariant::Destructive => "toast toast-destructive",
    };
    format!(
        r#"<div class="{variant}" role="status">
    <p class="toast-title">{title}</p>
    <p class="toast-description">{description}</p>
</div>"#,
        title = escape(&n.title),
        description = escape(&n.description),
    )
}

//! Document shell and landing page.

use crate::session::Session;

use super::{chat_panel, escape, search_section, toast};

/// Keeps the newest chat message in view after every swap. Best-effort: any
/// scrolling error is swallowed.
const SCROLL_SCRIPT: &str = r"
document.body.addEventListener('htmx:afterSettle', function () {
    try {
        var list = document.getElementById('chat-messages');
        if (!list) { return; }
        var target = document.getElementById(list.dataset.scrollAnchor);
        if (target) { target.scrollIntoView({ behavior: 'smooth', block: 'end' }); }
    } catch (e) { /* ignore */ }
});
";

/// Generate the HTML shell for the application.
#[must_use]
pub fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Explore the Magic of Gujarat with AI Travel Planner">
    <title>{title}</title>
    <script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js"></script>
</head>
<body>
    {toasts}
    <main id="app">
        {content}
    </main>
    <footer class="site-footer">
        <p>Gujarat Travel Planner</p>
    </footer>
    <script>{SCROLL_SCRIPT}</script>
</body>
</html>"#,
        title = escape(title),
        toasts = toast::empty_slot(),
    )
}

/// Render the full landing page for a session.
#[must_use]
pub fn landing_page(session: &Session) -> String {
    let search = session.with_search(|search| search_section(session.id(), search));
    let chat = session.with_chat(|chat| chat_panel(session.id(), chat));
    let content = format!(
        r#"<section class="hero">
            <h1>Gujarat Travel Planner</h1>
            <p>Explore the Magic of Gujarat with AI Travel Planner</p>
            {search}
        </section>
        {chat}"#
    );
    html_shell("Gujarat Travel Planner", &content)
}

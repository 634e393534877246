//! Server-rendered HTML.
//!
//! Every widget renders to a self-contained fragment with a stable element id
//! so HTMX can swap it in place after each request.
//!
//! # Structure
//!
//! - [`page`]: document shell and landing page
//! - [`chat`]: chat panel (`#chat-panel`)
//! - [`search`]: hero search form and itinerary modal (`#search-section`)
//! - [`toast`]: out-of-band notification slot (`#toasts`)

pub mod chat;
pub mod page;
pub mod search;
pub mod toast;

pub use chat::{chat_panel, chat_panel_oob};
pub use page::landing_page;
pub use search::{search_section, search_section_oob};
pub use toast::toast_slot;

/// Attribute marking a fragment for an out-of-band swap.
const OOB: &str = r#" hx-swap-oob="true""#;

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

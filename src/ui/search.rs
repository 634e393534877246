//! Hero search form and itinerary modal.

use std::fmt::Write;

use crate::widgets::SearchWidget;

use super::{OOB, escape};

/// Render `#search-section` for the given session.
#[must_use]
pub fn search_section(session_id: &str, search: &SearchWidget) -> String {
    render(session_id, search, "")
}

/// `#search-section` as an out-of-band swap.
#[must_use]
pub fn search_section_oob(session_id: &str, search: &SearchWidget) -> String {
    render(session_id, search, OOB)
}

fn render(session_id: &str, search: &SearchWidget, swap: &str) -> String {
    let sid = escape(session_id);
    let params = search.params();
    let field = |v: &Option<String>| escape(v.as_deref().unwrap_or_default());
    let disabled = if search.is_loading() { " disabled" } else { "" };

    let modal = if search.results_visible() {
        itinerary_modal(&sid, search)
    } else {
        String::new()
    };

    format!(
        r##"<section id="search-section" class="hero-search"{swap}>
    <form hx-post="/plan" hx-target="#search-section" hx-swap="outerHTML"
          hx-disabled-elt="find button">
        <input type="hidden" name="session_id" value="{sid}">
        <input type="text" name="destination" value="{destination}" placeholder="Where do you want to go?">
        <input type="text" name="activity" value="{activity}" placeholder="What do you want to do?">
        <input type="text" name="date" value="{date}" placeholder="When do you want to go?">
        <input type="text" name="budget" value="{budget}" placeholder="Budget">
        <button type="submit"{disabled}>Plan My Adventure</button>
    </form>
    {modal}
</section>"##,
        destination = field(&params.destination),
        activity = field(&params.activity),
        date = field(&params.date),
        budget = field(&params.budget),
    )
}

fn itinerary_modal(sid: &str, search: &SearchWidget) -> String {
    let mut days = String::new();
    for day in search.itinerary() {
        let _ = write!(
            days,
            r#"
            <li class="itinerary-day">
                <p class="itinerary-title">Day {number}: {title}</p>
                <p class="itinerary-description">{description}</p>
            </li>"#,
            number = day.day,
            title = escape(&day.title),
            description = escape(&day.description),
        );
    }

    format!(
        r##"<div class="modal" role="dialog" aria-modal="true" aria-labelledby="itinerary-heading">
        <div class="modal-body">
            <h2 id="itinerary-heading">Your Itinerary</h2>
            <ol class="itinerary">{days}
            </ol>
            <button type="button" hx-post="/plan/dismiss"
                    hx-vals='{{"session_id": "{sid}"}}'
                    hx-target="#search-section" hx-swap="outerHTML">Close</button>
        </div>
    </div>"##
    )
}

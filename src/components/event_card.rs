//! Event Card Component
//!
//! Career event card with markdown description.

use leptos::prelude::*;

use crate::markdown::parse_markdown_inline;
use crate::models::Event;

#[component]
pub fn EventCard(event: Event) -> impl IntoView {
    let description = parse_markdown_inline(&event.description);

    view! {
        <div class="event-card">
            <div class="event-head">
                <h3>{event.title.clone()}</h3>
                <span class="event-type">{event.event_type.clone()}</span>
            </div>
            <div class="event-when">
                <span>{event.date.format("%b %d, %Y").to_string()}</span>
                <span>{event.time.clone()}</span>
                <span>{event.location.clone()}</span>
            </div>
            {event.speaker.clone().map(|speaker| view! {
                <p class="event-speaker">{format!("Speaker: {speaker}")}</p>
            })}
            <p class="event-description" inner_html=description></p>
            <Show when={let required = event.registration_required; move || required}>
                <span class="registration-badge">"Registration required"</span>
            </Show>
        </div>
    }
}

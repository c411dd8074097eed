//! Home Page
//!
//! Hero, featured colleges, and the next few career events.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::components::{CollegeCard, EventCard, Hero};
use crate::models::{College, Event};

const PREVIEW_LIMIT: usize = 3;

#[component]
pub fn HomePage() -> impl IntoView {
    let (featured, set_featured) = signal(Vec::<College>::new());
    let (upcoming, set_upcoming) = signal(Vec::<Event>::new());

    // Preview rows are best-effort; failures here just leave the rows
    // empty rather than raising a banner on the landing page.
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(page) = api::list_colleges("", 1).await {
                let mut picks: Vec<College> =
                    page.results.into_iter().filter(|c| c.is_featured).collect();
                picks.truncate(PREVIEW_LIMIT);
                set_featured.set(picks);
            }
            if let Ok(mut events) = api::list_events(None).await {
                events.truncate(PREVIEW_LIMIT);
                set_upcoming.set(events);
            }
        });
    });

    view! {
        <section class="page home-page">
            <Hero />

            <Show when=move || !featured.get().is_empty()>
                <div class="home-section">
                    <div class="home-section-head">
                        <h2>"Featured colleges"</h2>
                        <A href="/colleges">"See all"</A>
                    </div>
                    <div class="college-grid">
                        <For
                            each=move || featured.get()
                            key=|college| college.id
                            children=move |college| view! { <CollegeCard college=college /> }
                        />
                    </div>
                </div>
            </Show>

            <Show when=move || !upcoming.get().is_empty()>
                <div class="home-section">
                    <div class="home-section-head">
                        <h2>"Upcoming events"</h2>
                        <A href="/careers">"See all"</A>
                    </div>
                    <div class="event-grid">
                        <For
                            each=move || upcoming.get()
                            key=|event| event.id
                            children=move |event| view! { <EventCard event=event /> }
                        />
                    </div>
                </div>
            </Show>
        </section>
    }
}

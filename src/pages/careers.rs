//! Careers Page
//!
//! Career events (server orders by date) with a type filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{EmptyState, ErrorBanner, EventCard, Spinner};
use crate::context::use_app_context;
use crate::models::Event;

/// Event type filter options
const EVENT_TYPES: &[(&str, &str)] = &[
    ("SEMINAR", "Seminars"),
    ("WORKSHOP", "Workshops"),
    ("COMPETITION", "Competitions"),
    ("WEBINAR", "Webinars"),
];

#[component]
pub fn CareersPage() -> impl IntoView {
    let ctx = use_app_context();
    let (filter, set_filter) = signal::<Option<String>>(None);
    let (events, set_events) = signal(Vec::<Event>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        let kind = filter.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::list_events(kind.as_deref()).await {
                Ok(found) => set_events.set(found),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <section class="page careers-page">
            <h1>"Career Events"</h1>

            <div class="event-filter">
                <button
                    class=move || if filter.get().is_none() { "filter-btn active" } else { "filter-btn" }
                    on:click=move |_| set_filter.set(None)
                >
                    "Upcoming"
                </button>
                {EVENT_TYPES.iter().map(|(value, label)| {
                    let val = value.to_string();
                    let val_clone = val.clone();
                    let is_selected = move || filter.get().as_deref() == Some(val.as_str());
                    view! {
                        <button
                            class=move || if is_selected() { "filter-btn active" } else { "filter-btn" }
                            on:click=move |_| set_filter.set(Some(val_clone.clone()))
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </div>

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || error.get().map(|err| view! {
                <ErrorBanner
                    message=err.to_string()
                    on_retry=move |_| set_retry.update(|v| *v += 1)
                />
            })}

            <Show when=move || !loading.get() && error.get().is_none()>
                <Show
                    when=move || !events.get().is_empty()
                    fallback=|| view! { <EmptyState message="No events scheduled." /> }
                >
                    <div class="event-grid">
                        <For
                            each=move || events.get()
                            key=|event| event.id
                            children=move |event| view! { <EventCard event=event /> }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}

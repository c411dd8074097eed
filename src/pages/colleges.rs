//! Colleges Page
//!
//! Searchable, paginated college directory (server orders by rating).

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{CollegeCard, EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::{College, Paginated};

#[component]
pub fn CollegesPage() -> impl IntoView {
    let ctx = use_app_context();
    let (search, set_search) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (colleges, set_colleges) = signal::<Option<Paginated<College>>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        let query = search.get();
        let current_page = page.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::list_colleges(query.trim(), current_page).await {
                Ok(result) => set_colleges.set(Some(result)),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <section class="page colleges-page">
            <h1>"Colleges"</h1>

            <input
                type="search"
                class="college-search"
                placeholder="Search by name or location..."
                prop:value=move || search.get()
                on:input=move |ev| {
                    set_search.set(event_target_value(&ev));
                    set_page.set(1);
                }
            />

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || error.get().map(|err| view! {
                <ErrorBanner
                    message=err.to_string()
                    on_retry=move |_| set_retry.update(|v| *v += 1)
                />
            })}

            {move || (!loading.get()).then(|| colleges.get()).flatten().map(|result| {
                if result.results.is_empty() {
                    return view! {
                        <EmptyState message="No colleges match your search." />
                    }.into_any();
                }

                let has_next = result.next.is_some();
                let has_previous = result.previous.is_some();

                view! {
                    <p class="result-count">{format!("{} colleges", result.count)}</p>
                    <div class="college-grid">
                        {result.results.iter().cloned().map(|college| view! {
                            <CollegeCard college=college />
                        }).collect_view()}
                    </div>

                    <div class="pager">
                        <button
                            class="pager-btn"
                            disabled=!has_previous
                            on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                        >
                            "Previous"
                        </button>
                        <button
                            class="pager-btn"
                            disabled=!has_next
                            on:click=move |_| set_page.update(|p| *p += 1)
                        >
                            "Next"
                        </button>
                    </div>
                }.into_any()
            })}
        </section>
    }
}

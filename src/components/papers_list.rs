//! Question Paper List Component
//!
//! Leaf of the question-papers section: past papers for the chosen
//! subject, newest year first (server ordering), with a year filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::QuestionPaper;

#[component]
pub fn PapersList(subject_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let (papers, set_papers) = signal(Vec::<QuestionPaper>::new());
    let (year_filter, set_year_filter) = signal::<Option<u16>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::papers_by_subject(subject_id).await {
                Ok(found) => set_papers.set(found),
                Err(ApiError::NotFound) => set_papers.set(Vec::new()),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    let years = Memo::new(move |_| {
        let mut years: Vec<u16> = papers.get().iter().map(|paper| paper.year).collect();
        years.sort_unstable();
        years.dedup();
        years.reverse();
        years
    });

    let visible = move || {
        let filter = year_filter.get();
        papers
            .get()
            .into_iter()
            .filter(|paper| filter.is_none_or(|year| paper.year == year))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="papers-list-container">
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
                <Show when=move || !years.get().is_empty()>
                    <div class="year-filter">
                        <button
                            class=move || if year_filter.get().is_none() { "year-btn active" } else { "year-btn" }
                            on:click=move |_| set_year_filter.set(None)
                        >
                            "All years"
                        </button>
                        {move || years.get().into_iter().map(|year| view! {
                            <button
                                class=move || if year_filter.get() == Some(year) { "year-btn active" } else { "year-btn" }
                                on:click=move |_| set_year_filter.set(Some(year))
                            >
                                {year}
                            </button>
                        }).collect_view()}
                    </div>
                </Show>

                <Show
                    when=move || !visible().is_empty()
                    fallback=|| view! {
                        <EmptyState message="No question papers available for this subject." />
                    }
                >
                    <ul class="papers-list">
                        <For
                            each=visible
                            key=|paper| paper.id.clone()
                            children=move |paper| {
                                let file = paper.file_url.clone();
                                view! {
                                    <li class="paper-card">
                                        <h3>{format!("{}, Semester {}", paper.year, paper.semester)}</h3>
                                        <div class="paper-meta">
                                            <span>{format!("{} views", paper.view_count)}</span>
                                            <span>{format!("{} downloads", paper.download_count)}</span>
                                        </div>
                                        {file.map(|path| view! {
                                            <button
                                                class="download-btn"
                                                on:click=move |_| {
                                                    if let Some(window) = web_sys::window() {
                                                        let _ = window.open_with_url(&api::media_url(&path));
                                                    }
                                                }
                                            >
                                                "Download PDF"
                                            </button>
                                        })}
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

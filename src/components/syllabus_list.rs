//! Syllabus List Component
//!
//! Leaf of the syllabus section: syllabus versions for the chosen
//! subject. The by-subject endpoint answers 404 when nothing is
//! uploaded, which renders as the empty state rather than an error.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::Syllabus;

#[component]
pub fn SyllabusList(subject_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let (entries, set_entries) = signal(Vec::<Syllabus>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::syllabus_by_subject(subject_id).await {
                Ok(found) => set_entries.set(found),
                Err(ApiError::NotFound) => set_entries.set(Vec::new()),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    let download = move |id: u32| {
        let ctx = ctx;
        spawn_local(async move {
            match api::syllabus_download_url(id).await {
                Ok(target) => {
                    let _ = api::syllabus_increment_download(id).await;
                    if let Some(window) = web_sys::window() {
                        let _ = window.open_with_url(&api::media_url(&target.url));
                    }
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    // Reading in the browser counts as a view; downloads are counted above
    let view_file = move |id: u32, file: Option<String>| {
        spawn_local(async move {
            let _ = api::syllabus_increment_view(id).await;
            if let (Some(path), Some(window)) = (file, web_sys::window()) {
                let _ = window.open_with_url(&api::media_url(&path));
            }
        });
    };

    view! {
        <div class="syllabus-list-container">
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
                    when=move || !entries.get().is_empty()
                    fallback=|| view! {
                        <EmptyState message="No syllabus found for this subject." />
                    }
                >
                    <ul class="syllabus-list">
                        <For
                            each=move || entries.get()
                            key=|entry| entry.id
                            children=move |entry| {
                                let id = entry.id;
                                let file = entry.file_url.clone();
                                view! {
                                    <li class="syllabus-card">
                                        <div class="syllabus-head">
                                            <h3>{format!("Version {}", entry.version)}</h3>
                                            <Show when={let current = entry.is_current; move || current}>
                                                <span class="current-badge">"Current"</span>
                                            </Show>
                                        </div>
                                        <p class="syllabus-description">{entry.description.clone()}</p>
                                        <div class="syllabus-meta">
                                            <span>{entry.upload_date.format("%b %d, %Y").to_string()}</span>
                                            <span>{format!("{} views", entry.view_count)}</span>
                                            <span>{format!("{} downloads", entry.download_count)}</span>
                                        </div>
                                        <div class="syllabus-actions">
                                            <button
                                                class="view-btn"
                                                on:click=move |_| view_file(id, file.clone())
                                            >
                                                "View"
                                            </button>
                                            <button
                                                class="download-btn"
                                                on:click=move |_| download(id)
                                            >
                                                "Download"
                                            </button>
                                        </div>
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

//! Notes List Component
//!
//! Leaf of the notes section: uploaded study documents for the chosen
//! subject, paginated ten per page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::{Note, Paginated};

fn open_media(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url(&api::media_url(path));
    }
}

#[component]
pub fn NotesList(subject_id: u32, semester: u8) -> impl IntoView {
    let ctx = use_app_context();
    let (page, set_page) = signal(1usize);
    let (notes, set_notes) = signal::<Option<Paginated<Note>>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        let current_page = page.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::list_notes(subject_id, semester, current_page).await {
                Ok(result) => set_notes.set(Some(result)),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="notes-list-container">
            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || error.get().map(|err| view! {
                <ErrorBanner
                    message=err.to_string()
                    on_retry=move |_| set_retry.update(|v| *v += 1)
                />
            })}

            {move || (!loading.get()).then(|| notes.get()).flatten().map(|result| {
                if result.results.is_empty() {
                    return view! {
                        <EmptyState message="No notes uploaded for this subject yet." />
                    }.into_any();
                }

                let has_next = result.next.is_some();
                let has_previous = result.previous.is_some();
                let count = result.count;

                view! {
                    <p class="result-count">{format!("{count} notes")}</p>
                    <ul class="notes-list">
                        {result.results.iter().map(|note| {
                            let file = note.file_url.clone();
                            view! {
                                <li class="note-card">
                                    <div class="note-head">
                                        <h3>{note.title.clone()}</h3>
                                        <Show when={let verified = note.is_verified; move || verified}>
                                            <span class="verified-badge">"Verified"</span>
                                        </Show>
                                    </div>
                                    <p class="note-description">{note.description.clone()}</p>
                                    <div class="note-meta">
                                        <span>{note.upload_date.format("%b %d, %Y").to_string()}</span>
                                        {note.uploaded_by_name.clone().map(|name| view! {
                                            <span class="note-uploader">{format!("by {name}")}</span>
                                        })}
                                    </div>
                                    {file.map(|path| view! {
                                        <button
                                            class="download-btn"
                                            on:click=move |_| open_media(&path)
                                        >
                                            "Download PDF"
                                        </button>
                                    })}
                                </li>
                            }
                        }).collect_view()}
                    </ul>

                    <div class="pager">
                        <button
                            class="pager-btn"
                            disabled=!has_previous
                            on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                        >
                            "Previous"
                        </button>
                        <span class="pager-page">{format!("Page {}", page.get_untracked())}</span>
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
        </div>
    }
}

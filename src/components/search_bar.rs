//! Navbar Search Component
//!
//! Cross-resource search box with a grouped dropdown (notes, subjects,
//! colleges). Each keystroke past two characters fires a fetch; the
//! dropdown closes on selection or when the field empties.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::models::SearchResults;

const MIN_QUERY_LEN: usize = 2;

#[component]
pub fn SearchBar() -> impl IntoView {
    let navigate = use_navigate();
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal::<Option<SearchResults>>(None);

    Effect::new(move |_| {
        let q = query.get();
        if q.trim().len() < MIN_QUERY_LEN {
            set_results.set(None);
            return;
        }
        spawn_local(async move {
            match api::search(q.trim()).await {
                // Keystrokes race; only keep the answer to the current text
                Ok(found) if found.query == query.get_untracked().trim() => {
                    set_results.set(Some(found));
                }
                _ => {}
            }
        });
    });

    let close = move || {
        set_query.set(String::new());
        set_results.set(None);
    };

    view! {
        <div class="search-bar">
            <input
                type="search"
                placeholder="Search notes, subjects, colleges..."
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />

            {move || results.get().map(|found| {
                if found.is_empty() {
                    return view! {
                        <div class="search-dropdown">
                            <p class="search-empty">"No results for \"" {found.query} "\""</p>
                        </div>
                    }.into_any();
                }

                let nav_subject = navigate.clone();
                let nav_college = navigate.clone();
                view! {
                    <div class="search-dropdown">
                        <Show when={let has = !found.notes.is_empty(); move || has}>
                            <p class="search-group-label">"Notes"</p>
                        </Show>
                        {found.notes.iter().map(|note| {
                            let title = note.title.clone();
                            let file = note.file_url.clone();
                            view! {
                                <button
                                    class="search-result"
                                    on:click=move |_| {
                                        if let Some(path) = &file {
                                            if let Some(window) = web_sys::window() {
                                                let _ = window.open_with_url(&api::media_url(path));
                                            }
                                        }
                                    }
                                >
                                    {title} <span class="search-meta">{note.subject_name.clone()}</span>
                                </button>
                            }
                        }).collect_view()}

                        <Show when={let has = !found.subjects.is_empty(); move || has}>
                            <p class="search-group-label">"Subjects"</p>
                        </Show>
                        {found.subjects.iter().map(|subject| {
                            let target = format!(
                                "/notes?program={}&semester={}&subject={}",
                                subject.program, subject.semester, subject.id
                            );
                            let nav = nav_subject.clone();
                            let label = format!("{} ({})", subject.name, subject.code);
                            view! {
                                <button
                                    class="search-result"
                                    on:click=move |_| nav(&target, Default::default())
                                >
                                    {label}
                                </button>
                            }
                        }).collect_view()}

                        <Show when={let has = !found.colleges.is_empty(); move || has}>
                            <p class="search-group-label">"Colleges"</p>
                        </Show>
                        {found.colleges.iter().map(|college| {
                            let target = format!("/colleges/{}", college.id);
                            let nav = nav_college.clone();
                            let name = college.name.clone();
                            view! {
                                <button
                                    class="search-result"
                                    on:click=move |_| nav(&target, Default::default())
                                >
                                    {name} <span class="search-meta">{college.location.clone()}</span>
                                </button>
                            }
                        }).collect_view()}

                        <button class="search-close" on:click=move |_| close()>"Close"</button>
                    </div>
                }.into_any()
            })}
        </div>
    }
}

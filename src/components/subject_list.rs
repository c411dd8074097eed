//! Subject List Component
//!
//! Third browse level: subjects of the chosen program and semester.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::Subject;

#[component]
pub fn SubjectList(
    program_id: u32,
    semester: u8,
    #[prop(into)] on_select: Callback<(u32, String)>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (subjects, set_subjects) = signal(Vec::<Subject>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::list_subjects(program_id, semester).await {
                Ok(page) => set_subjects.set(page.results),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="subject-list-container">
            <h2>{format!("Semester {semester} subjects")}</h2>

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
                    when=move || !subjects.get().is_empty()
                    fallback=|| view! {
                        <EmptyState message="No subjects listed for this semester yet." />
                    }
                >
                    <ul class="subject-list">
                        <For
                            each=move || subjects.get()
                            key=|subject| subject.id
                            children=move |subject| {
                                let id = subject.id;
                                let name = subject.name.clone();
                                let select_name = name.clone();
                                view! {
                                    <li>
                                        <button
                                            class="subject-row"
                                            on:click=move |_| on_select.run((id, select_name.clone()))
                                        >
                                            <span class="subject-code">{subject.code.clone()}</span>
                                            <span class="subject-name">{name}</span>
                                            <span class="subject-credits">
                                                {format!("{} cr", subject.credit_hours)}
                                            </span>
                                        </button>
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

//! Semester Grid Component
//!
//! Second browse level: the program's semesters with subject counts,
//! from `/api/programs/{id}/subjects/`. Also reports the program name
//! back up, for breadcrumbs on URLs restored without one.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::ProgramSubjects;

#[component]
pub fn SemesterGrid(
    program_id: u32,
    #[prop(into)] on_select: Callback<u8>,
    #[prop(into)] on_program_name: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (grouped, set_grouped) = signal::<Option<ProgramSubjects>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::program_subjects(program_id).await {
                Ok(payload) => {
                    on_program_name.run(payload.program.name.clone());
                    set_grouped.set(Some(payload));
                }
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="semester-grid-container">
            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || error.get().map(|err| view! {
                <ErrorBanner
                    message=err.to_string()
                    on_retry=move |_| set_retry.update(|v| *v += 1)
                />
            })}

            {move || grouped.get().map(|payload| {
                let total = (payload.program.duration_years as u8 * 2).min(crate::models::MAX_SEMESTER);
                let counts: Vec<(u8, usize)> = (1..=total)
                    .map(|semester| {
                        let count = payload
                            .semesters
                            .iter()
                            .find(|block| block.semester == semester)
                            .map(|block| block.subjects.len())
                            .unwrap_or(0);
                        (semester, count)
                    })
                    .collect();

                view! {
                    <h2>{format!("{}: pick a semester", payload.program.name)}</h2>
                    <div class="semester-grid">
                        {counts.into_iter().map(|(semester, count)| view! {
                            <button
                                class="semester-card"
                                on:click=move |_| on_select.run(semester)
                            >
                                <h3>{format!("Semester {semester}")}</h3>
                                <p class="subject-count">{format!("{count} subjects")}</p>
                            </button>
                        }).collect_view()}
                    </div>
                }
            })}
        </div>
    }
}

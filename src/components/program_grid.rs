//! Program Grid Component
//!
//! Top browse level: one card per active degree program.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::Program;

#[component]
pub fn ProgramGrid(#[prop(into)] on_select: Callback<(u32, String)>) -> impl IntoView {
    let ctx = use_app_context();
    let (programs, set_programs) = signal(Vec::<Program>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::list_programs().await {
                Ok(page) => set_programs.set(page.results),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="program-grid-container">
            <h2>"Choose your program"</h2>

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
                    when=move || !programs.get().is_empty()
                    fallback=|| view! { <EmptyState message="No programs available yet." /> }
                >
                    <div class="program-grid">
                        <For
                            each=move || programs.get()
                            key=|program| program.id
                            children=move |program| {
                                let id = program.id;
                                let name = program.name.clone();
                                let select_name = name.clone();
                                view! {
                                    <button
                                        class="program-card"
                                        on:click=move |_| on_select.run((id, select_name.clone()))
                                    >
                                        <h3>{name}</h3>
                                        <p class="program-duration">
                                            {format!("{} years", program.duration_years)}
                                        </p>
                                        <p class="program-description">{program.description.clone()}</p>
                                    </button>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

//! College Detail Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::api::{self, ApiError};
use crate::components::{ErrorBanner, Spinner};
use crate::markdown::parse_markdown;
use crate::models::College;

#[component]
pub fn CollegeDetailPage() -> impl IntoView {
    let params = use_params_map();
    let (college, set_college) = signal::<Option<College>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    Effect::new(move |_| {
        let _ = retry.get();
        let id = params.get().get("id").and_then(|raw| raw.parse::<u32>().ok());
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match id {
                Some(id) => match api::college_detail(id).await {
                    Ok(found) => set_college.set(Some(found)),
                    Err(err) => set_error.set(Some(err)),
                },
                None => set_error.set(Some(ApiError::NotFound)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <section class="page college-detail-page">
            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || error.get().map(|err| view! {
                <ErrorBanner
                    message=err.to_string()
                    on_retry=move |_| set_retry.update(|v| *v += 1)
                />
            })}

            {move || college.get().map(|college| {
                let description = parse_markdown(&college.description);
                view! {
                    <header class="college-detail-head">
                        <h1>{college.name.clone()}</h1>
                        <p class="college-location">
                            {format!("{}, {}", college.location, college.address)}
                        </p>
                        <div class="college-facts">
                            {college.established_year.map(|year| view! {
                                <span>{format!("Established {year}")}</span>
                            })}
                            <span>{college.institution_type.clone()}</span>
                            <span>{format!("Rating {:.1} / 5", college.rating)}</span>
                            <Show when={let s = college.scholarships_available; move || s}>
                                <span class="scholarship-badge">"Scholarships available"</span>
                            </Show>
                        </div>
                    </header>

                    <div class="college-description" inner_html=description></div>

                    <div class="college-columns">
                        <div class="college-column">
                            <h2>"Courses offered"</h2>
                            <ul>
                                {college.courses_offered.iter().map(|course| view! {
                                    <li>{course.clone()}</li>
                                }).collect_view()}
                            </ul>
                        </div>
                        <div class="college-column">
                            <h2>"Facilities"</h2>
                            <ul>
                                {college.facilities.iter().map(|facility| view! {
                                    <li>{facility.clone()}</li>
                                }).collect_view()}
                            </ul>
                        </div>
                    </div>

                    <div class="college-contact">
                        <h2>"Contact"</h2>
                        <p>{college.contact.clone()}</p>
                        <p>{college.email.clone()}</p>
                        <a href=college.website.clone() target="_blank">{college.website.clone()}</a>
                        <p class="college-affiliation">
                            {format!("{} · {}", college.affiliation, college.accreditation)}
                        </p>
                    </div>
                }
            })}
        </section>
    }
}

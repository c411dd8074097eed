//! Profile Page
//!
//! View and edit the logged-in user's profile, plus a change-password
//! form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use serde_json::json;

use crate::api::{self, ApiError, PasswordChange};
use crate::components::{EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::User;
use crate::session;
use crate::store::store_set_user;

#[component]
pub fn ProfilePage() -> impl IntoView {
    if session::access_token().is_none() {
        return view! {
            <section class="page profile-page">
                <EmptyState message="Log in to see your profile." />
                <A href="/login" attr:class="login-link">"Go to login"</A>
            </section>
        }
        .into_any();
    }

    let ctx = use_app_context();
    let (user, set_user) = signal::<Option<User>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (college, set_college) = signal(String::new());
    let (semester, set_semester) = signal(String::new());
    let (bio, set_bio) = signal(String::new());

    let (old_password, set_old_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());

    Effect::new(move |_| {
        let _ = retry.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::profile().await {
                Ok(profile) => {
                    set_first_name.set(profile.first_name.clone());
                    set_last_name.set(profile.last_name.clone());
                    set_phone.set(profile.phone_number.clone().unwrap_or_default());
                    set_college.set(profile.college.clone().unwrap_or_default());
                    set_semester.set(
                        profile.semester.map(|s| s.to_string()).unwrap_or_default(),
                    );
                    set_bio.set(profile.bio.clone());
                    set_user.set(Some(profile));
                }
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let semester_value = semester.get();
        let semester_num = semester_value.trim().parse::<u8>().ok();
        if !semester_value.trim().is_empty() && semester_num.is_none() {
            ctx.toast_error("Semester must be a number between 1 and 8.");
            return;
        }
        let patch = json!({
            "first_name": first_name.get().trim(),
            "last_name": last_name.get().trim(),
            "phone_number": phone.get().trim(),
            "college": college.get().trim(),
            "semester": semester_num,
            "bio": bio.get(),
        });
        spawn_local(async move {
            match api::update_profile(&patch).await {
                Ok(updated) => {
                    store_set_user(&ctx.store, updated.clone());
                    set_user.set(Some(updated));
                    ctx.toast_success("Profile updated.");
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    let change_password = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let change = PasswordChange {
            old_password: old_password.get(),
            new_password: new_password.get(),
        };
        if change.old_password.is_empty() || change.new_password.is_empty() {
            ctx.toast_error("Enter your current and new password.");
            return;
        }
        spawn_local(async move {
            match api::change_password(&change).await {
                Ok(_) => {
                    ctx.toast_success("Password changed.");
                    set_old_password.set(String::new());
                    set_new_password.set(String::new());
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    view! {
        <section class="page profile-page">
            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || error.get().map(|err| view! {
                <ErrorBanner
                    message=err.to_string()
                    on_retry=move |_| set_retry.update(|v| *v += 1)
                />
            })}

            {move || user.get().map(|profile| view! {
                <header class="profile-head">
                    <h1>{profile.display_name()}</h1>
                    <p class="profile-email">{profile.email.clone()}</p>
                    <Show when={let verified = profile.is_verified; move || verified}>
                        <span class="verified-badge">"Verified"</span>
                    </Show>
                </header>

                <form class="profile-form" on:submit=save>
                    <div class="name-row">
                        <label>
                            "First name"
                            <input
                                type="text"
                                prop:value=move || first_name.get()
                                on:input=move |ev| set_first_name.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Last name"
                            <input
                                type="text"
                                prop:value=move || last_name.get()
                                on:input=move |ev| set_last_name.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <label>
                        "Phone"
                        <input
                            type="tel"
                            prop:value=move || phone.get()
                            on:input=move |ev| set_phone.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "College"
                        <input
                            type="text"
                            prop:value=move || college.get()
                            on:input=move |ev| set_college.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Semester"
                        <input
                            type="number"
                            min="1"
                            max="8"
                            prop:value=move || semester.get()
                            on:input=move |ev| set_semester.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Bio"
                        <textarea
                            prop:value=move || bio.get()
                            on:input=move |ev| set_bio.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <button type="submit">"Save profile"</button>
                </form>

                <form class="password-form" on:submit=change_password>
                    <h2>"Change password"</h2>
                    <label>
                        "Current password"
                        <input
                            type="password"
                            prop:value=move || old_password.get()
                            on:input=move |ev| set_old_password.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "New password"
                        <input
                            type="password"
                            prop:value=move || new_password.get()
                            on:input=move |ev| set_new_password.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit">"Change password"</button>
                </form>
            })}
        </section>
    }
    .into_any()
}

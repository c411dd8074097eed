//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::context::use_app_context;
use crate::session;
use crate::store::store_set_user;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get();
        let password_value = password.get();
        if email_value.trim().is_empty() || password_value.is_empty() {
            ctx.toast_error("Enter your email and password.");
            return;
        }
        set_busy.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::obtain_token(email_value.trim(), &password_value).await {
                Ok(pair) => {
                    session::store_tokens(&pair.access, &pair.refresh);
                    match api::profile().await {
                        Ok(user) => {
                            ctx.toast_success(format!("Welcome back, {}!", user.display_name()));
                            store_set_user(&ctx.store, user);
                        }
                        Err(err) => ctx.toast_error(err.to_string()),
                    }
                    navigate("/", Default::default());
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="page auth-page">
            <h1>"Login"</h1>
            <form class="auth-form" on:submit=submit>
                <label>
                    "Email"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="auth-switch">
                "No account yet? " <A href="/register">"Register"</A>
            </p>
        </section>
    }
}

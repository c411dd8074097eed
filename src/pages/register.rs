//! Register Page
//!
//! Two-step flow: the registration form sends an OTP to the email, the
//! second step verifies the six-digit code and returns a token pair.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{self, RegisterForm};
use crate::context::use_app_context;
use crate::session;
use crate::store::store_set_user;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    Form,
    Otp,
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();
    let (step, set_step) = signal(Step::Form);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (otp, set_otp) = signal(String::new());
    let (busy, set_busy) = signal(false);

    // Callbacks so the step-switching view closure below stays Fn
    let submit_form = Callback::new(move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            username: username.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
        };
        if form.username.is_empty() || form.email.is_empty() || form.password.is_empty() {
            ctx.toast_error("Username, email and password are required.");
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api::register(&form).await {
                Ok(_) => {
                    ctx.toast_success("Check your email for the verification code.");
                    set_step.set(Step::Otp);
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
            set_busy.set(false);
        });
    });

    let submit_otp = Callback::new(move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get().trim().to_string();
        let code = otp.get().trim().to_string();
        if code.len() != 6 {
            ctx.toast_error("The verification code is six digits.");
            return;
        }
        set_busy.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::verify_otp(&email_value, &code).await {
                Ok(pair) => {
                    session::store_tokens(&pair.access, &pair.refresh);
                    if let Ok(user) = api::profile().await {
                        store_set_user(&ctx.store, user);
                    }
                    ctx.toast_success("Account verified. Welcome!");
                    navigate("/", Default::default());
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
            set_busy.set(false);
        });
    });

    let resend = Callback::new(move |_: ()| {
        let email_value = email.get().trim().to_string();
        spawn_local(async move {
            match api::resend_otp(&email_value).await {
                Ok(_) => ctx.toast_success("A new code is on its way."),
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    });

    view! {
        <section class="page auth-page">
            <h1>"Register"</h1>

            {move || match step.get() {
                Step::Form => view! {
                    <form class="auth-form" on:submit=move |ev| submit_form.run(ev)>
                        <label>
                            "Username"
                            <input
                                type="text"
                                prop:value=move || username.get()
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                            />
                        </label>
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
                        <button type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Sending code..." } else { "Register" }}
                        </button>
                    </form>
                }.into_any(),
                Step::Otp => view! {
                    <form class="auth-form" on:submit=move |ev| submit_otp.run(ev)>
                        <p>{move || format!("Enter the six-digit code sent to {}", email.get())}</p>
                        <input
                            type="text"
                            class="otp-input"
                            maxlength="6"
                            inputmode="numeric"
                            prop:value=move || otp.get()
                            on:input=move |ev| set_otp.set(event_target_value(&ev))
                        />
                        <button type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Verifying..." } else { "Verify" }}
                        </button>
                        <button type="button" class="resend-btn" on:click=move |_| resend.run(())>
                            "Resend code"
                        </button>
                    </form>
                }.into_any(),
            }}
        </section>
    }
}

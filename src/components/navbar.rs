//! Navbar Component
//!
//! Top navigation: section links, the search box, and the auth corner
//! (login link or user name + logout).

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::SearchBar;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let user = ctx.store.user();

    view! {
        <nav class="navbar">
            <A href="/" attr:class="brand">"StudyHall"</A>

            <div class="nav-links">
                <A href="/notes">"Notes"</A>
                <A href="/syllabus">"Syllabus"</A>
                <A href="/question-papers">"Question Papers"</A>
                <A href="/colleges">"Colleges"</A>
                <A href="/careers">"Careers"</A>
                <A href="/gpa">"GPA Calculator"</A>
                <A href="/todos">"To-Do"</A>
            </div>

            <SearchBar />

            <div class="nav-auth">
                {move || match user.get() {
                    Some(current) => view! {
                        <A href="/profile" attr:class="nav-user">{current.display_name()}</A>
                        <button class="logout-btn" on:click=move |_| ctx.logout()>
                            "Logout"
                        </button>
                    }.into_any(),
                    None => view! {
                        <A href="/login" attr:class="login-link">"Login"</A>
                        <A href="/register" attr:class="register-link">"Register"</A>
                    }.into_any(),
                }}
            </div>
        </nav>
    }
}

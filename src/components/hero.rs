//! Hero Component
//!
//! Landing banner with the section shortcuts.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <header class="hero">
            <h1>"Everything for your semester, in one place"</h1>
            <p class="hero-subtitle">
                "Notes, syllabi and past question papers for every program, "
                "plus colleges, career events and study tools."
            </p>
            <div class="hero-actions">
                <A href="/notes" attr:class="hero-cta">"Browse notes"</A>
                <A href="/question-papers" attr:class="hero-cta secondary">"Past papers"</A>
            </div>
        </header>
    }
}

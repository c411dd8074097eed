//! Notes Page

use leptos::prelude::*;

use crate::components::{Section, SectionBrowser};

#[component]
pub fn NotesPage() -> impl IntoView {
    view! {
        <section class="page notes-page">
            <SectionBrowser section=Section::Notes />
        </section>
    }
}

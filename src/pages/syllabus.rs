//! Syllabus Page

use leptos::prelude::*;

use crate::components::{Section, SectionBrowser};

#[component]
pub fn SyllabusPage() -> impl IntoView {
    view! {
        <section class="page syllabus-page">
            <SectionBrowser section=Section::Syllabus />
        </section>
    }
}

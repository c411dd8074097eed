//! Question Papers Page

use leptos::prelude::*;

use crate::components::{Section, SectionBrowser};

#[component]
pub fn QuestionPapersPage() -> impl IntoView {
    view! {
        <section class="page papers-page">
            <SectionBrowser section=Section::Papers />
        </section>
    }
}

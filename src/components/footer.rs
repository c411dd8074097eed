//! Footer Component

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="footer-links">
                <A href="/notes">"Notes"</A>
                <A href="/syllabus">"Syllabus"</A>
                <A href="/colleges">"Colleges"</A>
                <A href="/careers">"Careers"</A>
            </div>
            <p class="footer-note">"StudyHall - a student portal."</p>
        </footer>
    }
}

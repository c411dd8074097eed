//! Loading Spinner Component

use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <div class="spinner-circle"></div>
            <span class="spinner-label">"Loading..."</span>
        </div>
    }
}

//! Empty State Component
//!
//! Shown when a fetch succeeds but the result set is empty.

use leptos::prelude::*;

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="empty-state">
            <span class="empty-icon">"📭"</span>
            <p class="empty-message">{message}</p>
        </div>
    }
}

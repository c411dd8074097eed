//! Toast Stack Component
//!
//! Fixed-position stack of transient messages. Toasts are pushed
//! through `AppContext` which also schedules their auto-dismiss; the
//! close button dismisses early.

use leptos::prelude::*;

use crate::store::{store_remove_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class()>
                            <span class="toast-message">{toast.message.clone()}</span>
                            <button
                                class="toast-close"
                                on:click=move |_| store_remove_toast(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

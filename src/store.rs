//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity: the logged
//! in user for the navbar and the toast stack.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::User;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Profile of the logged in user, None when logged out
    pub user: Option<User>,
    /// Active toasts, newest last
    pub toasts: Vec<Toast>,
    /// Monotonic toast id source
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Push a toast and return its id for later dismissal
pub fn store_push_toast(store: &AppStore, kind: ToastKind, message: String) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id + 1);
    store.toasts().write().push(Toast { id, kind, message });
    id
}

/// Remove a toast by id (no-op if already dismissed)
pub fn store_remove_toast(store: &AppStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}

pub fn store_set_user(store: &AppStore, user: User) {
    store.user().set(Some(user));
}

pub fn store_clear_user(store: &AppStore) {
    store.user().set(None);
}

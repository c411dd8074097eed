//! Application Context
//!
//! Shared signals and helpers provided via the Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session;
use crate::store::{
    store_clear_user, store_push_toast, store_remove_toast, AppStore, ToastKind,
};

/// How long a toast stays up
const TOAST_MS: u32 = 4000;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    /// Bumped to make the current page re-run its fetches
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(store: AppStore, reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            store,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Re-run the current page's fetches
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn toast_success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message.into());
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message.into());
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let store = self.store;
        let id = store_push_toast(&store, kind, message);
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            store_remove_toast(&store, id);
        });
    }

    /// Drop the stored tokens and the in-memory user
    pub fn logout(&self) {
        session::clear_tokens();
        store_clear_user(&self.store);
        self.toast_success("Logged out.");
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

//! Browser Storage
//!
//! Token pair in localStorage (survives the tab), browse state in
//! sessionStorage (per tab, restored when a section URL arrives without
//! query parameters). All helpers swallow storage failures; a blocked
//! storage API degrades to logged-out, never to a panic.

use crate::browse::{storage_key, BrowseState};

const ACCESS_KEY: &str = "studyhall.access";
const REFRESH_KEY: &str = "studyhall.refresh";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok()?
}

pub fn access_token() -> Option<String> {
    local_storage()?.get_item(ACCESS_KEY).ok()?
}

pub fn refresh_token() -> Option<String> {
    local_storage()?.get_item(REFRESH_KEY).ok()?
}

pub fn store_tokens(access: &str, refresh: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(ACCESS_KEY, access);
        let _ = storage.set_item(REFRESH_KEY, refresh);
    }
}

pub fn clear_tokens() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_KEY);
        let _ = storage.remove_item(REFRESH_KEY);
    }
}

pub fn save_browse(section: &str, state: &BrowseState) {
    if let (Some(storage), Ok(json)) = (session_storage(), serde_json::to_string(state)) {
        let _ = storage.set_item(&storage_key(section), &json);
    }
}

pub fn load_browse(section: &str) -> Option<BrowseState> {
    let raw = session_storage()?.get_item(&storage_key(section)).ok()??;
    serde_json::from_str(&raw).ok()
}

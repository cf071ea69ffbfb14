//! Browser address bar and `localStorage`.

use crate::location::LocationBar;
use crate::storage::{KeyValueStore, StorageError};
use tracing::warn;
use wasm_bindgen::JsValue;

/// `window.location` and `window.history` of the current page.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLocationBar;

impl LocationBar for BrowserLocationBar {
    fn query(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default()
    }

    fn replace_query(&mut self, query: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let url = if query.is_empty() {
            window.location().pathname().unwrap_or_else(|_| "/".to_string())
        } else {
            format!("?{query}")
        };

        let result = window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(url.as_str())));
        if let Err(e) = result {
            warn!(error = ?e, "Failed to replace URL");
        }
    }
}

/// `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// The page's local storage, if the browser grants access.
    pub fn open() -> Result<Self, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .map(|storage| Self { storage })
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

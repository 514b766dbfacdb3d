#![forbid(unsafe_code)]

//! `window.localStorage` as a [`KeyValueStore`].

use sambut_core::{KeyValueStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Origin-scoped browser storage.
///
/// Construction never fails: when storage is disabled (privacy mode, sandboxed
/// iframe) every read reports absence through the adapter and every write
/// returns [`StorageError::Unavailable`].
pub(crate) struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub(crate) fn from_window(window: &web_sys::Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(error = %js_error_text(&err), "localStorage access denied");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> StorageResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("window.localStorage is not available".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn name(&self) -> &str {
        "LocalStorageStore"
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Backend(js_error_text(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(js_error_text(&err)))
    }
}

/// Best-effort text for a thrown JS value (`DOMException` message or its
/// string form).
pub(crate) fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

//! Browser backends for the persistence adapter.

use visua11y_core::{KeyValueStore, Persistence, StorageError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::cookies::{get_cookie, set_cookie};
use crate::dom::{js_error_message, window};

fn backend(err: &JsValue) -> StorageError {
    StorageError::Backend(js_error_message(err))
}

/// `window.localStorage`, looked up on every access so a store revoked
/// mid-session fails cleanly.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, StorageError> {
        window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|err| backend(&err))?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(|err| backend(&err))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| backend(&err))
    }
}

/// `document.cookie` under the same key.
#[derive(Debug, Default, Clone, Copy)]
pub struct CookieStore;

impl KeyValueStore for CookieStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = get_cookie(key).map_err(|err| StorageError::Backend(err.to_string()))?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        set_cookie(key, value, None).map_err(|err| StorageError::Backend(err.to_string()))
    }
}

pub type BrowserPersistence = Persistence<LocalStore, CookieStore>;

/// localStorage first, cookies when it fails.
#[must_use]
pub const fn browser_persistence() -> BrowserPersistence {
    Persistence::new(LocalStore, CookieStore)
}

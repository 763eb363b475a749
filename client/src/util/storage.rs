//! `localStorage` adapter for the core's [`LocalStore`] seam.
//!
//! Outside the browser there is no storage: reads miss and writes fail with
//! [`SyncError::Storage`], the same as a browser with storage disabled.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use pocketbook::SyncError;
use pocketbook::platform::LocalStore;

/// The window's `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocalStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    match web_sys::window()?.local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("localStorage unavailable: {err:?}");
            None
        }
    }
}

impl LocalStore for BrowserLocalStore {
    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            match local_storage()?.get_item(key) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("localStorage read of {key} failed: {err:?}");
                    None
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SyncError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or_else(|| SyncError::Storage("localStorage unavailable".to_owned()))?;
            storage
                .set_item(key, value)
                .map_err(|err| SyncError::Storage(format!("write of {key} failed: {err:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(SyncError::Storage(format!("no localStorage for {key}={value}")))
        }
    }
}

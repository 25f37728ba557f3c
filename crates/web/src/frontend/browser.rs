//! Browser implementations of the storage and navigation seams.

use std::rc::Rc;

use skincart_auth::{Navigator, Storage, StorageError};

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::local()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors surface here.
        Self::local()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::local()?
            .remove_item(key)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

/// In-app routes go through the router; external URLs replace the page.
#[derive(Clone)]
pub struct BrowserNavigator {
    route: Rc<dyn Fn(&str)>,
}

impl BrowserNavigator {
    pub fn new(route: impl Fn(&str) + 'static) -> Self {
        Self { route: Rc::new(route) }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        (self.route)(path)
    }

    fn redirect_external(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            tracing::error!(%url, "no window to redirect");
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            tracing::error!(%url, "redirect failed: {e:?}");
        }
    }
}

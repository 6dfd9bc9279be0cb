// ============================================================================
// TOKEN STORE - Persisted bearer token (one raw string, well-known key)
// ============================================================================

use std::cell::RefCell;

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), String>;
    fn clear(&self);
}

/// `localStorage["accessToken"]`, stored raw (not JSON-quoted)
#[cfg(target_arch = "wasm32")]
pub struct LocalTokenStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalTokenStore {
    pub fn new() -> Self {
        Self {
            key: crate::utils::TOKEN_STORAGE_KEY,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .get_item(self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .set_item(self.key, token)
            .map_err(|e| format!("Error saving token to localStorage: {:?}", e))
    }

    fn clear(&self) {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::delete(self.key);
    }
}

/// In-memory store for tests and storage-less environments
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), String> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());
        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));
        store.clear();
        assert!(store.load().is_none());
    }
}

//! Persisted session credential.
//!
//! The access token lives under a single fixed key. Its presence at
//! startup is the only signal that a previous sign-in is still valid.

mod storage;
mod token;

use std::path::PathBuf;
use std::sync::Arc;

pub use storage::{FileStorage, MemoryStorage, StorageError, TokenStorage};
pub use token::AccessToken;

/// Storage key holding the bearer credential.
pub const TOKEN_KEY: &str = "access_token";

/// Shared handle over the token storage backend.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn TokenStorage>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn TokenStorage>) -> Self {
        Self { backend }
    }

    /// Token store persisted to a TOML file at `path`.
    pub fn file(path: PathBuf) -> Self {
        Self::new(Arc::new(FileStorage::new(path)))
    }

    /// Token store that forgets everything when dropped.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Current token, if any.
    ///
    /// Read failures are logged and treated as "no token" so that a corrupt
    /// session file degrades to a signed-out state.
    pub fn get(&self) -> Option<AccessToken> {
        match self.backend.read(TOKEN_KEY) {
            Ok(value) => value.and_then(AccessToken::new),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    pub fn set(&self, token: &AccessToken) -> Result<(), StorageError> {
        self.backend.write(TOKEN_KEY, token.expose())?;
        tracing::debug!("Session token stored");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(TOKEN_KEY)?;
        tracing::debug!("Session token cleared");
        Ok(())
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("present", &self.is_present())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_token() {
        let store = TokenStore::memory();
        assert!(!store.is_present());
        assert!(store.get().is_none());
    }

    #[test]
    fn set_and_clear() {
        let store = TokenStore::memory();
        let token = AccessToken::new("tok").unwrap();

        store.set(&token).unwrap();
        assert_eq!(store.get(), Some(token));

        store.clear().unwrap();
        assert!(!store.is_present());
    }

    #[test]
    fn blank_stored_value_counts_as_absent() {
        let backend = Arc::new(MemoryStorage::new());
        backend.write(TOKEN_KEY, "").unwrap();
        let store = TokenStore::new(backend);
        assert!(!store.is_present());
    }
}

//! Durable persistence of the logged-in identity and its token.
//!
//! # Invariant
//! Identity and token are written together and read together. A storage
//! holding only one of them reads back as "no session"; nothing repairs it.

use skincart_core::{Identity, Role, SessionToken};

use crate::storage::{Storage, StorageError};

/// Storage keys shared with the backend's OAuth redirect and older clients.
pub mod keys {
    pub const TOKEN: &str = "jwtToken";
    pub const ROLE: &str = "userRole";
    pub const EMAIL: &str = "userEmail";
    pub const NAME: &str = "userName";
    pub const USER_ID: &str = "userID";
    pub const USER: &str = "user";

    pub const ALL: [&str; 6] = [TOKEN, ROLE, EMAIL, NAME, USER_ID, USER];
}

/// An identity together with the token that authenticates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub identity: Identity,
    pub token: SessionToken,
}

#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted session, if a complete one exists.
    pub fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        let token = self.non_empty(keys::TOKEN)?;
        let identity = self.load_identity()?;

        match (token, identity) {
            (Some(token), Some(identity)) => Ok(Some(StoredSession {
                identity,
                token: SessionToken::new(token),
            })),
            (None, None) => Ok(None),
            (Some(_), None) => {
                tracing::warn!("session token present without identity; treating as logged out");
                Ok(None)
            }
            (None, Some(_)) => {
                tracing::warn!("identity present without session token; treating as logged out");
                Ok(None)
            }
        }
    }

    /// Persist identity and token under every session key.
    ///
    /// If any write fails the keys written so far are removed again so the
    /// store never holds half a session.
    pub fn save(&self, identity: &Identity, token: &SessionToken) -> Result<(), StorageError> {
        let result = self.write_all(identity, token);
        if let Err(e) = &result {
            tracing::error!("failed to persist session: {e}");
            if let Err(clear_err) = self.clear() {
                tracing::error!("failed to roll back partial session: {clear_err}");
            }
        }
        result
    }

    /// Remove every session key.
    pub fn clear(&self) -> Result<(), StorageError> {
        for key in keys::ALL {
            self.storage.remove(key)?;
        }
        Ok(())
    }

    fn write_all(&self, identity: &Identity, token: &SessionToken) -> Result<(), StorageError> {
        let blob = serde_json::to_string(identity).map_err(|e| StorageError::Write {
            key: keys::USER.to_string(),
            reason: e.to_string(),
        })?;

        self.storage.set(keys::TOKEN, token.as_str())?;
        self.storage.set(keys::ROLE, identity.role.as_str())?;
        self.storage.set(keys::EMAIL, &identity.email)?;
        self.storage.set(keys::NAME, &identity.display_name)?;
        match &identity.id {
            Some(id) => self.storage.set(keys::USER_ID, id.as_str())?,
            None => self.storage.remove(keys::USER_ID)?,
        }
        self.storage.set(keys::USER, &blob)?;
        Ok(())
    }

    /// Prefer the JSON blob; fall back to the flat keys written by
    /// clients that predate it.
    fn load_identity(&self) -> Result<Option<Identity>, StorageError> {
        if let Some(blob) = self.non_empty(keys::USER)? {
            return match serde_json::from_str::<Identity>(&blob) {
                Ok(identity) => Ok(Some(identity)),
                Err(e) => {
                    tracing::warn!("ignoring corrupt '{}' entry: {e}", keys::USER);
                    Ok(None)
                }
            };
        }

        let (Some(name), Some(role)) = (self.non_empty(keys::NAME)?, self.non_empty(keys::ROLE)?)
        else {
            return Ok(None);
        };

        let email = self.non_empty(keys::EMAIL)?.unwrap_or_default();
        let mut identity = Identity::new(name, email, Role::parse_lenient(&role));
        if let Some(id) = self.non_empty(keys::USER_ID)? {
            identity.id = id.parse().ok();
        }
        Ok(Some(identity))
    }

    fn non_empty(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.storage.get(key)?.filter(|v| !v.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn alice() -> Identity {
        Identity::new("Alice", "alice@example.com", Role::Customer).with_id("u-1".parse().unwrap())
    }

    #[test]
    fn save_then_load_returns_same_session() {
        let store = SessionStore::new(MemoryStorage::new());
        let token = SessionToken::new("jwt-abc");
        store.save(&alice(), &token).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.identity, alice());
        assert_eq!(loaded.token, token);
        assert_eq!(store.storage().get(keys::ROLE).unwrap().as_deref(), Some("CUSTOMER"));
        assert_eq!(store.storage().get(keys::USER_ID).unwrap().as_deref(), Some("u-1"));
    }

    #[test]
    fn empty_storage_has_no_session() {
        let store = SessionStore::new(MemoryStorage::new());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn token_without_identity_is_no_session() {
        let storage = MemoryStorage::new();
        storage.set(keys::TOKEN, "jwt").unwrap();
        let store = SessionStore::new(storage.clone());
        assert_eq!(store.load().unwrap(), None);
        // Not repaired.
        assert!(storage.contains(keys::TOKEN));
    }

    #[test]
    fn identity_without_token_is_no_session() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.save(&alice(), &SessionToken::new("jwt")).unwrap();
        storage.remove(keys::TOKEN).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn flat_keys_are_enough_without_blob() {
        let storage = MemoryStorage::new();
        storage.set(keys::TOKEN, "jwt").unwrap();
        storage.set(keys::ROLE, "STAFF").unwrap();
        storage.set(keys::NAME, "Sam").unwrap();
        storage.set(keys::EMAIL, "sam@example.com").unwrap();

        let session = SessionStore::new(storage).load().unwrap().unwrap();
        assert_eq!(session.identity.role, Role::Staff);
        assert_eq!(session.identity.display_name, "Sam");
        assert!(session.identity.id.is_none());
    }

    #[test]
    fn corrupt_blob_reads_as_logged_out() {
        let storage = MemoryStorage::new();
        storage.set(keys::TOKEN, "jwt").unwrap();
        storage.set(keys::USER, "{not json").unwrap();
        assert_eq!(SessionStore::new(storage).load().unwrap(), None);
    }

    #[test]
    fn clear_removes_every_key() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.save(&alice(), &SessionToken::new("jwt")).unwrap();
        store.clear().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn failed_write_leaves_no_partial_session() {
        struct FailingUserKey(MemoryStorage);

        impl Storage for FailingUserKey {
            fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
                self.0.get(key)
            }

            fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
                if key == keys::USER {
                    return Err(StorageError::Write {
                        key: key.to_string(),
                        reason: "quota exceeded".to_string(),
                    });
                }
                self.0.set(key, value)
            }

            fn remove(&self, key: &str) -> Result<(), StorageError> {
                self.0.remove(key)
            }
        }

        let inner = MemoryStorage::new();
        let store = SessionStore::new(FailingUserKey(inner.clone()));
        let err = store.save(&alice(), &SessionToken::new("jwt")).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(inner.is_empty());
    }
}

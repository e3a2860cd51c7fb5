//! Remembered-credential store
//!
//! Keeps the "remember password" blob from the login form together with a
//! standalone auth token. Independent from [`SessionStore`](crate::SessionStore);
//! deployments pick one of the two as the client's [`TokenSource`].

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persist::{hydrate, persist};
use crate::storage::StorageAdapter;
use crate::token::TokenSource;

/// Storage key of the credential store
pub const CREDENTIAL_STORE_KEY: &str = "accountAndPassword";

/// Persisted shape of the credential store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialState {
    /// Remembered password blob, opaque to this layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Remembered-credential store
pub struct CredentialStore {
    storage: Arc<dyn StorageAdapter>,
    state: RwLock<CredentialState>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        let state = hydrate(storage.as_ref(), CREDENTIAL_STORE_KEY);
        Self {
            storage,
            state: RwLock::new(state),
        }
    }

    pub fn snapshot(&self) -> CredentialState {
        self.state.read().clone()
    }

    /// Remembered password blob, `None` when "remember me" is off
    pub fn remembered_password(&self) -> Option<Value> {
        self.state.read().profile.clone()
    }

    pub fn set_password(&self, value: Value) {
        self.mutate(|s| s.profile = Some(value));
    }

    pub fn clear_password(&self) {
        self.mutate(|s| s.profile = None);
    }

    pub fn get_token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.mutate(|s| s.token = Some(token));
    }

    pub fn clear_token(&self) {
        self.mutate(|s| s.token = None);
    }

    fn mutate(&self, f: impl FnOnce(&mut CredentialState)) {
        let mut state = self.state.write();
        f(&mut *state);
        persist(self.storage.as_ref(), CREDENTIAL_STORE_KEY, &*state);
    }
}

impl TokenSource for CredentialStore {
    fn token(&self) -> Option<String> {
        self.get_token().filter(|t| !t.is_empty())
    }

    fn invalidate(&self) {
        log::info!("Credentials invalidated, clearing token and remembered password");
        self.mutate(|s| {
            s.token = None;
            s.profile = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn stored(storage: &MemoryStorage) -> Option<Value> {
        storage
            .get_item(CREDENTIAL_STORE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    #[test]
    fn password_set_get_clear() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CredentialStore::new(storage.clone());
        let blob = json!({"username": "ann", "password": "secret"});

        store.set_password(blob.clone());
        assert_eq!(store.remembered_password(), Some(blob.clone()));
        assert_eq!(stored(&storage), Some(json!({"profile": blob})));

        store.clear_password();
        assert!(store.remembered_password().is_none());
        assert_eq!(stored(&storage), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn token_set_get_clear() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CredentialStore::new(storage.clone());

        store.set_token("tok");
        assert_eq!(store.get_token().as_deref(), Some("tok"));
        assert_eq!(TokenSource::token(&store).as_deref(), Some("tok"));
        assert_eq!(stored(&storage), Some(json!({"token": "tok"})));

        store.clear_token();
        assert!(store.get_token().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn partial_clear_keeps_the_key() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CredentialStore::new(storage.clone());
        store.set_token("tok");
        store.set_password(json!("blob"));

        store.clear_password();

        assert_eq!(stored(&storage), Some(json!({"token": "tok"})));
    }

    #[test]
    fn token_and_password_are_independent() {
        let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
        store.set_token("tok");
        store.set_password(json!("blob"));

        store.clear_token();
        assert_eq!(store.remembered_password(), Some(json!("blob")));
    }

    #[test]
    fn restores_from_previous_run() {
        let storage = MemoryStorage::with_item(CREDENTIAL_STORE_KEY, r#"{"token":"t2"}"#);
        let store = CredentialStore::new(Arc::new(storage));
        assert_eq!(store.get_token().as_deref(), Some("t2"));
        assert!(store.remembered_password().is_none());
    }

    #[test]
    fn invalidate_clears_everything() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CredentialStore::new(storage.clone());
        store.set_token("tok");
        store.set_password(json!({"username": "ann"}));

        store.invalidate();

        assert_eq!(store.snapshot(), CredentialState::default());
        assert_eq!(stored(&storage), None);
    }
}

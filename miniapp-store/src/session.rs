//! Member session store
//!
//! Holds the logged-in member profile (which embeds the auth token) and the
//! invite code of a room the user scanned before logging in.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::persist::{hydrate, persist};
use crate::storage::StorageAdapter;
use crate::token::TokenSource;

/// Storage key of the session store
pub const SESSION_STORE_KEY: &str = "member";

/// Logged-in member profile
///
/// The backend owns this shape; only `token` is interpreted here; every other
/// field is kept verbatim so it survives a persist/restore cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Some backends send a numeric token; it is kept as its decimal text.
    #[serde(
        default,
        deserialize_with = "token_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MemberProfile {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            extra: Map::new(),
        }
    }

    /// Non-empty token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Look up a non-token field, e.g. `nickname`
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

fn token_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"a string or number token",
        )),
    }
}

/// Persisted shape of the session store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<MemberProfile>,
    #[serde(default)]
    pub pending_invite_code: String,
}

/// Member session store
pub struct SessionStore {
    storage: Arc<dyn StorageAdapter>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Create the store, restoring any state persisted by a previous run
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        let state = hydrate(storage.as_ref(), SESSION_STORE_KEY);
        Self {
            storage,
            state: RwLock::new(state),
        }
    }

    /// Snapshot of the whole state
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn profile(&self) -> Option<MemberProfile> {
        self.state.read().profile.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().profile.is_some()
    }

    /// Save the member profile, used after a successful login
    pub fn set_profile(&self, profile: MemberProfile) {
        self.mutate(|s| s.profile = Some(profile));
    }

    /// Drop the member profile, used on logout and on 401
    pub fn clear_profile(&self) {
        self.mutate(|s| s.profile = None);
    }

    pub fn pending_invite_code(&self) -> String {
        self.state.read().pending_invite_code.clone()
    }

    /// Remember an invite code scanned while logged out
    pub fn set_pending_invite_code(&self, code: impl Into<String>) {
        let code = code.into();
        self.mutate(|s| s.pending_invite_code = code);
    }

    pub fn clear_pending_invite_code(&self) {
        self.mutate(|s| s.pending_invite_code.clear());
    }

    /// Consume the pending invite code: returns it and clears it in one step
    pub fn take_pending_invite_code(&self) -> Option<String> {
        let mut state = self.state.write();
        if state.pending_invite_code.is_empty() {
            return None;
        }
        let code = std::mem::take(&mut state.pending_invite_code);
        persist(self.storage.as_ref(), SESSION_STORE_KEY, &*state);
        Some(code)
    }

    fn mutate(&self, f: impl FnOnce(&mut SessionState)) {
        let mut state = self.state.write();
        f(&mut *state);
        persist(self.storage.as_ref(), SESSION_STORE_KEY, &*state);
    }
}

impl TokenSource for SessionStore {
    fn token(&self) -> Option<String> {
        self.state
            .read()
            .profile
            .as_ref()
            .and_then(MemberProfile::token)
            .map(str::to_string)
    }

    fn invalidate(&self) {
        log::info!("Session invalidated, clearing member profile");
        self.clear_profile();
    }
}

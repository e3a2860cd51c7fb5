//! Mirror a store's state into a [`StorageAdapter`]

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;
use crate::storage::StorageAdapter;

/// Read the persisted state once at store construction
///
/// Missing or undecodable values yield the default state. No migration is
/// attempted between persisted shapes.
pub(crate) fn hydrate<S>(storage: &dyn StorageAdapter, key: &str) -> S
where
    S: DeserializeOwned + Default,
{
    match load(storage, key) {
        Ok(Some(state)) => {
            log::debug!("[{key}] Restored persisted state");
            state
        }
        Ok(None) => S::default(),
        Err(e) => {
            log::warn!("[{key}] Discarding unreadable persisted state: {e}");
            S::default()
        }
    }
}

fn load<S: DeserializeOwned>(storage: &dyn StorageAdapter, key: &str) -> StoreResult<Option<S>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Write the full state after a mutation
///
/// A state back at its default removes the key instead, so a logged-out store
/// leaves nothing behind. Failures are logged, never returned: the in-memory
/// mutation has already happened and callers treat store setters as
/// infallible.
pub(crate) fn persist<S>(storage: &dyn StorageAdapter, key: &str, state: &S)
where
    S: Serialize + Default + PartialEq,
{
    let result = if *state == S::default() {
        storage.remove_item(key)
    } else {
        serde_json::to_string(state)
            .map_err(Into::into)
            .and_then(|json| storage.set_item(key, &json))
    };
    if let Err(e) = result {
        log::error!("[{key}] Failed to persist state: {e}");
    }
}

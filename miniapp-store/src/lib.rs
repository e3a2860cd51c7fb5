//! Mini-program state stores
//!
//! Provides the two persisted stores used by the client:
//! - [`SessionStore`]: logged-in member profile (with embedded token) and the
//!   pending room invite code
//! - [`CredentialStore`]: remembered password blob and a standalone token
//!
//! Persistence goes through the [`StorageAdapter`] trait, so the same stores run
//! against device storage, a directory of JSON files, or an in-memory double.
//! Both stores implement [`TokenSource`], the accessor the HTTP layer reads the
//! auth token from and invalidates on 401.

pub mod credential;
pub mod error;
mod persist;
pub mod session;
pub mod storage;
pub mod token;

pub use credential::{CredentialState, CredentialStore, CREDENTIAL_STORE_KEY};
pub use error::{StoreError, StoreResult};
pub use session::{MemberProfile, SessionState, SessionStore, SESSION_STORE_KEY};
pub use storage::{FileStorage, MemoryStorage, StorageAdapter};
pub use token::TokenSource;

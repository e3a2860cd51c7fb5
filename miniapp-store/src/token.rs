//! Session accessor read by the HTTP layer

/// Source of the auth token attached to outgoing requests
///
/// The HTTP client receives an `Arc<dyn TokenSource>` at construction instead
/// of reaching for a global store. Implemented by:
/// - [`SessionStore`](crate::SessionStore): token embedded in the member profile
/// - [`CredentialStore`](crate::CredentialStore): standalone token field
pub trait TokenSource: Send + Sync {
    /// Current token, `None` when logged out
    fn token(&self) -> Option<String>;

    /// Drop the session after the backend rejected it (HTTP 401)
    fn invalidate(&self);
}

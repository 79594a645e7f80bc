//! Bearer token persistence.
//!
//! The token survives reloads through a [`CredentialStore`]. Storage is
//! best-effort: a store that cannot write behaves as if nothing was saved,
//! and a store that cannot read reports an absent token.

use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Storage key under which browser stores keep the token.
pub const DEFAULT_STORAGE_KEY: &str = "auth_token";

/// Opaque bearer credential issued by the backend at login.
///
/// The value is never printed by `Debug` so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the token carries no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for BearerToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Durable key-value slot holding at most one bearer token.
pub trait CredentialStore: Send + Sync {
    /// Stores the token, replacing any previous one.
    fn save(&self, token: &BearerToken);

    /// Returns the stored token, if any.
    fn read(&self) -> Option<BearerToken>;

    /// Removes the stored token. Clearing an empty store is a no-op.
    fn clear(&self);

    /// Removes the stored token only while it is still `expected`, leaving
    /// a token saved in the meantime alone. Returns true if it was removed.
    fn clear_if(&self, expected: &BearerToken) -> bool {
        if self.read().as_ref() == Some(expected) {
            self.clear();
            true
        } else {
            false
        }
    }
}

/// Process-local store, used by tests and during server-side rendering.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<BearerToken>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a token.
    #[must_use]
    pub fn with_token(token: impl Into<BearerToken>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, token: &BearerToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
    }

    fn read(&self) -> Option<BearerToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn clear_if(&self, expected: &BearerToken) -> bool {
        let mut token = self.token.write().unwrap_or_else(PoisonError::into_inner);
        if token.as_ref() == Some(expected) {
            *token = None;
            true
        } else {
            false
        }
    }
}

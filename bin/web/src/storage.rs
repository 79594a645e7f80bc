//! Browser-side persistence and bootstrap values.

use timetable_admin_platform_access::{BearerToken, CredentialStore};

/// Keeps the bearer token in `localStorage` under a fixed key.
///
/// Storage that is missing or refuses access reads as an absent token.
#[derive(Debug, Clone)]
pub struct BrowserCredentialStore {
    key: String,
}

impl BrowserCredentialStore {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn save(&self, token: &BearerToken) {
        let Some(storage) = Self::storage() else {
            leptos::logging::warn!("localStorage unavailable, token not persisted");
            return;
        };
        if storage.set_item(&self.key, token.expose()).is_err() {
            leptos::logging::warn!("failed to persist token");
        }
    }

    fn read(&self) -> Option<BearerToken> {
        Self::storage()?
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
            .map(BearerToken::from)
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// Backend base URL published by the server in `<meta name="api-base-url">`.
#[must_use]
pub fn published_api_base_url() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .query_selector(r#"meta[name="api-base-url"]"#)
        .ok()
        .flatten()?
        .get_attribute("content")
        .filter(|url| !url.trim().is_empty())
}

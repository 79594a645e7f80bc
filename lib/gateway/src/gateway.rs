//! Authentication seam between the session controller and the backend.

use async_trait::async_trait;

use crate::envelope::ApiResponse;
use crate::types::{Credentials, LoginPayload, VerifyPayload};

/// Authentication calls against the backend.
///
/// Implementations never fail outside the envelope: transport errors,
/// rejected requests and malformed bodies all come back as an
/// `ApiResponse` with `success == false`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait BackendGateway: Send + Sync {
    /// Exchanges credentials for an identity and bearer token.
    ///
    /// On success the token has been persisted before this returns; on
    /// failure the stored token is untouched.
    async fn login(&self, credentials: &Credentials) -> ApiResponse<LoginPayload>;

    /// Invalidates the session remotely, best-effort.
    ///
    /// The stored token is cleared whatever the remote outcome.
    async fn logout(&self) -> ApiResponse<()>;

    /// Resolves the stored token to an identity.
    ///
    /// Fails when the token is absent, expired or rejected.
    async fn verify_token(&self) -> ApiResponse<VerifyPayload>;
}

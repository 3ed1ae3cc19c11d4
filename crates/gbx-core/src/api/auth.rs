//! Authentication endpoint.

use gbx_types::{LoginRequest, LoginResponse};

use super::{ApiClient, ApiResult};

impl ApiClient {
    /// Exchanges credentials for a session token (`POST /auth/login`).
    ///
    /// The token is returned to the caller; storing it is the caller's
    /// decision. Nothing is mutated on failure.
    ///
    /// # Errors
    /// Returns an error if the server rejects the credentials or the
    /// request fails.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/login", &request).await
    }
}

//! First-run setup endpoints.

use gbx_types::{LoginRequest, MessageResponse, SetupStatusResponse};

use super::{ApiClient, ApiResult};

impl ApiClient {
    /// Fetches whether the first-run setup has been completed
    /// (`GET /setup/status`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn setup_status(&self) -> ApiResult<SetupStatusResponse> {
        self.get("/setup/status").await
    }

    /// Registers the initial admin account (`POST /setup/register`).
    ///
    /// # Errors
    /// Returns an error if setup is already complete or the request fails.
    pub async fn register_admin(
        &self,
        username: &str,
        password: &str,
    ) -> ApiResult<MessageResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("/setup/register", &request).await
    }
}

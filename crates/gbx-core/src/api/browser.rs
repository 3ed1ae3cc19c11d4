//! Remote file browser endpoints.

use gbx_types::{BrowserResponse, FileEntry};

use super::{ApiClient, ApiResult};

impl ApiClient {
    /// Lists files under `path` on a remote (`GET /browser/files`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn list_files(&self, remote: &str, path: &str) -> ApiResult<BrowserResponse> {
        self.get_with_query("/browser/files", &[("remote", remote), ("path", path)])
            .await
    }

    /// Fetches metadata for a single file (`GET /browser/info`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn file_info(&self, remote: &str, file: &str) -> ApiResult<FileEntry> {
        self.get_with_query("/browser/info", &[("remote", remote), ("file", file)])
            .await
    }

    /// Lists the configured remote names (`GET /browser/remotes`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn remotes(&self) -> ApiResult<Vec<String>> {
        self.get("/browser/remotes").await
    }
}

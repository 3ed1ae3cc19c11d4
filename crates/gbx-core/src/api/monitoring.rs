//! Monitoring endpoints (remote health, run history, schedules).

use gbx_types::{LogEntry, RemoteStatus, ScheduledJobInfo};

use super::{ApiClient, ApiResult};

impl ApiClient {
    /// Fetches the health rows for all remotes (`GET /monitoring/remotes`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn remote_status(&self) -> ApiResult<Vec<RemoteStatus>> {
        self.get("/monitoring/remotes").await
    }

    /// Fetches the full execution history (`GET /monitoring/logs`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn job_logs(&self) -> ApiResult<Vec<LogEntry>> {
        self.get("/monitoring/logs").await
    }

    /// Fetches scheduled jobs with their next run (`GET /monitoring/jobs`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn scheduled_jobs(&self) -> ApiResult<Vec<ScheduledJobInfo>> {
        self.get("/monitoring/jobs").await
    }
}

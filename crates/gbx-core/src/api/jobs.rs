//! Job endpoints (create, restore, trigger, inspect).

use gbx_types::{BackupJobSpec, Job, JobEnvelope, MessageResponse, RestoreJobSpec, ScriptPreview};

use super::{ApiClient, ApiResult};

impl ApiClient {
    /// Submits a new backup job configuration (`POST /jobs/new`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn create_backup_job(&self, spec: &BackupJobSpec) -> ApiResult<MessageResponse> {
        self.post("/jobs/new", spec).await
    }

    /// Submits a one-shot restore (`POST /jobs/restore`). The server
    /// generates the job name and queues it immediately.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn create_restore_job(&self, spec: &RestoreJobSpec) -> ApiResult<MessageResponse> {
        self.post("/jobs/restore", spec).await
    }

    /// Queues an existing job to run now (`POST /jobs/trigger/:id`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn trigger_job(&self, id: u64) -> ApiResult<MessageResponse> {
        self.post_empty(&format!("/jobs/trigger/{id}")).await
    }

    /// Fetches the rendered script preview for a job
    /// (`GET /jobs/script/:id`).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn job_script(&self, id: u64) -> ApiResult<ScriptPreview> {
        self.get(&format!("/jobs/script/{id}")).await
    }

    /// Fetches a stored job (`GET /jobs/:id`), unwrapping the envelope.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn job(&self, id: u64) -> ApiResult<Job> {
        let envelope: JobEnvelope = self.get(&format!("/jobs/{id}")).await?;
        Ok(envelope.data)
    }
}

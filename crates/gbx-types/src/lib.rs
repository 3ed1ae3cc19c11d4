//! Wire types for the gbackup server API.
//!
//! These mirror the server's JSON payloads field-for-field; the client
//! forwards them unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials payload for `POST /auth/login` and `POST /setup/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for the session.
    pub token: String,
}

/// Response of `GET /setup/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetupStatusResponse {
    /// `false` means the first-run setup wizard has not been completed.
    pub is_admin_registered: bool,
}

/// Generic acknowledgement payload (`{"message": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Configuration for a new backup job (`POST /jobs/new`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupJobSpec {
    pub job_name: String,
    /// "BACKUP" or "RESTORE"; jobs created through this spec are backups.
    pub operation_mode: String,
    /// rclone transfer mode, e.g. "sync" or "copy".
    pub rclone_mode: String,
    pub source_path: String,
    pub destination_path: String,
    pub remote_name: String,
    /// Number of retained snapshots; 0 disables pruning.
    #[serde(default)]
    pub max_retention: u32,
    /// Cron expression; empty for manual jobs.
    #[serde(default)]
    pub schedule_cron: String,
    #[serde(default)]
    pub pre_script: String,
    #[serde(default)]
    pub post_script: String,
}

/// Configuration for a one-shot restore (`POST /jobs/restore`).
///
/// The server generates the job name and forces copy mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreJobSpec {
    /// Path of the snapshot on the remote.
    pub source_path: String,
    pub operation_mode: String,
    pub remote_name: String,
    /// Local target directory.
    pub destination_path: String,
}

/// A stored job as returned by `GET /jobs/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub job_name: String,
    pub operation_mode: String,
    pub rclone_mode: String,
    pub source_path: String,
    pub destination_path: String,
    pub remote_name: String,
    #[serde(default)]
    pub max_retention: u32,
    #[serde(default)]
    pub schedule_cron: String,
    /// "scheduled" when a cron expression is set, otherwise "manual".
    pub schedule_type: String,
    pub status: String,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pre_script: String,
    #[serde(default)]
    pub post_script: String,
}

/// Envelope around [`Job`] (`{"success": ..., "data": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub success: bool,
    pub data: Job,
}

/// Rendered script preview for a job (`GET /jobs/script/:id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPreview {
    pub script_preview: String,
}

/// A file or directory on a remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    pub size: i64,
    #[serde(default)]
    pub mod_time: String,
    #[serde(default)]
    pub mime_type: String,
}

/// Listing returned by `GET /browser/files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserResponse {
    /// The path that was listed.
    pub path: String,
    pub files: Vec<FileEntry>,
    pub total_size: i64,
}

/// Health row for one remote (`GET /monitoring/remotes`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStatus {
    pub remote_name: String,
    #[serde(default)]
    pub email: String,
    /// "CONNECTED" or "DISCONNECTED".
    pub status_connect: String,
    pub used_storage_gb: f64,
    pub free_storage_gb: f64,
    pub total_storage_gb: f64,
    pub last_checked_at: DateTime<Utc>,
    #[serde(default)]
    pub active_job_count: i64,
    #[serde(default)]
    pub system_message: String,
}

/// One execution record (`GET /monitoring/logs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    #[serde(default)]
    pub job_id: Option<u64>,
    /// "SUCCESS" or one of the FAIL_*/ERROR statuses.
    pub status: String,
    /// Raw CLI output captured from the run.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub duration_sec: i64,
    #[serde(default)]
    pub transferred_bytes: i64,
    pub timestamp: DateTime<Utc>,
}

/// A scheduled job with its computed next run (`GET /monitoring/jobs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledJobInfo {
    pub id: u64,
    pub job_name: String,
    pub remote_name: String,
    pub schedule_cron: String,
    pub status: String,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: setup status decodes both polarities.
    #[test]
    fn test_setup_status_decode() {
        let resp: SetupStatusResponse =
            serde_json::from_str(r#"{"is_admin_registered": false}"#).unwrap();
        assert!(!resp.is_admin_registered);

        let resp: SetupStatusResponse =
            serde_json::from_str(r#"{"is_admin_registered": true}"#).unwrap();
        assert!(resp.is_admin_registered);
    }

    /// Test: job envelope decodes the nested data payload.
    #[test]
    fn test_job_envelope_decode() {
        let json = r#"{
            "success": true,
            "data": {
                "id": 7,
                "job_name": "nightly-docs",
                "operation_mode": "BACKUP",
                "rclone_mode": "sync",
                "source_path": "/srv/docs",
                "destination_path": "/backups/docs",
                "remote_name": "gdrive-main",
                "max_retention": 5,
                "schedule_cron": "0 2 * * *",
                "schedule_type": "scheduled",
                "status": "PENDING",
                "last_run": null,
                "pre_script": "",
                "post_script": ""
            }
        }"#;
        let envelope: JobEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.id, 7);
        assert_eq!(envelope.data.schedule_type, "scheduled");
        assert!(envelope.data.last_run.is_none());
    }

    /// Test: browser listing tolerates entries without optional metadata.
    #[test]
    fn test_browser_response_decode_minimal_entry() {
        let json = r#"{
            "path": "/backups",
            "files": [
                {"name": "db.sql.gz", "path": "/backups/db.sql.gz", "is_dir": false, "size": 1024}
            ],
            "total_size": 1024
        }"#;
        let listing: BrowserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].mod_time, "");
        assert!(!listing.files[0].is_dir);
    }

    /// Test: log entries with a null job id decode.
    #[test]
    fn test_log_entry_decode_null_job() {
        let json = r#"{
            "id": 3,
            "job_id": null,
            "status": "FAIL_RCLONE",
            "message": "rclone: connection reset",
            "duration_sec": 12,
            "transferred_bytes": 0,
            "timestamp": "2025-11-02T03:15:00Z"
        }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.job_id.is_none());
        assert_eq!(entry.status, "FAIL_RCLONE");
    }
}

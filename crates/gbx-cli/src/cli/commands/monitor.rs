//! Monitoring command handlers.

use anyhow::{Context, Result};
use comfy_table::Table;
use gbx_core::api::ApiClient;

pub async fn remotes(api: &ApiClient) -> Result<()> {
    let remotes = api.remote_status().await.context("fetch remote status")?;
    if remotes.is_empty() {
        println!("No remotes are being monitored.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "REMOTE", "STATUS", "USED", "FREE", "TOTAL", "JOBS", "CHECKED",
    ]);
    for remote in &remotes {
        table.add_row(vec![
            remote.remote_name.clone(),
            remote.status_connect.clone(),
            format!("{:.1} GB", remote.used_storage_gb),
            format!("{:.1} GB", remote.free_storage_gb),
            format!("{:.1} GB", remote.total_storage_gb),
            remote.active_job_count.to_string(),
            remote
                .last_checked_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ]);
    }
    println!("{table}");

    for remote in &remotes {
        if !remote.system_message.is_empty() {
            println!("{}: {}", remote.remote_name, remote.system_message);
        }
    }
    Ok(())
}

pub async fn logs(api: &ApiClient) -> Result<()> {
    let logs = api.job_logs().await.context("fetch run history")?;
    if logs.is_empty() {
        println!("No runs recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "JOB",
        "STATUS",
        "DURATION",
        "TRANSFERRED",
        "TIMESTAMP",
    ]);
    for entry in &logs {
        table.add_row(vec![
            entry.id.to_string(),
            entry
                .job_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            entry.status.clone(),
            format!("{}s", entry.duration_sec),
            entry.transferred_bytes.to_string(),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn jobs(api: &ApiClient) -> Result<()> {
    let jobs = api.scheduled_jobs().await.context("fetch scheduled jobs")?;
    if jobs.is_empty() {
        println!("No scheduled jobs.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "NAME", "REMOTE", "CRON", "STATUS", "NEXT RUN"]);
    for job in &jobs {
        table.add_row(vec![
            job.id.to_string(),
            job.job_name.clone(),
            job.remote_name.clone(),
            job.schedule_cron.clone(),
            job.status.clone(),
            job.next_run.map_or_else(
                || "-".to_string(),
                |next| next.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
        ]);
    }
    println!("{table}");
    Ok(())
}

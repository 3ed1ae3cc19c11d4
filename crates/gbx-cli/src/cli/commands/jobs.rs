//! Job command handlers.

use anyhow::{Context, Result};
use gbx_core::api::ApiClient;
use gbx_types::{BackupJobSpec, RestoreJobSpec};

pub async fn backup(api: &ApiClient, spec: &BackupJobSpec) -> Result<()> {
    let response = api
        .create_backup_job(spec)
        .await
        .with_context(|| format!("create backup job '{}'", spec.job_name))?;
    println!("{}", response.message);
    Ok(())
}

pub async fn restore(api: &ApiClient, remote: &str, source: &str, dest: &str) -> Result<()> {
    let spec = RestoreJobSpec {
        source_path: source.to_string(),
        operation_mode: "RESTORE".to_string(),
        remote_name: remote.to_string(),
        destination_path: dest.to_string(),
    };
    let response = api
        .create_restore_job(&spec)
        .await
        .with_context(|| format!("restore {remote}:{source}"))?;
    println!("{}", response.message);
    Ok(())
}

pub async fn trigger(api: &ApiClient, id: u64) -> Result<()> {
    let response = api
        .trigger_job(id)
        .await
        .with_context(|| format!("trigger job {id}"))?;
    println!("{}", response.message);
    Ok(())
}

pub async fn script(api: &ApiClient, id: u64) -> Result<()> {
    let preview = api
        .job_script(id)
        .await
        .with_context(|| format!("fetch script for job {id}"))?;
    println!("{}", preview.script_preview);
    Ok(())
}

pub async fn show(api: &ApiClient, id: u64) -> Result<()> {
    let job = api
        .job(id)
        .await
        .with_context(|| format!("fetch job {id}"))?;

    println!("Job {}: {}", job.id, job.job_name);
    println!("  mode:        {} ({})", job.operation_mode, job.rclone_mode);
    println!("  source:      {}", job.source_path);
    println!("  destination: {}:{}", job.remote_name, job.destination_path);
    println!("  schedule:    {}", describe_schedule(&job.schedule_cron));
    println!("  retention:   {}", job.max_retention);
    println!("  status:      {}", job.status);
    match job.last_run {
        Some(last_run) => println!("  last run:    {}", last_run.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  last run:    never"),
    }
    if !job.pre_script.is_empty() {
        println!("  pre-script:  {}", job.pre_script);
    }
    if !job.post_script.is_empty() {
        println!("  post-script: {}", job.post_script);
    }
    Ok(())
}

fn describe_schedule(cron: &str) -> String {
    if cron.is_empty() {
        "manual".to_string()
    } else {
        cron.to_string()
    }
}

//! File browser command handlers.

use anyhow::{Context, Result};
use comfy_table::Table;
use gbx_core::api::ApiClient;

pub async fn ls(api: &ApiClient, remote: &str, path: &str) -> Result<()> {
    let listing = api
        .list_files(api_remote(remote), path)
        .await
        .with_context(|| format!("browse {remote}:{path}"))?;

    if listing.files.is_empty() {
        println!("{}:{} is empty.", remote, listing.path);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["NAME", "SIZE", "MODIFIED"]);
    for entry in &listing.files {
        let name = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let size = if entry.is_dir {
            "-".to_string()
        } else {
            format_size(entry.size)
        };
        table.add_row(vec![name, size, entry.mod_time.clone()]);
    }
    println!("{table}");
    println!(
        "{} entries, {} total",
        listing.files.len(),
        format_size(listing.total_size)
    );
    Ok(())
}

pub async fn info(api: &ApiClient, remote: &str, file: &str) -> Result<()> {
    let entry = api
        .file_info(api_remote(remote), file)
        .await
        .with_context(|| format!("stat {remote}:{file}"))?;

    println!("{}", entry.path);
    println!("  type:     {}", if entry.is_dir { "directory" } else { "file" });
    println!("  size:     {}", format_size(entry.size));
    if !entry.mod_time.is_empty() {
        println!("  modified: {}", entry.mod_time);
    }
    if !entry.mime_type.is_empty() {
        println!("  mime:     {}", entry.mime_type);
    }
    Ok(())
}

pub async fn remotes(api: &ApiClient) -> Result<()> {
    let remotes = api.remotes().await.context("list remotes")?;
    if remotes.is_empty() {
        println!("No remotes configured.");
    } else {
        for remote in remotes {
            println!("{remote}");
        }
    }
    Ok(())
}

fn api_remote(remote: &str) -> &str {
    remote.trim_end_matches(':')
}

/// Renders a byte count in a compact human-readable form.
fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

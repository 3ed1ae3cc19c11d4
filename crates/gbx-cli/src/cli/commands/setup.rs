//! Setup wizard command handlers.

use anyhow::{Context, Result};
use gbx_core::api::ApiClient;
use gbx_core::setup::{SetupStatus, SetupStatusCache};

pub fn status(setup: &SetupStatusCache) -> Result<()> {
    // The gate resolved the status before this handler ran.
    match setup.current() {
        Some(SetupStatus::Complete) => println!("Setup is complete."),
        _ => println!(
            "Setup is required. Run 'gbx setup register' to create the admin account."
        ),
    }
    Ok(())
}

pub async fn register(
    api: &ApiClient,
    setup: &SetupStatusCache,
    username: &str,
    password: &str,
) -> Result<()> {
    let response = api
        .register_admin(username, password)
        .await
        .context("register admin")?;

    // The wizard finished locally; no second status round trip needed.
    setup.mark_complete();

    println!("✓ {}", response.message);
    println!("Run 'gbx login' to start a session.");
    Ok(())
}

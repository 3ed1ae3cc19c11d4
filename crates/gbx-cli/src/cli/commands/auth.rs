//! Login/logout command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use gbx_core::api::ApiClient;
use gbx_core::credentials::{CredentialStore, mask_token};

pub async fn login(
    api: &ApiClient,
    credentials: &CredentialStore,
    username: &str,
    password: Option<&str>,
) -> Result<()> {
    let password = match password {
        Some(password) => password.to_string(),
        None => prompt_password()?,
    };

    let response = match api.login(username, &password).await {
        Ok(response) => response,
        Err(err) if err.is_unauthorized() => {
            anyhow::bail!("Login failed: invalid username or password")
        }
        Err(err) => return Err(err).context("login request failed"),
    };

    credentials
        .set(&response.token)
        .context("store session token")?;

    println!(
        "✓ Logged in as {} (token: {})",
        username,
        mask_token(&response.token)
    );
    println!("  Credentials saved to: {}", credentials.path().display());
    Ok(())
}

pub fn logout(credentials: &CredentialStore) -> Result<()> {
    if credentials.is_present() {
        credentials.clear().context("clear session token")?;
        println!("✓ Logged out");
        println!(
            "  Credentials removed from: {}",
            credentials.path().display()
        );
    } else {
        println!("Not logged in (no credentials found).");
    }

    Ok(())
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush().context("flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("read password")?;

    let password = input.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    Ok(password)
}

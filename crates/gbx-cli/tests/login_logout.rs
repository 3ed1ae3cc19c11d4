//! Integration tests for login/logout commands.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, mount_setup_status, temp_gbx_home, write_credentials};
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test: login stores the session token in credentials.json.
#[tokio::test]
async fn test_login_stores_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let gbx_home = temp_gbx_home();
    let server = MockServer::start().await;
    mount_setup_status(&server, true).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "token": "tok-12345678901234567890" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("gbx")
        .env("GBX_HOME", gbx_home.path())
        .env("GBX_BASE_URL", server.uri())
        .args(["login", "--username", "admin", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as admin"));

    let credentials_path = gbx_home.path().join("credentials.json");
    assert!(credentials_path.exists(), "credentials.json should exist");

    let contents = std::fs::read_to_string(&credentials_path).unwrap();
    assert!(
        contents.contains("tok-12345678901234567890"),
        "Token should be in credentials.json"
    );
}

/// Test: credentials.json has restricted permissions on Unix.
#[cfg(unix)]
#[tokio::test]
async fn test_credential_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let gbx_home = temp_gbx_home();
    let server = MockServer::start().await;
    mount_setup_status(&server, true).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "token": "tok-12345678901234567890" })),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("gbx")
        .env("GBX_HOME", gbx_home.path())
        .env("GBX_BASE_URL", server.uri())
        .args(["login", "--username", "admin", "--password", "secret"])
        .assert()
        .success();

    let metadata = std::fs::metadata(gbx_home.path().join("credentials.json")).unwrap();
    assert_eq!(
        metadata.permissions().mode() & 0o777,
        0o600,
        "credentials.json should have 0600 permissions"
    );
}

/// Test: rejected credentials surface a login failure and store nothing.
#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let gbx_home = temp_gbx_home();
    let server = MockServer::start().await;
    mount_setup_status(&server, true).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    cargo_bin_cmd!("gbx")
        .env("GBX_HOME", gbx_home.path())
        .env("GBX_BASE_URL", server.uri())
        .args(["login", "--username", "admin", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid username or password"));

    assert!(
        !gbx_home.path().join("credentials.json").exists(),
        "No credential may be stored after a failed login"
    );
}

/// Test: login while already logged in short-circuits to a notice.
#[tokio::test]
async fn test_login_when_already_logged_in() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let gbx_home = temp_gbx_home();
    let server = MockServer::start().await;
    mount_setup_status(&server, true).await;
    write_credentials(gbx_home.path(), "tok-12345678901234567890");

    // No /auth/login mock mounted: the gate must stop the command before
    // any login request is sent.
    cargo_bin_cmd!("gbx")
        .env("GBX_HOME", gbx_home.path())
        .env("GBX_BASE_URL", server.uri())
        .args(["login", "--username", "admin", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already logged in"));
}

/// Test: logout clears the stored token.
#[test]
fn test_logout_clears_token() {
    let gbx_home = temp_gbx_home();
    write_credentials(gbx_home.path(), "tok-12345678901234567890");

    cargo_bin_cmd!("gbx")
        .env("GBX_HOME", gbx_home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(
        !gbx_home.path().join("credentials.json").exists(),
        "credentials.json should be removed"
    );
}

/// Test: logout when not logged in shows a message and succeeds.
#[test]
fn test_logout_when_not_logged_in() {
    let gbx_home = temp_gbx_home();

    cargo_bin_cmd!("gbx")
        .env("GBX_HOME", gbx_home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

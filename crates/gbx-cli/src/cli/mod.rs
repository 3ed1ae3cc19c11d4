//! CLI entry and dispatch.
//!
//! Every command that talks to the server is mapped to a destination and
//! routed through the navigation gate first; redirect outcomes become
//! actionable messages instead of running the command.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gbx_core::api::{ApiClient, ApiError};
use gbx_core::config::Config;
use gbx_core::credentials::CredentialStore;
use gbx_core::nav::{self, GateOutcome, Route};
use gbx_core::setup::SetupStatusCache;

mod commands;

#[derive(Parser)]
#[command(name = "gbx")]
#[command(version)]
#[command(about = "CLI client for the gbackup orchestration server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in to the server and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out (discard the stored session token)
    Logout,

    /// First-run setup wizard
    Setup {
        #[command(subcommand)]
        command: SetupCommands,
    },

    /// Manage backup and restore jobs
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Browse files on a remote
    Browse {
        #[command(subcommand)]
        command: BrowseCommands,
    },

    /// Inspect remote health, run history and schedules
    Monitor {
        #[command(subcommand)]
        command: MonitorCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SetupCommands {
    /// Show whether first-run setup has been completed
    Status,
    /// Register the initial admin account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

#[derive(clap::Subcommand)]
enum JobCommands {
    /// Create a backup job
    Backup {
        /// Job name
        #[arg(long)]
        name: String,
        /// rclone transfer mode
        #[arg(long, default_value = "sync")]
        mode: String,
        /// Local source path
        #[arg(long)]
        source: String,
        /// Destination path on the remote
        #[arg(long)]
        dest: String,
        /// Remote to back up to
        #[arg(long)]
        remote: String,
        /// Number of retained snapshots (0 disables pruning)
        #[arg(long, default_value_t = 0)]
        retention: u32,
        /// Cron expression (omit for a manual job)
        #[arg(long)]
        cron: Option<String>,
        /// Script to run before the transfer
        #[arg(long)]
        pre_script: Option<String>,
        /// Script to run after the transfer
        #[arg(long)]
        post_script: Option<String>,
    },
    /// Restore a snapshot from a remote
    Restore {
        /// Remote holding the snapshot
        #[arg(long)]
        remote: String,
        /// Snapshot path on the remote
        #[arg(long)]
        source: String,
        /// Local target directory
        #[arg(long)]
        dest: String,
    },
    /// Queue an existing job to run now
    Trigger {
        #[arg(value_name = "JOB_ID")]
        id: u64,
    },
    /// Show the rendered script for a job
    Script {
        #[arg(value_name = "JOB_ID")]
        id: u64,
    },
    /// Show a stored job
    Show {
        #[arg(value_name = "JOB_ID")]
        id: u64,
    },
}

#[derive(clap::Subcommand)]
enum BrowseCommands {
    /// List files under a path on a remote
    Ls {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "PATH", default_value = "/")]
        path: String,
    },
    /// Show metadata for a single file
    Info {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "FILE")]
        file: String,
    },
    /// List configured remotes
    Remotes,
}

#[derive(clap::Subcommand)]
enum MonitorCommands {
    /// Show health and storage for all remotes
    Remotes,
    /// Show the execution history
    Logs,
    /// Show scheduled jobs and their next run
    Jobs,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Maps a command to the destination it navigates to. Local commands
/// (logout, config) have no destination and skip the gate.
fn destination(command: &Commands) -> Option<Route> {
    match command {
        Commands::Login { .. } => Some(Route::Login),
        Commands::Setup { .. } => Some(Route::Setup),
        Commands::Jobs { .. } => Some(Route::Jobs),
        Commands::Browse { .. } => Some(Route::Remotes),
        Commands::Monitor { command } => Some(match command {
            MonitorCommands::Remotes => Route::Remotes,
            MonitorCommands::Logs => Route::Logs,
            MonitorCommands::Jobs => Route::Jobs,
        }),
        Commands::Logout | Commands::Config { .. } => None,
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let credentials = Arc::new(CredentialStore::open());
    let api = ApiClient::new(config.effective_base_url()?, Arc::clone(&credentials))
        .with_timeout(config.request_timeout());
    let setup = SetupStatusCache::new();

    if let Some(route) = destination(&cli.command) {
        let outcome = nav::gate(route, route.path(), &credentials, &setup, &api).await;
        tracing::debug!(destination = route.descriptor().title, ?outcome, "gate decision");
        match outcome {
            GateOutcome::Allow => {}
            GateOutcome::RedirectSetup => anyhow::bail!(
                "Server setup is not complete. Run 'gbx setup register' to create the admin account."
            ),
            GateOutcome::RedirectLogin { return_path } => anyhow::bail!(
                "Not logged in. Run 'gbx login' first, then retry {return_path}."
            ),
            GateOutcome::RedirectDashboard => {
                if route == Route::Login {
                    println!("Already logged in. Run 'gbx logout' to switch accounts.");
                } else {
                    println!("Setup is already complete.");
                }
                return Ok(());
            }
        }
    }

    let result = match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&api, &credentials, &username, password.as_deref()).await
        }
        Commands::Logout => commands::auth::logout(&credentials),

        Commands::Setup { command } => match command {
            SetupCommands::Status => commands::setup::status(&setup),
            SetupCommands::Register { username, password } => {
                commands::setup::register(&api, &setup, &username, &password).await
            }
        },

        Commands::Jobs { command } => match command {
            JobCommands::Backup {
                name,
                mode,
                source,
                dest,
                remote,
                retention,
                cron,
                pre_script,
                post_script,
            } => {
                let spec = gbx_types::BackupJobSpec {
                    job_name: name,
                    operation_mode: "BACKUP".to_string(),
                    rclone_mode: mode,
                    source_path: source,
                    destination_path: dest,
                    remote_name: remote,
                    max_retention: retention,
                    schedule_cron: cron.unwrap_or_default(),
                    pre_script: pre_script.unwrap_or_default(),
                    post_script: post_script.unwrap_or_default(),
                };
                commands::jobs::backup(&api, &spec).await
            }
            JobCommands::Restore {
                remote,
                source,
                dest,
            } => commands::jobs::restore(&api, &remote, &source, &dest).await,
            JobCommands::Trigger { id } => commands::jobs::trigger(&api, id).await,
            JobCommands::Script { id } => commands::jobs::script(&api, id).await,
            JobCommands::Show { id } => commands::jobs::show(&api, id).await,
        },

        Commands::Browse { command } => match command {
            BrowseCommands::Ls { remote, path } => commands::browse::ls(&api, &remote, &path).await,
            BrowseCommands::Info { remote, file } => {
                commands::browse::info(&api, &remote, &file).await
            }
            BrowseCommands::Remotes => commands::browse::remotes(&api).await,
        },

        Commands::Monitor { command } => match command {
            MonitorCommands::Remotes => commands::monitor::remotes(&api).await,
            MonitorCommands::Logs => commands::monitor::logs(&api).await,
            MonitorCommands::Jobs => commands::monitor::jobs(&api).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    };

    // An authorization failure anywhere forces a logout: the credential is
    // already cleared by the client, so point the user at login instead of
    // surfacing the raw error.
    if let Err(err) = &result
        && err
            .chain()
            .any(|cause| cause.downcast_ref::<ApiError>().is_some_and(ApiError::is_unauthorized))
    {
        anyhow::bail!("Session expired or rejected by the server. Run 'gbx login' to sign in again.");
    }

    result
}

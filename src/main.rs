use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use mis_console::api::dto::{BranchSourceNameLink, RegisterRequest, SourceNameCreate};
use mis_console::api::{ApiClient, ApiError, Session, SessionStore};
use mis_console::app::App;
use mis_console::config::Config;
use mis_console::ui::panels::{area_name, role_name};
use mis_console::{logging, stats};

#[derive(Parser)]
#[command(name = "mis-console")]
#[command(about = "Terminal client for the waterworks management information system")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session token
    Login {
        /// Username (prompted for if omitted)
        username: Option<String>,
    },

    /// Drop the persisted session
    Logout,

    /// Register a new user account
    Register {
        username: String,

        /// Role id to assign (optional)
        #[arg(short, long)]
        role: Option<u32>,
    },

    /// List users
    Users,

    /// List branches
    Branches,

    /// List areas
    Areas,

    /// List roles
    Roles,

    /// List daily reports
    Reports,

    /// Show the dashboard aggregate counts
    Stats,

    /// List source names attached to a branch
    Sources {
        /// Branch id
        branch_id: u32,

        /// Filter by source type id
        #[arg(short = 't', long)]
        source_type: Option<u32>,
    },

    /// Create a source name and attach it to an existing branch
    AddSource {
        /// Branch id to attach to
        #[arg(short, long)]
        branch: u32,

        /// Source type id
        #[arg(short = 't', long)]
        source_type: u32,

        /// The source name (e.g. "Well A")
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Login { username }) => {
            cmd_login(&config, username).await?;
        }
        Some(Commands::Logout) => {
            cmd_logout(&config)?;
        }
        Some(Commands::Register { username, role }) => {
            cmd_register(&config, username, role).await?;
        }
        Some(Commands::Users) => {
            cmd_users(&config).await?;
        }
        Some(Commands::Branches) => {
            cmd_branches(&config).await?;
        }
        Some(Commands::Areas) => {
            cmd_areas(&config).await?;
        }
        Some(Commands::Roles) => {
            cmd_roles(&config).await?;
        }
        Some(Commands::Reports) => {
            cmd_reports(&config).await?;
        }
        Some(Commands::Stats) => {
            cmd_stats(&config).await?;
        }
        Some(Commands::Sources {
            branch_id,
            source_type,
        }) => {
            cmd_sources(&config, branch_id, source_type).await?;
        }
        Some(Commands::AddSource {
            branch,
            source_type,
            name,
        }) => {
            cmd_add_source(&config, branch, source_type, name).await?;
        }
        None => {
            // No subcommand = launch the TUI
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<std::path::PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if log_path.exists() {
            if let Ok(metadata) = log_path.metadata() {
                if metadata.len() > 0 {
                    eprintln!("Session log: {}", log_path.display());
                }
            }
        }
    }

    result
}

/// Build a client carrying the persisted session token
fn authed_client(config: &Config) -> Result<(ApiClient, SessionStore)> {
    let store = SessionStore::open(config)?;
    let client = ApiClient::new(config, store.token().map(str::to_string))?;
    Ok((client, store))
}

/// Map an API failure to the CLI exit error, clearing the session on 401
fn api_failure(store: &mut SessionStore, err: ApiError) -> anyhow::Error {
    if err.is_auth_error() {
        if let Err(clear_err) = store.clear() {
            tracing::warn!(error = %clear_err, "Failed to clear session file");
        }
        return anyhow!("session expired - run 'mis-console login' to sign in again");
    }
    anyhow!(err)
}

fn prompt(label: &str) -> Result<String> {
    use std::io::{self, Write};

    print!("{label}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn cmd_login(config: &Config, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(name) => name,
        None => prompt("Username")?,
    };
    let password = prompt("Password")?;

    if username.is_empty() || password.is_empty() {
        return Err(anyhow!("username and password are required"));
    }

    let mut store = SessionStore::open(config)?;
    let client = ApiClient::new(config, None)?;

    let response = client
        .login(&username, &password)
        .await
        .map_err(|e| anyhow!("login failed: {e}"))?;

    store.store(Session::new(response.token, username.clone()))?;
    println!("Signed in as {}", username);

    Ok(())
}

fn cmd_logout(config: &Config) -> Result<()> {
    let mut store = SessionStore::open(config)?;
    if store.current().is_none() {
        println!("Not signed in");
        return Ok(());
    }
    store.clear()?;
    println!("Signed out");
    Ok(())
}

async fn cmd_register(config: &Config, username: String, role: Option<u32>) -> Result<()> {
    let password = prompt("Password")?;
    let confirm = prompt("Confirm password")?;
    if password != confirm {
        return Err(anyhow!("passwords do not match"));
    }

    let (client, mut store) = authed_client(config)?;
    let request = RegisterRequest {
        username: username.clone(),
        password,
        role_id: role,
    };
    client
        .register(&request)
        .await
        .map_err(|e| api_failure(&mut store, e))?;

    println!("Registered user {}", username);
    Ok(())
}

async fn cmd_users(config: &Config) -> Result<()> {
    let (client, mut store) = authed_client(config)?;

    let users = client.users().await.map_err(|e| api_failure(&mut store, e))?;
    let roles = client.roles().await.unwrap_or_default();

    if users.is_empty() {
        println!("No users");
        return Ok(());
    }

    println!("Users ({})", users.len());
    println!("{}", "─".repeat(60));
    for user in &users {
        let active = if user.is_active { "active" } else { "inactive" };
        println!(
            "{:<20} {:<16} {}",
            user.username,
            role_name(&roles, user.role_id),
            active
        );
    }

    Ok(())
}

async fn cmd_branches(config: &Config) -> Result<()> {
    let (client, mut store) = authed_client(config)?;

    let branches = client
        .branches()
        .await
        .map_err(|e| api_failure(&mut store, e))?;
    let areas = client.areas().await.unwrap_or_default();

    if branches.is_empty() {
        println!("No branches");
        return Ok(());
    }

    println!("Branches ({})", branches.len());
    println!("{}", "─".repeat(60));
    for branch in &branches {
        let active = if branch.is_active { "active" } else { "inactive" };
        println!(
            "{:<4} {:<24} {:<16} {}",
            branch.id,
            branch.branch_name,
            area_name(&areas, branch.area_id),
            active
        );
    }

    Ok(())
}

async fn cmd_areas(config: &Config) -> Result<()> {
    let (client, mut store) = authed_client(config)?;

    let areas = client.areas().await.map_err(|e| api_failure(&mut store, e))?;

    if areas.is_empty() {
        println!("No areas");
        return Ok(());
    }

    println!("Areas ({})", areas.len());
    println!("{}", "─".repeat(60));
    for area in &areas {
        let active = if area.is_active { "active" } else { "inactive" };
        println!("{:<4} {:<24} {}", area.id, area.area_name, active);
    }

    Ok(())
}

async fn cmd_roles(config: &Config) -> Result<()> {
    let (client, mut store) = authed_client(config)?;

    let roles = client.roles().await.map_err(|e| api_failure(&mut store, e))?;

    if roles.is_empty() {
        println!("No roles");
        return Ok(());
    }

    println!("Roles ({})", roles.len());
    println!("{}", "─".repeat(60));
    for role in &roles {
        println!("{:<4} {}", role.id, role.role_name);
    }

    Ok(())
}

async fn cmd_reports(config: &Config) -> Result<()> {
    let (client, mut store) = authed_client(config)?;

    let reports = client
        .daily_reports()
        .await
        .map_err(|e| api_failure(&mut store, e))?;

    if reports.is_empty() {
        println!("No daily reports");
        return Ok(());
    }

    println!("Daily Reports ({})", reports.len());
    println!("{}", "─".repeat(60));
    for report in &reports {
        let status = report
            .status
            .as_ref()
            .map_or("-", |s| s.status_name.as_str());
        let branch = report
            .branch_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        println!("{:<6} branch {:<6} {}", report.id, branch, status);
    }

    Ok(())
}

async fn cmd_stats(config: &Config) -> Result<()> {
    let (client, mut store) = authed_client(config)?;

    let stats = stats::fetch(&client)
        .await
        .map_err(|e| api_failure(&mut store, e))?;

    println!("Dashboard Overview");
    println!("{}", "─".repeat(60));
    println!("Active Users: {}", stats.active_users);
    println!("Branches:     {}", stats.active_branches);
    println!("Areas:        {}", stats.active_areas);
    println!("Approved:     {}", stats.approved_reports);

    Ok(())
}

async fn cmd_sources(config: &Config, branch_id: u32, source_type: Option<u32>) -> Result<()> {
    let (client, mut store) = authed_client(config)?;

    let sources = client
        .branch_source_names(branch_id, source_type)
        .await
        .map_err(|e| api_failure(&mut store, e))?;

    if sources.is_empty() {
        println!("No source names for branch {}", branch_id);
        return Ok(());
    }

    println!("Source Names for branch {} ({})", branch_id, sources.len());
    println!("{}", "─".repeat(60));
    for source in &sources {
        let type_name = source
            .source_type_name
            .as_deref()
            .map_or_else(|| format!("type {}", source.source_type_id), str::to_string);
        println!("{:<4} {:<28} {}", source.id, source.source_name, type_name);
    }

    Ok(())
}

async fn cmd_add_source(
    config: &Config,
    branch: u32,
    source_type: u32,
    name: String,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("source name must not be empty"));
    }

    let (client, mut store) = authed_client(config)?;

    // Create the source name, then link it to the branch
    let created = client
        .create_source_name(&SourceNameCreate {
            source_name: name.trim().to_string(),
            source_type_id: source_type,
            branch_id: branch,
        })
        .await
        .map_err(|e| api_failure(&mut store, e))?;

    client
        .link_branch_source_name(&BranchSourceNameLink {
            branch_id: branch,
            source_name_id: created.id,
        })
        .await
        .map_err(|e| api_failure(&mut store, e))?;

    println!(
        "Attached source name '{}' (id {}) to branch {}",
        name.trim(),
        created.id,
        branch
    );

    Ok(())
}

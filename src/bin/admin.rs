//! CLI administration tool for shortlinks.
//!
//! Creates, resolves and lists short links and performs database checks
//! without going through the HTTP API. Uses the same link service as the
//! server, so validation, reserved words and caching behave identically.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link (prompts for the URL when omitted)
//! cargo run --bin admin -- shorten https://example.com --code promo
//!
//! # Resolve a code
//! cargo run --bin admin -- resolve promo
//!
//! # List all mappings
//! cargo run --bin admin -- list
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shortlinks::config`].

use shortlinks::config::{self, Config};
use shortlinks::prelude::LinkError;
use shortlinks::server::{build_link_service, connect_cache, connect_database};
use shortlinks::state::SharedLinkService;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;

/// CLI tool for managing shortlinks.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Destination URL (prompted for if not provided)
        url: Option<String>,

        /// Custom short code (random if not provided)
        #[arg(short, long)]
        code: Option<String>,

        /// Informational expiry, RFC 3339 (e.g. 2030-01-01T00:00:00Z)
        #[arg(short, long)]
        expires_at: Option<DateTime<Utc>>,
    },

    /// Resolve a short code to its destination
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// List all short links
    List,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Shorten {
            url,
            code,
            expires_at,
        } => {
            let service = link_service(&config, pool).await;
            shorten(&service, &config, url, code, expires_at).await?
        }
        Commands::Resolve { code } => {
            let service = link_service(&config, pool).await;
            resolve(&service, &code).await?
        }
        Commands::List => {
            let service = link_service(&config, pool).await;
            list(&service, &config).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn link_service(config: &Config, pool: PgPool) -> SharedLinkService {
    let cache = connect_cache(config).await;
    build_link_service(config, pool, cache)
}

/// Creates a short link, prompting for the URL when it was not given.
///
/// Engine errors are reported with the same wording the HTTP API uses.
async fn shorten(
    service: &SharedLinkService,
    config: &Config,
    url: Option<String>,
    code: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let mapping = match service
        .shorten_until(&url, code.as_deref(), expires_at)
        .await
    {
        Ok(mapping) => mapping,
        Err(e) => {
            println!("{} {}", "❌".red(), describe(&e).red().bold());
            anyhow::bail!(e);
        }
    };

    let short_url = format!("{}/{}", config.base_url.trim_end_matches('/'), mapping.short_code);

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  Code:      {}", mapping.short_code.bright_yellow().bold());
    println!("  URL:       {}", mapping.original_url.cyan());
    println!("  Short URL: {}", short_url.bright_white());
    if let Some(expires_at) = mapping.expires_at {
        println!(
            "  Expires:   {}",
            expires_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
        );
    }
    println!();

    Ok(())
}

async fn resolve(service: &SharedLinkService, code: &str) -> Result<()> {
    match service.resolve(code).await? {
        Some(url) => {
            println!("{} {} {}", code.bright_yellow(), "→".bright_black(), url.cyan());
        }
        None => {
            println!("{}", format!("⚠️  No mapping for '{}'", code).yellow());
        }
    }

    Ok(())
}

/// Lists all mappings, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   Code       Created            Destination
///   ───────────────────────────────────────────────────────────────────────
///   promo      2026-01-15 10:30   https://example.com/spring-sale
///   aZ3kQ9     2026-01-14 08:02   https://docs.rs
/// ```
async fn list(service: &SharedLinkService, config: &Config) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let mappings = service.list_all().await?;

    if mappings.is_empty() {
        println!("{}", "  No short links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<10} {:<18} {}",
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        let code = if mapping.is_expired() {
            mapping.short_code.red()
        } else {
            mapping.short_code.cyan()
        };

        println!(
            "  {:<10} {:<18} {}",
            code,
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.original_url
        );
    }

    println!();
    println!(
        "  Total: {}   Base URL: {}",
        mappings.len().to_string().bright_white().bold(),
        config.base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let mappings: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE deleted_at IS NULL")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Mappings:   {}",
                mappings.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

fn describe(e: &LinkError) -> &'static str {
    match e {
        LinkError::InvalidUrl => "Invalid URL format",
        LinkError::InvalidCode(_) => "Invalid short code format or reserved word",
        LinkError::CodeInUse(_) => "Custom short code is already in use",
        LinkError::PersistenceFailed(_) | LinkError::Unknown(_) => "Internal server error",
    }
}

//! CLI administration tool for LinkSnap.
//!
//! Provides commands for inspecting and cleaning up short URLs and checking
//! the database without going through the web dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # List short URLs, optionally for one user
//! cargo run --bin admin -- urls list --user 5b7c0c1e-...
//!
//! # Delete a short URL by code
//! cargo run --bin admin -- urls delete my-link
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use linksnap::config::mask_connection_string;
use linksnap::domain::entities::ShortUrl;
use linksnap::domain::repositories::UrlRepository;
use linksnap::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing LinkSnap.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short URLs
    Urls {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UrlAction {
    /// List short URLs, newest first
    List {
        /// Only show the URL owned by this user id
        #[arg(short, long)]
        user: Option<Uuid>,
    },

    /// Delete a short URL by its code
    Delete {
        short_code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Urls { action } => handle_url_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_url_action(action: UrlAction, pool: &PgPool) -> Result<()> {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    match action {
        UrlAction::List { user } => list_urls(&repo, user).await,
        UrlAction::Delete { short_code, yes } => delete_url(&repo, &short_code, yes).await,
    }
}

async fn list_urls(repo: &PgUrlRepository, user: Option<Uuid>) -> Result<()> {
    let urls = match user {
        Some(user_id) => repo.list_by_user(user_id).await,
        None => repo.list_all().await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if urls.is_empty() {
        println!("{}", "No short URLs found".yellow());
        return Ok(());
    }

    println!("{}", "🔗 Short URLs".bright_blue().bold());
    println!();

    for url in &urls {
        print_url(url);
    }

    println!("  {} total", urls.len().to_string().bright_green().bold());
    println!();

    Ok(())
}

fn print_url(url: &ShortUrl) {
    let badge = if url.is_custom {
        " custom".magenta().to_string()
    } else {
        String::new()
    };

    println!("  {}{}", url.short_code.cyan().bold(), badge);
    println!("    → {}", url.original_url);
    println!(
        "    {} clicks · created {} · user {}",
        url.clicks.to_string().bright_green(),
        url.created_at.format("%Y-%m-%d %H:%M"),
        url.user_id.to_string().bright_black()
    );
    println!();
}

/// Deletes a short URL regardless of owner.
///
/// Requires confirmation (default: No) unless `--yes` is given.
async fn delete_url(repo: &PgUrlRepository, short_code: &str, skip_confirm: bool) -> Result<()> {
    let url = repo
        .find_by_code(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short URL not found")?;

    print_url(&url);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete_by_code(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete short URL: {}", e))?;

    if deleted {
        println!("{}", "✅ Short URL deleted".green().bold());
    } else {
        println!("{}", "⚠️  Short URL was already gone".yellow());
    }

    Ok(())
}

/// Displays totals across all users.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (urls_count, clicks_count, custom_count): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(clicks), 0)::bigint, COUNT(*) FILTER (WHERE is_custom) FROM urls",
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Short URLs:   {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Custom codes: {}",
        custom_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:       {}",
        clicks_count.to_string().bright_green().bold()
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

            let has_functions: bool = sqlx::query_scalar(
                r#"
                SELECT COUNT(*) = 2
                FROM pg_proc
                WHERE proname IN ('generate_short_code', 'increment_url_clicks')
                "#,
            )
            .fetch_one(pool)
            .await?;

            println!("{}", "✅ Database connection OK".green().bold());

            if !has_functions {
                println!(
                    "{}",
                    "⚠️  generate_short_code / increment_url_clicks not found; run the migrations"
                        .yellow()
                );
            }
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let urls_table: Option<String> =
                sqlx::query_scalar("SELECT to_regclass('public.urls')::text")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  urls table: {}",
                if urls_table.is_some() {
                    "present".green()
                } else {
                    "missing".red()
                }
            );
            println!();
        }
    }

    Ok(())
}

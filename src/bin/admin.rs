//! CLI administration tool for linkylink.
//!
//! Read-only inspection of stored link bundles without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # List bundles, newest first
//! cargo run --bin admin -- bundles list --page 1 --page-size 20
//!
//! # Show one bundle
//! cargo run --bin admin -- bundles show aB3xY9z
//!
//! # Count bundles
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use linkylink::application::services::BundleService;
use linkylink::config::mask_connection_string;
use linkylink::domain::entities::LinkBundle;
use linkylink::infrastructure::persistence::PgBundleRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting linkylink storage.
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
    /// Inspect stored link bundles
    Bundles {
        #[command(subcommand)]
        action: BundleAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Bundle inspection subcommands.
#[derive(Subcommand)]
enum BundleAction {
    /// List bundles, newest first
    List {
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        #[arg(short = 's', long, default_value_t = 20)]
        page_size: i64,
    },

    /// Show a single bundle with all of its links
    Show {
        /// Vanity link of the bundle
        vanity_url: String,
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

type PgBundleService = BundleService<PgBundleRepository>;

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

    let service = BundleService::new(Arc::new(PgBundleRepository::new(Arc::new(pool.clone()))));

    match cli.command {
        Commands::Bundles { action } => handle_bundle_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches bundle inspection commands.
async fn handle_bundle_action(action: BundleAction, service: &PgBundleService) -> Result<()> {
    match action {
        BundleAction::List { page, page_size } => list_bundles(service, page, page_size).await,
        BundleAction::Show { vanity_url } => show_bundle(service, &vanity_url).await,
    }
}

/// Lists bundles as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Link Bundles (page 1)
///
///   Vanity link          Links  Created
///   ────────────────────────────────────────────────
///   aB3xY9z              3      2024-01-15 10:30
/// ```
async fn list_bundles(service: &PgBundleService, page: i64, page_size: i64) -> Result<()> {
    println!(
        "{}",
        format!("📋 Link Bundles (page {})", page.max(1))
            .bright_blue()
            .bold()
    );
    println!();

    let bundles = service
        .list_bundles(page, page_size)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list bundles: {}", e))?;

    if bundles.is_empty() {
        println!("{}", "  No bundles found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<6} {:<20}",
        "Vanity link".bright_white().bold(),
        "Links".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(48).bright_black());

    for bundle in &bundles {
        println!(
            "  {:<20} {:<6} {}",
            bundle.vanity_url.cyan(),
            bundle.links.len(),
            bundle
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Shown: {}",
        bundles.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints one bundle and its link entries.
async fn show_bundle(service: &PgBundleService, vanity_url: &str) -> Result<()> {
    let bundle = service
        .get_bundle(vanity_url)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_bundle(&bundle)?;
    Ok(())
}

fn print_bundle(bundle: &LinkBundle) -> Result<()> {
    println!(
        "{} {}",
        "🔗".bright_blue(),
        bundle.location().bright_blue().bold()
    );
    if let Some(description) = &bundle.description {
        println!("  {}", description.bright_white());
    }
    println!(
        "  Created: {}",
        bundle
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    for (i, link) in bundle.links.iter().enumerate() {
        let rendered = match link.get("url").and_then(|u| u.as_str()) {
            Some(url) => url.to_string(),
            None => serde_json::to_string(link)?,
        };
        println!("  {:>3}. {}", i + 1, rendered.cyan());
    }
    println!();

    Ok(())
}

/// Displays the number of stored bundles.
async fn handle_stats(service: &PgBundleService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let bundles_count = service
        .count_bundles()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count bundles: {}", e))?;

    println!(
        "  Bundles: {}",
        bundles_count.to_string().bright_green().bold()
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

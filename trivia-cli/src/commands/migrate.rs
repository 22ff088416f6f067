//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Create tables only, without inserting the default categories
    #[arg(long)]
    pub no_seed: bool,
}

/// Create the schema and seed the default categories
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    if !args.no_seed {
        let inserted = migrations::seed_categories(&pool)
            .await
            .context("Failed to seed categories")?;
        println!("Schema ready, {} categories added", inserted);
    } else {
        println!("Schema ready");
    }

    Ok(())
}

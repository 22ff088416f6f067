//! trivia CLI - run and provision the trivia API
//!
//! - `serve`: start the HTTP API (PostgreSQL or in-memory store)
//! - `migrate`: create the schema and seed the default categories

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "trivia",
    author,
    version,
    about = "HTTP API serving trivia questions, categories and quiz rounds"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create database tables and seed the default categories
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }
    Ok(())
}

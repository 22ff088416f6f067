//! HTTP server command
//!
//! Runs the trivia API against PostgreSQL, or against an in-memory store
//! holding the default categories with `--memory`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::{create_pool, migrations, MemoryStore, PgStore, SharedStore};
use trivia_server::http::server::DEFAULT_FRONTEND_ORIGIN;
use trivia_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TRIVIA_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Front-end origin allowed by CORS
    #[arg(long, env = "TRIVIA_FRONTEND_ORIGIN", default_value = DEFAULT_FRONTEND_ORIGIN)]
    pub frontend_origin: String,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Create tables and seed categories before serving
    #[arg(long)]
    pub migrate: bool,

    /// Serve from process memory instead of PostgreSQL (data is lost on exit)
    #[arg(long, conflicts_with = "migrate")]
    pub memory: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            frontend_origin: self.frontend_origin.clone(),
            cors_permissive: self.cors_permissive,
        }
    }
}

async fn open_store(args: &ServeArgs) -> Result<SharedStore> {
    if args.memory {
        tracing::warn!("Using in-memory store; data will not persist");
        return Ok(Arc::new(MemoryStore::with_default_categories()));
    }

    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env or .env, or use --memory")?;

    let pool = create_pool(database_url)
        .await
        .context("Failed to create database pool")?;

    if args.migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
        migrations::seed_categories(&pool)
            .await
            .context("Failed to seed categories")?;
    }

    Ok(Arc::new(PgStore::new(pool)))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting trivia server on {}", args.bind);

    let store = open_store(&args).await?;
    let config = args.server_config();

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_server::TriviaStore;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn memory_conflicts_with_migrate() {
        let result = Harness::try_parse_from(["trivia", "--memory", "--migrate"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn memory_wins_over_database_url() {
        let harness = Harness::try_parse_from([
            "trivia",
            "--memory",
            "--database-url",
            "postgres://localhost/trivia",
        ])
        .unwrap();

        let store = open_store(&harness.serve).await.unwrap();
        assert_eq!(store.list_categories().await.unwrap().len(), 6);
    }

    #[test]
    fn args_map_to_server_config() {
        let harness = Harness::try_parse_from([
            "trivia",
            "--memory",
            "--bind",
            "0.0.0.0:8080",
            "--frontend-origin",
            "http://quiz.example",
        ])
        .unwrap();

        let config = harness.serve.server_config();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.frontend_origin, "http://quiz.example");
        assert!(!config.cors_permissive);
    }

    #[tokio::test]
    async fn memory_store_has_default_categories() {
        let harness = Harness::try_parse_from(["trivia", "--memory"]).unwrap();
        let store = open_store(&harness.serve).await.unwrap();
        assert_eq!(store.list_categories().await.unwrap().len(), 6);
    }
}

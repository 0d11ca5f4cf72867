//! Gift giveaway server.
//!
//! Serves the weighted allocation engine over HTTP, backed by PostgreSQL.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use pico_args::Arguments;

use gift_pool::allocator::Allocator;
use gift_pool::catalog::{self, CatalogManager};
use gift_pool::db::{Database, PgClaimRepository, PgGiftRepository, ensure_schema};
use gift_pool::ledger::ClaimLedger;
use gp_server::api::{self, AppState};
use gp_server::config::ServerConfig;
use gp_server::logging;

const HELP: &str = "\
Run a gift giveaway server

USAGE:
  gp_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:6969]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]
  --seed       PATH        Gift seed definition file   [default: env GIFT_SEED_PATH or data/gifts.json]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  GIFT_SEED_PATH           Path to the gifts JSON seed file
  SEED_ON_EMPTY            Seed the catalog automatically when empty (default: true)
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let db_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let seed_override: Option<String> = pargs.opt_value_from_str("--seed")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, db_url_override, seed_override)?;
    tracing::info!("Starting gift giveaway server at {}", config.bind);

    let seed = catalog::load_seed_file(&config.seed_path)
        .map_err(|e| anyhow::anyhow!("Failed to load seed file: {}", e))?;
    tracing::info!(
        "Loaded {} gift type(s) from {}",
        seed.len(),
        config.seed_path
    );

    tracing::info!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    ensure_schema(db.pool())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to ensure schema: {}", e))?;
    tracing::info!("Database connected successfully");

    let gifts = Arc::new(PgGiftRepository::new(db.pool().clone()));
    let claims = Arc::new(PgClaimRepository::new(db.pool().clone()));

    let catalog = Arc::new(CatalogManager::new(gifts, claims.clone()));
    let ledger = Arc::new(ClaimLedger::new(claims));
    let allocator = Arc::new(Allocator::new(catalog.clone(), ledger.clone()));

    // First boot against a fresh database: load the seed so the pool is live
    if config.seed_on_empty && catalog.list_gifts().await?.is_empty() {
        tracing::info!("Catalog is empty, seeding from {}", config.seed_path);
        catalog.reset(&seed).await?;
    }

    let state = AppState {
        catalog,
        allocator,
        ledger,
        seed: Arc::new(seed),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tracing::info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}

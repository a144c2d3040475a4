//! Simple Ledger - HTTP gateway entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌─────────────┐    ┌────────────┐
//! │  Config  │───▶│ Postgres │───▶│ Coordinator │───▶│  Gateway   │
//! │  (YAML)  │    │ (+migr.) │    │  (guard)    │    │  (axum)    │
//! └──────────┘    └──────────┘    └─────────────┘    └────────────┘
//! ```
//!
//! Usage: `simple_ledger [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;

use simple_ledger::config::AppConfig;
use simple_ledger::db::Database;
use simple_ledger::gateway::{self, state::AppState};
use simple_ledger::transfer::TransferCoordinator;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }
    let _log_guard = simple_ledger::logging::init_logging(&app_config)?;

    tracing::info!(
        env = %env,
        version = env!("GIT_HASH"),
        "Starting Simple Ledger"
    );

    let db = Database::connect(&app_config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;
    if app_config.database.run_migrations {
        db.migrate().await.context("Failed to apply migrations")?;
    }

    let coordinator = Arc::new(TransferCoordinator::from_config(
        db.clone(),
        &app_config.transfer,
    ));
    let state = Arc::new(AppState::new(db, coordinator));

    gateway::run_server(&app_config.gateway, state).await
}

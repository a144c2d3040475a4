use std::sync::Arc;

use crate::db::Database;
use crate::transfer::TransferCoordinator;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL pool for plain reads and account creation
    pub db: Database,
    /// Sole writer of balances
    pub coordinator: Arc<TransferCoordinator>,
}

impl AppState {
    pub fn new(db: Database, coordinator: Arc<TransferCoordinator>) -> Self {
        Self { db, coordinator }
    }
}

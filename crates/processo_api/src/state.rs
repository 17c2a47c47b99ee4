use processo_core::{Database, ProcessoService, SqliteProcessoRepository};
use std::sync::Arc;

pub type SqliteProcessoService = ProcessoService<SqliteProcessoRepository>;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SqliteProcessoService>,
}

impl AppState {
    pub fn new(service: SqliteProcessoService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the default SQLite-backed service over `db`.
    pub fn from_database(db: Database) -> Self {
        Self::new(ProcessoService::new(SqliteProcessoRepository::new(db)))
    }
}

//! Core domain logic for the processo record API.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schema;
pub mod service;
pub mod view;

pub use db::{open_db, open_db_in_memory, Database, DbError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::processo::{Processo, ProcessoId, ProcessoValidationError};
pub use repo::processo_repo::{
    ProcessoRepository, RepoError, RepoResult, SqliteProcessoRepository,
};
pub use schema::{ProcessoBusca, ProcessoBuscaInput, ProcessoForm, ProcessoFormInput};
pub use service::processo_service::{ProcessoService, ServiceError, ServiceResult};
pub use view::{
    apresenta_lista, apresenta_processo, apresenta_remocao, ProcessoListView, ProcessoRemovidoView,
    ProcessoView,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

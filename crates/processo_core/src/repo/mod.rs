//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence gateway contract for processo records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs separate semantic errors (`DuplicateNumero`, `NotFound`)
//!   from DB transport errors.

pub mod processo_repo;

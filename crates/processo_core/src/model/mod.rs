//! Processo domain model.
//!
//! # Responsibility
//! - Define the canonical processo record and its field limits.
//!
//! # Invariants
//! - Every persisted processo is identified externally by its unique `numero`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod processo;

//! HTTP surface for the processo record API.
//!
//! # Responsibility
//! - Bind HTTP requests to the core schemas and use-case service.
//! - Map use-case outcomes to status codes and JSON payloads.
//!
//! # Invariants
//! - Handlers never let a failure escape as an unstructured response.
//! - Storage work runs off the async executor threads.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod state;

pub use app::build_router;

//! Folio Core - Domain entities, services, and traits.
//!
//! This crate contains the portfolio document model and the view accounting
//! logic. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod errors;
pub mod portfolios;
pub mod utils;

pub use portfolios::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! SQLite storage implementation for Folio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `folio-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - The single-writer actor that serializes all writes
//! - Repository implementations and database-specific model types
//!
//! ```text
//!     core (domain)
//!          │
//!          ▼
//!  storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod portfolios;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from folio-core for convenience
pub use folio_core::errors::{DatabaseError, Error, Result};

//! Storage layer for Valora Earth
//!
//! SQLite persistence for inquiries, estimates and the analysis audit log.

pub mod error;
mod migrations;
mod sqlite_storage;
pub mod traits;

pub use error::StorageError;
pub use migrations::run_migrations;
pub use sqlite_storage::SqliteStorage;

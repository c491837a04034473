//! Database layer over the ERP's ledger tables.
//!
//! This crate provides:
//! - A parameterised SQL condition builder
//! - Read-only repositories for GL entries, accounts and item prices
//!
//! The tables belong to the ERP; nothing here creates or migrates them.

pub mod query;
pub mod repositories;

pub use repositories::{
    AccountRepository, GlEntryRepository, ItemPriceRepository, RepositoryError,
};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tally_shared::DatabaseConfig;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}

//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface over the ERP tables,
//! hiding the `SeaORM` statements from the rest of the application.

pub mod account;
pub mod gl_entry;
pub mod item_price;

pub use account::AccountRepository;
pub use gl_entry::GlEntryRepository;
pub use item_price::ItemPriceRepository;

use sea_orm::DbErr;
use tally_shared::AppError;

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::Database(err.to_string())
    }
}

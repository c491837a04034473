//! Tally-style ledger statements.
//!
//! This module provides the running-balance and particulars logic shared by
//! the ledger-style reports:
//! - Tally Ledger ("By"/"To" particulars)
//! - Cash Book ("Cr"/"Dr" particulars, subtotal line)
//! - Banking ("Cr"/"Dr" particulars, subtotal line)

pub mod builder;
pub mod style;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::{LedgerStatementBuilder, build_statement};
pub use style::{Side, StatementStyle, TransactionKind, ZeroOpening};
pub use types::*;

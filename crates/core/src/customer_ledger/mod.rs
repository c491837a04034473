//! Customer detailed ledger.
//!
//! One row per voucher (invoice, payment, journal, ...) for a single
//! customer, with a running DR/CR balance and document details.

pub mod builder;
pub mod types;

pub use builder::CustomerLedgerBuilder;
pub use types::*;

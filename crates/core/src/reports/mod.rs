//! Report preparation and presentation.
//!
//! This module turns request filters into validated selections and shapes
//! builder output into report responses:
//! - Filter validation and scope resolution
//! - Column layouts per report
//! - Display dates and print header metadata

pub mod error;
pub mod filters;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use filters::{
    CustomerLedgerFilters, CustomerSelection, ItemPriceFilters, LedgerFilters, LedgerSelection,
    PartyFilter, ReportPeriod, resolve_cash_accounts,
};
pub use service::ReportService;
pub use types::*;

//! Report logic for Tally-style ledgers.
//!
//! This crate contains pure report logic with ZERO web or database dependencies.
//! Postings, balances and price records come in as typed values; rows come out.
//!
//! # Modules
//!
//! - `statement` - Running-balance statements (Tally Ledger, Cash Book, Banking)
//! - `customer_ledger` - Voucher-level customer statement
//! - `item_prices` - Item x price-list matrix
//! - `reports` - Filters, column layouts and print headers

pub mod customer_ledger;
pub mod item_prices;
pub mod reports;
pub mod statement;

//! Item prices report.
//!
//! Lays out one row per item and one column per selected buying and
//! selling price list.

pub mod price_map;
pub mod report;

pub use price_map::{ItemPrice, PriceMap};
pub use report::{Item, ItemPriceRow, ItemPricesReport, PriceListColumn, PriceListSide, scrub};

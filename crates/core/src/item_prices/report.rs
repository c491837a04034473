//! Item × price-list matrix.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price_map::PriceMap;

/// Turns a display name into a field name: lowercase, spaces and hyphens
/// become underscores.
#[must_use]
pub fn scrub(name: &str) -> String {
    name.replace([' ', '-'], "_").to_lowercase()
}

/// An item to price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item code.
    pub item_code: String,
    /// Item name.
    pub item_name: String,
    /// Stock unit of measure.
    pub stock_uom: Option<String>,
}

/// Whether a price list is used for buying or selling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceListSide {
    /// Buying price list.
    Buying,
    /// Selling price list.
    Selling,
}

impl PriceListSide {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Buying => "buying",
            Self::Selling => "selling",
        }
    }
}

/// One price-list column of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListColumn {
    /// Buying or selling.
    pub side: PriceListSide,
    /// Price list name.
    pub price_list: String,
    /// Price list currency.
    pub currency: String,
    /// Row field holding the rate, e.g. `selling_standard_selling`.
    pub fieldname: String,
    /// Header, e.g. `Standard Selling (USD)`.
    pub label: String,
}

impl PriceListColumn {
    /// Creates the column for `price_list`.
    #[must_use]
    pub fn new(side: PriceListSide, price_list: &str, currency: &str) -> Self {
        Self {
            side,
            price_list: price_list.to_string(),
            currency: currency.to_string(),
            fieldname: format!("{}_{}", side.prefix(), scrub(price_list)),
            label: format!("{price_list} ({currency})"),
        }
    }
}

/// One item with its rate per price-list column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPriceRow {
    /// Item code.
    pub item_code: String,
    /// Item name.
    pub item_name: String,
    /// Stock unit of measure.
    pub uom: Option<String>,
    /// Rates keyed by column field name.
    #[serde(flatten)]
    pub rates: BTreeMap<String, Decimal>,
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPricesReport {
    /// Price-list columns, buying lists first.
    pub columns: Vec<PriceListColumn>,
    /// One row per item.
    pub rows: Vec<ItemPriceRow>,
}

impl ItemPricesReport {
    /// Builds the report. `columns` should list buying lists before selling
    /// lists; rows follow the order of `items`.
    #[must_use]
    pub fn build(items: &[Item], columns: Vec<PriceListColumn>, prices: &PriceMap) -> Self {
        let rows = items
            .iter()
            .map(|item| {
                let rates = columns
                    .iter()
                    .map(|column| {
                        let rate = prices.rate(
                            &item.item_code,
                            &column.price_list,
                            item.stock_uom.as_deref(),
                        );
                        (column.fieldname.clone(), rate)
                    })
                    .collect();

                ItemPriceRow {
                    item_code: item.item_code.clone(),
                    item_name: item.item_name.clone(),
                    uom: item.stock_uom.clone(),
                    rates,
                }
            })
            .collect();

        Self { columns, rows }
    }
}

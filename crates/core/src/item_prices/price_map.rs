//! Price lookup with unit-of-measure fallback.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `Item Price` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPrice {
    /// Item code.
    pub item_code: String,
    /// Price list name.
    pub price_list: String,
    /// Unit of measure the rate applies to, if any.
    pub uom: Option<String>,
    /// Price list rate.
    pub rate: Decimal,
}

/// Item rates keyed by item and price list.
///
/// Every record is stored under `(item, list, uom)`; the first record seen
/// for an `(item, list)` pair also serves as the fallback for any unit.
#[derive(Debug, Clone, Default)]
pub struct PriceMap {
    by_uom: HashMap<(String, String, String), Decimal>,
    by_list: HashMap<(String, String), Decimal>,
}

impl PriceMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one price record.
    pub fn insert(&mut self, price: ItemPrice) {
        let list_key = (price.item_code.clone(), price.price_list.clone());
        self.by_list.entry(list_key).or_insert(price.rate);

        let uom = price.uom.unwrap_or_default();
        self.by_uom
            .insert((price.item_code, price.price_list, uom), price.rate);
    }

    /// Rate of `item_code` on `price_list`: exact unit first, then any unit,
    /// else zero.
    #[must_use]
    pub fn rate(&self, item_code: &str, price_list: &str, uom: Option<&str>) -> Decimal {
        if let Some(uom) = uom.filter(|u| !u.is_empty()) {
            let key = (item_code.to_string(), price_list.to_string(), uom.to_string());
            if let Some(rate) = self.by_uom.get(&key) {
                return *rate;
            }
        }

        self.by_list
            .get(&(item_code.to_string(), price_list.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of stored records (distinct item/list/unit keys).
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_uom.len()
    }

    /// Returns true if no price was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_uom.is_empty()
    }
}

impl FromIterator<ItemPrice> for PriceMap {
    fn from_iter<T: IntoIterator<Item = ItemPrice>>(iter: T) -> Self {
        let mut map = Self::new();
        for price in iter {
            map.insert(price);
        }
        map
    }
}

//! Item, price list and item price queries.

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, FromQueryResult};
use tally_core::item_prices::{Item, ItemPrice, PriceListSide};
use tally_core::reports::ItemPriceFilters;
use tracing::{debug, instrument};

use super::RepositoryError;
use crate::query::Conditions;

#[derive(Debug, FromQueryResult)]
struct ItemRow {
    name: String,
    item_name: Option<String>,
    stock_uom: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct NameRow {
    name: String,
}

#[derive(Debug, FromQueryResult)]
struct CurrencyRow {
    currency: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct ItemPriceRow {
    item_code: String,
    price_list: String,
    price_list_rate: Option<Decimal>,
    uom: Option<String>,
}

/// Repository for `tabItem`, `tabPrice List` and `tabItem Price`.
#[derive(Debug, Clone)]
pub struct ItemPriceRepository {
    db: DatabaseConnection,
}

impl ItemPriceRepository {
    /// Creates a new item price repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enabled items matching the filters, ordered by code.
    #[instrument(skip(self, filters))]
    pub async fn items(&self, filters: &ItemPriceFilters) -> Result<Vec<Item>, RepositoryError> {
        let mut conditions = Conditions::new().raw("disabled = 0");
        if let Some(group) = non_blank(filters.item_group.as_deref()) {
            conditions = conditions.eq("item_group", group);
        }
        if let Some(code) = non_blank(filters.item_code.as_deref()) {
            conditions = conditions.eq("name", code);
        }
        if let Some(brand) = non_blank(filters.brand.as_deref()) {
            conditions = conditions.eq("brand", brand);
        }

        let items: Vec<Item> = ItemRow::find_by_statement(
            conditions.statement("SELECT name, item_name, stock_uom FROM `tabItem`", " ORDER BY name"),
        )
        .all(&self.db)
        .await?
        .into_iter()
        .map(|row| Item {
            item_name: row.item_name.unwrap_or_else(|| row.name.clone()),
            item_code: row.name,
            stock_uom: row.stock_uom,
        })
        .collect();

        debug!(count = items.len(), "Fetched items");
        Ok(items)
    }

    /// Enabled price lists flagged for `side`, ordered by name.
    #[instrument(skip(self))]
    pub async fn price_lists(&self, side: PriceListSide) -> Result<Vec<String>, RepositoryError> {
        let flag = match side {
            PriceListSide::Buying => "buying = 1",
            PriceListSide::Selling => "selling = 1",
        };
        let statement = Conditions::new()
            .raw(flag)
            .raw("enabled = 1")
            .statement("SELECT name FROM `tabPrice List`", " ORDER BY name");

        Ok(NameRow::find_by_statement(statement)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.name)
            .collect())
    }

    /// Currency of `price_list`, if set.
    #[instrument(skip(self))]
    pub async fn price_list_currency(
        &self,
        price_list: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let statement = Conditions::new()
            .eq("name", price_list)
            .statement("SELECT currency FROM `tabPrice List`", "");

        Ok(CurrencyRow::find_by_statement(statement)
            .one(&self.db)
            .await?
            .and_then(|row| row.currency)
            .filter(|currency| !currency.is_empty()))
    }

    /// Prices of `item_codes` on `price_lists`.
    #[instrument(skip_all, fields(items = item_codes.len(), lists = price_lists.len()))]
    pub async fn item_prices(
        &self,
        item_codes: &[String],
        price_lists: &[String],
    ) -> Result<Vec<ItemPrice>, RepositoryError> {
        if item_codes.is_empty() || price_lists.is_empty() {
            return Ok(Vec::new());
        }

        let statement = Conditions::new()
            .is_in("price_list", price_lists)
            .is_in("item_code", item_codes)
            .statement(
                "SELECT item_code, price_list, price_list_rate, uom FROM `tabItem Price`",
                "",
            );

        let prices: Vec<ItemPrice> = ItemPriceRow::find_by_statement(statement)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| ItemPrice {
                item_code: row.item_code,
                price_list: row.price_list,
                uom: row.uom,
                rate: row.price_list_rate.unwrap_or_default(),
            })
            .collect();

        debug!(count = prices.len(), "Fetched item prices");
        Ok(prices)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

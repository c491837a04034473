//! Report routes.
//!
//! One GET endpoint per report; each answers `{columns, data, header}`.

use std::collections::BTreeSet;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{AppState, error::error_response, extractors::ReportQuery};
use tally_core::customer_ledger::{CustomerLedgerBuilder, CustomerLedgerRow};
use tally_core::item_prices::{
    ItemPriceRow, ItemPricesReport, PriceListColumn, PriceListSide, PriceMap,
};
use tally_core::reports::{
    CustomerLedgerFilters, Dated, ItemPriceFilters, LedgerFilters, LedgerLine, LedgerSelection,
    PartyFilter, ReportOutput, ReportPeriod, ReportService,
};
use tally_core::statement::{
    LedgerStatementBuilder, OpeningBalance, StatementScope, StatementStyle,
};
use tally_db::{AccountRepository, GlEntryRepository, ItemPriceRepository};
use tally_shared::AppError;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/tally-ledger", get(get_tally_ledger))
        .route("/reports/cash-book", get(get_cash_book))
        .route("/reports/banking", get(get_banking))
        .route("/reports/customer-ledger", get(get_customer_ledger))
        .route("/reports/item-prices", get(get_item_prices))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the Tally Ledger, Cash Book and Banking reports.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    /// Company.
    pub company: Option<String>,
    /// Period start.
    pub from_date: Option<NaiveDate>,
    /// Period end.
    pub to_date: Option<NaiveDate>,
    /// Ledger account.
    pub account: Option<String>,
    /// Party type.
    pub party_type: Option<String>,
    /// Parties (comma-separated).
    pub party: Option<String>,
    /// Attach the running balance to each row.
    #[serde(default)]
    pub running_balance: bool,
}

impl LedgerQuery {
    fn filters(&self) -> LedgerFilters {
        LedgerFilters {
            company: self.company.clone(),
            from_date: self.from_date,
            to_date: self.to_date,
            account: self.account.clone(),
            party_type: self.party_type.clone(),
            parties: self.party.as_deref().map(parse_list).unwrap_or_default(),
        }
    }
}

/// Query parameters for the Customer Detailed Ledger.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerLedgerQuery {
    /// Company.
    pub company: Option<String>,
    /// Customer.
    pub customer: Option<String>,
    /// Period start.
    pub from_date: Option<NaiveDate>,
    /// Period end.
    pub to_date: Option<NaiveDate>,
}

/// Query parameters for the Item Prices report.
#[derive(Debug, Default, Deserialize)]
pub struct ItemPricesQuery {
    /// Single item.
    pub item_code: Option<String>,
    /// Item group.
    pub item_group: Option<String>,
    /// Brand.
    pub brand: Option<String>,
    /// Buying price lists (comma-separated).
    pub buying_price_list: Option<String>,
    /// Selling price lists (comma-separated).
    pub selling_price_list: Option<String>,
}

impl ItemPricesQuery {
    fn filters(&self) -> ItemPriceFilters {
        ItemPriceFilters {
            item_code: self.item_code.clone(),
            item_group: self.item_group.clone(),
            brand: self.brand.clone(),
            buying_price_lists: self
                .buying_price_list
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            selling_price_lists: self
                .selling_price_list
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn respond<T: Serialize>(result: Result<T, AppError>) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn get_tally_ledger(
    State(state): State<AppState>,
    ReportQuery(query): ReportQuery<LedgerQuery>,
) -> Response {
    respond(tally_ledger(&state, &query).await)
}

async fn get_cash_book(
    State(state): State<AppState>,
    ReportQuery(query): ReportQuery<LedgerQuery>,
) -> Response {
    respond(cash_book(&state, &query).await)
}

async fn get_banking(
    State(state): State<AppState>,
    ReportQuery(query): ReportQuery<LedgerQuery>,
) -> Response {
    respond(banking(&state, &query).await)
}

async fn get_customer_ledger(
    State(state): State<AppState>,
    ReportQuery(query): ReportQuery<CustomerLedgerQuery>,
) -> Response {
    respond(customer_ledger(&state, query).await)
}

async fn get_item_prices(
    State(state): State<AppState>,
    ReportQuery(query): ReportQuery<ItemPricesQuery>,
) -> Response {
    respond(item_prices(&state, &query).await)
}

// ============================================================================
// Report assembly
// ============================================================================

#[instrument(skip_all, fields(company = ?query.company))]
async fn tally_ledger(
    state: &AppState,
    query: &LedgerQuery,
) -> Result<ReportOutput<LedgerLine>, AppError> {
    let (selection, scope) = query.filters().tally_ledger()?;
    ledger_statement(state, StatementStyle::Ledger, scope, selection, query.running_balance).await
}

#[instrument(skip_all, fields(company = ?query.company))]
async fn cash_book(
    state: &AppState,
    query: &LedgerQuery,
) -> Result<ReportOutput<LedgerLine>, AppError> {
    let filters = query.filters();
    let period = ReportPeriod::new(filters.company.as_deref(), filters.from_date, filters.to_date)?;

    let cash_accounts = AccountRepository::new((*state.db).clone())
        .cash_accounts(&period.company)
        .await?;
    let (selection, scope) = filters.cash_book(cash_accounts)?;

    ledger_statement(state, StatementStyle::CashBook, scope, selection, query.running_balance).await
}

#[instrument(skip_all, fields(company = ?query.company))]
async fn banking(
    state: &AppState,
    query: &LedgerQuery,
) -> Result<ReportOutput<LedgerLine>, AppError> {
    let (selection, scope) = query.filters().banking()?;
    ledger_statement(state, StatementStyle::Banking, scope, selection, query.running_balance).await
}

async fn ledger_statement(
    state: &AppState,
    style: StatementStyle,
    scope: StatementScope,
    selection: LedgerSelection,
    running_balance: bool,
) -> Result<ReportOutput<LedgerLine>, AppError> {
    let gl = GlEntryRepository::new((*state.db).clone());

    let opening = if scope.has_balance() {
        gl.opening_balance(&selection).await?
    } else {
        Decimal::ZERO
    };

    let mut postings = gl.postings(&selection).await?;
    if style == StatementStyle::CashBook {
        gl.attach_contra_accounts(&mut postings, &selection.accounts)
            .await?;
    }

    let rows = LedgerStatementBuilder::new(style)
        .with_running_balance(running_balance)
        .build(
            &postings,
            OpeningBalance::new(selection.period.from_date, opening),
            scope,
        );

    let currency = company_currency(state, &selection.period.company).await?;
    info!(
        report = style.report_name(),
        postings = postings.len(),
        rows = rows.len(),
        "Built ledger statement"
    );

    Ok(ReportService::ledger_report(style, scope, &selection, rows, &currency))
}

#[instrument(skip_all, fields(customer = ?query.customer))]
async fn customer_ledger(
    state: &AppState,
    query: CustomerLedgerQuery,
) -> Result<ReportOutput<Dated<CustomerLedgerRow>>, AppError> {
    let selection = CustomerLedgerFilters {
        company: query.company,
        customer: query.customer,
        from_date: query.from_date,
        to_date: query.to_date,
    }
    .validate()?;

    let gl = GlEntryRepository::new((*state.db).clone());
    let customer_scope = LedgerSelection {
        period: selection.period.clone(),
        accounts: Vec::new(),
        party: Some(PartyFilter {
            party_type: "Customer".to_string(),
            parties: vec![selection.customer.clone()],
        }),
    };
    let opening = gl.opening_balance(&customer_scope).await?;
    let vouchers = gl.customer_vouchers(&selection).await?;

    let accounts = AccountRepository::new((*state.db).clone());
    let currency = match accounts.customer_currency(&selection.customer).await? {
        Some(currency) => currency,
        None => company_currency(state, &selection.period.company).await?,
    };

    let rows = CustomerLedgerBuilder::new(currency.clone()).build(
        OpeningBalance::new(selection.period.from_date, opening),
        vouchers,
    );
    info!(rows = rows.len(), "Built customer ledger");

    Ok(ReportService::customer_ledger_report(&selection, rows, &currency))
}

#[instrument(skip_all)]
async fn item_prices(
    state: &AppState,
    query: &ItemPricesQuery,
) -> Result<ReportOutput<ItemPriceRow>, AppError> {
    let filters = query.filters();
    let repo = ItemPriceRepository::new((*state.db).clone());

    let buying = match filters.buying_price_lists.as_slice() {
        [] => repo.price_lists(PriceListSide::Buying).await?,
        lists => lists.to_vec(),
    };
    let selling = match filters.selling_price_lists.as_slice() {
        [] => repo.price_lists(PriceListSide::Selling).await?,
        lists => lists.to_vec(),
    };

    let mut columns = Vec::with_capacity(buying.len() + selling.len());
    for (side, list) in buying
        .iter()
        .map(|l| (PriceListSide::Buying, l))
        .chain(selling.iter().map(|l| (PriceListSide::Selling, l)))
    {
        let currency = repo
            .price_list_currency(list)
            .await?
            .unwrap_or_else(|| state.reports.default_currency.clone());
        columns.push(PriceListColumn::new(side, list, &currency));
    }

    let items = repo.items(&filters).await?;
    let item_codes: Vec<String> = items.iter().map(|i| i.item_code.clone()).collect();
    let all_lists: Vec<String> = buying
        .iter()
        .chain(&selling)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let prices: PriceMap = repo
        .item_prices(&item_codes, &all_lists)
        .await?
        .into_iter()
        .collect();
    info!(items = items.len(), prices = prices.len(), "Built item price matrix");

    Ok(ReportService::item_prices_report(ItemPricesReport::build(
        &items, columns, &prices,
    )))
}

async fn company_currency(state: &AppState, company: &str) -> Result<String, AppError> {
    Ok(AccountRepository::new((*state.db).clone())
        .company_currency(company)
        .await?
        .unwrap_or_else(|| state.reports.default_currency.clone()))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Splits a comma-separated filter value, dropping blanks and duplicates.
fn parse_list(s: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !values.iter().any(|v| v == part) {
            values.push(part.to_string());
        }
    }
    values
}

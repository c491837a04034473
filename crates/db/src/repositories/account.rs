//! Account, company and customer lookups.

use sea_orm::{DatabaseConnection, FromQueryResult};
use tracing::{debug, instrument};

use super::RepositoryError;
use crate::query::Conditions;

#[derive(Debug, FromQueryResult)]
struct NameRow {
    name: String,
}

#[derive(Debug, FromQueryResult)]
struct CurrencyRow {
    currency: Option<String>,
}

/// Repository for chart-of-accounts and master-data lookups.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enabled leaf accounts of type Cash for `company`, ordered by name.
    #[instrument(skip(self))]
    pub async fn cash_accounts(&self, company: &str) -> Result<Vec<String>, RepositoryError> {
        let statement = Conditions::new()
            .eq("company", company)
            .eq("account_type", "Cash")
            .raw("is_group = 0")
            .raw("disabled = 0")
            .statement("SELECT name FROM `tabAccount`", " ORDER BY name");

        let accounts: Vec<String> = NameRow::find_by_statement(statement)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.name)
            .collect();

        debug!(count = accounts.len(), "Fetched cash accounts");
        Ok(accounts)
    }

    /// Default currency of `company`, if set.
    #[instrument(skip(self))]
    pub async fn company_currency(&self, company: &str) -> Result<Option<String>, RepositoryError> {
        self.currency_of(
            Conditions::new()
                .eq("name", company)
                .statement("SELECT default_currency AS currency FROM `tabCompany`", ""),
        )
        .await
    }

    /// Default currency of `customer`, if set.
    #[instrument(skip(self))]
    pub async fn customer_currency(
        &self,
        customer: &str,
    ) -> Result<Option<String>, RepositoryError> {
        self.currency_of(
            Conditions::new()
                .eq("name", customer)
                .statement("SELECT default_currency AS currency FROM `tabCustomer`", ""),
        )
        .await
    }

    async fn currency_of(
        &self,
        statement: sea_orm::Statement,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(CurrencyRow::find_by_statement(statement)
            .one(&self.db)
            .await?
            .and_then(|row| row.currency)
            .filter(|currency| !currency.is_empty()))
    }
}

//! Report filters, validation and scope resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::statement::StatementScope;

/// Filters accepted by the Tally Ledger, Cash Book and Banking reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFilters {
    /// Company.
    pub company: Option<String>,
    /// Period start (inclusive).
    pub from_date: Option<NaiveDate>,
    /// Period end (inclusive).
    pub to_date: Option<NaiveDate>,
    /// Ledger account.
    pub account: Option<String>,
    /// Party type (Customer, Supplier).
    pub party_type: Option<String>,
    /// Selected parties.
    #[serde(default)]
    pub parties: Vec<String>,
}

/// Company and inclusive date range of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// Company.
    pub company: String,
    /// Period start (inclusive).
    pub from_date: NaiveDate,
    /// Period end (inclusive).
    pub to_date: NaiveDate,
}

impl ReportPeriod {
    /// Validates the three mandatory filters.
    pub fn new(
        company: Option<&str>,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Result<Self, ReportError> {
        let company = company
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ReportError::MissingFilter("a Company"))?;
        let from_date = from_date.ok_or(ReportError::MissingFilter("From Date"))?;
        let to_date = to_date.ok_or(ReportError::MissingFilter("To Date"))?;

        if from_date > to_date {
            return Err(ReportError::InvalidDateRange {
                start: from_date,
                end: to_date,
            });
        }

        Ok(Self {
            company: company.to_string(),
            from_date,
            to_date,
        })
    }
}

/// Party restriction of a GL query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyFilter {
    /// Party type.
    pub party_type: String,
    /// One or more parties, combined.
    pub parties: Vec<String>,
}

/// Everything the query layer needs to select GL entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSelection {
    /// Company and period.
    pub period: ReportPeriod,
    /// Restrict to these accounts; empty means no account restriction.
    pub accounts: Vec<String>,
    /// Restrict to these parties.
    pub party: Option<PartyFilter>,
}

impl LedgerSelection {
    /// Returns true if neither accounts nor parties restrict the selection.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.accounts.is_empty() && self.party.is_none()
    }
}

impl LedgerFilters {
    /// Party filter, present only when a party type and at least one party
    /// are given.
    #[must_use]
    pub fn party_filter(&self) -> Option<PartyFilter> {
        let party_type = self
            .party_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())?;
        let parties: Vec<String> = self
            .parties
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        if parties.is_empty() {
            return None;
        }

        Some(PartyFilter {
            party_type: party_type.to_string(),
            parties,
        })
    }

    fn selected_account(&self) -> Option<&str> {
        self.account.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    /// Validates the filters for the Tally Ledger and resolves its scope.
    pub fn tally_ledger(&self) -> Result<(LedgerSelection, StatementScope), ReportError> {
        let period = ReportPeriod::new(self.company.as_deref(), self.from_date, self.to_date)?;
        let party = self.party_filter();
        let accounts: Vec<String> = self.selected_account().map(str::to_string).into_iter().collect();

        let scope = match (&accounts[..], &party) {
            ([_], _) => StatementScope::SingleAccount,
            (_, Some(filter)) if filter.parties.len() == 1 => StatementScope::SingleParty,
            (_, Some(_)) => StatementScope::MultipleParties,
            _ => StatementScope::AllAccounts,
        };

        Ok((
            LedgerSelection {
                period,
                accounts,
                party,
            },
            scope,
        ))
    }

    /// Validates the filters for the Banking report. Banking always renders
    /// a single combined statement.
    pub fn banking(&self) -> Result<(LedgerSelection, StatementScope), ReportError> {
        let period = ReportPeriod::new(self.company.as_deref(), self.from_date, self.to_date)?;
        let party = self.party_filter();

        let scope = match &party {
            Some(filter) if filter.parties.len() == 1 => StatementScope::SingleParty,
            _ => StatementScope::MultipleParties,
        };

        Ok((
            LedgerSelection {
                period,
                accounts: Vec::new(),
                party,
            },
            scope,
        ))
    }

    /// Validates the filters for the Cash Book against the company's cash
    /// accounts.
    pub fn cash_book(
        &self,
        cash_accounts: Vec<String>,
    ) -> Result<(LedgerSelection, StatementScope), ReportError> {
        let period = ReportPeriod::new(self.company.as_deref(), self.from_date, self.to_date)?;
        let accounts = resolve_cash_accounts(self.selected_account(), cash_accounts)?;

        Ok((
            LedgerSelection {
                period,
                accounts,
                party: None,
            },
            StatementScope::SingleAccount,
        ))
    }
}

/// Narrows the company's cash accounts to the selected one, if any.
pub fn resolve_cash_accounts(
    selected: Option<&str>,
    cash_accounts: Vec<String>,
) -> Result<Vec<String>, ReportError> {
    if cash_accounts.is_empty() {
        return Err(ReportError::NoCashAccounts);
    }

    match selected {
        Some(account) if cash_accounts.iter().any(|a| a == account) => {
            Ok(vec![account.to_string()])
        }
        Some(account) => Err(ReportError::NotACashAccount(account.to_string())),
        None => Ok(cash_accounts),
    }
}

/// Filters of the Customer Detailed Ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerLedgerFilters {
    /// Company.
    pub company: Option<String>,
    /// Customer.
    pub customer: Option<String>,
    /// Period start (inclusive).
    pub from_date: Option<NaiveDate>,
    /// Period end (inclusive).
    pub to_date: Option<NaiveDate>,
}

/// Validated customer ledger selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSelection {
    /// Company and period.
    pub period: ReportPeriod,
    /// Customer.
    pub customer: String,
}

impl CustomerLedgerFilters {
    /// Validates the filters.
    pub fn validate(&self) -> Result<CustomerSelection, ReportError> {
        let company = self
            .company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ReportError::MissingFilter("a Company"))?;
        let customer = self
            .customer
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ReportError::MissingFilter("a Customer"))?;
        let period = ReportPeriod::new(Some(company), self.from_date, self.to_date)?;

        Ok(CustomerSelection {
            period,
            customer: customer.to_string(),
        })
    }
}

/// Filters of the Item Prices report. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPriceFilters {
    /// Single item.
    pub item_code: Option<String>,
    /// Item group.
    pub item_group: Option<String>,
    /// Brand.
    pub brand: Option<String>,
    /// Buying price lists; empty means every enabled buying list.
    #[serde(default)]
    pub buying_price_lists: Vec<String>,
    /// Selling price lists; empty means every enabled selling list.
    #[serde(default)]
    pub selling_price_lists: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn base() -> LedgerFilters {
        LedgerFilters {
            company: Some("Tally Co".to_string()),
            from_date: Some(date(4, 1)),
            to_date: Some(date(4, 30)),
            ..LedgerFilters::default()
        }
    }

    #[rstest]
    #[case(None, Some(date(4, 1)), Some(date(4, 30)), "Please select a Company")]
    #[case(Some("  "), Some(date(4, 1)), Some(date(4, 30)), "Please select a Company")]
    #[case(Some("Tally Co"), None, Some(date(4, 30)), "Please select From Date")]
    #[case(Some("Tally Co"), Some(date(4, 1)), None, "Please select To Date")]
    fn test_missing_required_filters(
        #[case] company: Option<&str>,
        #[case] from: Option<NaiveDate>,
        #[case] to: Option<NaiveDate>,
        #[case] message: &str,
    ) {
        let err = ReportPeriod::new(company, from, to).unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = ReportPeriod::new(Some("Tally Co"), Some(date(5, 1)), Some(date(4, 1))).unwrap_err();
        assert_eq!(
            err,
            ReportError::InvalidDateRange {
                start: date(5, 1),
                end: date(4, 1)
            }
        );
    }

    #[test]
    fn test_single_day_range_allowed() {
        assert!(ReportPeriod::new(Some("Tally Co"), Some(date(4, 1)), Some(date(4, 1))).is_ok());
    }

    #[test]
    fn test_tally_ledger_scope_resolution() {
        let (selection, scope) = base().tally_ledger().unwrap();
        assert_eq!(scope, StatementScope::AllAccounts);
        assert!(selection.is_unrestricted());

        let mut filters = base();
        filters.account = Some("Cash - TC".to_string());
        let (selection, scope) = filters.tally_ledger().unwrap();
        assert_eq!(scope, StatementScope::SingleAccount);
        assert_eq!(selection.accounts, vec!["Cash - TC".to_string()]);

        let mut filters = base();
        filters.party_type = Some("Customer".to_string());
        filters.parties = vec!["Acme Corp".to_string()];
        assert_eq!(filters.tally_ledger().unwrap().1, StatementScope::SingleParty);

        filters.parties.push("Beta LLC".to_string());
        let (selection, scope) = filters.tally_ledger().unwrap();
        assert_eq!(scope, StatementScope::MultipleParties);
        assert_eq!(selection.party.unwrap().parties.len(), 2);
    }

    #[test]
    fn test_party_without_type_is_ignored() {
        let mut filters = base();
        filters.parties = vec!["Acme Corp".to_string()];
        assert!(filters.party_filter().is_none());
        assert_eq!(filters.tally_ledger().unwrap().1, StatementScope::AllAccounts);

        filters.party_type = Some("Customer".to_string());
        filters.parties = vec![" ".to_string()];
        assert!(filters.party_filter().is_none());
    }

    #[test]
    fn test_banking_scope() {
        let (selection, scope) = base().banking().unwrap();
        assert_eq!(scope, StatementScope::MultipleParties);
        assert!(selection.is_unrestricted());

        let mut filters = base();
        filters.party_type = Some("Supplier".to_string());
        filters.parties = vec!["Paper Mill".to_string()];
        assert_eq!(filters.banking().unwrap().1, StatementScope::SingleParty);
    }

    #[test]
    fn test_resolve_cash_accounts() {
        let cash = vec!["Cash - TC".to_string(), "Petty Cash - TC".to_string()];

        assert_eq!(
            resolve_cash_accounts(None, cash.clone()).unwrap(),
            cash.clone()
        );
        assert_eq!(
            resolve_cash_accounts(Some("Petty Cash - TC"), cash.clone()).unwrap(),
            vec!["Petty Cash - TC".to_string()]
        );
        assert_eq!(
            resolve_cash_accounts(Some("Bank - TC"), cash).unwrap_err(),
            ReportError::NotACashAccount("Bank - TC".to_string())
        );
        assert_eq!(
            resolve_cash_accounts(None, Vec::new()).unwrap_err(),
            ReportError::NoCashAccounts
        );
    }

    #[test]
    fn test_cash_book_selection() {
        let mut filters = base();
        filters.account = Some("Cash - TC".to_string());
        let (selection, scope) = filters.cash_book(vec!["Cash - TC".to_string()]).unwrap();

        assert_eq!(scope, StatementScope::SingleAccount);
        assert_eq!(selection.accounts, vec!["Cash - TC".to_string()]);
        assert!(selection.party.is_none());
    }

    #[test]
    fn test_customer_filters() {
        let filters = CustomerLedgerFilters {
            company: Some("Tally Co".to_string()),
            customer: None,
            from_date: Some(date(4, 1)),
            to_date: Some(date(4, 30)),
        };
        assert_eq!(
            filters.validate().unwrap_err(),
            ReportError::MissingFilter("a Customer")
        );

        let filters = CustomerLedgerFilters {
            customer: Some("Acme Corp".to_string()),
            ..filters
        };
        let selection = filters.validate().unwrap();
        assert_eq!(selection.customer, "Acme Corp");
        assert_eq!(selection.period.company, "Tally Co");
    }
}

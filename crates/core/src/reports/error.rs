//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;
use tally_shared::AppError;

/// Errors that can occur while preparing a report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// A required filter is missing.
    #[error("Please select {0}")]
    MissingFilter(&'static str),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// The company has no enabled cash ledger.
    #[error("No Cash accounts found for this company")]
    NoCashAccounts,

    /// The selected account is not one of the company's cash ledgers.
    #[error("Selected account is not a Cash account: {0}")]
    NotACashAccount(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MissingFilter(_) | ReportError::InvalidDateRange { .. } => {
                Self::Validation(err.to_string())
            }
            ReportError::NoCashAccounts | ReportError::NotACashAccount(_) => {
                Self::BusinessRule(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ReportError::MissingFilter("a Company").to_string(),
            "Please select a Company"
        );
        assert_eq!(
            ReportError::NotACashAccount("Bank - TC".into()).to_string(),
            "Selected account is not a Cash account: Bank - TC"
        );
    }

    #[test]
    fn test_into_app_error() {
        let validation: AppError = ReportError::MissingFilter("From Date").into();
        assert_eq!(validation.status_code(), 400);

        let business: AppError = ReportError::NoCashAccounts.into();
        assert_eq!(business.status_code(), 422);
        assert_eq!(
            business.to_string(),
            "Business rule violation: No Cash accounts found for this company"
        );
    }
}

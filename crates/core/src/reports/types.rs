//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::{BalanceSign, RowKind};

/// Display type of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Plain text.
    Data,
    /// Link to another document.
    Link,
    /// Money amount.
    Currency,
    /// Decimal number.
    Float,
}

/// Column definition sent alongside report data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Row field rendered in this column.
    pub fieldname: String,
    /// Header text.
    pub label: String,
    /// Display type.
    pub fieldtype: FieldType,
    /// Linked document type, for `Link` columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Decimal places, for `Float` columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    /// Width in pixels.
    pub width: u32,
}

impl ColumnSpec {
    /// Creates a column.
    #[must_use]
    pub fn new(fieldname: &str, label: &str, fieldtype: FieldType, width: u32) -> Self {
        Self {
            fieldname: fieldname.to_string(),
            label: label.to_string(),
            fieldtype,
            options: None,
            precision: None,
            width,
        }
    }

    /// Creates a `Link` column to `doctype`.
    #[must_use]
    pub fn link(fieldname: &str, label: &str, doctype: &str, width: u32) -> Self {
        Self {
            options: Some(doctype.to_string()),
            ..Self::new(fieldname, label, FieldType::Link, width)
        }
    }
}

/// Print header metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    /// Title, e.g. `Cash Book - Tally Co`.
    pub title: String,
    /// Company.
    pub company: String,
    /// Formatted period start.
    pub from_date: String,
    /// Formatted period end.
    pub to_date: String,
    /// Currency of the amounts.
    pub currency: String,
    /// Party type, for party-scoped statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_type: Option<String>,
    /// Party name(s), for party-scoped statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
}

/// One displayed line of a Tally Ledger, Cash Book or Banking report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Row kind, for styling summary rows.
    pub kind: RowKind,
    /// Formatted date, empty on summary rows.
    pub posting_date: String,
    /// Ledger account (Tally Ledger) or counterpart account (Cash Book, Banking).
    pub account: String,
    /// Particulars.
    pub particulars: String,
    /// Voucher type display name.
    pub vch_type: String,
    /// Voucher number.
    pub vch_no: String,
    /// Raw voucher type, for linking back to the document.
    pub voucher_type: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    /// Side of the running balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_sign: Option<BalanceSign>,
}

/// A row with its formatted display date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dated<T> {
    /// Formatted date.
    pub posting_date: String,
    /// The row.
    #[serde(flatten)]
    pub row: T,
}

/// A complete report response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutput<T> {
    /// Column layout.
    pub columns: Vec<ColumnSpec>,
    /// Rows.
    pub data: Vec<T>,
    /// Print header, for printable reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<ReportHeader>,
}

/// Display formats for dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `5-4-2024`.
    Compact,
    /// `05/04/2024`.
    Slashed,
    /// `5-Apr-2024`.
    Print,
}

impl DateFormat {
    const fn pattern(self) -> &'static str {
        match self {
            Self::Compact => "%-d-%-m-%Y",
            Self::Slashed => "%d/%m/%Y",
            Self::Print => "%-d-%b-%Y",
        }
    }

    /// Formats `date`.
    #[must_use]
    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

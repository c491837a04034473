//! Statement data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single general-ledger posting, as delivered by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Posting date.
    pub date: NaiveDate,
    /// Ledger account the posting belongs to.
    pub account: String,
    /// Related accounts or parties, possibly comma-separated.
    #[serde(default)]
    pub counterpart_hint: Option<String>,
    /// Party type (Customer, Supplier, ...).
    #[serde(default)]
    pub party_type: Option<String>,
    /// Party name.
    #[serde(default)]
    pub party: Option<String>,
    /// Originating voucher type (e.g. "Sales Invoice").
    pub transaction_kind: String,
    /// Originating voucher number.
    pub transaction_ref: String,
    /// Debit amount.
    #[serde(default)]
    pub debit_amount: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit_amount: Decimal,
    /// Account of the opposite leg of the same voucher, when the query layer
    /// resolved one.
    #[serde(default)]
    pub contra_account: Option<String>,
}

/// Net debit-minus-credit of everything posted before the period start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBalance {
    /// First day of the reporting period.
    pub as_of: NaiveDate,
    /// Signed balance, positive meaning net debit.
    pub amount: Decimal,
}

impl OpeningBalance {
    /// Creates an opening balance.
    #[must_use]
    pub const fn new(as_of: NaiveDate, amount: Decimal) -> Self {
        Self { as_of, amount }
    }

    /// Creates a zero opening balance.
    #[must_use]
    pub const fn zero(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            amount: Decimal::ZERO,
        }
    }
}

/// Which ledger slice the postings were selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementScope {
    /// One account.
    SingleAccount,
    /// One party.
    SingleParty,
    /// Several parties combined into one statement.
    MultipleParties,
    /// Every account of the company; no opening or closing balance.
    AllAccounts,
}

impl StatementScope {
    /// Returns true if the scope yields a single balance (opening/closing rows).
    #[must_use]
    pub const fn has_balance(self) -> bool {
        !matches!(self, Self::AllAccounts)
    }
}

/// Kind of statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Balance brought forward.
    OpeningBalance,
    /// One posting.
    Transaction,
    /// Totals before the closing balance.
    Subtotal,
    /// Balance carried forward.
    ClosingBalance,
    /// Balanced totals.
    GrandTotal,
}

/// Side of a running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSign {
    /// Net debit (zero included).
    #[serde(rename = "DR")]
    Dr,
    /// Net credit.
    #[serde(rename = "CR")]
    Cr,
}

impl BalanceSign {
    /// Sign of a debit-minus-credit balance. Zero reads as DR.
    #[must_use]
    pub fn of(balance: Decimal) -> Self {
        if balance >= Decimal::ZERO {
            Self::Dr
        } else {
            Self::Cr
        }
    }
}

impl std::fmt::Display for BalanceSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dr => write!(f, "DR"),
            Self::Cr => write!(f, "CR"),
        }
    }
}

/// One line of a ledger statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Row kind.
    pub kind: RowKind,
    /// Date, for transaction and opening rows.
    pub date: Option<NaiveDate>,
    /// Ledger account, for all-accounts statements.
    pub account: Option<String>,
    /// Particulars, e.g. "By Acme Corp".
    pub label: String,
    /// Resolved counterpart account (display only).
    pub counterpart_account: String,
    /// Display name of the voucher type.
    pub type_label: String,
    /// Raw voucher type, for linking back to the document.
    pub transaction_kind: String,
    /// Voucher number.
    pub reference: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Absolute running balance after this row.
    pub balance: Option<Decimal>,
    /// Side of the running balance.
    pub balance_sign: Option<BalanceSign>,
}

impl StatementRow {
    /// Creates an undated row without voucher information.
    #[must_use]
    pub fn summary(kind: RowKind, label: &str, debit: Decimal, credit: Decimal) -> Self {
        Self {
            kind,
            date: None,
            account: None,
            label: label.to_string(),
            counterpart_account: String::new(),
            type_label: String::new(),
            transaction_kind: String::new(),
            reference: String::new(),
            debit,
            credit,
            balance: None,
            balance_sign: None,
        }
    }

    /// Attaches a running balance.
    #[must_use]
    pub fn with_balance(mut self, net: Decimal) -> Self {
        self.balance = Some(net.abs());
        self.balance_sign = Some(BalanceSign::of(net));
        self
    }
}

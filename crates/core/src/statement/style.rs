//! Per-report presentation conventions.
//!
//! The Tally Ledger, Cash Book and Banking reports share one algorithm and
//! differ only in the values defined here: label prefixes, fallback
//! counterparts, voucher type names and a few sign conventions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Report style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementStyle {
    /// Tally Ledger: "By"/"To" particulars.
    Ledger,
    /// Cash Book: "Cr"/"Dr" particulars over cash accounts.
    CashBook,
    /// Banking: "Cr"/"Dr" particulars over party postings.
    Banking,
}

/// Which side a posting (or balance) falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl Side {
    /// Side of a posting. Debit wins when both amounts are set; `None` when
    /// both are zero.
    #[must_use]
    pub fn of_amounts(debit: Decimal, credit: Decimal) -> Option<Self> {
        if debit > Decimal::ZERO {
            Some(Self::Debit)
        } else if credit > Decimal::ZERO {
            Some(Self::Credit)
        } else {
            None
        }
    }
}

/// Label used when the opening balance is exactly zero.
///
/// The reports disagree here and the difference is kept on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroOpening {
    /// Zero reads like a debit balance ("By Opening Balance").
    DebitSide,
    /// Zero reads like a credit balance ("To Opening Balance").
    CreditSide,
}

/// ERP voucher types with a Tally display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Sales Invoice.
    SalesInvoice,
    /// Purchase Invoice.
    PurchaseInvoice,
    /// Payment Entry.
    PaymentEntry,
    /// Journal Entry.
    JournalEntry,
    /// Credit Note.
    CreditNote,
    /// Debit Note.
    DebitNote,
    /// Stock Entry.
    StockEntry,
    /// Delivery Note.
    DeliveryNote,
    /// Purchase Receipt.
    PurchaseReceipt,
}

impl TransactionKind {
    /// Parses a voucher type. Accepts ERP names ("Payment Entry") and short
    /// keys ("payment", "stock_move"), case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        let kind = match normalized.as_str() {
            "sales invoice" | "sale" | "sales" => Self::SalesInvoice,
            "purchase invoice" | "purchase" => Self::PurchaseInvoice,
            "payment entry" | "payment" => Self::PaymentEntry,
            "journal entry" | "journal" => Self::JournalEntry,
            "credit note" => Self::CreditNote,
            "debit note" => Self::DebitNote,
            "stock entry" | "stock move" => Self::StockEntry,
            "delivery note" => Self::DeliveryNote,
            "purchase receipt" => Self::PurchaseReceipt,
            _ => return None,
        };
        Some(kind)
    }
}

impl StatementStyle {
    /// Convention for a zero opening balance.
    #[must_use]
    pub const fn zero_opening(self) -> ZeroOpening {
        match self {
            Self::Ledger => ZeroOpening::DebitSide,
            Self::CashBook | Self::Banking => ZeroOpening::CreditSide,
        }
    }

    /// Whether a subtotal line precedes the closing balance.
    #[must_use]
    pub const fn has_subtotal(self) -> bool {
        matches!(self, Self::CashBook | Self::Banking)
    }

    /// Particulars of the opening balance row.
    #[must_use]
    pub fn opening_label(self, opening: Decimal) -> &'static str {
        let debit_side = if opening.is_zero() {
            self.zero_opening() == ZeroOpening::DebitSide
        } else {
            opening > Decimal::ZERO
        };

        if debit_side {
            "By Opening Balance"
        } else {
            "To Opening Balance"
        }
    }

    /// Particulars of the closing balance row. Zero counts as non-positive.
    #[must_use]
    pub fn closing_label(self, closing: Decimal) -> &'static str {
        let positive = closing > Decimal::ZERO;
        match (self, positive) {
            (Self::Ledger, true) => "To Closing Balance",
            (Self::Ledger, false) => "By Closing Balance",
            (Self::CashBook | Self::Banking, true) => "Dr  Closing Balance",
            (Self::CashBook | Self::Banking, false) => "Cr  Closing Balance",
        }
    }

    /// Particulars of a posting: prefix, separator and counterpart.
    #[must_use]
    pub fn particulars(self, side: Option<Side>, counterpart: &str) -> String {
        match (self, side) {
            (_, None) => counterpart.to_string(),
            (Self::Ledger, Some(Side::Debit)) => format!("By {counterpart}"),
            (Self::Ledger, Some(Side::Credit)) => format!("To {counterpart}"),
            (Self::CashBook | Self::Banking, Some(Side::Debit)) => format!("Cr  {counterpart}"),
            (Self::CashBook | Self::Banking, Some(Side::Credit)) => format!("Dr  {counterpart}"),
        }
    }

    /// Counterpart shown when the posting names none.
    #[must_use]
    pub const fn fallback_counterpart(self, side: Side) -> &'static str {
        match (self, side) {
            (Self::Ledger, _) => "Various",
            (Self::CashBook | Self::Banking, Side::Debit) => "Sales",
            (Self::CashBook | Self::Banking, Side::Credit) => "Expenses",
        }
    }

    /// Tally display name of a voucher type. Unknown types pass through.
    #[must_use]
    pub fn type_label(self, transaction_kind: &str) -> String {
        let Some(kind) = TransactionKind::parse(transaction_kind) else {
            return transaction_kind.to_string();
        };

        let label = match (self, kind) {
            (Self::Ledger, TransactionKind::SalesInvoice) => "Sales",
            (Self::CashBook, TransactionKind::SalesInvoice) => "Cash Sales",
            (Self::Banking, TransactionKind::SalesInvoice) => "Bank Sales",
            (_, TransactionKind::PurchaseInvoice) => "Purchase",
            (Self::Ledger, TransactionKind::PaymentEntry) => "Receipt",
            (Self::CashBook | Self::Banking, TransactionKind::PaymentEntry) => "Payment",
            (Self::Ledger, TransactionKind::JournalEntry) => "Journal",
            (Self::CashBook | Self::Banking, TransactionKind::JournalEntry) => "Receipt",
            (_, TransactionKind::CreditNote) => "Credit Note",
            (_, TransactionKind::DebitNote) => "Debit Note",
            (_, TransactionKind::StockEntry) => "Stock Journal",
            (_, TransactionKind::DeliveryNote) => "Delivery Note",
            (Self::Ledger, TransactionKind::PurchaseReceipt) => "Receipt Note",
            (Self::CashBook | Self::Banking, TransactionKind::PurchaseReceipt) => "Receipt",
        };
        label.to_string()
    }

    /// Report name used in print titles.
    #[must_use]
    pub const fn report_name(self) -> &'static str {
        match self {
            Self::Ledger => "Tally Ledger",
            Self::CashBook => "Cash Book",
            Self::Banking => "Banking",
        }
    }
}

//! Customer ledger data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::BalanceSign;

/// Debit and credit of one voucher, summed over its GL entries for the
/// customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherTotals {
    /// Posting date.
    pub date: NaiveDate,
    /// Voucher type (e.g. "Sales Invoice").
    pub voucher_type: String,
    /// Voucher number.
    pub voucher_no: String,
    /// Summed debit.
    #[serde(default)]
    pub debit: Decimal,
    /// Summed credit.
    #[serde(default)]
    pub credit: Decimal,
    /// Document details, when the query layer loaded them.
    #[serde(default)]
    pub detail: Option<VoucherDetail>,
}

/// Document-specific details of a voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "doctype", rename_all = "snake_case")]
pub enum VoucherDetail {
    /// A sales invoice.
    SalesInvoice(InvoiceDetail),
    /// A payment entry.
    Payment(PaymentDetail),
}

/// Sales invoice header and lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    /// Source warehouse.
    pub warehouse: Option<String>,
    /// Document status ("Paid", "Unpaid", "Overdue", ...).
    pub status: String,
    /// Invoice lines in document order.
    pub items: Vec<InvoiceItem>,
}

impl InvoiceDetail {
    /// Returns true if the invoice is fully paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == "Paid"
    }
}

/// One sales invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Item code.
    pub item_code: String,
    /// Item name.
    pub item_name: String,
    /// Quantity.
    pub qty: Decimal,
    /// Unit rate.
    pub rate: Decimal,
    /// Line amount.
    pub amount: Decimal,
    /// Discount amount.
    #[serde(default)]
    pub discount_amount: Decimal,
    /// Unit of measure.
    pub uom: Option<String>,
}

/// Payment entry fields shown in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetail {
    /// Mode of payment.
    pub mode_of_payment: Option<String>,
    /// Cheque / transfer reference.
    pub reference_no: Option<String>,
}

/// Customer ledger row kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerRowKind {
    /// Balance brought forward.
    OpeningBalance,
    /// One voucher.
    Voucher,
}

/// One line of the customer detailed ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerLedgerRow {
    /// Row kind.
    pub kind: CustomerRowKind,
    /// Posting date (period start for the opening row).
    pub date: NaiveDate,
    /// Voucher number.
    pub ref_no: String,
    /// Display type: "Opening Balance", "Invoice", "Payment" or the voucher type.
    #[serde(rename = "type")]
    pub row_type: String,
    /// Warehouse of an invoice.
    pub location: String,
    /// "Paid" / "NOT PAID" for invoices.
    pub payment_status: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Absolute running balance.
    pub balance: Decimal,
    /// Side of the running balance.
    pub balance_type: BalanceSign,
    /// Mode of payment for payments.
    pub payment_method: String,
    /// Free-text note.
    pub notes: String,
    /// Display currency.
    pub currency: String,
    /// Invoice lines.
    pub items: Vec<InvoiceItem>,
    /// Raw voucher type, for linking.
    pub voucher_type: String,
}

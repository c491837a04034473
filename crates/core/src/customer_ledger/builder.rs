//! Customer detailed ledger construction.

use rust_decimal::Decimal;

use super::types::{
    CustomerLedgerRow, CustomerRowKind, InvoiceDetail, PaymentDetail, VoucherDetail, VoucherTotals,
};
use crate::statement::{BalanceSign, OpeningBalance, TransactionKind};

const DEFAULT_PAYMENT_METHOD: &str = "Bank Transfer";
const DEFAULT_PAYMENT_NOTE: &str = "Payment received";
const NOT_PAID: &str = "NOT PAID";

/// Builds the customer detailed ledger: one row per voucher with a running
/// DR/CR balance.
#[derive(Debug, Clone)]
pub struct CustomerLedgerBuilder {
    currency: String,
}

impl CustomerLedgerBuilder {
    /// Creates a builder stamping every row with `currency`.
    #[must_use]
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Builds the ledger.
    ///
    /// `vouchers` must be ordered by posting date, then by first creation.
    pub fn build<I>(&self, opening: OpeningBalance, vouchers: I) -> Vec<CustomerLedgerRow>
    where
        I: IntoIterator<Item = VoucherTotals>,
    {
        let vouchers = vouchers.into_iter();
        let mut rows = Vec::with_capacity(vouchers.size_hint().0 + 1);
        let mut balance = opening.amount;

        rows.push(CustomerLedgerRow {
            kind: CustomerRowKind::OpeningBalance,
            date: opening.as_of,
            ref_no: String::new(),
            row_type: "Opening Balance".to_string(),
            location: String::new(),
            payment_status: String::new(),
            debit: opening.amount.max(Decimal::ZERO),
            credit: opening.amount.min(Decimal::ZERO).abs(),
            balance: balance.abs(),
            balance_type: BalanceSign::of(balance),
            payment_method: String::new(),
            notes: String::new(),
            currency: self.currency.clone(),
            items: Vec::new(),
            voucher_type: String::new(),
        });

        let mut last_date = None;
        for voucher in vouchers {
            debug_assert!(
                last_date.is_none_or(|d| d <= voucher.date),
                "vouchers must be ordered by date"
            );
            last_date = Some(voucher.date);

            balance += voucher.debit - voucher.credit;
            rows.push(self.voucher_row(voucher, balance));
        }

        rows
    }

    fn voucher_row(&self, voucher: VoucherTotals, balance: Decimal) -> CustomerLedgerRow {
        let mut row = CustomerLedgerRow {
            kind: CustomerRowKind::Voucher,
            date: voucher.date,
            ref_no: voucher.voucher_no,
            row_type: voucher.voucher_type.clone(),
            location: String::new(),
            payment_status: String::new(),
            debit: voucher.debit,
            credit: voucher.credit,
            balance: balance.abs(),
            balance_type: BalanceSign::of(balance),
            payment_method: String::new(),
            notes: String::new(),
            currency: self.currency.clone(),
            items: Vec::new(),
            voucher_type: voucher.voucher_type,
        };

        match (TransactionKind::parse(&row.voucher_type), voucher.detail) {
            (Some(TransactionKind::SalesInvoice), detail) => {
                let invoice = match detail {
                    Some(VoucherDetail::SalesInvoice(invoice)) => invoice,
                    _ => InvoiceDetail::default(),
                };
                describe_invoice(&mut row, invoice);
            }
            (Some(TransactionKind::PaymentEntry), detail) => {
                let payment = match detail {
                    Some(VoucherDetail::Payment(payment)) => payment,
                    _ => PaymentDetail::default(),
                };
                describe_payment(&mut row, payment);
            }
            _ => {}
        }

        row
    }
}

fn describe_invoice(row: &mut CustomerLedgerRow, invoice: InvoiceDetail) {
    let paid = invoice.is_paid();
    row.row_type = "Invoice".to_string();
    row.location = invoice.warehouse.unwrap_or_default();
    row.payment_status = if paid { "Paid" } else { NOT_PAID }.to_string();
    if !paid {
        row.notes = NOT_PAID.to_string();
    }
    row.items = invoice.items;
}

fn describe_payment(row: &mut CustomerLedgerRow, payment: PaymentDetail) {
    row.row_type = "Payment".to_string();
    row.payment_method = payment
        .mode_of_payment
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());
    row.notes = payment
        .reference_no
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_NOTE.to_string());
}

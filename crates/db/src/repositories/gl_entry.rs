//! GL entry repository for ledger statement queries.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, FromQueryResult};
use tally_core::customer_ledger::{
    InvoiceDetail, InvoiceItem, PaymentDetail, VoucherDetail, VoucherTotals,
};
use tally_core::reports::{CustomerSelection, LedgerSelection};
use tally_core::statement::Posting;
use tracing::{debug, instrument};

use super::RepositoryError;
use crate::query::{Conditions, gl_scope};

const GL_ENTRY: &str = "`tabGL Entry`";

#[derive(Debug, FromQueryResult)]
struct GlEntryRow {
    posting_date: NaiveDate,
    account: String,
    party_type: Option<String>,
    party: Option<String>,
    voucher_type: String,
    voucher_no: String,
    debit: Option<Decimal>,
    credit: Option<Decimal>,
    against: Option<String>,
}

impl From<GlEntryRow> for Posting {
    fn from(row: GlEntryRow) -> Self {
        Self {
            date: row.posting_date,
            account: row.account,
            counterpart_hint: row.against,
            party_type: row.party_type,
            party: row.party,
            transaction_kind: row.voucher_type,
            transaction_ref: row.voucher_no,
            debit_amount: row.debit.unwrap_or_default(),
            credit_amount: row.credit.unwrap_or_default(),
            contra_account: None,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct BalanceRow {
    balance: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct AccountRow {
    account: String,
}

#[derive(Debug, FromQueryResult)]
struct VoucherRow {
    posting_date: NaiveDate,
    voucher_type: String,
    voucher_no: String,
    debit: Option<Decimal>,
    credit: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct InvoiceRow {
    set_warehouse: Option<String>,
    status: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct InvoiceItemRow {
    item_code: String,
    item_name: Option<String>,
    qty: Option<Decimal>,
    rate: Option<Decimal>,
    amount: Option<Decimal>,
    discount_amount: Option<Decimal>,
    uom: Option<String>,
}

impl From<InvoiceItemRow> for InvoiceItem {
    fn from(row: InvoiceItemRow) -> Self {
        Self {
            item_code: row.item_code,
            item_name: row.item_name.unwrap_or_default(),
            qty: row.qty.unwrap_or_default(),
            rate: row.rate.unwrap_or_default(),
            amount: row.amount.unwrap_or_default(),
            discount_amount: row.discount_amount.unwrap_or_default(),
            uom: row.uom,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct PaymentRow {
    mode_of_payment: Option<String>,
    reference_no: Option<String>,
}

/// Repository for `tabGL Entry` queries.
#[derive(Debug, Clone)]
pub struct GlEntryRepository {
    db: DatabaseConnection,
}

impl GlEntryRepository {
    /// Creates a new GL entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Net debit minus credit of the selection before its period start.
    #[instrument(skip(self, selection), fields(company = %selection.period.company))]
    pub async fn opening_balance(
        &self,
        selection: &LedgerSelection,
    ) -> Result<Decimal, RepositoryError> {
        let statement = gl_scope(selection)
            .before("posting_date", selection.period.from_date)
            .statement(
                &format!("SELECT SUM(debit) - SUM(credit) AS balance FROM {GL_ENTRY}"),
                "",
            );

        let balance = BalanceRow::find_by_statement(statement)
            .one(&self.db)
            .await?
            .and_then(|row| row.balance)
            .unwrap_or_default();

        debug!(%balance, "Opening balance");
        Ok(balance)
    }

    /// Postings of the selection within its period, ordered by date, account
    /// and creation.
    #[instrument(skip(self, selection), fields(company = %selection.period.company))]
    pub async fn postings(
        &self,
        selection: &LedgerSelection,
    ) -> Result<Vec<Posting>, RepositoryError> {
        let period = &selection.period;
        let statement = gl_scope(selection)
            .between("posting_date", period.from_date, period.to_date)
            .statement(
                &format!(
                    "SELECT posting_date, account, party_type, party, voucher_type, voucher_no, \
                     debit, credit, against FROM {GL_ENTRY}"
                ),
                " ORDER BY posting_date, account, creation",
            );

        let postings: Vec<Posting> = GlEntryRow::find_by_statement(statement)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Posting::from)
            .collect();

        debug!(count = postings.len(), "Fetched postings");
        Ok(postings)
    }

    /// Fills `contra_account` on each posting with the first account of the
    /// same voucher that lies outside `scope_accounts`.
    #[instrument(skip_all, fields(postings = postings.len()))]
    pub async fn attach_contra_accounts(
        &self,
        postings: &mut [Posting],
        scope_accounts: &[String],
    ) -> Result<(), RepositoryError> {
        let mut resolved: HashMap<(String, String), Option<String>> = HashMap::new();

        for posting in postings.iter_mut() {
            let key = (
                posting.transaction_kind.clone(),
                posting.transaction_ref.clone(),
            );

            let contra = match resolved.get(&key) {
                Some(contra) => contra.clone(),
                None => {
                    let contra = self.contra_account(&key.0, &key.1, scope_accounts).await?;
                    resolved.insert(key, contra.clone());
                    contra
                }
            };

            posting.contra_account = contra;
        }

        Ok(())
    }

    async fn contra_account(
        &self,
        voucher_type: &str,
        voucher_no: &str,
        scope_accounts: &[String],
    ) -> Result<Option<String>, RepositoryError> {
        let statement = Conditions::new()
            .eq("voucher_type", voucher_type)
            .eq("voucher_no", voucher_no)
            .not_in("account", scope_accounts)
            .raw("is_cancelled = 0")
            .statement(&format!("SELECT account FROM {GL_ENTRY}"), " LIMIT 1");

        Ok(AccountRow::find_by_statement(statement)
            .one(&self.db)
            .await?
            .map(|row| row.account))
    }

    /// Per-voucher totals of a customer within the period, ordered by date
    /// then first creation, with invoice and payment details attached.
    #[instrument(skip(self, selection), fields(customer = %selection.customer))]
    pub async fn customer_vouchers(
        &self,
        selection: &CustomerSelection,
    ) -> Result<Vec<VoucherTotals>, RepositoryError> {
        let period = &selection.period;
        let statement = Conditions::new()
            .eq("party_type", "Customer")
            .eq("party", selection.customer.clone())
            .eq("company", period.company.clone())
            .between("posting_date", period.from_date, period.to_date)
            .raw("is_cancelled = 0")
            .statement(
                &format!(
                    "SELECT posting_date, voucher_type, voucher_no, SUM(debit) AS debit, \
                     SUM(credit) AS credit FROM {GL_ENTRY}"
                ),
                " GROUP BY voucher_type, voucher_no, posting_date \
                 ORDER BY posting_date, MIN(creation)",
            );

        let rows = VoucherRow::find_by_statement(statement).all(&self.db).await?;
        let mut vouchers = Vec::with_capacity(rows.len());

        for row in rows {
            let detail = match row.voucher_type.as_str() {
                "Sales Invoice" => self
                    .invoice_detail(&row.voucher_no)
                    .await?
                    .map(VoucherDetail::SalesInvoice),
                "Payment Entry" => self
                    .payment_detail(&row.voucher_no)
                    .await?
                    .map(VoucherDetail::Payment),
                _ => None,
            };

            vouchers.push(VoucherTotals {
                date: row.posting_date,
                voucher_type: row.voucher_type,
                voucher_no: row.voucher_no,
                debit: row.debit.unwrap_or_default(),
                credit: row.credit.unwrap_or_default(),
                detail,
            });
        }

        debug!(count = vouchers.len(), "Fetched customer vouchers");
        Ok(vouchers)
    }

    async fn invoice_detail(
        &self,
        invoice: &str,
    ) -> Result<Option<InvoiceDetail>, RepositoryError> {
        let header = InvoiceRow::find_by_statement(Conditions::new().eq("name", invoice).statement(
            "SELECT set_warehouse, status FROM `tabSales Invoice`",
            "",
        ))
        .one(&self.db)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = InvoiceItemRow::find_by_statement(
            Conditions::new().eq("parent", invoice).statement(
                "SELECT item_code, item_name, qty, rate, amount, discount_amount, uom \
                 FROM `tabSales Invoice Item`",
                " ORDER BY idx",
            ),
        )
        .all(&self.db)
        .await?
        .into_iter()
        .map(InvoiceItem::from)
        .collect();

        Ok(Some(InvoiceDetail {
            warehouse: header.set_warehouse,
            status: header.status.unwrap_or_default(),
            items,
        }))
    }

    async fn payment_detail(
        &self,
        payment: &str,
    ) -> Result<Option<PaymentDetail>, RepositoryError> {
        let row = PaymentRow::find_by_statement(Conditions::new().eq("name", payment).statement(
            "SELECT mode_of_payment, reference_no FROM `tabPayment Entry`",
            "",
        ))
        .one(&self.db)
        .await?;

        Ok(row.map(|row| PaymentDetail {
            mode_of_payment: row.mode_of_payment,
            reference_no: row.reference_no,
        }))
    }
}

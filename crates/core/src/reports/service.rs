//! Report assembly service.

use super::filters::{CustomerSelection, LedgerSelection};
use super::types::{ColumnSpec, DateFormat, Dated, FieldType, LedgerLine, ReportHeader, ReportOutput};
use crate::customer_ledger::CustomerLedgerRow;
use crate::item_prices::{ItemPriceRow, ItemPricesReport};
use crate::statement::{StatementRow, StatementScope, StatementStyle};

/// Service for assembling report responses.
pub struct ReportService;

impl ReportService {
    /// Column layout of a ledger-style report.
    ///
    /// The Tally Ledger leads with an Account column when it lists every
    /// account; Cash Book and Banking show the counterpart as "Paid To/From".
    #[must_use]
    pub fn ledger_columns(style: StatementStyle, scope: StatementScope) -> Vec<ColumnSpec> {
        let mut columns = Vec::with_capacity(7);

        if style == StatementStyle::Ledger && scope == StatementScope::AllAccounts {
            columns.push(ColumnSpec::link("account", "Account", "Account", 200));
        }

        columns.push(ColumnSpec::new("posting_date", "Date", FieldType::Data, 100));
        columns.push(ColumnSpec::new("particulars", "Particulars", FieldType::Data, 250));

        if style != StatementStyle::Ledger {
            columns.push(ColumnSpec::new("account", "Paid To/From", FieldType::Data, 200));
        }

        columns.extend([
            ColumnSpec::new("vch_type", "Vch Type", FieldType::Data, 120),
            ColumnSpec::new("vch_no", "Vch No /Excise Inv No", FieldType::Data, 150),
            ColumnSpec::new("debit", "Debit", FieldType::Currency, 130),
            ColumnSpec::new("credit", "Credit", FieldType::Currency, 130),
        ]);

        columns
    }

    /// Column layout of the Customer Detailed Ledger.
    #[must_use]
    pub fn customer_ledger_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("posting_date", "Date", FieldType::Data, 100),
            ColumnSpec::new("ref_no", "Ref No", FieldType::Data, 120),
            ColumnSpec::new("type", "Type", FieldType::Data, 100),
            ColumnSpec::new("location", "Location", FieldType::Data, 120),
            ColumnSpec::new("payment_status", "Payment Status", FieldType::Data, 120),
            ColumnSpec::new("debit", "Debit", FieldType::Currency, 120),
            ColumnSpec::new("credit", "Credit", FieldType::Currency, 120),
            ColumnSpec::new("balance", "Balance", FieldType::Currency, 120),
            ColumnSpec::new("payment_method", "Payment Method", FieldType::Data, 120),
            ColumnSpec::new("notes", "Notes", FieldType::Data, 150),
        ]
    }

    /// Maps statement rows to displayed lines.
    #[must_use]
    pub fn ledger_lines(style: StatementStyle, rows: Vec<StatementRow>) -> Vec<LedgerLine> {
        rows.into_iter()
            .map(|row| {
                let account = match style {
                    StatementStyle::Ledger => row.account.unwrap_or_default(),
                    StatementStyle::CashBook | StatementStyle::Banking => row.counterpart_account,
                };

                LedgerLine {
                    kind: row.kind,
                    posting_date: row
                        .date
                        .map(|d| DateFormat::Compact.format(d))
                        .unwrap_or_default(),
                    account,
                    particulars: row.label,
                    vch_type: row.type_label,
                    vch_no: row.reference,
                    voucher_type: row.transaction_kind,
                    debit: row.debit,
                    credit: row.credit,
                    balance: row.balance,
                    balance_sign: row.balance_sign,
                }
            })
            .collect()
    }

    /// Print header of a ledger-style report.
    #[must_use]
    pub fn ledger_header(
        style: StatementStyle,
        selection: &LedgerSelection,
        currency: &str,
    ) -> ReportHeader {
        let period = &selection.period;
        let party_type = selection.party.as_ref().map(|p| p.party_type.clone());
        let party_name = selection.party.as_ref().map(|p| p.parties.join(", "));

        let title = match style {
            StatementStyle::Ledger => {
                let subject = selection
                    .accounts
                    .first()
                    .cloned()
                    .or_else(|| party_name.clone())
                    .unwrap_or_else(|| "All Accounts".to_string());
                format!("{} - {subject}", style.report_name())
            }
            StatementStyle::CashBook => format!("{} - {}", style.report_name(), period.company),
            StatementStyle::Banking => format!(
                "{} - {}",
                party_type.as_deref().unwrap_or(style.report_name()),
                party_name.as_deref().unwrap_or(&period.company)
            ),
        };

        ReportHeader {
            title,
            company: period.company.clone(),
            from_date: DateFormat::Print.format(period.from_date),
            to_date: DateFormat::Print.format(period.to_date),
            currency: currency.to_string(),
            ledger_type: party_type,
            party_name,
        }
    }

    /// Assembles a Tally Ledger, Cash Book or Banking response.
    #[must_use]
    pub fn ledger_report(
        style: StatementStyle,
        scope: StatementScope,
        selection: &LedgerSelection,
        rows: Vec<StatementRow>,
        currency: &str,
    ) -> ReportOutput<LedgerLine> {
        ReportOutput {
            columns: Self::ledger_columns(style, scope),
            data: Self::ledger_lines(style, rows),
            header: Some(Self::ledger_header(style, selection, currency)),
        }
    }

    /// Assembles a Customer Detailed Ledger response.
    #[must_use]
    pub fn customer_ledger_report(
        selection: &CustomerSelection,
        rows: Vec<CustomerLedgerRow>,
        currency: &str,
    ) -> ReportOutput<Dated<CustomerLedgerRow>> {
        let period = &selection.period;
        let data = rows
            .into_iter()
            .map(|row| Dated {
                posting_date: DateFormat::Slashed.format(row.date),
                row,
            })
            .collect();

        ReportOutput {
            columns: Self::customer_ledger_columns(),
            data,
            header: Some(ReportHeader {
                title: selection.customer.clone(),
                company: period.company.clone(),
                from_date: DateFormat::Print.format(period.from_date),
                to_date: DateFormat::Print.format(period.to_date),
                currency: currency.to_string(),
                ledger_type: Some("Customer".to_string()),
                party_name: Some(selection.customer.clone()),
            }),
        }
    }

    /// Assembles an Item Prices response.
    #[must_use]
    pub fn item_prices_report(report: ItemPricesReport) -> ReportOutput<ItemPriceRow> {
        let mut columns = vec![
            ColumnSpec::link("item_code", "Item Code", "Item", 150),
            ColumnSpec::new("item_name", "Item Name", FieldType::Data, 200),
            ColumnSpec::link("uom", "UOM", "UOM", 80),
        ];

        columns.extend(report.columns.iter().map(|column| ColumnSpec {
            precision: Some(2),
            ..ColumnSpec::new(&column.fieldname, &column.label, FieldType::Float, 150)
        }));

        ReportOutput {
            columns,
            data: report.rows,
            header: None,
        }
    }
}

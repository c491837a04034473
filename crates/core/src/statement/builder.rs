//! Ledger statement construction.
//!
//! Turns an ordered posting sequence into statement rows: opening balance,
//! one row per posting, optional subtotal, closing balance and balanced
//! grand total. Single pass, constant extra state.

use std::borrow::Borrow;

use rust_decimal::Decimal;

use super::style::{Side, StatementStyle};
use super::types::{OpeningBalance, Posting, RowKind, StatementRow, StatementScope};

/// Running debit and credit totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    debit: Decimal,
    credit: Decimal,
}

impl Totals {
    /// Totals seeded with the debit/credit projection of an opening balance.
    fn from_opening(opening: Decimal) -> Self {
        Self {
            debit: positive_part(opening),
            credit: negative_part(opening),
        }
    }

    fn add(&mut self, debit: Decimal, credit: Decimal) {
        self.debit += debit;
        self.credit += credit;
    }

    fn net(self) -> Decimal {
        self.debit - self.credit
    }

    /// Adds the closing balance to the smaller side so both sides match.
    fn folded(self) -> Self {
        let closing = self.net();
        if closing < Decimal::ZERO {
            Self {
                debit: self.debit + closing.abs(),
                credit: self.credit,
            }
        } else {
            Self {
                debit: self.debit,
                credit: self.credit + closing,
            }
        }
    }
}

fn positive_part(amount: Decimal) -> Decimal {
    if amount > Decimal::ZERO {
        amount
    } else {
        Decimal::ZERO
    }
}

fn negative_part(amount: Decimal) -> Decimal {
    if amount < Decimal::ZERO {
        amount.abs()
    } else {
        Decimal::ZERO
    }
}

/// First comma-separated token, trimmed. `None` when blank.
fn first_token(value: Option<&str>) -> Option<&str> {
    value
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Counterpart names of a posting: the one used in the particulars and the
/// one shown in the account column.
fn resolve_counterpart(
    posting: &Posting,
    side: Option<Side>,
    style: StatementStyle,
) -> (String, String) {
    let named = first_token(posting.counterpart_hint.as_deref())
        .or_else(|| non_blank(posting.party.as_deref()));
    let contra = non_blank(posting.contra_account.as_deref());
    let fallback = side.map(|s| style.fallback_counterpart(s));

    match style {
        StatementStyle::Ledger => {
            let name = named.or(fallback).unwrap_or_default().to_string();
            (name.clone(), name)
        }
        StatementStyle::CashBook => {
            let name = named.or(contra).or(fallback).unwrap_or_default();
            let account = contra
                .or_else(|| first_token(posting.counterpart_hint.as_deref()))
                .or(fallback)
                .unwrap_or_default();
            (name.to_string(), account.to_string())
        }
        // Banking never resolves contra accounts; the column only shows the side.
        StatementStyle::Banking => {
            let name = named.or(contra).or(fallback).unwrap_or_default();
            let account = contra.or(fallback).unwrap_or_default();
            (name.to_string(), account.to_string())
        }
    }
}

/// Builds Tally-style ledger statements.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use tally_core::statement::{
///     LedgerStatementBuilder, OpeningBalance, Posting, RowKind, StatementScope, StatementStyle,
/// };
///
/// let from = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let rows = LedgerStatementBuilder::new(StatementStyle::Ledger).build(
///     Vec::<Posting>::new(),
///     OpeningBalance::new(from, Decimal::from(100)),
///     StatementScope::SingleAccount,
/// );
///
/// assert_eq!(rows.first().map(|r| r.kind), Some(RowKind::OpeningBalance));
/// assert_eq!(rows.last().map(|r| r.debit), Some(Decimal::from(100)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LedgerStatementBuilder {
    style: StatementStyle,
    running_balance: bool,
}

impl LedgerStatementBuilder {
    /// Creates a builder for the given style.
    #[must_use]
    pub const fn new(style: StatementStyle) -> Self {
        Self {
            style,
            running_balance: false,
        }
    }

    /// Attach the running balance to opening and transaction rows.
    /// Ignored for all-accounts statements.
    #[must_use]
    pub const fn with_running_balance(mut self, enabled: bool) -> Self {
        self.running_balance = enabled;
        self
    }

    /// Style of this builder.
    #[must_use]
    pub const fn style(&self) -> StatementStyle {
        self.style
    }

    /// Builds the statement.
    ///
    /// `postings` must already be filtered to the scope and period and
    /// ordered by `(date, account, creation)`; postings out of date order are
    /// a caller bug and trip a debug assertion.
    pub fn build<I>(
        &self,
        postings: I,
        opening: OpeningBalance,
        scope: StatementScope,
    ) -> Vec<StatementRow>
    where
        I: IntoIterator,
        I::Item: Borrow<Posting>,
    {
        if scope.has_balance() {
            self.build_balanced(postings, opening)
        } else {
            self.build_all_accounts(postings)
        }
    }

    fn build_balanced<I>(&self, postings: I, opening: OpeningBalance) -> Vec<StatementRow>
    where
        I: IntoIterator,
        I::Item: Borrow<Posting>,
    {
        let mut rows = Vec::new();

        let mut opening_row = StatementRow::summary(
            RowKind::OpeningBalance,
            self.style.opening_label(opening.amount),
            positive_part(opening.amount),
            negative_part(opening.amount),
        );
        opening_row.date = Some(opening.as_of);
        if self.running_balance {
            opening_row = opening_row.with_balance(opening.amount);
        }
        rows.push(opening_row);

        let mut totals = Totals::from_opening(opening.amount);
        let mut order = OrderCheck::default();
        let mut posted = 0usize;

        for posting in postings {
            let posting = posting.borrow();
            order.observe(posting);

            totals.add(posting.debit_amount, posting.credit_amount);
            let mut row = self.transaction_row(posting);
            if self.running_balance {
                row = row.with_balance(totals.net());
            }
            rows.push(row);
            posted += 1;
        }

        if self.style.has_subtotal() && (posted > 0 || !opening.amount.is_zero()) {
            rows.push(StatementRow::summary(
                RowKind::Subtotal,
                "",
                totals.debit,
                totals.credit,
            ));
        }

        let closing = totals.net();
        rows.push(StatementRow::summary(
            RowKind::ClosingBalance,
            self.style.closing_label(closing),
            positive_part(closing),
            negative_part(closing),
        ));

        let balanced = totals.folded();
        rows.push(StatementRow::summary(
            RowKind::GrandTotal,
            "",
            balanced.debit,
            balanced.credit,
        ));

        rows
    }

    fn build_all_accounts<I>(&self, postings: I) -> Vec<StatementRow>
    where
        I: IntoIterator,
        I::Item: Borrow<Posting>,
    {
        let mut rows = Vec::new();
        let mut totals = Totals::default();
        let mut order = OrderCheck::default();

        for posting in postings {
            let posting = posting.borrow();
            order.observe(posting);

            totals.add(posting.debit_amount, posting.credit_amount);
            let mut row = self.transaction_row(posting);
            row.account = Some(posting.account.clone());
            rows.push(row);
        }

        if !rows.is_empty() {
            rows.push(StatementRow::summary(
                RowKind::GrandTotal,
                "Total",
                totals.debit,
                totals.credit,
            ));
        }

        rows
    }

    fn transaction_row(&self, posting: &Posting) -> StatementRow {
        let side = Side::of_amounts(posting.debit_amount, posting.credit_amount);
        let (name, counterpart_account) = resolve_counterpart(posting, side, self.style);

        StatementRow {
            kind: RowKind::Transaction,
            date: Some(posting.date),
            account: None,
            label: self.style.particulars(side, &name),
            counterpart_account,
            type_label: self.style.type_label(&posting.transaction_kind),
            transaction_kind: posting.transaction_kind.clone(),
            reference: posting.transaction_ref.clone(),
            debit: posting.debit_amount,
            credit: posting.credit_amount,
            balance: None,
            balance_sign: None,
        }
    }
}

/// Debug-build guard for the date ordering precondition.
///
/// Only dates are checked: account order within a day follows the database
/// collation, which is case-insensitive on ERPNext.
#[derive(Debug, Default)]
struct OrderCheck {
    #[cfg(debug_assertions)]
    last: Option<chrono::NaiveDate>,
}

impl OrderCheck {
    #[cfg(debug_assertions)]
    fn observe(&mut self, posting: &Posting) {
        if let Some(last) = self.last {
            debug_assert!(
                last <= posting.date,
                "postings must be ordered by date: {last} came before {}",
                posting.date
            );
        }
        self.last = Some(posting.date);
    }

    #[cfg(not(debug_assertions))]
    #[allow(clippy::unused_self)]
    fn observe(&mut self, _posting: &Posting) {}
}

/// Builds a statement with default options.
///
/// Shorthand for `LedgerStatementBuilder::new(style).build(..)`.
pub fn build_statement<I>(
    postings: I,
    opening: OpeningBalance,
    scope: StatementScope,
    style: StatementStyle,
) -> Vec<StatementRow>
where
    I: IntoIterator,
    I::Item: Borrow<Posting>,
{
    LedgerStatementBuilder::new(style).build(postings, opening, scope)
}

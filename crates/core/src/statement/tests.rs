//! Tests for ledger statement construction.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::builder::{LedgerStatementBuilder, build_statement};
use super::style::StatementStyle;
use super::types::{BalanceSign, OpeningBalance, Posting, RowKind, StatementRow, StatementScope};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
}

fn posting(day: u32, debit: Decimal, credit: Decimal) -> Posting {
    Posting {
        date: date(day),
        account: "Debtors - TC".to_string(),
        counterpart_hint: Some("Sales - TC".to_string()),
        party_type: None,
        party: None,
        transaction_kind: "Sales Invoice".to_string(),
        transaction_ref: format!("SINV-{day:04}"),
        debit_amount: debit,
        credit_amount: credit,
        contra_account: None,
    }
}

fn kinds(rows: &[StatementRow]) -> Vec<RowKind> {
    rows.iter().map(|r| r.kind).collect()
}

fn row_of(rows: &[StatementRow], kind: RowKind) -> &StatementRow {
    rows.iter().find(|r| r.kind == kind).unwrap()
}

#[test]
fn test_ledger_single_account_layout() {
    let postings = vec![
        posting(2, dec!(100), dec!(0)),
        posting(5, dec!(0), dec!(40)),
    ];

    let rows = build_statement(
        &postings,
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::Ledger,
    );

    assert_eq!(
        kinds(&rows),
        vec![
            RowKind::OpeningBalance,
            RowKind::Transaction,
            RowKind::Transaction,
            RowKind::ClosingBalance,
            RowKind::GrandTotal,
        ]
    );

    let opening = &rows[0];
    assert_eq!(opening.date, Some(date(1)));
    assert_eq!(opening.label, "By Opening Balance");

    assert_eq!(rows[1].label, "By Sales - TC");
    assert_eq!(rows[1].type_label, "Sales");
    assert_eq!(rows[1].reference, "SINV-0002");
    assert_eq!(rows[1].transaction_kind, "Sales Invoice");
    assert_eq!(rows[2].label, "To Sales - TC");

    let closing = row_of(&rows, RowKind::ClosingBalance);
    assert_eq!(closing.label, "To Closing Balance");
    assert_eq!(closing.debit, dec!(60));
    assert_eq!(closing.credit, dec!(0));

    let total = row_of(&rows, RowKind::GrandTotal);
    assert_eq!(total.label, "");
    assert_eq!(total.debit, dec!(100));
    assert_eq!(total.credit, dec!(100));
}

#[test]
fn test_cash_book_closing_and_subtotal() {
    let postings = vec![
        posting(2, dec!(100), dec!(0)),
        posting(5, dec!(0), dec!(40)),
    ];

    let rows = build_statement(
        &postings,
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::CashBook,
    );

    assert_eq!(
        kinds(&rows),
        vec![
            RowKind::OpeningBalance,
            RowKind::Transaction,
            RowKind::Transaction,
            RowKind::Subtotal,
            RowKind::ClosingBalance,
            RowKind::GrandTotal,
        ]
    );
    assert_eq!(rows[0].label, "To Opening Balance");
    assert_eq!(rows[1].label, "Cr  Sales - TC");
    assert_eq!(rows[1].type_label, "Cash Sales");
    assert_eq!(rows[2].label, "Dr  Sales - TC");

    let subtotal = row_of(&rows, RowKind::Subtotal);
    assert_eq!((subtotal.debit, subtotal.credit), (dec!(100), dec!(40)));
    assert!(subtotal.balance.is_none());

    let closing = row_of(&rows, RowKind::ClosingBalance);
    assert_eq!(closing.label, "Dr  Closing Balance");
    assert_eq!((closing.debit, closing.credit), (dec!(60), dec!(0)));
}

#[test]
fn test_credit_closing_folds_into_debit() {
    let rows = build_statement(
        [posting(3, dec!(0), dec!(250))],
        OpeningBalance::new(date(1), dec!(50)),
        StatementScope::SingleParty,
        StatementStyle::Ledger,
    );

    let opening = &rows[0];
    assert_eq!((opening.debit, opening.credit), (dec!(50), dec!(0)));

    let closing = row_of(&rows, RowKind::ClosingBalance);
    assert_eq!(closing.label, "By Closing Balance");
    assert_eq!((closing.debit, closing.credit), (dec!(0), dec!(200)));

    let total = row_of(&rows, RowKind::GrandTotal);
    assert_eq!((total.debit, total.credit), (dec!(250), dec!(250)));
}

#[test]
fn test_negative_opening_projects_to_credit() {
    let rows = build_statement(
        Vec::<Posting>::new(),
        OpeningBalance::new(date(1), dec!(-75)),
        StatementScope::MultipleParties,
        StatementStyle::Banking,
    );

    assert_eq!(rows[0].label, "To Opening Balance");
    assert_eq!((rows[0].debit, rows[0].credit), (dec!(0), dec!(75)));

    // A non-zero opening is content, so the subtotal line is kept.
    assert_eq!(
        kinds(&rows),
        vec![
            RowKind::OpeningBalance,
            RowKind::Subtotal,
            RowKind::ClosingBalance,
            RowKind::GrandTotal,
        ]
    );
    let closing = row_of(&rows, RowKind::ClosingBalance);
    assert_eq!(closing.label, "Cr  Closing Balance");
    assert_eq!(closing.credit, dec!(75));
    let total = row_of(&rows, RowKind::GrandTotal);
    assert_eq!((total.debit, total.credit), (dec!(75), dec!(75)));
}

#[test]
fn test_empty_single_account_statement() {
    for style in [
        StatementStyle::Ledger,
        StatementStyle::CashBook,
        StatementStyle::Banking,
    ] {
        let rows = build_statement(
            Vec::<Posting>::new(),
            OpeningBalance::zero(date(1)),
            StatementScope::SingleAccount,
            style,
        );

        assert_eq!(
            kinds(&rows),
            vec![
                RowKind::OpeningBalance,
                RowKind::ClosingBalance,
                RowKind::GrandTotal,
            ],
            "style {style:?}"
        );
        assert!(
            rows.iter()
                .all(|r| r.debit.is_zero() && r.credit.is_zero())
        );
    }
}

#[test]
fn test_empty_all_accounts_statement() {
    let rows = build_statement(
        Vec::<Posting>::new(),
        OpeningBalance::zero(date(1)),
        StatementScope::AllAccounts,
        StatementStyle::Ledger,
    );
    assert!(rows.is_empty());
}

#[test]
fn test_all_accounts_rows_carry_account_and_plain_total() {
    let mut first = posting(2, dec!(100), dec!(0));
    first.account = "Cash - TC".to_string();
    let mut second = posting(2, dec!(0), dec!(30));
    second.account = "Sales - TC".to_string();

    let rows = build_statement(
        [first, second],
        OpeningBalance::new(date(1), dec!(999)),
        StatementScope::AllAccounts,
        StatementStyle::Ledger,
    );

    assert_eq!(
        kinds(&rows),
        vec![
            RowKind::Transaction,
            RowKind::Transaction,
            RowKind::GrandTotal
        ]
    );
    assert_eq!(rows[0].account.as_deref(), Some("Cash - TC"));
    assert_eq!(rows[1].account.as_deref(), Some("Sales - TC"));

    let total = &rows[2];
    assert_eq!(total.label, "Total");
    assert_eq!((total.debit, total.credit), (dec!(100), dec!(30)));
}

#[test]
fn test_counterpart_truncated_to_first_token() {
    let mut p = posting(2, dec!(10), dec!(0));
    p.counterpart_hint = Some("Acme Corp, Beta LLC".to_string());

    let rows = build_statement(
        [p],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::Ledger,
    );

    assert_eq!(rows[1].label, "By Acme Corp");
    assert_eq!(rows[1].counterpart_account, "Acme Corp");
}

#[test]
fn test_counterpart_falls_back_to_party_then_literal() {
    let mut with_party = posting(2, dec!(0), dec!(10));
    with_party.counterpart_hint = None;
    with_party.party = Some("  Beta LLC ".to_string());

    let mut anonymous = posting(3, dec!(0), dec!(10));
    anonymous.counterpart_hint = Some("   ".to_string());

    let ledger = build_statement(
        [&with_party, &anonymous],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::Ledger,
    );
    assert_eq!(ledger[1].label, "To Beta LLC");
    assert_eq!(ledger[2].label, "To Various");

    let mut incoming = anonymous.clone();
    incoming.debit_amount = dec!(10);
    incoming.credit_amount = dec!(0);

    let cash = build_statement(
        [&anonymous, &incoming],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::CashBook,
    );
    assert_eq!(cash[1].label, "Dr  Expenses");
    assert_eq!(cash[1].counterpart_account, "Expenses");
    assert_eq!(cash[2].label, "Cr  Sales");
    assert_eq!(cash[2].counterpart_account, "Sales");
}

#[test]
fn test_cash_book_prefers_resolved_contra_account() {
    let mut p = posting(2, dec!(0), dec!(500));
    p.counterpart_hint = Some("Landlord, Rent - TC".to_string());
    p.contra_account = Some("Rent - TC".to_string());

    let rows = build_statement(
        [p],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::CashBook,
    );

    assert_eq!(rows[1].label, "Dr  Landlord");
    assert_eq!(rows[1].counterpart_account, "Rent - TC");
}

#[test]
fn test_banking_account_column_ignores_hint() {
    let mut outgoing = posting(2, dec!(0), dec!(500));
    outgoing.counterpart_hint = Some("Landlord, Rent - TC".to_string());
    let mut incoming = posting(3, dec!(200), dec!(0));
    incoming.counterpart_hint = Some("Acme Corp".to_string());

    let rows = build_statement(
        [outgoing, incoming],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleParty,
        StatementStyle::Banking,
    );

    assert_eq!(rows[1].counterpart_account, "Expenses");
    assert_eq!(rows[2].counterpart_account, "Sales");
}

#[test]
fn test_same_day_accounts_in_case_insensitive_order() {
    let mut lower = posting(2, dec!(50), dec!(0));
    lower.account = "bank - TC".to_string();
    let mut upper = posting(2, dec!(0), dec!(20));
    upper.account = "Cash - TC".to_string();

    let rows = build_statement(
        [lower, upper],
        OpeningBalance::zero(date(1)),
        StatementScope::AllAccounts,
        StatementStyle::Ledger,
    );

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].account.as_deref(), Some("bank - TC"));
    assert_eq!(rows[1].account.as_deref(), Some("Cash - TC"));
    let total = row_of(&rows, RowKind::GrandTotal);
    assert_eq!((total.debit, total.credit), (dec!(50), dec!(20)));
}

#[test]
fn test_zero_posting_still_produces_row() {
    let mut p = posting(2, dec!(0), dec!(0));
    p.counterpart_hint = None;

    let rows = build_statement(
        [p],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::Ledger,
    );

    let row = &rows[1];
    assert_eq!(row.kind, RowKind::Transaction);
    assert_eq!(row.label, "");
    assert_eq!(row.counterpart_account, "");
    assert!(row.debit.is_zero() && row.credit.is_zero());
}

#[test]
fn test_zero_posting_keeps_named_counterpart_without_prefix() {
    let rows = build_statement(
        [posting(2, dec!(0), dec!(0))],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::Banking,
    );
    assert_eq!(rows[1].label, "Sales - TC");
}

#[test]
fn test_unknown_voucher_type_passes_through() {
    let mut p = posting(2, dec!(1), dec!(0));
    p.transaction_kind = "Foobar".to_string();

    let rows = build_statement(
        [p],
        OpeningBalance::zero(date(1)),
        StatementScope::SingleAccount,
        StatementStyle::Banking,
    );
    assert_eq!(rows[1].type_label, "Foobar");
}

#[test]
fn test_running_balance() {
    let postings = vec![
        posting(2, dec!(30), dec!(0)),
        posting(3, dec!(0), dec!(100)),
    ];

    let rows = LedgerStatementBuilder::new(StatementStyle::Ledger)
        .with_running_balance(true)
        .build(
            &postings,
            OpeningBalance::new(date(1), dec!(20)),
            StatementScope::SingleAccount,
        );

    assert_eq!(rows[0].balance, Some(dec!(20)));
    assert_eq!(rows[0].balance_sign, Some(BalanceSign::Dr));
    assert_eq!(rows[1].balance, Some(dec!(50)));
    assert_eq!(rows[1].balance_sign, Some(BalanceSign::Dr));
    assert_eq!(rows[2].balance, Some(dec!(50)));
    assert_eq!(rows[2].balance_sign, Some(BalanceSign::Cr));
    assert!(row_of(&rows, RowKind::ClosingBalance).balance.is_none());
    assert!(row_of(&rows, RowKind::GrandTotal).balance.is_none());
}

#[test]
fn test_running_balance_ignored_for_all_accounts() {
    let rows = LedgerStatementBuilder::new(StatementStyle::Ledger)
        .with_running_balance(true)
        .build(
            [posting(2, dec!(30), dec!(0))],
            OpeningBalance::zero(date(1)),
            StatementScope::AllAccounts,
        );
    assert!(rows.iter().all(|r| r.balance.is_none()));
}

// ============================================================================
// Properties
// ============================================================================

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn postings_strategy() -> impl Strategy<Value = Vec<Posting>> {
    prop::collection::vec((1u32..=28, amount(), any::<bool>()), 0..40).prop_map(|mut raw| {
        raw.sort_by_key(|(day, _, _)| *day);
        raw.into_iter()
            .map(|(day, value, is_debit)| {
                if is_debit {
                    posting(day, value, Decimal::ZERO)
                } else {
                    posting(day, Decimal::ZERO, value)
                }
            })
            .collect()
    })
}

fn style_strategy() -> impl Strategy<Value = StatementStyle> {
    prop_oneof![
        Just(StatementStyle::Ledger),
        Just(StatementStyle::CashBook),
        Just(StatementStyle::Banking),
    ]
}

fn scope_strategy() -> impl Strategy<Value = StatementScope> {
    prop_oneof![
        Just(StatementScope::SingleAccount),
        Just(StatementScope::SingleParty),
        Just(StatementScope::MultipleParties),
        Just(StatementScope::AllAccounts),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The grand total of a balanced statement always has equal sides.
    #[test]
    fn prop_grand_total_balances(
        postings in postings_strategy(),
        opening in signed_amount(),
        style in style_strategy(),
    ) {
        let rows = build_statement(
            &postings,
            OpeningBalance::new(date(1), opening),
            StatementScope::SingleAccount,
            style,
        );

        let total = rows.last().unwrap();
        prop_assert_eq!(total.kind, RowKind::GrandTotal);
        prop_assert_eq!(total.debit, total.credit);
    }

    /// Closing balance equals opening plus net movement, on the right side.
    #[test]
    fn prop_closing_matches_net_movement(
        postings in postings_strategy(),
        opening in signed_amount(),
        style in style_strategy(),
    ) {
        let rows = build_statement(
            &postings,
            OpeningBalance::new(date(1), opening),
            StatementScope::SingleParty,
            style,
        );

        let net: Decimal = opening
            + postings.iter().map(|p| p.debit_amount - p.credit_amount).sum::<Decimal>();
        let closing = rows.iter().find(|r| r.kind == RowKind::ClosingBalance).unwrap();

        prop_assert_eq!(closing.debit - closing.credit, net);
        prop_assert!(closing.debit.is_zero() || closing.credit.is_zero());
    }

    /// Opening row is present exactly when the scope has a single balance.
    #[test]
    fn prop_opening_row_iff_balanced_scope(
        postings in postings_strategy(),
        scope in scope_strategy(),
        style in style_strategy(),
    ) {
        let rows = build_statement(&postings, OpeningBalance::zero(date(1)), scope, style);
        let has_opening = rows.iter().any(|r| r.kind == RowKind::OpeningBalance);

        prop_assert_eq!(has_opening, scope.has_balance());
        prop_assert_eq!(
            rows.iter().filter(|r| r.kind == RowKind::Transaction).count(),
            postings.len()
        );
    }

    /// Building twice from the same input yields identical rows.
    #[test]
    fn prop_build_is_deterministic(
        postings in postings_strategy(),
        opening in signed_amount(),
        scope in scope_strategy(),
        style in style_strategy(),
    ) {
        let builder = LedgerStatementBuilder::new(style).with_running_balance(true);
        let opening = OpeningBalance::new(date(1), opening);

        let first = builder.build(&postings, opening, scope);
        let second = builder.build(&postings, opening, scope);

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

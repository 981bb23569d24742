// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetmaster::budget_sync::{
    initial_spent, on_transaction_added, on_transaction_removed, recompute_spent, SpendScope,
};
use budgetmaster::models::{Budget, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn budget(id: &str, category: &str, month: &str, limit: i64) -> Budget {
    Budget {
        id: id.into(),
        category: category.into(),
        limit: Decimal::from(limit),
        spent: Decimal::ZERO,
        month: month.into(),
        user_id: "u1".into(),
    }
}

fn expense(id: &str, amount: i64, category: &str, date: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from(amount),
        description: "test".into(),
        category: category.into(),
        kind: TransactionKind::Expense,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        user_id: "u1".into(),
    }
}

fn setup() -> Vec<Budget> {
    vec![
        budget("food-jun", "Food & Dining", "2025-06", 1000),
        budget("food-jul", "Food & Dining", "2025-07", 1000),
        budget("travel-jun", "Travel", "2025-06", 5000),
    ]
}

#[test]
fn expense_is_charged_to_matching_budget() {
    let budgets = vec![budget("b1", "Food", "2025-06", 1000)];
    let tx = expense("t1", 1200, "Food", "2025-06-10");
    let out = on_transaction_added(&tx, &budgets, SpendScope::Month);
    assert_eq!(out[0].spent, Decimal::from(1200));
    // input is left alone
    assert_eq!(budgets[0].spent, Decimal::ZERO);
}

#[test]
fn month_scope_only_touches_the_transaction_month() {
    let tx = expense("t1", 300, "Food & Dining", "2025-06-02");
    let out = on_transaction_added(&tx, &setup(), SpendScope::Month);
    assert_eq!(out[0].spent, Decimal::from(300));
    assert_eq!(out[1].spent, Decimal::ZERO);
    assert_eq!(out[2].spent, Decimal::ZERO);
}

#[test]
fn any_scope_charges_every_budget_of_the_category() {
    let tx = expense("t1", 300, "Food & Dining", "2025-06-02");
    let out = on_transaction_added(&tx, &setup(), SpendScope::Any);
    assert_eq!(out[0].spent, Decimal::from(300));
    assert_eq!(out[1].spent, Decimal::from(300));
    assert_eq!(out[2].spent, Decimal::ZERO);
}

#[test]
fn income_and_category_typos_are_inert() {
    let budgets = setup();
    let mut income = expense("t1", 900, "Food & Dining", "2025-06-02");
    income.kind = TransactionKind::Income;
    assert_eq!(on_transaction_added(&income, &budgets, SpendScope::Any), budgets);

    let typo = expense("t2", 900, "food & dining", "2025-06-02");
    assert_eq!(on_transaction_added(&typo, &budgets, SpendScope::Month), budgets);
}

#[test]
fn removal_clamps_at_zero() {
    let mut budgets = setup();
    budgets[0].spent = Decimal::from(100);
    let tx = expense("t1", 250, "Food & Dining", "2025-06-20");
    let out = on_transaction_removed(&tx, &budgets, SpendScope::Month);
    assert_eq!(out[0].spent, Decimal::ZERO);
}

#[test]
fn mirrored_adds_and_removes_match_the_ledger() {
    let txs = vec![
        expense("a", 120, "Food & Dining", "2025-06-01"),
        expense("b", 80, "Food & Dining", "2025-06-15"),
        expense("c", 40, "Food & Dining", "2025-07-01"),
        expense("d", 700, "Travel", "2025-06-09"),
    ];
    for scope in [SpendScope::Month, SpendScope::Any] {
        let mut budgets = setup();
        for t in &txs {
            budgets = on_transaction_added(t, &budgets, scope);
        }
        budgets = on_transaction_removed(&txs[1], &budgets, scope);
        let present: Vec<Transaction> = txs
            .iter()
            .filter(|t| t.id != "b")
            .cloned()
            .collect();

        assert_eq!(budgets, recompute_spent(&budgets, &present, scope));
        for b in &budgets {
            assert!(b.spent >= Decimal::ZERO);
        }
    }
}

#[test]
fn initial_spent_seeds_from_existing_expenses() {
    let txs = vec![
        expense("a", 120, "Food & Dining", "2025-06-01"),
        expense("b", 80, "Food & Dining", "2025-05-31"),
        expense("c", 999, "Travel", "2025-06-02"),
    ];
    assert_eq!(
        initial_spent("Food & Dining", "2025-06", &txs, SpendScope::Month),
        Decimal::from(120)
    );
    assert_eq!(
        initial_spent("Food & Dining", "2025-06", &txs, SpendScope::Any),
        Decimal::from(200)
    );
    assert_eq!(
        initial_spent("Housing", "2025-06", &txs, SpendScope::Any),
        Decimal::ZERO
    );
}

#[test]
fn scope_parses_from_settings_text() {
    assert_eq!("month".parse::<SpendScope>().unwrap(), SpendScope::Month);
    assert_eq!(" ANY ".parse::<SpendScope>().unwrap(), SpendScope::Any);
    assert!("weekly".parse::<SpendScope>().is_err());
    assert_eq!(SpendScope::default().to_string(), "month");
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetmaster::ledger::{group_transactions, list_view, recent, KindFilter, SortBy};
use budgetmaster::models::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn tx(id: &str, kind: TransactionKind, amount: i64, category: &str, date: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from(amount),
        description: format!("item {}", id),
        category: category.into(),
        kind,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        user_id: "u1".into(),
    }
}

// newest first, as the session stores them
fn setup() -> Vec<Transaction> {
    use TransactionKind::*;
    vec![
        tx("5", Expense, 60, "Food & Dining", "2025-06-03"),
        tx("4", Expense, 40, "Food & Dining", "2025-06-03"),
        tx("3", Income, 500, "Freelance", "2025-06-03"),
        tx("2", Expense, 900, "Shopping", "2025-06-02"),
        tx("1", Expense, 25, "Food & Dining", "2025-06-01"),
    ]
}

#[test]
fn same_day_same_category_collapses() {
    let groups = group_transactions(&setup());
    assert_eq!(groups.len(), 4);
    let food = &groups[0];
    assert_eq!(food.id, "group-2025-06-03-Food & Dining-expense");
    assert_eq!(food.count, 2);
    assert_eq!(food.amount, Decimal::from(100));
    assert_eq!(food.description, "Food & Dining (2 transactions)");
    assert_eq!(food.original_ids, vec!["5", "4"]);

    // single rows keep their own description
    assert_eq!(groups[1].count, 1);
    assert_eq!(groups[1].description, "item 3");
}

#[test]
fn list_view_filters_and_sorts() {
    let txs = setup();
    let by_amount = list_view(&txs, KindFilter::Expense, SortBy::Amount, false);
    let amounts: Vec<Decimal> = by_amount.iter().map(|r| r.amount).collect();
    assert_eq!(
        amounts,
        vec![900, 60, 40, 25].into_iter().map(Decimal::from).collect::<Vec<_>>()
    );

    let income = list_view(&txs, KindFilter::Income, SortBy::Date, true);
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].id, "3");

    let grouped = list_view(&txs, KindFilter::All, SortBy::Date, true);
    assert_eq!(grouped.len(), 4);
    assert_eq!(grouped.last().unwrap().id, "1");
}

#[test]
fn recent_takes_the_head() {
    let txs = setup();
    assert_eq!(recent(&txs, 2).len(), 2);
    assert_eq!(recent(&txs, 2)[0].id, "5");
    assert_eq!(recent(&txs, 50).len(), 5);
    assert!(recent(&[], 5).is_empty());
}

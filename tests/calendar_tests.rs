// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetmaster::calendar::{
    events_on, month_summary, transactions_on, upcoming_bills, upcoming_events,
};
use budgetmaster::models::{CalendarEvent, EventKind, Recurrence, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn event(id: &str, kind: EventKind, date: &str, recurring: Option<Recurrence>) -> CalendarEvent {
    CalendarEvent {
        id: id.into(),
        title: id.to_uppercase(),
        description: String::new(),
        amount: None,
        kind,
        date: d(date),
        time: None,
        recurring,
        category: None,
        user_id: "u1".into(),
        notification_sent: false,
    }
}

fn setup() -> Vec<CalendarEvent> {
    vec![
        event("rent", EventKind::Bill, "2025-01-05", Some(Recurrence::Monthly)),
        event("gym", EventKind::Expense, "2025-06-02", Some(Recurrence::Weekly)),
        event("bday", EventKind::Reminder, "2020-02-29", Some(Recurrence::Yearly)),
        event("dentist", EventKind::Reminder, "2025-06-20", None),
        event("vitamins", EventKind::Reminder, "2025-06-10", Some(Recurrence::Daily)),
    ]
}

#[test]
fn recurrence_rules() {
    let events = setup();
    let rent = &events[0];
    assert!(rent.occurs_on(d("2025-01-05")));
    assert!(rent.occurs_on(d("2025-09-05")));
    assert!(!rent.occurs_on(d("2025-09-06")));
    assert!(!rent.occurs_on(d("2024-12-05")));

    let gym = &events[1];
    assert!(gym.occurs_on(d("2025-06-16")));
    assert!(!gym.occurs_on(d("2025-06-17")));

    let bday = &events[2];
    assert!(bday.occurs_on(d("2024-02-29")));
    assert!(!bday.occurs_on(d("2025-02-28")));

    let dentist = &events[3];
    assert!(dentist.occurs_on(d("2025-06-20")));
    assert!(!dentist.occurs_on(d("2026-06-20")));

    let vitamins = &events[4];
    assert!(!vitamins.occurs_on(d("2025-06-09")));
    assert!(vitamins.occurs_on(d("2030-01-01")));
}

#[test]
fn next_occurrence_skips_forward() {
    let events = setup();
    assert_eq!(events[0].next_occurrence(d("2025-06-06")), Some(d("2025-07-05")));
    assert_eq!(events[2].next_occurrence(d("2025-03-01")), Some(d("2028-02-29")));
    assert_eq!(events[3].next_occurrence(d("2025-06-21")), None);
    assert_eq!(events[4].next_occurrence(d("2025-01-01")), Some(d("2025-06-10")));
}

#[test]
fn day_queries() {
    let events = setup();
    let on: Vec<&str> = events_on(&events, d("2025-06-05"))
        .into_iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(on, vec!["rent"]);

    let txs = vec![Transaction {
        id: "t1".into(),
        amount: Decimal::from(40),
        description: "Coffee".into(),
        category: "Food & Dining".into(),
        kind: TransactionKind::Expense,
        date: d("2025-06-05"),
        user_id: "u1".into(),
    }];
    assert_eq!(transactions_on(&txs, d("2025-06-05")).len(), 1);
    assert!(transactions_on(&txs, d("2025-06-06")).is_empty());
}

#[test]
fn upcoming_sorted_by_next_date() {
    let events = setup();
    let order: Vec<&str> = upcoming_events(&events, d("2025-06-18"))
        .iter()
        .map(|o| o.event.id.as_str())
        .collect();
    // vitamins today, dentist 20th, gym 23rd, rent 5 Jul, bday 2028
    assert_eq!(order, vec!["vitamins", "dentist", "gym", "rent", "bday"]);
}

#[test]
fn upcoming_bills_stay_in_month() {
    let events = setup();
    let bills = upcoming_bills(&events, d("2025-06-03"));
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].date, d("2025-06-05"));

    // a bill due today is not "upcoming"; next one is in July
    assert!(upcoming_bills(&events, d("2025-06-05")).is_empty());
}

#[test]
fn month_summary_nets_income_and_expenses() {
    let t = |amount: i64, kind: TransactionKind, date: &str| Transaction {
        id: date.into(),
        amount: Decimal::from(amount),
        description: String::new(),
        category: String::new(),
        kind,
        date: d(date),
        user_id: "u1".into(),
    };
    let txs = vec![
        t(1000, TransactionKind::Income, "2025-06-01"),
        t(300, TransactionKind::Expense, "2025-06-15"),
        t(999, TransactionKind::Expense, "2025-07-01"),
    ];
    let s = month_summary(&txs, 2025, 6);
    assert_eq!(s.income, Decimal::from(1000));
    assert_eq!(s.expenses, Decimal::from(300));
    assert_eq!(s.net, Decimal::from(700));
}

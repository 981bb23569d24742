// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetmaster::cli::build_cli;
use budgetmaster::commands::{budgets, doctor, goals, transactions};
use budgetmaster::config::Settings;
use budgetmaster::models::User;
use budgetmaster::session::Session;
use budgetmaster::store::MemoryStore;
use budgetmaster::validation::ValidationError;
use chrono::NaiveDate;
use clap::ArgMatches;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 18).unwrap()
}

/// Parses a full command line and returns the innermost subcommand matches.
fn sub(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["budgetmaster"];
    argv.extend_from_slice(args);
    let mut m = build_cli().get_matches_from(argv);
    while let Some((_, inner)) = m.subcommand() {
        m = inner.clone();
    }
    m
}

fn setup() -> Session<MemoryStore> {
    let user = User {
        id: "u1".into(),
        name: "Asha".into(),
        email: "asha@example.com".into(),
        phone: None,
        date_of_birth: None,
        occupation: None,
        monthly_income: None,
        address: None,
    };
    let mut session = Session::open(MemoryStore::new(), user, &Settings::default()).unwrap();
    transactions::record(
        &mut session,
        &sub(&[
            "tx", "add", "--type", "income", "--amount", "1000", "--category", "Salary",
            "--description", "June salary", "--date", "2025-06-01",
        ]),
        today(),
    )
    .unwrap();
    session
}

fn expense(amount: &str, category: &str, date: &str) -> Vec<String> {
    [
        "tx", "add", "--type", "expense", "--amount", amount, "--category", category,
        "--description", "Purchase", "--date", date,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn run(session: &mut Session<MemoryStore>, args: Vec<String>) -> anyhow::Result<()> {
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    transactions::record(session, &sub(&refs), today()).map(|_| ())
}

#[test]
fn expense_larger_than_balance_is_rejected() {
    let mut session = setup();
    let err = run(&mut session, expense("1500", "Shopping", "2025-06-10")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::InsufficientFunds { .. })
    ));
    assert_eq!(session.transactions().len(), 1);

    let mut forced = expense("1500", "Shopping", "2025-06-10");
    forced.push("--force".into());
    run(&mut session, forced).unwrap();
    assert_eq!(session.transactions().len(), 2);
}

#[test]
fn expense_over_budget_is_rejected() {
    let mut session = setup();
    budgets::create(
        &mut session,
        &sub(&["budget", "set", "--category", "Food & Dining", "--limit", "300"]),
        today(),
    )
    .unwrap();
    run(&mut session, expense("250", "Food & Dining", "2025-06-10")).unwrap();
    assert_eq!(session.budgets()[0].spent, Decimal::from(250));

    let err = run(&mut session, expense("100", "Food & Dining", "2025-06-11")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::BudgetLimitExceeded { .. })
    ));
    assert_eq!(session.budgets()[0].spent, Decimal::from(250));
}

#[test]
fn invalid_input_is_rejected() {
    let mut session = setup();
    assert!(run(&mut session, expense("12.5x", "Shopping", "2025-06-10")).is_err());
    assert!(run(&mut session, expense("10", "Salary", "2025-06-10")).is_err());
    assert!(run(&mut session, expense("10", "Shopping", "2025-13-01")).is_err());
    assert_eq!(session.transactions().len(), 1);
}

#[test]
fn list_query_filters_and_limits() {
    let mut session = setup();
    run(&mut session, expense("40", "Food & Dining", "2025-06-10")).unwrap();
    run(&mut session, expense("60", "Food & Dining", "2025-06-10")).unwrap();
    run(&mut session, expense("90", "Transportation", "2025-05-20")).unwrap();

    let rows = transactions::query_rows(
        session.transactions(),
        &sub(&["tx", "list", "--type", "expense", "--grouped"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].amount, Decimal::from(100));
    assert_eq!(rows[0].count, 2);

    let rows = transactions::query_rows(
        session.transactions(),
        &sub(&["tx", "list", "--sort", "amount", "--limit", "2"]),
    )
    .unwrap();
    let amounts: Vec<Decimal> = rows.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![Decimal::from(1000), Decimal::from(90)]);

    let rows = transactions::query_rows(
        session.transactions(),
        &sub(&["tx", "list", "--month", "2025-05"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Transportation");
}

#[test]
fn duplicate_budget_is_rejected() {
    let mut session = setup();
    let args = ["budget", "set", "--category", "Travel", "--limit", "5000", "--month", "2025-07"];
    budgets::create(&mut session, &sub(&args), today()).unwrap();
    let err = budgets::create(&mut session, &sub(&args), today()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::DuplicateBudget { .. })
    ));

    let rows = budgets::query_rows(session.budgets(), &sub(&["budget", "list", "--month", "2025-07"]))
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn goals_are_funded_through_the_command() {
    let mut session = setup();
    let goal = goals::create(
        &mut session,
        &sub(&["goal", "add", "--title", "Bike", "--target", "2000", "--date", "2025-12-31"]),
        today(),
    )
    .unwrap();
    let funded = goals::contribute(&mut session, &sub(&["goal", "fund", goal.id.as_str(), "--amount", "500"]))
        .unwrap();
    assert_eq!(funded.current_amount, Decimal::from(500));

    assert!(goals::contribute(&mut session, &sub(&["goal", "fund", goal.id.as_str(), "--amount", "0"])).is_err());
    assert!(goals::contribute(&mut session, &sub(&["goal", "fund", "nope", "--amount", "5"])).is_err());
    assert!(goals::create(
        &mut session,
        &sub(&["goal", "add", "--title", "Late", "--target", "10", "--date", "2025-01-01"]),
        today(),
    )
    .is_err());
}

#[test]
fn doctor_reports_clean_ledger() {
    let mut session = setup();
    budgets::create(
        &mut session,
        &sub(&["budget", "set", "--category", "Shopping", "--limit", "500"]),
        today(),
    )
    .unwrap();
    run(&mut session, expense("120", "Shopping", "2025-06-12")).unwrap();
    assert!(doctor::diagnose(&session).is_empty());
}

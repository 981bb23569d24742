// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetmaster::budget_sync::SpendScope;
use budgetmaster::models::{
    Budget, DashboardStats, EventKind, NewBudget, NewCalendarEvent, NewSavingsGoal,
    NewTransaction, TransactionKind, User,
};
use budgetmaster::validation::{
    check_affordability, validate_budget, validate_contribution, validate_event, validate_goal,
    validate_transaction, validate_user, ValidationError,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(kind: TransactionKind, amount: i64, category: &str, date: &str) -> NewTransaction {
    NewTransaction {
        amount: Decimal::from(amount),
        description: "Groceries".into(),
        category: category.into(),
        kind,
        date: d(date),
    }
}

fn budget(category: &str, month: &str, limit: i64, spent: i64) -> Budget {
    Budget {
        id: format!("b-{}", month),
        category: category.into(),
        limit: Decimal::from(limit),
        spent: Decimal::from(spent),
        month: month.into(),
        user_id: "u1".into(),
    }
}

fn stats(balance: i64) -> DashboardStats {
    DashboardStats {
        balance: Decimal::from(balance),
        ..Default::default()
    }
}

#[test]
fn transaction_fields() {
    use TransactionKind::*;
    assert!(validate_transaction(&draft(Expense, 40, "Food & Dining", "2025-06-01")).is_ok());
    assert!(validate_transaction(&draft(Income, 40, "Salary", "2025-06-01")).is_ok());

    assert_eq!(
        validate_transaction(&draft(Expense, 0, "Food & Dining", "2025-06-01")),
        Err(ValidationError::NonPositive { field: "amount" })
    );
    // income category used for an expense
    assert!(matches!(
        validate_transaction(&draft(Expense, 10, "Salary", "2025-06-01")),
        Err(ValidationError::UnknownCategory { .. })
    ));

    let mut blank = draft(Expense, 10, "Food & Dining", "2025-06-01");
    blank.description = "   ".into();
    assert_eq!(
        validate_transaction(&blank),
        Err(ValidationError::Missing { field: "description" })
    );
}

#[test]
fn affordability_checks_balance_first() {
    let expense = draft(TransactionKind::Expense, 500, "Shopping", "2025-06-10");
    let err = check_affordability(&expense, &stats(200), &[], SpendScope::Month).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InsufficientFunds {
            available: Decimal::from(200),
            requested: Decimal::from(500),
        }
    );

    // negative balance is reported as nothing available
    let err = check_affordability(&expense, &stats(-50), &[], SpendScope::Month).unwrap_err();
    assert!(matches!(err, ValidationError::InsufficientFunds { available, .. } if available == Decimal::ZERO));

    let income = draft(TransactionKind::Income, 500, "Salary", "2025-06-10");
    assert!(check_affordability(&income, &stats(0), &[], SpendScope::Month).is_ok());
}

#[test]
fn affordability_respects_budget_scope() {
    let expense = draft(TransactionKind::Expense, 300, "Shopping", "2025-06-10");
    let budgets = vec![budget("Shopping", "2025-05", 1000, 900)];

    // May budget is ignored for a June expense when scoped by month
    assert!(check_affordability(&expense, &stats(10_000), &budgets, SpendScope::Month).is_ok());

    let err = check_affordability(&expense, &stats(10_000), &budgets, SpendScope::Any).unwrap_err();
    assert_eq!(
        err,
        ValidationError::BudgetLimitExceeded {
            category: "Shopping".into(),
            month: "2025-05".into(),
            remaining: Decimal::from(100),
            requested: Decimal::from(300),
        }
    );

    let june = vec![budget("Shopping", "2025-06", 1000, 700)];
    assert!(check_affordability(&expense, &stats(10_000), &june, SpendScope::Month).is_ok());
}

#[test]
fn budget_rules() {
    let existing = vec![budget("Housing", "2025-06", 20_000, 0)];
    let new = |category: &str, limit: i64, month: &str| NewBudget {
        category: category.into(),
        limit: Decimal::from(limit),
        month: month.into(),
    };

    assert!(validate_budget(&new("Housing", 20_000, "2025-07"), &existing).is_ok());
    assert_eq!(
        validate_budget(&new("Housing", 5_000, "2025-06"), &existing),
        Err(ValidationError::DuplicateBudget {
            category: "Housing".into(),
            month: "2025-06".into(),
        })
    );
    assert!(matches!(
        validate_budget(&new("Salary", 100, "2025-06"), &[]),
        Err(ValidationError::UnknownCategory { .. })
    ));
    assert_eq!(
        validate_budget(&new("Travel", 0, "2025-06"), &[]),
        Err(ValidationError::NonPositive { field: "limit" })
    );
}

#[test]
fn goal_and_contribution_rules() {
    let today = d("2025-06-18");
    let goal = |current: i64, date: &str| NewSavingsGoal {
        title: "Bike".into(),
        target_amount: Decimal::from(50_000),
        current_amount: Decimal::from(current),
        target_date: d(date),
    };
    assert!(validate_goal(&goal(0, "2025-06-18"), today).is_ok());
    assert_eq!(
        validate_goal(&goal(0, "2025-06-17"), today),
        Err(ValidationError::TargetDateInPast(d("2025-06-17")))
    );
    assert_eq!(
        validate_goal(&goal(-1, "2026-01-01"), today),
        Err(ValidationError::Negative { field: "current amount" })
    );

    assert!(validate_contribution(Decimal::from(10)).is_ok());
    assert!(validate_contribution(Decimal::ZERO).is_err());
}

#[test]
fn event_rules() {
    let mut event = NewCalendarEvent {
        title: "Rent".into(),
        description: String::new(),
        amount: Some(Decimal::from(15_000)),
        kind: EventKind::Bill,
        date: d("2025-07-01"),
        time: None,
        recurring: None,
        category: None,
    };
    assert!(validate_event(&event).is_ok());

    event.amount = None;
    assert!(validate_event(&event).is_ok());

    event.amount = Some(Decimal::from(-5));
    assert!(validate_event(&event).is_err());

    event.amount = None;
    event.title = String::new();
    assert_eq!(
        validate_event(&event),
        Err(ValidationError::Missing { field: "title" })
    );
}

#[test]
fn user_profile_rules() {
    let mut user = User {
        id: "u1".into(),
        name: "Asha".into(),
        email: "asha@example.com".into(),
        phone: None,
        date_of_birth: None,
        occupation: None,
        monthly_income: Some(Decimal::from(60_000)),
        address: None,
    };
    assert!(validate_user(&user).is_ok());

    for bad in ["asha", "@example.com", "asha@localhost"] {
        user.email = bad.into();
        assert_eq!(
            validate_user(&user),
            Err(ValidationError::InvalidEmail(bad.into())),
            "{}",
            bad
        );
    }

    user.email = "asha@example.com".into();
    user.monthly_income = Some(Decimal::from(-1));
    assert!(validate_user(&user).is_err());
}

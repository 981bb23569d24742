// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks run before a draft reaches the session. The engine itself
//! never rejects data; these are the only user-facing errors.

use crate::budget_sync::SpendScope;
use crate::consultants::{Booking, Consultant, DURATIONS, TIME_SLOTS};
use crate::models::{
    Budget, DashboardStats, NewBudget, NewCalendarEvent, NewSavingsGoal, NewTransaction,
    TransactionKind, User, EXPENSE_CATEGORIES,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },
    #[error("'{category}' is not a valid {kind} category")]
    UnknownCategory {
        category: String,
        kind: TransactionKind,
    },
    #[error("Insufficient balance: {available} available, {requested} requested")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },
    #[error("{category} budget for {month} has {remaining} left, {requested} requested")]
    BudgetLimitExceeded {
        category: String,
        month: String,
        remaining: Decimal,
        requested: Decimal,
    },
    #[error("A {category} budget for {month} already exists")]
    DuplicateBudget { category: String, month: String },
    #[error("Target date {0} is in the past")]
    TargetDateInPast(NaiveDate),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("User with this email already exists: {0}")]
    DuplicateEmail(String),
    #[error("{0} is not taking bookings")]
    ConsultantOffline(String),
    #[error("'{0}' is not an open slot")]
    UnknownSlot(String),
    #[error("Sessions last 30, 60, 90 or 120 minutes, not {0}")]
    InvalidDuration(u32),
    #[error("Booking date {0} is in the past")]
    BookingDateInPast(NaiveDate),
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing { field })
    } else {
        Ok(())
    }
}

fn positive(value: Decimal, field: &'static str) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        Err(ValidationError::NonPositive { field })
    } else {
        Ok(())
    }
}

fn known_category(category: &str, kind: TransactionKind) -> Result<(), ValidationError> {
    if kind.categories().contains(&category) {
        Ok(())
    } else {
        Err(ValidationError::UnknownCategory {
            category: category.to_string(),
            kind,
        })
    }
}

/// Field-level checks for a new transaction.
pub fn validate_transaction(draft: &NewTransaction) -> Result<(), ValidationError> {
    require(&draft.description, "description")?;
    require(&draft.category, "category")?;
    known_category(&draft.category, draft.kind)?;
    positive(draft.amount, "amount")
}

/// Rejects an expense the user cannot cover, either from the overall
/// balance or from what is left of a matching budget.
pub fn check_affordability(
    draft: &NewTransaction,
    stats: &DashboardStats,
    budgets: &[Budget],
    scope: SpendScope,
) -> Result<(), ValidationError> {
    if draft.kind != TransactionKind::Expense {
        return Ok(());
    }
    if draft.amount > stats.balance {
        return Err(ValidationError::InsufficientFunds {
            available: stats.balance.max(Decimal::ZERO),
            requested: draft.amount,
        });
    }
    let month = draft.date.format("%Y-%m").to_string();
    let matching = budgets.iter().find(|b| {
        b.category == draft.category && (scope == SpendScope::Any || b.month == month)
    });
    if let Some(b) = matching {
        let remaining = b.remaining().max(Decimal::ZERO);
        if draft.amount > remaining {
            return Err(ValidationError::BudgetLimitExceeded {
                category: b.category.clone(),
                month: b.month.clone(),
                remaining,
                requested: draft.amount,
            });
        }
    }
    Ok(())
}

pub fn validate_budget(draft: &NewBudget, existing: &[Budget]) -> Result<(), ValidationError> {
    require(&draft.category, "category")?;
    if !EXPENSE_CATEGORIES.contains(&draft.category.as_str()) {
        return Err(ValidationError::UnknownCategory {
            category: draft.category.clone(),
            kind: TransactionKind::Expense,
        });
    }
    positive(draft.limit, "limit")?;
    if existing
        .iter()
        .any(|b| b.category == draft.category && b.month == draft.month)
    {
        return Err(ValidationError::DuplicateBudget {
            category: draft.category.clone(),
            month: draft.month.clone(),
        });
    }
    Ok(())
}

pub fn validate_goal(draft: &NewSavingsGoal, today: NaiveDate) -> Result<(), ValidationError> {
    require(&draft.title, "title")?;
    positive(draft.target_amount, "target amount")?;
    if draft.current_amount < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: "current amount",
        });
    }
    if draft.target_date < today {
        return Err(ValidationError::TargetDateInPast(draft.target_date));
    }
    Ok(())
}

pub fn validate_contribution(amount: Decimal) -> Result<(), ValidationError> {
    positive(amount, "amount")
}

pub fn validate_event(draft: &NewCalendarEvent) -> Result<(), ValidationError> {
    require(&draft.title, "title")?;
    match draft.amount {
        Some(a) => positive(a, "amount"),
        None => Ok(()),
    }
}

pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    require(&user.name, "name")?;
    require(&user.email, "email")?;
    let valid = user
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(ValidationError::InvalidEmail(user.email.clone()));
    }
    if user.monthly_income.is_some_and(|v| v < Decimal::ZERO) {
        return Err(ValidationError::Negative {
            field: "monthly income",
        });
    }
    Ok(())
}

/// Emails are unique across profiles, ignoring case. `user` itself may
/// already be in `existing` when it is being updated.
pub fn validate_unique_email(user: &User, existing: &[User]) -> Result<(), ValidationError> {
    let email = user.email.trim();
    if existing
        .iter()
        .any(|u| u.id != user.id && u.email.trim().eq_ignore_ascii_case(email))
    {
        return Err(ValidationError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}

pub fn validate_booking(
    booking: &Booking,
    consultant: &Consultant,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if !consultant.can_book() {
        return Err(ValidationError::ConsultantOffline(consultant.name.to_string()));
    }
    if booking.date < today {
        return Err(ValidationError::BookingDateInPast(booking.date));
    }
    if !TIME_SLOTS.contains(&booking.time.as_str()) {
        return Err(ValidationError::UnknownSlot(booking.time.clone()));
    }
    if !DURATIONS.contains(&booking.duration_minutes) {
        return Err(ValidationError::InvalidDuration(booking.duration_minutes));
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Threshold rules over a user's data, and the persisted alert feed.
//!
//! Every alert carries an id derived from the entity that triggered it
//! (`budget-over-<budget id>`, `event-<event id>`, ...), so evaluating the
//! rules again on unchanged data yields ids that are already in the feed and
//! the merge drops them. Reading an alert removes it from the feed.

use crate::aggregate::{month_key, percent_of};
use crate::models::{
    Budget, CalendarEvent, Notification, NotificationCategory, NotificationKind, SavingsGoal,
    Transaction, User,
};
use crate::store::{load_list, save_list, Collection, Store, StoreError};
use crate::utils::{format_currency, round_whole};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

pub const MAX_NOTIFICATIONS: usize = 50;
pub const EVENT_LOOKAHEAD_DAYS: i64 = 3;
pub const LARGE_TRANSACTION_DAYS: i64 = 1;
pub const LARGE_TRANSACTION_AMOUNT: i64 = 10_000;

const BUDGET_WARNING_PCT: i64 = 80;
const GOAL_NEAR_PCT: i64 = 75;
const SPENDING_WARNING_PCT: i64 = 75;
const SPENDING_CRITICAL_PCT: i64 = 90;

/// Everything the rules look at, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub user: &'a User,
    pub transactions: &'a [Transaction],
    pub budgets: &'a [Budget],
    pub goals: &'a [SavingsGoal],
    pub events: &'a [CalendarEvent],
    pub currency: &'a str,
}

struct Feed<'a> {
    user_id: &'a str,
    now: DateTime<Utc>,
    items: Vec<Notification>,
}

impl<'a> Feed<'a> {
    fn push(
        &mut self,
        id: String,
        title: String,
        message: String,
        kind: NotificationKind,
        category: NotificationCategory,
    ) {
        self.items.push(Notification {
            id,
            title,
            message,
            kind,
            date: self.now,
            read: false,
            user_id: self.user_id.to_string(),
            category,
        });
    }
}

fn pct(n: i64) -> Decimal {
    Decimal::from(n)
}

/// Evaluates all rules against `snapshot`. Pure; nothing is persisted.
///
/// Day-based rules use the calendar date of `now` in its own time zone, so
/// pass a local time to agree with dates the user typed. Alerts are stamped
/// with the same instant in UTC.
pub fn generate<Tz: TimeZone>(snapshot: &Snapshot<'_>, now: DateTime<Tz>) -> Vec<Notification> {
    let today = now.date_naive();
    let mut feed = Feed {
        user_id: &snapshot.user.id,
        now: now.with_timezone(&Utc),
        items: Vec::new(),
    };

    upcoming_events(snapshot.events, today, &mut feed);
    budget_thresholds(snapshot.budgets, snapshot.currency, &mut feed);
    goal_progress(snapshot.goals, snapshot.currency, &mut feed);
    monthly_spending(snapshot.user, snapshot.transactions, today, snapshot.currency, &mut feed);
    large_transactions(snapshot.transactions, today, snapshot.currency, &mut feed);

    feed.items
}

fn upcoming_events(events: &[CalendarEvent], today: NaiveDate, feed: &mut Feed<'_>) {
    for event in events.iter().filter(|e| !e.notification_sent) {
        let days = (event.date - today).num_days();
        if !(0..=EVENT_LOOKAHEAD_DAYS).contains(&days) {
            continue;
        }
        let kind = if days == 0 {
            NotificationKind::Warning
        } else {
            NotificationKind::Info
        };
        let when = match days {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        let at = event
            .time
            .as_deref()
            .map(|t| format!(" at {}", t))
            .unwrap_or_default();
        let message = format!(
            "{} is scheduled for {}{}. {}",
            event.title, when, at, event.description
        );
        feed.push(
            format!("event-{}", event.id),
            format!("Upcoming: {}", event.title),
            message.trim_end().to_string(),
            kind,
            NotificationCategory::Event,
        );
    }
}

fn budget_thresholds(budgets: &[Budget], currency: &str, feed: &mut Feed<'_>) {
    for budget in budgets.iter().filter(|b| b.spent > Decimal::ZERO) {
        // a zero limit with any spending is treated as exceeded
        let used = percent_of(budget.spent, budget.limit);
        match used {
            Some(p) if p < pct(100) => {
                if p >= pct(BUDGET_WARNING_PCT) {
                    feed.push(
                        format!("budget-warning-{}", budget.id),
                        format!("Budget Alert: {}", budget.category),
                        format!(
                            "You've used {}% of your {} budget. Only {} remaining.",
                            round_whole(p),
                            budget.category,
                            format_currency(budget.remaining(), currency)
                        ),
                        NotificationKind::Warning,
                        NotificationCategory::Budget,
                    );
                }
            }
            _ => feed.push(
                format!("budget-over-{}", budget.id),
                format!("Budget Exceeded: {}", budget.category),
                format!(
                    "You've exceeded your {} budget by {}. Consider reviewing your spending.",
                    budget.category,
                    format_currency(budget.spent - budget.limit, currency)
                ),
                NotificationKind::Error,
                NotificationCategory::Budget,
            ),
        }
    }
}

fn goal_progress(goals: &[SavingsGoal], currency: &str, feed: &mut Feed<'_>) {
    for goal in goals.iter().filter(|g| g.current_amount > Decimal::ZERO) {
        let progress = percent_of(goal.current_amount, goal.target_amount);
        match progress {
            Some(p) if p < pct(100) => {
                if p >= pct(GOAL_NEAR_PCT) {
                    feed.push(
                        format!("goal-progress-{}", goal.id),
                        format!("Almost There: {}", goal.title),
                        format!(
                            "You're {}% towards your {} goal! Only {} to go.",
                            round_whole(p),
                            goal.title,
                            format_currency(goal.remaining(), currency)
                        ),
                        NotificationKind::Info,
                        NotificationCategory::Goal,
                    );
                }
            }
            _ => feed.push(
                format!("goal-achieved-{}", goal.id),
                format!("Goal Achieved: {}", goal.title),
                format!(
                    "Congratulations! You've successfully reached your savings goal of {}!",
                    format_currency(goal.target_amount, currency)
                ),
                NotificationKind::Success,
                NotificationCategory::Goal,
            ),
        }
    }
}

fn monthly_spending(
    user: &User,
    transactions: &[Transaction],
    today: NaiveDate,
    currency: &str,
    feed: &mut Feed<'_>,
) {
    let profile_income = match user.monthly_income {
        Some(v) if v > Decimal::ZERO => v,
        _ => return,
    };
    let current = month_key(today);
    let this_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.month_key() == current)
        .collect();
    if this_month.is_empty() {
        return;
    }

    let expenses: Decimal = this_month
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    if expenses <= Decimal::ZERO {
        return;
    }
    let income: Decimal = this_month
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum::<Decimal>()
        + profile_income;

    let Some(spent_pct) = percent_of(expenses, income) else {
        return;
    };
    if spent_pct >= pct(SPENDING_CRITICAL_PCT) {
        feed.push(
            "monthly-spending-critical".to_string(),
            "Critical: Monthly Spending Limit".to_string(),
            format!(
                "You've spent {}% of your monthly income. Only {} remaining.",
                round_whole(spent_pct),
                format_currency(income - expenses, currency)
            ),
            NotificationKind::Error,
            NotificationCategory::Transaction,
        );
    } else if spent_pct >= pct(SPENDING_WARNING_PCT) {
        feed.push(
            "monthly-spending-warning".to_string(),
            "Monthly Spending Alert".to_string(),
            format!(
                "You've spent {}% of your monthly income. Consider monitoring your expenses closely.",
                round_whole(spent_pct)
            ),
            NotificationKind::Warning,
            NotificationCategory::Transaction,
        );
    }
}

fn large_transactions(
    transactions: &[Transaction],
    today: NaiveDate,
    currency: &str,
    feed: &mut Feed<'_>,
) {
    let threshold = Decimal::from(LARGE_TRANSACTION_AMOUNT);
    for t in transactions {
        let age = (today - t.date).num_days();
        if !(0..=LARGE_TRANSACTION_DAYS).contains(&age) || t.amount < threshold {
            continue;
        }
        let (label, verb, kind) = if t.is_income() {
            ("Income", "Received", NotificationKind::Success)
        } else {
            ("Expense", "Spent", NotificationKind::Info)
        };
        feed.push(
            format!("large-transaction-{}", t.id),
            format!("Large {} Recorded", label),
            format!(
                "{} {} on {} in {}.",
                verb,
                format_currency(t.amount, currency),
                t.description,
                t.category
            ),
            kind,
            NotificationCategory::Transaction,
        );
    }
}

/// Folds freshly generated alerts into the persisted feed.
///
/// Read entries are dropped, ids already present are not added twice, the
/// result is ordered newest first and capped at [`MAX_NOTIFICATIONS`].
pub fn merge(existing: Vec<Notification>, generated: Vec<Notification>) -> Vec<Notification> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut all: Vec<Notification> = existing
        .into_iter()
        .filter(|n| !n.read && seen.insert(n.id.clone()))
        .collect();
    for n in generated {
        if seen.insert(n.id.clone()) {
            all.push(n);
        }
    }
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all.truncate(MAX_NOTIFICATIONS);
    all
}

pub fn active<S: Store + ?Sized>(store: &S, user_id: &str) -> Result<Vec<Notification>, StoreError> {
    load_list(store, Collection::Notifications, user_id)
}

/// Runs the rules, merges with the stored feed and persists the result.
pub fn refresh<S: Store + ?Sized, Tz: TimeZone>(
    store: &mut S,
    snapshot: &Snapshot<'_>,
    now: DateTime<Tz>,
) -> Result<Vec<Notification>, StoreError> {
    let user_id = snapshot.user.id.as_str();
    let existing = active(store, user_id)?;
    let before = existing.len();
    let generated = generate(snapshot, now);
    let fired = generated.len();
    let merged = merge(existing, generated);
    tracing::debug!(user = user_id, before, fired, after = merged.len(), "notifications merged");
    save_list(store, Collection::Notifications, user_id, &merged)?;
    Ok(merged)
}

/// Acknowledges one alert, which removes it from the feed.
pub fn mark_as_read<S: Store + ?Sized>(
    store: &mut S,
    user_id: &str,
    notification_id: &str,
) -> Result<Vec<Notification>, StoreError> {
    let remaining: Vec<Notification> = active(store, user_id)?
        .into_iter()
        .filter(|n| n.id != notification_id)
        .collect();
    save_list(store, Collection::Notifications, user_id, &remaining)?;
    Ok(remaining)
}

pub fn mark_all_as_read<S: Store + ?Sized>(store: &mut S, user_id: &str) -> Result<(), StoreError> {
    save_list::<Notification, S>(store, Collection::Notifications, user_id, &[])
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard and report rollups over a user's transactions.
//!
//! Everything in here is a pure function of its inputs: callers pass the
//! current ledger (and `today` where the current month matters) and get a
//! freshly computed value back.

use crate::models::{DashboardStats, SavingsGoal, Transaction, TransactionKind, User};
use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const QUARTER_LABELS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `part / whole * 100`, or `None` when `whole` is zero.
///
/// A ratio too large for `Decimal` saturates at `Decimal::MAX` (or `MIN`
/// when the signs differ), so callers comparing against a threshold still
/// see it as over 100%.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    let exact = part
        .checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED));
    Some(exact.unwrap_or_else(|| {
        if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    }))
}

/// Headline figures for the dashboard.
///
/// Profile income is added once to `total_income`, but for `monthly_income`
/// it only stands in when the current month has no income transactions.
pub fn compute_dashboard_stats(
    transactions: &[Transaction],
    user: Option<&User>,
    today: NaiveDate,
) -> DashboardStats {
    let profile_income = user.map(User::profile_income).unwrap_or(Decimal::ZERO);
    let current_month = month_key(today);

    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut month_income = Decimal::ZERO;
    let mut month_expenses = Decimal::ZERO;

    for t in transactions {
        let in_month = t.month_key() == current_month;
        match t.kind {
            TransactionKind::Income => {
                income += t.amount;
                if in_month {
                    month_income += t.amount;
                }
            }
            TransactionKind::Expense => {
                expenses += t.amount;
                if in_month {
                    month_expenses += t.amount;
                }
            }
        }
    }

    let total_income = income + profile_income;
    let monthly_income = if month_income.is_zero() {
        profile_income
    } else {
        month_income
    };

    DashboardStats {
        total_income,
        total_expenses: expenses,
        balance: total_income - expenses,
        monthly_income,
        monthly_expenses: month_expenses,
        savings_goals_progress: Decimal::ZERO,
    }
}

impl DashboardStats {
    pub fn with_goals(self, goals: &[SavingsGoal]) -> Self {
        DashboardStats {
            savings_goals_progress: savings_goals_progress(goals),
            ..self
        }
    }
}

pub fn savings_rate(stats: &DashboardStats) -> Decimal {
    if stats.monthly_income > Decimal::ZERO {
        percent_of(stats.monthly_income - stats.monthly_expenses, stats.monthly_income)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Combined progress across all goals, as a percentage of the summed targets.
pub fn savings_goals_progress(goals: &[SavingsGoal]) -> Decimal {
    let target: Decimal = goals.iter().map(|g| g.target_amount).sum();
    let current: Decimal = goals.iter().map(|g| g.current_amount).sum();
    percent_of(current, target).unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
    All,
    Year(i32),
    Month(i32, u32),
}

impl PeriodFilter {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            PeriodFilter::All => true,
            PeriodFilter::Year(y) => date.year() == y,
            PeriodFilter::Month(y, m) => date.year() == y && date.month() == m,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

/// Expense totals per category, largest first. Equal totals keep the order
/// in which their category first appeared.
pub fn compute_category_breakdown(
    transactions: &[Transaction],
    period: PeriodFilter,
) -> Vec<CategoryAmount> {
    let mut totals: Vec<CategoryAmount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions
        .iter()
        .filter(|t| t.is_expense() && period.contains(t.date))
    {
        match index.get(t.category.as_str()) {
            Some(&i) => totals[i].amount += t.amount,
            None => {
                index.insert(t.category.as_str(), totals.len());
                totals.push(CategoryAmount {
                    category: t.category.clone(),
                    amount: t.amount,
                });
            }
        }
    }

    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Month,
    Quarter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodPoint {
    pub period: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

pub fn compute_period_series(
    transactions: &[Transaction],
    granularity: Granularity,
    year: i32,
) -> Vec<PeriodPoint> {
    let labels: &[&str] = match granularity {
        Granularity::Month => &MONTH_LABELS,
        Granularity::Quarter => &QUARTER_LABELS,
    };
    let mut points: Vec<PeriodPoint> = labels
        .iter()
        .map(|label| PeriodPoint {
            period: label.to_string(),
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            savings: Decimal::ZERO,
        })
        .collect();

    for t in transactions.iter().filter(|t| t.date.year() == year) {
        let idx = match granularity {
            Granularity::Month => t.date.month0() as usize,
            Granularity::Quarter => (t.date.month0() / 3) as usize,
        };
        let point = &mut points[idx];
        match t.kind {
            TransactionKind::Income => point.income += t.amount,
            TransactionKind::Expense => point.expenses += t.amount,
        }
    }

    for p in &mut points {
        p.savings = p.income - p.expenses;
    }
    points
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    pub transaction_count: usize,
}

/// One row per year present in the ledger, newest year first.
pub fn compute_year_over_year(transactions: &[Transaction]) -> Vec<YearPoint> {
    let mut years: BTreeMap<i32, YearPoint> = BTreeMap::new();
    for t in transactions {
        let year = t.date.year();
        let entry = years.entry(year).or_insert(YearPoint {
            year,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            savings: Decimal::ZERO,
            transaction_count: 0,
        });
        match t.kind {
            TransactionKind::Income => entry.income += t.amount,
            TransactionKind::Expense => entry.expenses += t.amount,
        }
        entry.transaction_count += 1;
    }
    years
        .into_values()
        .rev()
        .map(|mut y| {
            y.savings = y.income - y.expenses;
            y
        })
        .collect()
}

pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    let mut years: Vec<i32> = transactions.iter().map(|t| t.date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    pub avg_monthly_income: Decimal,
    pub avg_monthly_expenses: Decimal,
    pub savings_rate: Decimal,
    pub transaction_count: usize,
}

pub fn compute_year_summary(transactions: &[Transaction], year: i32) -> YearSummary {
    let twelve = Decimal::from(12);
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut count = 0;
    for t in transactions.iter().filter(|t| t.date.year() == year) {
        match t.kind {
            TransactionKind::Income => income += t.amount,
            TransactionKind::Expense => expenses += t.amount,
        }
        count += 1;
    }
    let savings_rate = if income > Decimal::ZERO {
        percent_of(income - expenses, income).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };
    YearSummary {
        year,
        total_income: income,
        total_expenses: expenses,
        total_savings: income - expenses,
        avg_monthly_income: income / twelve,
        avg_monthly_expenses: expenses / twelve,
        savings_rate,
        transaction_count: count,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub expenses: Decimal,
}

/// Monthly expenses for the twelve months ending with `today`'s month,
/// oldest first.
pub fn compute_expense_trend(transactions: &[Transaction], today: NaiveDate) -> Vec<TrendPoint> {
    let first_of_month = today - Duration::days(i64::from(today.day0()));
    (0..12u32)
        .rev()
        .filter_map(|back| first_of_month.checked_sub_months(Months::new(back)))
        .map(|start| {
            let period = PeriodFilter::Month(start.year(), start.month());
            let expenses = transactions
                .iter()
                .filter(|t| t.is_expense() && period.contains(t.date))
                .map(|t| t.amount)
                .sum();
            TrendPoint {
                label: start.format("%b %y").to_string(),
                expenses,
            }
        })
        .collect()
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which expenses count against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendScope {
    /// Same category, and dated inside the budget's `YYYY-MM`.
    #[default]
    Month,
    /// Same category in any month.
    Any,
}

impl SpendScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpendScope::Month => "month",
            SpendScope::Any => "any",
        }
    }
}

impl fmt::Display for SpendScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpendScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(SpendScope::Month),
            "any" => Ok(SpendScope::Any),
            other => Err(format!("Unknown budget scope '{}', expected month|any", other)),
        }
    }
}

/// Whether an expense in `category` dated in `month` (`YYYY-MM`) is charged
/// to `budget`. Category comparison is exact and case-sensitive.
fn charges(budget: &Budget, category: &str, month: &str, scope: SpendScope) -> bool {
    budget.category == category
        && match scope {
            SpendScope::Month => budget.month == month,
            SpendScope::Any => true,
        }
}

fn matches(budget: &Budget, tx: &Transaction, scope: SpendScope) -> bool {
    tx.is_expense() && charges(budget, &tx.category, &tx.month_key(), scope)
}

pub fn on_transaction_added(tx: &Transaction, budgets: &[Budget], scope: SpendScope) -> Vec<Budget> {
    budgets
        .iter()
        .map(|b| {
            if matches(b, tx, scope) {
                Budget {
                    spent: b.spent + tx.amount,
                    ..b.clone()
                }
            } else {
                b.clone()
            }
        })
        .collect()
}

/// Inverse of [`on_transaction_added`]; `spent` is clamped at zero.
pub fn on_transaction_removed(
    tx: &Transaction,
    budgets: &[Budget],
    scope: SpendScope,
) -> Vec<Budget> {
    budgets
        .iter()
        .map(|b| {
            if matches(b, tx, scope) {
                Budget {
                    spent: (b.spent - tx.amount).max(Decimal::ZERO),
                    ..b.clone()
                }
            } else {
                b.clone()
            }
        })
        .collect()
}

/// Consumption a new budget for `category`/`month` starts with, given the
/// expenses already on the ledger.
pub fn initial_spent(
    category: &str,
    month: &str,
    transactions: &[Transaction],
    scope: SpendScope,
) -> Decimal {
    let template = Budget {
        id: String::new(),
        category: category.to_string(),
        limit: Decimal::ZERO,
        spent: Decimal::ZERO,
        month: month.to_string(),
        user_id: String::new(),
    };
    transactions
        .iter()
        .filter(|t| matches(&template, t, scope))
        .map(|t| t.amount)
        .sum()
}

/// Rebuilds every budget's `spent` from the ledger instead of incrementally.
pub fn recompute_spent(
    budgets: &[Budget],
    transactions: &[Transaction],
    scope: SpendScope,
) -> Vec<Budget> {
    budgets
        .iter()
        .map(|b| Budget {
            spent: initial_spent(&b.category, &b.month, transactions, scope),
            ..b.clone()
        })
        .collect()
}

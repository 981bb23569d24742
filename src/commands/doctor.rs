// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget_sync::recompute_spent;
use crate::models::EXPENSE_CATEGORIES;
use crate::session::Session;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Findings are reported, never repaired, unless `--fix` is passed.
pub fn diagnose<S: Store>(session: &Session<S>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Transactions whose category is outside the vocabulary of their kind
    for t in session.transactions() {
        if !t.kind.categories().contains(&t.category.as_str()) {
            rows.push(vec![
                "unknown_category".into(),
                format!("{} '{}' ({})", t.kind, t.category, t.id),
            ]);
        }
    }

    // 2) Budgets that no expense can ever match
    for b in session.budgets() {
        if !EXPENSE_CATEGORIES.contains(&b.category.as_str()) {
            rows.push(vec![
                "budget_unknown_category".into(),
                format!("{} {} ({})", b.month, b.category, b.id),
            ]);
        }
    }

    // 3) Duplicate budgets for one category and month
    let mut seen = HashSet::new();
    for b in session.budgets() {
        if !seen.insert((b.category.as_str(), b.month.as_str())) {
            rows.push(vec![
                "duplicate_budget".into(),
                format!("{} {}", b.month, b.category),
            ]);
        }
    }

    // 4) Consumption that disagrees with the ledger
    let rebuilt = recompute_spent(session.budgets(), session.transactions(), session.scope());
    for (old, new) in session.budgets().iter().zip(&rebuilt) {
        if old.spent != new.spent {
            rows.push(vec![
                "budget_drift".into(),
                format!(
                    "{} {}: stored {}, ledger {}",
                    old.month, old.category, old.spent, new.spent
                ),
            ]);
        }
    }

    // 5) Zero or negative amounts
    for t in session.transactions() {
        if t.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("{} {} ({})", t.kind, t.amount, t.id),
            ]);
        }
    }
    rows
}

pub fn handle<S: Store>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    let rows = diagnose(session);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
        return Ok(());
    }
    println!("{}", pretty_table(&["Issue", "Detail"], rows));
    if m.get_flag("fix") {
        let fixed = session.resync_budgets()?;
        println!("Recomputed consumption for {} budget(s)", fixed);
    }
    Ok(())
}

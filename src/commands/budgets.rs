// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::month_key;
use crate::commands::today;
use crate::models::{Budget, NewBudget};
use crate::session::Session;
use crate::store::Store;
use crate::utils::{
    format_currency, format_percentage, maybe_print_json, parse_decimal, parse_month,
    pretty_table, required_arg,
};
use crate::validation::validate_budget;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn handle<S: Store>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

/// Creates the budget described by a `budget set` request. Its starting
/// consumption is taken from expenses already on the ledger.
pub fn create<S: Store>(
    session: &mut Session<S>,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Budget> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => month_key(today),
    };
    let draft = NewBudget {
        category: required_arg(sub, "category")?.trim().to_string(),
        limit: parse_decimal(required_arg(sub, "limit")?)?,
        month,
    };
    validate_budget(&draft, session.budgets())?;
    Ok(session.add_budget(draft)?)
}

fn set<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let b = create(session, sub, today())?;
    println!(
        "Budget set for {} / {} = {} ({} already spent, id: {})",
        b.month,
        b.category,
        format_currency(b.limit, session.currency()),
        format_currency(b.spent, session.currency()),
        b.id
    );
    Ok(())
}

pub fn query_rows(budgets: &[Budget], sub: &clap::ArgMatches) -> Result<Vec<Budget>> {
    let mut data: Vec<Budget> = match sub.get_one::<String>("month") {
        Some(m) => {
            let month = parse_month(m)?;
            budgets.iter().filter(|b| b.month == month).cloned().collect()
        }
        None => budgets.to_vec(),
    };
    data.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.category.cmp(&b.category)));
    Ok(data)
}

fn list<S: Store>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session.budgets(), sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = session.currency();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                let remaining = if b.remaining() < Decimal::ZERO {
                    format!("-{}", format_currency(b.remaining(), ccy))
                } else {
                    format_currency(b.remaining(), ccy)
                };
                vec![
                    b.month.clone(),
                    b.category.clone(),
                    format_currency(b.limit, ccy),
                    format_currency(b.spent, ccy),
                    remaining,
                    format_percentage(b.spent, b.limit),
                    b.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Category", "Limit", "Spent", "Remaining", "Used", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    match session.delete_budget(id)? {
        Some(b) => println!("Deleted {} budget for {}", b.category, b.month),
        None => return Err(anyhow!("No budget with id '{}'", id)),
    }
    Ok(())
}

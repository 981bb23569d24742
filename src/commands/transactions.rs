// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::today;
use crate::ledger::{list_view, KindFilter, SortBy, TransactionGroup};
use crate::models::{NewTransaction, Transaction, TransactionKind};
use crate::session::Session;
use crate::store::Store;
use crate::utils::{
    format_currency, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
    required_arg,
};
use crate::validation::{check_affordability, validate_transaction};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;

pub fn handle<S: Store>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<TransactionKind> {
    match s {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        other => Err(anyhow!("Unknown transaction type '{}'", other)),
    }
}

fn draft_from(sub: &clap::ArgMatches, today: NaiveDate) -> Result<NewTransaction> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today,
    };
    Ok(NewTransaction {
        amount: parse_decimal(required_arg(sub, "amount")?)?,
        description: required_arg(sub, "description")?.trim().to_string(),
        category: required_arg(sub, "category")?.trim().to_string(),
        kind: parse_kind(required_arg(sub, "type")?)?,
        date,
    })
}

/// Validates and stores a `tx add` request. Unless `--force` is given, an
/// expense must fit both the balance and its budget.
pub fn record<S: Store>(
    session: &mut Session<S>,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Transaction> {
    let draft = draft_from(sub, today)?;
    validate_transaction(&draft)?;
    if !sub.get_flag("force") {
        check_affordability(
            &draft,
            &session.dashboard(today),
            session.budgets(),
            session.scope(),
        )?;
    }
    Ok(session.add_transaction(draft)?)
}

fn add<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let tx = record(session, sub, today())?;
    println!(
        "Recorded {} of {} on {} in {} (id: {})",
        tx.kind,
        format_currency(tx.amount, session.currency()),
        tx.date,
        tx.category,
        tx.id
    );
    Ok(())
}

pub fn query_rows(transactions: &[Transaction], sub: &clap::ArgMatches) -> Result<Vec<TransactionGroup>> {
    let filter = match sub.get_one::<String>("type").map(String::as_str) {
        Some("income") => KindFilter::Income,
        Some("expense") => KindFilter::Expense,
        _ => KindFilter::All,
    };
    let sort = match sub.get_one::<String>("sort").map(String::as_str) {
        Some("amount") => SortBy::Amount,
        _ => SortBy::Date,
    };
    let scoped: Vec<Transaction> = match sub.get_one::<String>("month") {
        Some(m) => {
            let month = parse_month(m)?;
            transactions
                .iter()
                .filter(|t| t.month_key() == month)
                .cloned()
                .collect()
        }
        None => transactions.to_vec(),
    };
    let mut rows = list_view(&scoped, filter, sort, sub.get_flag("grouped"));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list<S: Store>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session.transactions(), sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = if r.kind == TransactionKind::Income { "+" } else { "-" };
                vec![
                    r.date.to_string(),
                    r.description.clone(),
                    r.category.clone(),
                    r.kind.to_string(),
                    format!("{}{}", sign, format_currency(r.amount, session.currency())),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Category", "Type", "Amount", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    match session.delete_transaction(id)? {
        Some(tx) => println!("Deleted '{}' ({})", tx.description, tx.id),
        None => return Err(anyhow!("No transaction with id '{}'", id)),
    }
    Ok(())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::today;
use crate::models::{NewSavingsGoal, SavingsGoal};
use crate::session::Session;
use crate::store::Store;
use crate::utils::{
    format_currency, format_date, format_percentage, maybe_print_json, parse_date, parse_decimal,
    pretty_table, required_arg,
};
use crate::validation::{validate_contribution, validate_goal};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn handle<S: Store>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("fund", sub)) => fund(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn create<S: Store>(
    session: &mut Session<S>,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<SavingsGoal> {
    let current_amount = match sub.get_one::<String>("current") {
        Some(v) => parse_decimal(v)?,
        None => Decimal::ZERO,
    };
    let draft = NewSavingsGoal {
        title: required_arg(sub, "title")?.trim().to_string(),
        target_amount: parse_decimal(required_arg(sub, "target")?)?,
        current_amount,
        target_date: parse_date(required_arg(sub, "date")?)?,
    };
    validate_goal(&draft, today)?;
    Ok(session.add_goal(draft)?)
}

fn add<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let g = create(session, sub, today())?;
    println!(
        "Goal '{}' created: {} by {} (id: {})",
        g.title,
        format_currency(g.target_amount, session.currency()),
        format_date(g.target_date),
        g.id
    );
    Ok(())
}

pub fn contribute<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<SavingsGoal> {
    let id = required_arg(sub, "id")?;
    let amount = parse_decimal(required_arg(sub, "amount")?)?;
    validate_contribution(amount)?;
    session
        .add_money(id, amount)?
        .ok_or_else(|| anyhow!("No goal with id '{}'", id))
}

fn fund<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let g = contribute(session, sub)?;
    println!(
        "'{}' now at {} of {} ({})",
        g.title,
        format_currency(g.current_amount, session.currency()),
        format_currency(g.target_amount, session.currency()),
        format_percentage(g.current_amount, g.target_amount)
    );
    Ok(())
}

fn list<S: Store>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = session.goals();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let now = today();
        let ccy = session.currency();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|g| {
                let days = g.days_left(now);
                vec![
                    g.title.clone(),
                    format_currency(g.current_amount, ccy),
                    format_currency(g.target_amount, ccy),
                    format_percentage(g.current_amount, g.target_amount),
                    format_date(g.target_date),
                    if days < 0 { "overdue".to_string() } else { days.to_string() },
                    g.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Goal", "Saved", "Target", "Progress", "Due", "Days left", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    match session.delete_goal(id)? {
        Some(g) => println!("Deleted goal '{}'", g.title),
        None => return Err(anyhow!("No goal with id '{}'", id)),
    }
    Ok(())
}

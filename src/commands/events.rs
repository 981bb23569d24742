// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::{
    events_on, month_summary, transactions_on, upcoming_bills, upcoming_events, MonthSummary,
    Occurrence,
};
use crate::commands::today;
use crate::models::{CalendarEvent, EventKind, NewCalendarEvent, Recurrence, Transaction};
use crate::session::Session;
use crate::store::Store;
use crate::utils::{
    format_currency, format_date, maybe_print_json, parse_date, parse_decimal, parse_time,
    pretty_table, required_arg,
};
use crate::validation::validate_event;
use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: Store>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("day", sub)) => day(session, sub)?,
        Some(("dismiss", sub)) => dismiss(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<EventKind> {
    Ok(match s {
        "income" => EventKind::Income,
        "expense" => EventKind::Expense,
        "bill" => EventKind::Bill,
        "goal" => EventKind::Goal,
        "reminder" => EventKind::Reminder,
        other => return Err(anyhow!("Unknown event type '{}'", other)),
    })
}

fn parse_recurrence(s: &str) -> Result<Recurrence> {
    Ok(match s {
        "none" => Recurrence::None,
        "daily" => Recurrence::Daily,
        "weekly" => Recurrence::Weekly,
        "monthly" => Recurrence::Monthly,
        "yearly" => Recurrence::Yearly,
        other => return Err(anyhow!("Unknown recurrence '{}'", other)),
    })
}

pub fn create<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<CalendarEvent> {
    let draft = NewCalendarEvent {
        title: required_arg(sub, "title")?.trim().to_string(),
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        kind: parse_kind(required_arg(sub, "type")?)?,
        date: parse_date(required_arg(sub, "date")?)?,
        time: sub.get_one::<String>("time").map(|s| parse_time(s)).transpose()?,
        recurring: sub
            .get_one::<String>("recurring")
            .map(|s| parse_recurrence(s))
            .transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
    };
    validate_event(&draft)?;
    Ok(session.add_event(draft)?)
}

fn add<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let e = create(session, sub)?;
    println!(
        "Scheduled {} '{}' on {} (id: {})",
        e.kind.as_str(),
        e.title,
        format_date(e.date),
        e.id
    );
    Ok(())
}

pub fn query_upcoming<'a>(
    events: &'a [CalendarEvent],
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Vec<Occurrence<'a>>> {
    let from = match sub.get_one::<String>("from") {
        Some(d) => parse_date(d)?,
        None => today,
    };
    Ok(if sub.get_flag("bills") {
        upcoming_bills(events, from)
    } else {
        upcoming_events(events, from)
    })
}

fn list<S: Store>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_upcoming(session.events(), sub, today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|o| {
                vec![
                    format_date(o.date),
                    o.event.time.clone().unwrap_or_default(),
                    o.event.title.clone(),
                    o.event.kind.as_str().to_string(),
                    o.event.recurrence().as_str().to_string(),
                    o.event
                        .amount
                        .map(|a| format_currency(a, session.currency()))
                        .unwrap_or_default(),
                    o.event.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Next", "Time", "Title", "Type", "Repeats", "Amount", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a CalendarEvent>,
    pub transactions: Vec<&'a Transaction>,
    pub month: MonthSummary,
}

pub fn day_view<'a>(
    events: &'a [CalendarEvent],
    transactions: &'a [Transaction],
    date: NaiveDate,
) -> DayView<'a> {
    DayView {
        date,
        events: events_on(events, date),
        transactions: transactions_on(transactions, date),
        month: month_summary(transactions, date.year(), date.month()),
    }
}

fn day<S: Store>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let date = parse_date(required_arg(sub, "date")?)?;
    let view = day_view(session.events(), session.transactions(), date);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    let ccy = session.currency();
    println!("{}", format_date(view.date));
    let mut rows: Vec<Vec<String>> = view
        .events
        .iter()
        .map(|e| {
            vec![
                "event".to_string(),
                e.title.clone(),
                e.kind.as_str().to_string(),
                e.amount.map(|a| format_currency(a, ccy)).unwrap_or_default(),
            ]
        })
        .collect();
    rows.extend(view.transactions.iter().map(|t| {
        vec![
            "transaction".to_string(),
            t.description.clone(),
            t.kind.to_string(),
            format_currency(t.amount, ccy),
        ]
    }));
    println!("{}", pretty_table(&["", "Title", "Type", "Amount"], rows));
    println!(
        "Month so far: income {}, expenses {}, net {}{}",
        format_currency(view.month.income, ccy),
        format_currency(view.month.expenses, ccy),
        if view.month.net < Decimal::ZERO { "-" } else { "" },
        format_currency(view.month.net, ccy)
    );
    Ok(())
}

fn dismiss<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    if !session.mark_event_notified(id)? {
        return Err(anyhow!("No event with id '{}'", id));
    }
    println!("No further reminders for event {}", id);
    Ok(())
}

fn remove<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    match session.delete_event(id)? {
        Some(e) => println!("Deleted event '{}'", e.title),
        None => return Err(anyhow!("No event with id '{}'", id)),
    }
    Ok(())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    available_years, compute_category_breakdown, compute_expense_trend, compute_period_series,
    compute_year_over_year, compute_year_summary, percent_of, savings_rate, Granularity,
    PeriodFilter, PeriodPoint,
};
use crate::calendar::{upcoming_bills, Occurrence};
use crate::commands::today;
use crate::ledger::recent;
use crate::models::{DashboardStats, Transaction};
use crate::session::Session;
use crate::store::Store;
use crate::utils::{
    format_currency, format_date, maybe_print_json, parse_year_month, pretty_table, round_whole,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

const RECENT_TRANSACTIONS: usize = 5;

pub fn handle<S: Store>(session: &Session<S>, m: &clap::ArgMatches) -> Result<()> {
    let now = today();
    match m.subcommand() {
        Some(("dashboard", sub)) => print_dashboard(session, sub, now)?,
        Some(("monthly", sub)) => period(session, sub, Granularity::Month, now)?,
        Some(("quarterly", sub)) => period(session, sub, Granularity::Quarter, now)?,
        Some(("yearly", sub)) => yearly(session, sub)?,
        Some(("categories", sub)) => categories(session, sub)?,
        Some(("trend", sub)) => trend(session, sub, now)?,
        Some(("summary", sub)) => summary(session, sub, now)?,
        _ => {}
    }
    Ok(())
}

// Signed amount, since format_currency drops the sign.
fn signed(amount: Decimal, ccy: &str) -> String {
    if amount < Decimal::ZERO {
        format!("-{}", format_currency(amount, ccy))
    } else {
        format_currency(amount, ccy)
    }
}

fn year_or(sub: &clap::ArgMatches, now: NaiveDate) -> i32 {
    sub.get_one::<i32>("year").copied().unwrap_or(now.year())
}

#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub stats: DashboardStats,
    pub savings_rate: Decimal,
    pub recent: &'a [Transaction],
    pub upcoming_bills: Vec<Occurrence<'a>>,
}

pub fn dashboard<S: Store>(session: &Session<S>, today: NaiveDate) -> DashboardView<'_> {
    let stats = session.dashboard(today);
    DashboardView {
        savings_rate: savings_rate(&stats),
        stats,
        recent: recent(session.transactions(), RECENT_TRANSACTIONS),
        upcoming_bills: upcoming_bills(session.events(), today),
    }
}

fn print_dashboard<S: Store>(
    session: &Session<S>,
    sub: &clap::ArgMatches,
    now: NaiveDate,
) -> Result<()> {
    let view = dashboard(session, now);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let ccy = session.currency();
    let s = &view.stats;
    let rows = vec![
        vec!["Total income".to_string(), format_currency(s.total_income, ccy)],
        vec!["Total expenses".to_string(), format_currency(s.total_expenses, ccy)],
        vec!["Balance".to_string(), signed(s.balance, ccy)],
        vec!["Income this month".to_string(), format_currency(s.monthly_income, ccy)],
        vec!["Expenses this month".to_string(), format_currency(s.monthly_expenses, ccy)],
        vec!["Savings rate".to_string(), format!("{}%", round_whole(view.savings_rate))],
        vec![
            "Goals progress".to_string(),
            format!("{}%", round_whole(s.savings_goals_progress)),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));

    if !view.recent.is_empty() {
        let rows: Vec<Vec<String>> = view
            .recent
            .iter()
            .map(|t| {
                vec![
                    format_date(t.date),
                    t.description.clone(),
                    t.category.clone(),
                    t.kind.to_string(),
                    format_currency(t.amount, ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Recent", "Category", "Type", "Amount"], rows)
        );
    }
    if !view.upcoming_bills.is_empty() {
        let rows: Vec<Vec<String>> = view
            .upcoming_bills
            .iter()
            .map(|o| {
                vec![
                    format_date(o.date),
                    o.event.title.clone(),
                    o.event.amount.map(|a| format_currency(a, ccy)).unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Due", "Bill", "Amount"], rows));
    }
    Ok(())
}

fn series_rows(points: &[PeriodPoint], ccy: &str) -> Vec<Vec<String>> {
    points
        .iter()
        .map(|p| {
            vec![
                p.period.clone(),
                format_currency(p.income, ccy),
                format_currency(p.expenses, ccy),
                signed(p.savings, ccy),
            ]
        })
        .collect()
}

fn period<S: Store>(
    session: &Session<S>,
    sub: &clap::ArgMatches,
    granularity: Granularity,
    now: NaiveDate,
) -> Result<()> {
    let year = year_or(sub, now);
    let data = compute_period_series(session.transactions(), granularity, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let header = match granularity {
            Granularity::Month => "Month",
            Granularity::Quarter => "Quarter",
        };
        println!(
            "{}",
            pretty_table(
                &[header, "Income", "Expenses", "Savings"],
                series_rows(&data, session.currency()),
            )
        );
    }
    Ok(())
}

fn yearly<S: Store>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = compute_year_over_year(session.transactions());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = session.currency();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|y| {
                vec![
                    y.year.to_string(),
                    format_currency(y.income, ccy),
                    format_currency(y.expenses, ccy),
                    signed(y.savings, ccy),
                    y.transaction_count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Year", "Income", "Expenses", "Savings", "Transactions"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

pub fn category_shares(transactions: &[Transaction], sub: &clap::ArgMatches) -> Result<Vec<CategoryShare>> {
    let period = match (sub.get_one::<i32>("year"), sub.get_one::<String>("month")) {
        (_, Some(m)) => {
            let (y, mo) = parse_year_month(m)?;
            PeriodFilter::Month(y, mo)
        }
        (Some(y), None) => PeriodFilter::Year(*y),
        (None, None) => PeriodFilter::All,
    };
    let breakdown = compute_category_breakdown(transactions, period);
    let total: Decimal = breakdown.iter().map(|c| c.amount).sum();
    Ok(breakdown
        .into_iter()
        .map(|c| CategoryShare {
            percentage: percent_of(c.amount, total)
                .unwrap_or(Decimal::ZERO)
                .round_dp(1),
            category: c.category,
            amount: c.amount,
        })
        .collect())
}

fn categories<S: Store>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = category_shares(session.transactions(), sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    format_currency(c.amount, session.currency()),
                    format!("{}%", c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn trend<S: Store>(session: &Session<S>, sub: &clap::ArgMatches, now: NaiveDate) -> Result<()> {
    let data = compute_expense_trend(session.transactions(), now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| vec![p.label.clone(), format_currency(p.expenses, session.currency())])
            .collect();
        println!("{}", pretty_table(&["Month", "Expenses"], rows));
    }
    Ok(())
}

fn summary<S: Store>(session: &Session<S>, sub: &clap::ArgMatches, now: NaiveDate) -> Result<()> {
    let year = year_or(sub, now);
    let data = compute_year_summary(session.transactions(), year);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = session.currency();
    let rows = vec![
        vec!["Income".to_string(), format_currency(data.total_income, ccy)],
        vec!["Expenses".to_string(), format_currency(data.total_expenses, ccy)],
        vec!["Savings".to_string(), signed(data.total_savings, ccy)],
        vec!["Avg monthly income".to_string(), format_currency(data.avg_monthly_income, ccy)],
        vec![
            "Avg monthly expenses".to_string(),
            format_currency(data.avg_monthly_expenses, ccy),
        ],
        vec!["Savings rate".to_string(), format!("{}%", data.savings_rate.round_dp(1))],
        vec!["Transactions".to_string(), data.transaction_count.to_string()],
    ];
    let title = year.to_string();
    println!("{}", pretty_table(&[title.as_str(), ""], rows));
    let years = available_years(session.transactions());
    if !years.is_empty() {
        let listed: Vec<String> = years.iter().map(i32::to_string).collect();
        println!("Years with data: {}", listed.join(", "));
    }
    Ok(())
}

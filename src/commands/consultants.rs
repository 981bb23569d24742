// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::today;
use crate::consultants::{
    self, booking_cost, booking_event, Booking, Consultant, ConsultantQuery, ConsultantSort,
    ConsultationType, DEFAULT_DURATION,
};
use crate::models::CalendarEvent;
use crate::session::Session;
use crate::store::Store;
use crate::utils::{
    format_currency, format_date, maybe_print_json, parse_date, parse_time, pretty_table,
    required_arg,
};
use crate::validation::validate_booking;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

/// Directory lookups; these never touch the store.
pub fn browse(m: &clap::ArgMatches, currency: &str) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let hits = query(sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &hits)? {
                if hits.is_empty() {
                    println!("No consultants match");
                    return Ok(());
                }
                let rows: Vec<Vec<String>> = hits
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.to_string(),
                            c.title.to_string(),
                            c.location.to_string(),
                            format!("{} ({})", c.rating, c.reviews),
                            format!("{}y", c.experience_years),
                            format!("{}/hr", format_currency(c.hourly_rate, currency)),
                            c.availability.as_str().to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Name", "Title", "Location", "Rating", "Exp", "Rate", "Status"],
                        rows
                    )
                );
            }
        }
        Some(("show", sub)) => {
            let c = lookup(sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), c)? {
                println!("{}", pretty_table(&["Field", "Value"], profile_rows(c, currency)));
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn handle<S: Store>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("book", sub)) = m.subcommand() {
        let event = book(session, sub, today())?;
        println!(
            "{} on {} at {}, {} (event id: {})",
            event.title,
            format_date(event.date),
            event.time.as_deref().unwrap_or_default(),
            format_currency(event.amount.unwrap_or_default(), session.currency()),
            event.id
        );
    }
    Ok(())
}

pub fn query(sub: &clap::ArgMatches) -> Result<Vec<&'static Consultant>> {
    let text = |name: &str| sub.get_one::<String>(name).cloned();
    let sort = match sub.get_one::<String>("sort") {
        Some(s) => ConsultantSort::parse(s).ok_or_else(|| anyhow!("Unknown sort '{}'", s))?,
        None => ConsultantSort::default(),
    };
    Ok(consultants::search(&ConsultantQuery {
        search: text("search"),
        specialization: text("specialization"),
        location: text("location"),
        sort,
    }))
}

fn lookup(sub: &clap::ArgMatches) -> Result<&'static Consultant> {
    let id = *sub.get_one::<u32>("id").context("id is required")?;
    consultants::find(id).ok_or_else(|| anyhow!("No consultant with id {}", id))
}

/// Validates the request and records the session on the calendar.
pub fn book<S: Store>(
    session: &mut Session<S>,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<CalendarEvent> {
    let consultant = lookup(sub)?;
    let kind = match sub.get_one::<String>("type") {
        Some(s) => ConsultationType::parse(s)
            .ok_or_else(|| anyhow!("Unknown consultation type '{}'", s))?,
        None => ConsultationType::default(),
    };
    let booking = Booking {
        consultant_id: consultant.id,
        date: parse_date(required_arg(sub, "date")?)?,
        time: parse_time(required_arg(sub, "time")?)?,
        duration_minutes: sub.get_one::<u32>("duration").copied().unwrap_or(DEFAULT_DURATION),
        kind,
        notes: sub.get_one::<String>("notes").cloned().unwrap_or_default(),
    };
    validate_booking(&booking, consultant, today)?;
    let event = session.add_event(booking_event(&booking, consultant))?;
    tracing::info!(
        consultant = consultant.id,
        cost = %booking_cost(consultant.hourly_rate, booking.duration_minutes),
        "consultation booked"
    );
    Ok(event)
}

fn profile_rows(c: &Consultant, currency: &str) -> Vec<Vec<String>> {
    vec![
        vec!["Name".into(), c.name.to_string()],
        vec!["Title".into(), c.title.to_string()],
        vec!["Specializations".into(), c.specializations.join(", ")],
        vec!["Experience".into(), format!("{} years", c.experience_years)],
        vec!["Rating".into(), format!("{} from {} reviews", c.rating, c.reviews)],
        vec!["Location".into(), c.location.to_string()],
        vec!["Phone".into(), c.phone.to_string()],
        vec!["Email".into(), c.email.to_string()],
        vec![
            "Hourly rate".into(),
            format_currency(c.hourly_rate, currency),
        ],
        vec!["Languages".into(), c.languages.join(", ")],
        vec!["Certifications".into(), c.certifications.join(", ")],
        vec!["Availability".into(), c.availability.as_str().to_string()],
        vec!["About".into(), c.description.to_string()],
    ]
}

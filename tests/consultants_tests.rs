// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetmaster::cli::build_cli;
use budgetmaster::commands::consultants::{book, query};
use budgetmaster::config::Settings;
use budgetmaster::consultants::{
    booking_cost, find, search, Availability, Booking, ConsultantQuery, ConsultantSort,
    ConsultationType,
};
use budgetmaster::models::{EventKind, User};
use budgetmaster::session::Session;
use budgetmaster::store::MemoryStore;
use budgetmaster::validation::{validate_booking, ValidationError};
use chrono::NaiveDate;
use clap::ArgMatches;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 18).unwrap()
}

fn sub(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["budgetmaster"];
    argv.extend_from_slice(args);
    let mut m = build_cli().get_matches_from(argv);
    while let Some((_, inner)) = m.subcommand() {
        m = inner.clone();
    }
    m
}

fn ids(query: &ConsultantQuery) -> Vec<u32> {
    search(query).iter().map(|c| c.id).collect()
}

fn setup() -> Session<MemoryStore> {
    let user = User {
        id: "u1".into(),
        name: "Asha".into(),
        email: "asha@example.com".into(),
        phone: None,
        date_of_birth: None,
        occupation: None,
        monthly_income: None,
        address: None,
    };
    Session::open(MemoryStore::new(), user, &Settings::default()).unwrap()
}

#[test]
fn directory_sorts_with_stable_ties() {
    assert_eq!(ids(&ConsultantQuery::default()), vec![1, 3, 5, 2, 6, 4]);
    let by = |sort| ConsultantQuery {
        sort,
        ..ConsultantQuery::default()
    };
    assert_eq!(ids(&by(ConsultantSort::Experience)), vec![5, 3, 1, 6, 2, 4]);
    assert_eq!(ids(&by(ConsultantSort::Rate)), vec![4, 6, 2, 1, 3, 5]);
}

#[test]
fn search_matches_name_title_and_specialization() {
    let q = |text: &str| ConsultantQuery {
        search: Some(text.into()),
        ..ConsultantQuery::default()
    };
    // title for 3, specialization for 1
    assert_eq!(ids(&q("RETIREMENT")), vec![1, 3]);
    assert_eq!(ids(&q("sneha")), vec![4]);
    assert!(ids(&q("crypto")).is_empty());
    assert_eq!(ids(&q("   ")).len(), 6);

    let mumbai = ConsultantQuery {
        location: Some("mumbai".into()),
        sort: ConsultantSort::Rate,
        ..ConsultantQuery::default()
    };
    assert_eq!(ids(&mumbai), vec![1, 5]);

    let tax = query(&sub(&["consultant", "list", "--specialization", "tax"])).unwrap();
    assert_eq!(tax.iter().map(|c| c.name).collect::<Vec<_>>(), vec!["Priya Sharma"]);
}

#[test]
fn booking_becomes_a_calendar_expense() {
    let mut session = setup();
    let event = book(
        &mut session,
        &sub(&[
            "consultant", "book", "1", "--date", "2025-06-20", "--time", "14:00", "--duration",
            "90", "--type", "tax_planning", "--notes", "Bring Form 16",
        ]),
        today(),
    )
    .unwrap();
    assert_eq!(event.title, "Consultation with Rajesh Kumar");
    assert_eq!(event.kind, EventKind::Expense);
    assert_eq!(event.amount, Some(Decimal::from(3750)));
    assert_eq!(event.time.as_deref(), Some("14:00"));
    assert!(event.description.starts_with("Tax Planning session, 90 minutes"));
    assert!(event.description.ends_with("Bring Form 16"));
    assert_eq!(session.events().len(), 1);

    let defaults = book(
        &mut session,
        &sub(&["consultant", "book", "3", "--date", "2025-06-18", "--time", "09:00"]),
        today(),
    )
    .unwrap();
    assert_eq!(defaults.amount, Some(Decimal::from(3000)));
    assert!(defaults.description.starts_with("Financial Planning"));
}

#[test]
fn bad_bookings_are_rejected() {
    let mut session = setup();
    let err = |args: &[&str]| {
        let mut session = setup();
        book(&mut session, &sub(args), today())
            .unwrap_err()
            .downcast::<ValidationError>()
            .unwrap()
    };
    assert_eq!(
        err(&["consultant", "book", "2", "--date", "2025-06-17", "--time", "10:00"]),
        ValidationError::BookingDateInPast(NaiveDate::from_ymd_opt(2025, 6, 17).unwrap())
    );
    assert_eq!(
        err(&["consultant", "book", "2", "--date", "2025-06-19", "--time", "13:00"]),
        ValidationError::UnknownSlot("13:00".into())
    );
    assert_eq!(
        err(&["consultant", "book", "2", "--date", "2025-06-19", "--time", "10:00", "--duration", "45"]),
        ValidationError::InvalidDuration(45)
    );
    assert!(book(
        &mut session,
        &sub(&["consultant", "book", "42", "--date", "2025-06-19", "--time", "10:00"]),
        today(),
    )
    .is_err());
    assert!(session.events().is_empty());

    let mut offline = find(4).unwrap().clone();
    offline.availability = Availability::Offline;
    let booking = Booking {
        consultant_id: offline.id,
        date: today(),
        time: "10:00".into(),
        duration_minutes: 60,
        kind: ConsultationType::DebtManagement,
        notes: String::new(),
    };
    assert_eq!(
        validate_booking(&booking, &offline, today()),
        Err(ValidationError::ConsultantOffline("Sneha Reddy".into()))
    );
    assert!(validate_booking(&booking, find(4).unwrap(), today()).is_ok());
}

#[test]
fn cost_is_pro_rata() {
    assert_eq!(booking_cost(Decimal::from(1800), 30), Decimal::from(900));
    assert_eq!(booking_cost(Decimal::from(4000), 120), Decimal::from(8000));
}

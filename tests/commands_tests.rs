// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetmaster::budget_sync::SpendScope;
use budgetmaster::cli::build_cli;
use budgetmaster::commands::{events, open_session, planning, reports, transactions, users};
use budgetmaster::config::{self, Settings, KEY_ACTIVE_USER, KEY_CURRENCY, KEY_SCOPE};
use budgetmaster::db;
use budgetmaster::store::{find_user_by_login, load_users, MemoryStore};
use budgetmaster::validation::ValidationError;
use chrono::NaiveDate;
use clap::ArgMatches;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
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

fn create_user(store: &mut MemoryStore, id: &str) {
    users::create(
        store,
        &sub(&[
            "user", "create", "--id", id, "--name", "Asha", "--email", "asha@example.com",
            "--income", "60000",
        ]),
    )
    .unwrap();
}

#[test]
fn settings_round_trip_through_sqlite() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    assert_eq!(config::load(&conn).unwrap(), Settings::default());

    config::set_setting(&conn, KEY_CURRENCY, "$").unwrap();
    config::set_setting(&conn, KEY_SCOPE, "any").unwrap();
    config::set_setting(&conn, KEY_ACTIVE_USER, "u1").unwrap();
    let s = config::load(&conn).unwrap();
    assert_eq!(s.currency_symbol, "$");
    assert_eq!(s.budget_scope, SpendScope::Any);
    assert_eq!(s.active_user.as_deref(), Some("u1"));

    assert!(config::set_setting(&conn, KEY_SCOPE, "weekly").is_err());
    assert!(config::set_setting(&conn, "theme", "dark").is_err());
}

#[test]
fn explicit_user_wins_over_active() {
    let settings = Settings {
        active_user: Some("u1".into()),
        ..Settings::default()
    };
    assert_eq!(settings.resolve_user(Some("u2")).as_deref(), Some("u2"));
    assert_eq!(settings.resolve_user(Some("  ")).as_deref(), Some("u1"));
    assert_eq!(settings.resolve_user(None).as_deref(), Some("u1"));
    assert_eq!(Settings::default().resolve_user(None), None);
}

#[test]
fn user_create_and_session_open() {
    let mut store = MemoryStore::new();
    create_user(&mut store, "u1");
    let users_now = load_users(&store).unwrap();
    assert_eq!(users_now.len(), 1);
    assert_eq!(users_now[0].monthly_income, Some(Decimal::from(60_000)));

    let dup = users::create(
        &mut store,
        &sub(&["user", "create", "--id", "u1", "--name", "B", "--email", "b@example.com"]),
    );
    assert!(dup.is_err());
    let bad_email = users::create(
        &mut store,
        &sub(&["user", "create", "--name", "C", "--email", "not-an-email"]),
    );
    assert!(bad_email.is_err());
    assert_eq!(load_users(&store).unwrap().len(), 1);

    let settings = Settings::default();
    assert!(open_session(&mut store, &settings, None).is_err());
    assert!(open_session(&mut store, &settings, Some("ghost")).is_err());
    let session = open_session(&mut store, &settings, Some("u1")).unwrap();
    assert_eq!(session.user().name, "Asha");
}

#[test]
fn profile_fields_are_overwritten_selectively() {
    let mut store = MemoryStore::new();
    create_user(&mut store, "u1");
    let before = load_users(&store).unwrap().remove(0);
    let after = users::apply_profile(
        before.clone(),
        &sub(&["user", "update", "--occupation", "Engineer", "--dob", "1990-04-12"]),
    )
    .unwrap();
    assert_eq!(after.name, before.name);
    assert_eq!(after.occupation.as_deref(), Some("Engineer"));
    assert_eq!(after.date_of_birth, Some(d("1990-04-12")));
    assert_eq!(after.monthly_income, before.monthly_income);
}

#[test]
fn events_are_scheduled_and_listed() {
    let mut store = MemoryStore::new();
    create_user(&mut store, "u1");
    let mut session = open_session(&mut store, &Settings::default(), Some("u1")).unwrap();

    let rent = events::create(
        &mut session,
        &sub(&[
            "event", "add", "--title", "Rent", "--type", "bill", "--date", "2025-01-05",
            "--amount", "15000", "--recurring", "monthly",
        ]),
    )
    .unwrap();
    events::create(
        &mut session,
        &sub(&["event", "add", "--title", "Dentist", "--date", "2025-06-20", "--time", "10:30"]),
    )
    .unwrap();
    assert!(events::create(
        &mut session,
        &sub(&["event", "add", "--title", "Bad", "--date", "2025-06-20", "--time", "25:00"]),
    )
    .is_err());

    let upcoming =
        events::query_upcoming(session.events(), &sub(&["event", "list", "--from", "2025-06-18"]), d("2000-01-01"))
            .unwrap();
    let titles: Vec<&str> = upcoming.iter().map(|o| o.event.title.as_str()).collect();
    assert_eq!(titles, vec!["Dentist", "Rent"]);
    assert_eq!(upcoming[1].date, d("2025-07-05"));

    let bills = events::query_upcoming(session.events(), &sub(&["event", "list", "--bills"]), d("2025-06-01"))
        .unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].event.id, rent.id);

    let view = events::day_view(session.events(), session.transactions(), d("2025-08-05"));
    assert_eq!(view.events.len(), 1);
    assert!(view.transactions.is_empty());
}

#[test]
fn dashboard_and_category_shares() {
    let mut store = MemoryStore::new();
    create_user(&mut store, "u1");
    let mut session = open_session(&mut store, &Settings::default(), Some("u1")).unwrap();
    let today = d("2025-06-18");
    for (kind, amount, category) in [
        ("income", "40000", "Salary"),
        ("expense", "7500", "Housing"),
        ("expense", "2500", "Food & Dining"),
    ] {
        transactions::record(
            &mut session,
            &sub(&[
                "tx", "add", "--type", kind, "--amount", amount, "--category", category,
                "--description", "entry", "--date", "2025-06-02",
            ]),
            today,
        )
        .unwrap();
    }

    let view = reports::dashboard(&session, today);
    assert_eq!(view.stats.balance, Decimal::from(30_000));
    assert_eq!(view.stats.monthly_income, Decimal::from(40_000));
    assert_eq!(view.savings_rate, Decimal::from(75));
    assert_eq!(view.recent.len(), 3);

    let shares =
        reports::category_shares(session.transactions(), &sub(&["report", "categories", "--month", "2025-06"]))
            .unwrap();
    assert_eq!(shares[0].category, "Housing");
    assert_eq!(shares[0].percentage, Decimal::from(75));
    assert_eq!(shares[1].percentage, Decimal::from(25));

    let empty =
        reports::category_shares(session.transactions(), &sub(&["report", "categories", "--year", "2024"]))
            .unwrap();
    assert!(empty.is_empty());
}

#[test]
fn planning_inputs_use_defaults() {
    let r = planning::retirement_input(&sub(&["plan", "retirement", "--monthly", "5000"])).unwrap();
    assert_eq!(r.current_age, 30);
    assert_eq!(r.retirement_age, 60);
    assert_eq!(r.monthly_contribution, 5000.0);
    assert_eq!(r.expected_return, 12.0);
    assert_eq!(r.inflation_rate, 6.0);

    let l = planning::loan_input(&sub(&["plan", "loan", "--amount", "100000", "--rate", "12", "--years", "1"]))
        .unwrap();
    assert_eq!(l.term_years, 1);

    let e = planning::emergency_input(&sub(&["plan", "emergency", "--monthly-expenses", "20000"])).unwrap();
    assert_eq!(e.target_months, 6);
    assert_eq!(e.current_fund, 0.0);
}

#[test]
fn emails_are_unique_and_accepted_as_login() {
    let mut store = MemoryStore::new();
    create_user(&mut store, "u1");

    let err = users::create(
        &mut store,
        &sub(&["user", "create", "--id", "u2", "--name", "Ravi", "--email", "ASHA@example.com"]),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::DuplicateEmail(_))
    ));
    users::create(
        &mut store,
        &sub(&["user", "create", "--id", "u2", "--name", "Ravi", "--email", "ravi@example.com"]),
    )
    .unwrap();

    let by_email = find_user_by_login(&store, " Ravi@Example.com ").unwrap().unwrap();
    assert_eq!(by_email.id, "u2");
    assert_eq!(find_user_by_login(&store, "u1").unwrap().unwrap().name, "Asha");
    assert!(find_user_by_login(&store, "nobody@example.com").unwrap().is_none());

    let mut session = open_session(&mut store, &Settings::default(), Some("ravi@example.com")).unwrap();
    assert_eq!(session.user().id, "u2");

    // keeping your own address is not a clash
    let kept = users::update(&mut session, &sub(&["user", "update", "--email", "ravi@example.com", "--name", "Ravi K"]))
        .unwrap();
    assert_eq!(kept.name, "Ravi K");
    let err = users::update(&mut session, &sub(&["user", "update", "--email", "asha@example.com"])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::DuplicateEmail(_))
    ));
    assert_eq!(session.user().email, "ravi@example.com");
}

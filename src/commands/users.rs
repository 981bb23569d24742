// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::open_session;
use crate::config::{self, Settings, KEY_ACTIVE_USER};
use crate::models::User;
use crate::session::Session;
use crate::store::{find_user, find_user_by_login, load_users, save_user, SqliteStore, Store};
use crate::utils::{
    format_currency, maybe_print_json, parse_date, parse_decimal, pretty_table, required_arg,
};
use crate::validation::{validate_unique_email, validate_user};
use anyhow::{anyhow, Context, Result};
use uuid::Uuid;

pub fn handle(
    store: &mut SqliteStore,
    settings: &Settings,
    explicit_user: Option<&str>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => {
            let user = create(store, sub)?;
            println!("Created user {} ({})", user.name, user.id);
            if settings.active_user.is_none() {
                config::set_setting(store.conn(), KEY_ACTIVE_USER, &user.id)?;
                println!("{} is now the active user", user.name);
            }
        }
        Some(("show", sub)) => {
            let session = open_session(&mut *store, settings, explicit_user)?;
            let user = session.user();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), user)? {
                println!("{}", pretty_table(&["Field", "Value"], profile_rows(user, settings)));
            }
        }
        Some(("update", sub)) => {
            let mut session = open_session(&mut *store, settings, explicit_user)?;
            let user = update(&mut session, sub)?;
            println!("Profile updated for {}", user.name);
        }
        Some(("use", sub)) => {
            let key = required_arg(sub, "id")?;
            let user = find_user_by_login(&*store, key)?
                .with_context(|| format!("Unknown user '{}'", key))?;
            config::set_setting(store.conn(), KEY_ACTIVE_USER, &user.id)?;
            println!("Switched to {} ({})", user.name, user.id);
        }
        Some(("list", sub)) => {
            let users = load_users(&*store)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &users)? {
                let rows: Vec<Vec<String>> = users
                    .iter()
                    .map(|u| {
                        let active = settings.active_user.as_deref() == Some(u.id.as_str());
                        vec![
                            if active { "*".into() } else { String::new() },
                            u.id.clone(),
                            u.name.clone(),
                            u.email.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["", "ID", "Name", "Email"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Overwrites the profile fields given on the command line.
pub fn apply_profile(mut user: User, sub: &clap::ArgMatches) -> Result<User> {
    let text = |name: &str| sub.get_one::<String>(name).map(|s| s.trim().to_string());
    if let Some(v) = text("name") {
        user.name = v;
    }
    if let Some(v) = text("email") {
        user.email = v;
    }
    if let Some(v) = text("phone") {
        user.phone = Some(v);
    }
    if let Some(v) = sub.get_one::<String>("dob") {
        user.date_of_birth = Some(parse_date(v)?);
    }
    if let Some(v) = text("occupation") {
        user.occupation = Some(v);
    }
    if let Some(v) = sub.get_one::<String>("income") {
        user.monthly_income = Some(parse_decimal(v)?);
    }
    if let Some(v) = text("address") {
        user.address = Some(v);
    }
    Ok(user)
}

pub fn create<S: Store + ?Sized>(store: &mut S, sub: &clap::ArgMatches) -> Result<User> {
    let id = sub
        .get_one::<String>("id")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    if find_user(&*store, &id)?.is_some() {
        return Err(anyhow!("A user with id '{}' already exists", id));
    }
    let blank = User {
        id,
        name: required_arg(sub, "name")?.to_string(),
        email: required_arg(sub, "email")?.to_string(),
        phone: None,
        date_of_birth: None,
        occupation: None,
        monthly_income: None,
        address: None,
    };
    let user = apply_profile(blank, sub)?;
    validate_user(&user)?;
    validate_unique_email(&user, &load_users(&*store)?)?;
    save_user(store, &user)?;
    tracing::info!(id = %user.id, "user created");
    Ok(user)
}

/// Applies a profile edit to the session's user; the email stays unique.
pub fn update<S: Store>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<User> {
    let updated = apply_profile(session.user().clone(), sub)?;
    validate_user(&updated)?;
    validate_unique_email(&updated, &load_users(session.store())?)?;
    session.update_profile(updated)?;
    Ok(session.user().clone())
}

fn profile_rows(user: &User, settings: &Settings) -> Vec<Vec<String>> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        vec!["ID".into(), user.id.clone()],
        vec!["Name".into(), user.name.clone()],
        vec!["Email".into(), user.email.clone()],
        vec!["Phone".into(), opt(&user.phone)],
        vec![
            "Date of birth".into(),
            user.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
        ],
        vec!["Occupation".into(), opt(&user.occupation)],
        vec![
            "Monthly income".into(),
            user.monthly_income
                .map(|v| format_currency(v, &settings.currency_symbol))
                .unwrap_or_default(),
        ],
        vec!["Address".into(), opt(&user.address)],
    ]
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod consultants;
pub mod doctor;
pub mod events;
pub mod exporter;
pub mod goals;
pub mod notifications;
pub mod planning;
pub mod reports;
pub mod settings;
pub mod transactions;
pub mod users;

use crate::config::Settings;
use crate::session::Session;
use crate::store::{find_user_by_login, Store};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

/// Loads the working set of the user named by `--user` (an id or an email),
/// or the active user.
pub fn open_session<S: Store>(
    store: S,
    settings: &Settings,
    explicit_user: Option<&str>,
) -> Result<Session<S>> {
    let user_id = settings
        .resolve_user(explicit_user)
        .context("No active user, create one with `budgetmaster user create`")?;
    let user = find_user_by_login(&store, &user_id)?
        .with_context(|| format!("Unknown user '{}'", user_id))?;
    Ok(Session::open(store, user, settings)?)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

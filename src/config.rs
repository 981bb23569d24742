// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget_sync::SpendScope;
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

pub const USER_ENV: &str = "BUDGETMASTER_USER";
pub const LOG_ENV: &str = "BUDGETMASTER_LOG";
pub const DEFAULT_CURRENCY: &str = "₹";

pub const KEY_CURRENCY: &str = "currency_symbol";
pub const KEY_SCOPE: &str = "budget_scope";
pub const KEY_ACTIVE_USER: &str = "active_user";

pub const KEYS: &[&str] = &[KEY_CURRENCY, KEY_SCOPE, KEY_ACTIVE_USER];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub currency_symbol: String,
    pub budget_scope: SpendScope,
    pub active_user: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            budget_scope: SpendScope::default(),
            active_user: None,
        }
    }
}

impl Settings {
    /// User to operate on: an explicit `--user`/env override wins over the
    /// persisted active user.
    pub fn resolve_user(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.active_user.clone())
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        return Err(anyhow!(
            "Unknown setting '{}', expected one of: {}",
            key,
            KEYS.join(", ")
        ));
    }
    if key == KEY_SCOPE {
        value.parse::<SpendScope>().map_err(|e| anyhow!(e))?;
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value.trim()],
    )?;
    Ok(())
}

pub fn load(conn: &Connection) -> Result<Settings> {
    let defaults = Settings::default();
    let currency_symbol = get_setting(conn, KEY_CURRENCY)?.unwrap_or(defaults.currency_symbol);
    let budget_scope = match get_setting(conn, KEY_SCOPE)? {
        Some(s) => s.parse::<SpendScope>().map_err(|e| anyhow!(e))?,
        None => defaults.budget_scope,
    };
    let active_user = get_setting(conn, KEY_ACTIVE_USER)?;
    Ok(Settings {
        currency_symbol,
        budget_scope,
        active_user,
    })
}

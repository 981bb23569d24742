// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user key/value persistence.
//!
//! Each user owns five independent JSON lists, stored under namespaced keys
//! such as `transactions_<user id>`. A missing key reads as an empty list.

use crate::models::User;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub const USERS_KEY: &str = "budgetUsers";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not (de)serialize '{key}': {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("value stored under '{key}' is not a list")]
    Corrupt { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Budgets,
    SavingsGoals,
    CalendarEvents,
    Notifications,
}

impl Collection {
    pub fn prefix(&self) -> &'static str {
        match self {
            Collection::Transactions => "transactions",
            Collection::Budgets => "budgets",
            Collection::SavingsGoals => "savingsGoals",
            Collection::CalendarEvents => "calendarEvents",
            Collection::Notifications => "notifications",
        }
    }

    pub fn key(&self, user_id: &str) -> String {
        format!("{}_{}", self.prefix(), user_id)
    }
}

pub trait Store {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for &mut S {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

fn decode_list<T: DeserializeOwned>(key: &str, value: Option<Value>) -> Result<Vec<T>, StoreError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v @ Value::Array(_)) => serde_json::from_value(v).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        }),
        Some(_) => Err(StoreError::Corrupt {
            key: key.to_string(),
        }),
    }
}

fn encode_list<T: Serialize>(key: &str, items: &[T]) -> Result<Value, StoreError> {
    serde_json::to_value(items).map_err(|source| StoreError::Serde {
        key: key.to_string(),
        source,
    })
}

pub fn load_list<T, S>(store: &S, collection: Collection, user_id: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    let key = collection.key(user_id);
    decode_list(&key, store.get(&key)?)
}

pub fn save_list<T, S>(
    store: &mut S,
    collection: Collection,
    user_id: &str,
    items: &[T],
) -> Result<(), StoreError>
where
    T: Serialize,
    S: Store + ?Sized,
{
    let key = collection.key(user_id);
    let value = encode_list(&key, items)?;
    tracing::debug!(key = %key, len = items.len(), "saving list");
    store.set(&key, value)
}

pub fn load_users<S: Store + ?Sized>(store: &S) -> Result<Vec<User>, StoreError> {
    decode_list(USERS_KEY, store.get(USERS_KEY)?)
}

pub fn find_user<S: Store + ?Sized>(store: &S, user_id: &str) -> Result<Option<User>, StoreError> {
    Ok(load_users(store)?.into_iter().find(|u| u.id == user_id))
}

/// Resolves a login key: an exact id first, then an email ignoring case.
pub fn find_user_by_login<S: Store + ?Sized>(store: &S, key: &str) -> Result<Option<User>, StoreError> {
    let key = key.trim();
    let users = load_users(store)?;
    if let Some(user) = users.iter().find(|u| u.id == key) {
        return Ok(Some(user.clone()));
    }
    Ok(users.into_iter().find(|u| u.email.trim().eq_ignore_ascii_case(key)))
}

/// Inserts the user, or replaces the stored record with the same id.
pub fn save_user<S: Store + ?Sized>(store: &mut S, user: &User) -> Result<(), StoreError> {
    let mut users = load_users(store)?;
    match users.iter_mut().find(|u| u.id == user.id) {
        Some(existing) => *existing = user.clone(),
        None => users.push(user.clone()),
    }
    let value = encode_list(USERS_KEY, &users)?;
    store.set(USERS_KEY, value)
}

/// Volatile store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by the `kv` table of the application database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wraps a connection whose schema has already been initialised
    /// (see [`crate::db::init_schema`]).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| r.get(0))
            .optional()?;
        match raw {
            Some(s) => serde_json::from_str(&s)
                .map(Some)
                .map_err(|source| StoreError::Serde {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let body = serde_json::to_string(&value).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        self.conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![key, body, Utc::now()],
        )?;
        Ok(())
    }
}

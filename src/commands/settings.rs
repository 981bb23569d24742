// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, KEY_ACTIVE_USER, KEY_CURRENCY, KEY_SCOPE};
use crate::utils::{maybe_print_json, pretty_table, required_arg};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = config::load(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let rows = vec![
                    vec![KEY_CURRENCY.to_string(), s.currency_symbol.clone()],
                    vec![KEY_SCOPE.to_string(), s.budget_scope.to_string()],
                    vec![
                        KEY_ACTIVE_USER.to_string(),
                        s.active_user.clone().unwrap_or_else(|| "(none)".into()),
                    ],
                ];
                println!("{}", pretty_table(&["Key", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let key = required_arg(sub, "key")?;
            let value = required_arg(sub, "value")?;
            config::set_setting(conn, key, value)?;
            println!("{} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}

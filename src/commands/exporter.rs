// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::session::Session;
use crate::store::Store;
use crate::utils::required_arg;
use anyhow::{anyhow, Context, Result};
use serde_json::json;

pub fn handle<S: Store>(session: &Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(session.transactions(), sub),
        _ => Ok(()),
    }
}

/// Oldest first, which is the order spreadsheets expect.
fn chronological(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by_key(|t| t.date);
    rows
}

pub fn export_transactions(transactions: &[Transaction], sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required_arg(sub, "format")?.to_lowercase();
    let out = required_arg(sub, "out")?;
    let rows = chronological(transactions);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out))?;
            wtr.write_record(["date", "type", "category", "description", "amount", "id"])?;
            for t in rows {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.id.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date, "type": t.kind, "category": t.category,
                        "description": t.description, "amount": t.amount, "id": t.id
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}

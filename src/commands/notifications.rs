// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Notification;
use crate::session::Session;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table, required_arg};
use anyhow::{anyhow, Result};

pub fn handle<S: Store>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let data = session.notifications()?;
            print_feed(&data, sub)?;
        }
        Some(("refresh", sub)) => {
            let now = session.now();
            let data = session.refresh_notifications(now)?;
            print_feed(&data, sub)?;
        }
        Some(("read", sub)) => {
            let id = required_arg(sub, "id")?;
            let before = session.notifications()?.len();
            let after = session.mark_notification_read(id)?.len();
            if before == after {
                return Err(anyhow!("No notification with id '{}'", id));
            }
            println!("Marked {} as read", id);
        }
        Some(("read-all", _)) => {
            session.mark_all_notifications_read()?;
            println!("All notifications marked as read");
        }
        _ => {}
    }
    Ok(())
}

fn print_feed(data: &[Notification], sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No notifications");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|n| {
            vec![
                n.kind.as_str().to_string(),
                n.category.as_str().to_string(),
                n.title.clone(),
                n.message.clone(),
                n.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Level", "Category", "Title", "Message", "ID"], rows)
    );
    Ok(())
}

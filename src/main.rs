// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use budgetmaster::{cli, commands, config, db, store::SqliteStore};

fn main() -> Result<()> {
    // stdout is reserved for tables and --json output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let settings = config::load(&conn)?;
    let explicit_user = matches.get_one::<String>("user").map(String::as_str);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
            return Ok(());
        }
        Some(("config", sub)) => return commands::settings::handle(&conn, sub),
        Some(("plan", sub)) => return commands::planning::handle(sub, &settings.currency_symbol),
        Some(("consultant", sub)) if sub.subcommand_name() != Some("book") => {
            return commands::consultants::browse(sub, &settings.currency_symbol);
        }
        Some(("user", sub)) => {
            let mut store = SqliteStore::new(conn);
            return commands::users::handle(&mut store, &settings, explicit_user, sub);
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        _ => {}
    }

    let mut session = commands::open_session(SqliteStore::new(conn), &settings, explicit_user)?;
    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut session, sub)?,
        Some(("event", sub)) => commands::events::handle(&mut session, sub)?,
        Some(("notify", sub)) => commands::notifications::handle(&mut session, sub)?,
        Some(("consultant", sub)) => commands::consultants::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&mut session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

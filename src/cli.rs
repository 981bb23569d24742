// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::USER_ENV;
use crate::consultants::ConsultationType;
use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true)
}

fn money(name: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("AMOUNT")
}

fn year_arg() -> Arg {
    Arg::new("year")
        .long("year")
        .value_parser(value_parser!(i32))
        .help("Calendar year (defaults to the current year)")
}

fn percent(name: &'static str, default: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(f64))
        .default_value(default)
}

fn profile_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required))
        .arg(Arg::new("email").long("email").required(required))
        .arg(Arg::new("phone").long("phone"))
        .arg(Arg::new("dob").long("dob").help("Date of birth, YYYY-MM-DD"))
        .arg(Arg::new("occupation").long("occupation"))
        .arg(money("income").help("Monthly income from the profile"))
        .arg(Arg::new("address").long("address"))
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Manage user profiles")
        .subcommand_required(true)
        .subcommand(
            profile_args(Command::new("create").about("Create a user"), true)
                .arg(Arg::new("id").long("id").help("Explicit id (default: random)")),
        )
        .subcommand(json_flags(Command::new("show").about("Show the active user")))
        .subcommand(profile_args(
            Command::new("update").about("Update the active user's profile"),
            false,
        ))
        .subcommand(
            Command::new("use")
                .about("Switch the active user")
                .arg(Arg::new("id").required(true).help("User id or email")),
        )
        .subcommand(json_flags(Command::new("list").about("List users")))
}

fn consultant_cmd() -> Command {
    Command::new("consultant")
        .about("Browse financial advisors and book sessions")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("list")
                .about("Search the advisor directory")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Match name, title or specialization"),
                )
                .arg(Arg::new("specialization").long("specialization"))
                .arg(Arg::new("location").long("location"))
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["rating", "experience", "rate"])
                        .default_value("rating"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("show")
                .about("Full profile of one advisor")
                .arg(id_arg().value_parser(value_parser!(u32))),
        ))
        .subcommand(
            Command::new("book")
                .about("Book a session; it is added to the calendar as an expense")
                .arg(id_arg().value_parser(value_parser!(u32)))
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("time").long("time").required(true).help("Slot, HH:MM"))
                .arg(
                    Arg::new("duration")
                        .long("duration")
                        .value_parser(value_parser!(u32))
                        .default_value("60")
                        .help("Minutes: 30, 60, 90 or 120"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(ConsultationType::ALL.to_vec())
                        .default_value("financial_planning"),
                )
                .arg(Arg::new("notes").long("notes")),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a transaction")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(money("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Skip the balance and budget checks"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["all", "income", "expense"])
                        .default_value("all"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["date", "amount"])
                        .default_value("date"),
                )
                .arg(
                    Arg::new("grouped")
                        .long("grouped")
                        .action(ArgAction::SetTrue)
                        .help("Merge same-day transactions of one category"),
                )
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly spending limits per category")
        .subcommand_required(true)
        .subcommand(
            Command::new("set")
                .about("Create a budget")
                .arg(Arg::new("category").long("category").required(true))
                .arg(money("limit").required(true))
                .arg(Arg::new("month").long("month").help("YYYY-MM (default: this month)")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List budgets")
                .arg(Arg::new("month").long("month")),
        ))
        .subcommand(Command::new("rm").about("Delete a budget").arg(id_arg()))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Savings goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Create a goal")
                .arg(Arg::new("title").long("title").required(true))
                .arg(money("target").required(true))
                .arg(money("current"))
                .arg(Arg::new("date").long("date").required(true).help("Target date")),
        )
        .subcommand(json_flags(Command::new("list").about("List goals")))
        .subcommand(
            Command::new("fund")
                .about("Add money to a goal")
                .arg(id_arg())
                .arg(money("amount").required(true)),
        )
        .subcommand(Command::new("rm").about("Delete a goal").arg(id_arg()))
}

fn event_cmd() -> Command {
    Command::new("event")
        .about("Calendar events, bills and reminders")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Schedule an event")
                .arg(Arg::new("title").long("title").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense", "bill", "goal", "reminder"])
                        .default_value("reminder"),
                )
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("time").long("time").help("HH:MM"))
                .arg(money("amount"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_parser(["none", "daily", "weekly", "monthly", "yearly"]),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("Upcoming occurrences")
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD (default: today)"))
                .arg(
                    Arg::new("bills")
                        .long("bills")
                        .action(ArgAction::SetTrue)
                        .help("Only bills still due this month"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("day")
                .about("Events and transactions on one day")
                .arg(Arg::new("date").required(true)),
        ))
        .subcommand(
            Command::new("dismiss")
                .about("Stop reminding about an event")
                .arg(id_arg()),
        )
        .subcommand(Command::new("rm").about("Delete an event").arg(id_arg()))
}

fn notify_cmd() -> Command {
    Command::new("notify")
        .about("Alerts derived from your data")
        .subcommand_required(true)
        .subcommand(json_flags(Command::new("list").about("Show unread alerts")))
        .subcommand(json_flags(
            Command::new("refresh").about("Re-evaluate alert rules"),
        ))
        .subcommand(Command::new("read").about("Acknowledge an alert").arg(id_arg()))
        .subcommand(Command::new("read-all").about("Acknowledge every alert"))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Dashboards and period reports")
        .subcommand_required(true)
        .subcommand(json_flags(Command::new("dashboard").about("Headline figures")))
        .subcommand(json_flags(
            Command::new("monthly")
                .about("Income and expenses per month")
                .arg(year_arg()),
        ))
        .subcommand(json_flags(
            Command::new("quarterly")
                .about("Income and expenses per quarter")
                .arg(year_arg()),
        ))
        .subcommand(json_flags(Command::new("yearly").about("Year over year")))
        .subcommand(json_flags(
            Command::new("categories")
                .about("Expenses by category")
                .arg(year_arg().conflicts_with("month"))
                .arg(Arg::new("month").long("month").help("YYYY-MM")),
        ))
        .subcommand(json_flags(
            Command::new("trend").about("Expenses over the last twelve months"),
        ))
        .subcommand(json_flags(
            Command::new("summary")
                .about("Totals and averages for one year")
                .arg(year_arg()),
        ))
}

fn plan_cmd() -> Command {
    Command::new("plan")
        .about("Financial planning calculators")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("retirement")
                .arg(
                    Arg::new("current-age")
                        .long("current-age")
                        .value_parser(value_parser!(u32))
                        .default_value("30"),
                )
                .arg(
                    Arg::new("retirement-age")
                        .long("retirement-age")
                        .value_parser(value_parser!(u32))
                        .default_value("60"),
                )
                .arg(percent("savings", "0"))
                .arg(percent("monthly", "0"))
                .arg(percent("return", "12"))
                .arg(percent("inflation", "6")),
        ))
        .subcommand(json_flags(
            Command::new("loan")
                .arg(percent("amount", "0"))
                .arg(percent("rate", "0"))
                .arg(
                    Arg::new("years")
                        .long("years")
                        .value_parser(value_parser!(u32))
                        .required(true),
                ),
        ))
        .subcommand(json_flags(
            Command::new("invest")
                .arg(percent("initial", "0"))
                .arg(percent("monthly", "0"))
                .arg(
                    Arg::new("years")
                        .long("years")
                        .value_parser(value_parser!(u32))
                        .required(true),
                )
                .arg(percent("return", "12")),
        ))
        .subcommand(json_flags(
            Command::new("emergency")
                .arg(percent("monthly-expenses", "0"))
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(u32))
                        .default_value("6"),
                )
                .arg(percent("current", "0")),
        ))
}

pub fn build_cli() -> Command {
    Command::new("budgetmaster")
        .about("Personal budgeting: transactions, budgets, goals and alerts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .env(USER_ENV)
                .help("Operate on this user (id or email) instead of the active one"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(user_cmd())
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(goal_cmd())
        .subcommand(event_cmd())
        .subcommand(notify_cmd())
        .subcommand(report_cmd())
        .subcommand(plan_cmd())
        .subcommand(consultant_cmd())
        .subcommand(
            Command::new("export")
                .about("Write data to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check stored data for inconsistencies")
                .arg(
                    Arg::new("fix")
                        .long("fix")
                        .action(ArgAction::SetTrue)
                        .help("Recompute budget consumption from the ledger"),
                ),
        )
}

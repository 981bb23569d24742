// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::planning::{
    emergency_fund, investment, loan, retirement, EmergencyInput, InvestmentInput, LoanInput,
    RetirementInput,
};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};

pub fn handle(m: &clap::ArgMatches, currency: &str) -> Result<()> {
    match m.subcommand() {
        Some(("retirement", sub)) => {
            let p = retirement(&retirement_input(sub)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
                print_pairs(vec![
                    ("Years to retirement", p.years_to_retirement.to_string()),
                    ("Corpus at retirement", money(p.total_corpus, currency)),
                    ("In today's money", money(p.real_value, currency)),
                    ("Monthly contribution", money(p.monthly_contribution, currency)),
                ]);
            }
        }
        Some(("loan", sub)) => {
            let s = loan(&loan_input(sub)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                print_pairs(vec![
                    ("Monthly EMI", money(s.emi, currency)),
                    ("Total payable", money(s.total_amount, currency)),
                    ("Total interest", money(s.total_interest, currency)),
                    ("Payments", s.total_payments.to_string()),
                ]);
            }
        }
        Some(("invest", sub)) => {
            let p = investment(&investment_input(sub)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
                print_pairs(vec![
                    ("Invested", money(p.total_investment, currency)),
                    ("Final value", money(p.total_value, currency)),
                    ("Gains", money(p.total_gains, currency)),
                    ("Return", format!("{:.1}%", p.return_percentage)),
                ]);
            }
        }
        Some(("emergency", sub)) => {
            let e = emergency_fund(&emergency_input(sub)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &e)? {
                print_pairs(vec![
                    ("Target fund", money(e.target_amount, currency)),
                    ("Still needed", money(e.shortfall, currency)),
                    ("Progress", format!("{:.1}%", e.progress_percentage)),
                ]);
            }
        }
        _ => {}
    }
    Ok(())
}

fn money(v: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, v)
}

fn print_pairs(pairs: Vec<(&str, String)>) {
    let rows = pairs
        .into_iter()
        .map(|(k, v)| vec![k.to_string(), v])
        .collect();
    println!("{}", pretty_table(&["", ""], rows));
}

fn num<T: Copy + Send + Sync + 'static>(sub: &clap::ArgMatches, name: &str) -> Result<T> {
    sub.get_one::<T>(name)
        .copied()
        .ok_or_else(|| anyhow!("Missing value for --{}", name))
}

pub fn retirement_input(sub: &clap::ArgMatches) -> Result<RetirementInput> {
    Ok(RetirementInput {
        current_age: num(sub, "current-age")?,
        retirement_age: num(sub, "retirement-age")?,
        current_savings: num(sub, "savings")?,
        monthly_contribution: num(sub, "monthly")?,
        expected_return: num(sub, "return")?,
        inflation_rate: num(sub, "inflation")?,
    })
}

pub fn loan_input(sub: &clap::ArgMatches) -> Result<LoanInput> {
    Ok(LoanInput {
        amount: num(sub, "amount")?,
        interest_rate: num(sub, "rate")?,
        term_years: num(sub, "years")?,
    })
}

pub fn investment_input(sub: &clap::ArgMatches) -> Result<InvestmentInput> {
    Ok(InvestmentInput {
        initial_amount: num(sub, "initial")?,
        monthly_investment: num(sub, "monthly")?,
        years: num(sub, "years")?,
        expected_return: num(sub, "return")?,
    })
}

pub fn emergency_input(sub: &clap::ArgMatches) -> Result<EmergencyInput> {
    Ok(EmergencyInput {
        monthly_expenses: num(sub, "monthly-expenses")?,
        target_months: num(sub, "months")?,
        current_fund: num(sub, "current")?,
    })
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! What-if calculators. These are projections, so they work in `f64` with
//! monthly compounding; annual percentages come in as e.g. `12.0`.

use serde::Serialize;

fn monthly_rate(annual_pct: f64) -> f64 {
    annual_pct / 100.0 / 12.0
}

/// Future value of 1 paid in every month for `months` months.
fn annuity_factor(rate: f64, months: f64) -> f64 {
    if rate == 0.0 {
        months
    } else {
        ((1.0 + rate).powf(months) - 1.0) / rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub expected_return: f64,
    pub inflation_rate: f64,
}

impl Default for RetirementInput {
    fn default() -> Self {
        RetirementInput {
            current_age: 30,
            retirement_age: 60,
            current_savings: 0.0,
            monthly_contribution: 0.0,
            expected_return: 12.0,
            inflation_rate: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetirementProjection {
    pub total_corpus: f64,
    pub real_value: f64,
    pub years_to_retirement: u32,
    pub monthly_contribution: f64,
}

pub fn retirement(input: &RetirementInput) -> RetirementProjection {
    let years = input.retirement_age.saturating_sub(input.current_age);
    let months = f64::from(years) * 12.0;
    let rate = monthly_rate(input.expected_return);

    let grown_savings = input.current_savings * (1.0 + rate).powf(months);
    let grown_contributions = input.monthly_contribution * annuity_factor(rate, months);
    let total_corpus = grown_savings + grown_contributions;
    let real_value = total_corpus / (1.0 + input.inflation_rate / 100.0).powf(f64::from(years));

    RetirementProjection {
        total_corpus,
        real_value,
        years_to_retirement: years,
        monthly_contribution: input.monthly_contribution,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    pub amount: f64,
    pub interest_rate: f64,
    pub term_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LoanSchedule {
    pub emi: f64,
    pub total_amount: f64,
    pub total_interest: f64,
    pub total_payments: u64,
}

/// Equated monthly instalment for a fixed-rate loan.
pub fn loan(input: &LoanInput) -> LoanSchedule {
    let payments = u64::from(input.term_years) * 12;
    if input.amount == 0.0 || payments == 0 {
        return LoanSchedule::default();
    }
    let rate = monthly_rate(input.interest_rate);
    let n = f64::from(input.term_years) * 12.0;
    let emi = if rate == 0.0 {
        input.amount / n
    } else {
        let growth = (1.0 + rate).powf(n);
        input.amount * rate * growth / (growth - 1.0)
    };
    let total_amount = emi * n;
    LoanSchedule {
        emi,
        total_amount,
        total_interest: total_amount - input.amount,
        total_payments: payments,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentInput {
    pub initial_amount: f64,
    pub monthly_investment: f64,
    pub years: u32,
    pub expected_return: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentProjection {
    pub total_investment: f64,
    pub total_value: f64,
    pub total_gains: f64,
    pub return_percentage: f64,
}

pub fn investment(input: &InvestmentInput) -> InvestmentProjection {
    let months = f64::from(input.years) * 12.0;
    let rate = monthly_rate(input.expected_return);

    let total_value = input.initial_amount * (1.0 + rate).powf(months)
        + input.monthly_investment * annuity_factor(rate, months);
    let total_investment = input.initial_amount + input.monthly_investment * months;
    let total_gains = total_value - total_investment;
    let return_percentage = if total_investment > 0.0 {
        total_gains / total_investment * 100.0
    } else {
        0.0
    };

    InvestmentProjection {
        total_investment,
        total_value,
        total_gains,
        return_percentage,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmergencyInput {
    pub monthly_expenses: f64,
    pub target_months: u32,
    pub current_fund: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmergencyPlan {
    pub target_amount: f64,
    pub shortfall: f64,
    pub progress_percentage: f64,
}

pub fn emergency_fund(input: &EmergencyInput) -> EmergencyPlan {
    let target_amount = input.monthly_expenses * f64::from(input.target_months);
    let progress = if target_amount > 0.0 {
        input.current_fund / target_amount * 100.0
    } else {
        0.0
    };
    EmergencyPlan {
        target_amount,
        shortfall: (target_amount - input.current_fund).max(0.0),
        progress_percentage: progress.min(100.0),
    }
}

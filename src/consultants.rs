// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Built-in directory of financial advisors and consultation bookings.
//!
//! The directory is fixed at compile time; a booking is stored as an expense
//! event on the user's calendar.

use crate::models::{EventKind, NewCalendarEvent};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;

pub const TIME_SLOTS: &[&str] = &[
    "09:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00", "17:00",
];
pub const DURATIONS: &[u32] = &[30, 60, 90, 120];
pub const DEFAULT_DURATION: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Busy => "Busy",
            Availability::Offline => "Offline",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultant {
    pub id: u32,
    pub name: &'static str,
    pub title: &'static str,
    pub specializations: &'static [&'static str],
    pub experience_years: u32,
    pub rating: Decimal,
    pub reviews: u32,
    pub location: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hourly_rate: Decimal,
    pub languages: &'static [&'static str],
    pub certifications: &'static [&'static str],
    pub availability: Availability,
    pub description: &'static str,
}

impl Consultant {
    fn matches_text(&self, needle: &str) -> bool {
        contains(self.name, needle)
            || contains(self.title, needle)
            || self.specializations.iter().any(|s| contains(s, needle))
    }

    pub fn can_book(&self) -> bool {
        self.availability != Availability::Offline
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

static DIRECTORY: Lazy<Vec<Consultant>> = Lazy::new(|| {
    vec![
        Consultant {
            id: 1,
            name: "Rajesh Kumar",
            title: "Certified Financial Planner",
            specializations: &["Financial Planning", "Investment Advisory", "Retirement Planning"],
            experience_years: 12,
            rating: Decimal::new(49, 1),
            reviews: 156,
            location: "Mumbai, Maharashtra",
            phone: "+91 98765 43210",
            email: "rajesh.kumar@finplan.com",
            hourly_rate: Decimal::from(2500),
            languages: &["English", "Hindi", "Marathi"],
            certifications: &["CFP", "CFA Level II", "NISM Series V-A"],
            availability: Availability::Available,
            description: "Long-term wealth creation and retirement planning for salaried professionals.",
        },
        Consultant {
            id: 2,
            name: "Priya Sharma",
            title: "Investment Advisor & Tax Consultant",
            specializations: &["Tax Planning", "Mutual Funds", "Portfolio Management"],
            experience_years: 8,
            rating: Decimal::new(48, 1),
            reviews: 89,
            location: "Delhi, NCR",
            phone: "+91 87654 32109",
            email: "priya.sharma@taxadvisor.com",
            hourly_rate: Decimal::from(2000),
            languages: &["English", "Hindi", "Punjabi"],
            certifications: &["CA", "NISM Series V-A", "CFP"],
            availability: Availability::Available,
            description: "Tax-efficient investing and mutual fund portfolios.",
        },
        Consultant {
            id: 3,
            name: "Arjun Patel",
            title: "Retirement & Insurance Specialist",
            specializations: &["Retirement Planning", "Insurance Planning", "Estate Planning"],
            experience_years: 15,
            rating: Decimal::new(49, 1),
            reviews: 203,
            location: "Bangalore, Karnataka",
            phone: "+91 76543 21098",
            email: "arjun.patel@retirewell.com",
            hourly_rate: Decimal::from(3000),
            languages: &["English", "Hindi", "Gujarati", "Kannada"],
            certifications: &["CFP", "ChFC", "LUTCF"],
            availability: Availability::Busy,
            description: "Retirement income, insurance cover and estate planning.",
        },
        Consultant {
            id: 4,
            name: "Sneha Reddy",
            title: "Debt Management & Budget Specialist",
            specializations: &["Debt Management", "Budget Planning", "Financial Counseling"],
            experience_years: 6,
            rating: Decimal::new(47, 1),
            reviews: 67,
            location: "Hyderabad, Telangana",
            phone: "+91 65432 10987",
            email: "sneha.reddy@debtfree.com",
            hourly_rate: Decimal::from(1500),
            languages: &["English", "Hindi", "Telugu"],
            certifications: &["AFC", "NFEC Certified"],
            availability: Availability::Available,
            description: "Debt repayment plans and household budgeting.",
        },
        Consultant {
            id: 5,
            name: "Vikram Singh",
            title: "Investment Banking & Wealth Management",
            specializations: &["Wealth Management", "Investment Banking", "Corporate Finance"],
            experience_years: 18,
            rating: Decimal::new(49, 1),
            reviews: 312,
            location: "Mumbai, Maharashtra",
            phone: "+91 54321 09876",
            email: "vikram.singh@wealthpro.com",
            hourly_rate: Decimal::from(4000),
            languages: &["English", "Hindi"],
            certifications: &["CFA", "FRM", "CAIA"],
            availability: Availability::Available,
            description: "Wealth management for high-net-worth individuals and business owners.",
        },
        Consultant {
            id: 6,
            name: "Meera Joshi",
            title: "Women's Financial Empowerment Advisor",
            specializations: &["Financial Literacy", "Women's Finance", "Goal-based Planning"],
            experience_years: 10,
            rating: Decimal::new(48, 1),
            reviews: 145,
            location: "Pune, Maharashtra",
            phone: "+91 43210 98765",
            email: "meera.joshi@womenfinance.com",
            hourly_rate: Decimal::from(1800),
            languages: &["English", "Hindi", "Marathi"],
            certifications: &["CFP", "AFC", "Women's Financial Planning Specialist"],
            availability: Availability::Available,
            description: "Financial independence and goal-based planning for women.",
        },
    ]
});

pub fn find(id: u32) -> Option<&'static Consultant> {
    DIRECTORY.iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsultantSort {
    /// Highest rated first.
    #[default]
    Rating,
    /// Most experienced first.
    Experience,
    /// Cheapest first.
    Rate,
}

impl ConsultantSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rating" => Some(ConsultantSort::Rating),
            "experience" => Some(ConsultantSort::Experience),
            "rate" | "price" => Some(ConsultantSort::Rate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsultantQuery {
    /// Matched against name, title and specializations.
    pub search: Option<String>,
    pub specialization: Option<String>,
    pub location: Option<String>,
    pub sort: ConsultantSort,
}

/// Filters the directory; every text match is a case-insensitive substring.
/// Ties keep directory order.
pub fn search(query: &ConsultantQuery) -> Vec<&'static Consultant> {
    let blank = |o: &Option<String>| o.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);
    let text = blank(&query.search);
    let specialization = blank(&query.specialization);
    let location = blank(&query.location);

    let mut hits: Vec<&'static Consultant> = DIRECTORY
        .iter()
        .filter(|c| text.as_deref().is_none_or(|t| c.matches_text(t)))
        .filter(|c| {
            specialization
                .as_deref()
                .is_none_or(|s| c.specializations.iter().any(|x| contains(x, s)))
        })
        .filter(|c| location.as_deref().is_none_or(|l| contains(c.location, l)))
        .collect();

    match query.sort {
        ConsultantSort::Rating => hits.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ConsultantSort::Experience => hits.sort_by(|a, b| b.experience_years.cmp(&a.experience_years)),
        ConsultantSort::Rate => hits.sort_by(|a, b| a.hourly_rate.cmp(&b.hourly_rate)),
    }
    hits
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationType {
    #[default]
    FinancialPlanning,
    InvestmentAdvice,
    TaxPlanning,
    RetirementPlanning,
    DebtManagement,
    InsuranceReview,
    BudgetAnalysis,
    GeneralConsultation,
}

impl ConsultationType {
    pub const ALL: &'static [&'static str] = &[
        "financial_planning",
        "investment_advice",
        "tax_planning",
        "retirement_planning",
        "debt_management",
        "insurance_review",
        "budget_analysis",
        "general_consultation",
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "financial_planning" => ConsultationType::FinancialPlanning,
            "investment_advice" => ConsultationType::InvestmentAdvice,
            "tax_planning" => ConsultationType::TaxPlanning,
            "retirement_planning" => ConsultationType::RetirementPlanning,
            "debt_management" => ConsultationType::DebtManagement,
            "insurance_review" => ConsultationType::InsuranceReview,
            "budget_analysis" => ConsultationType::BudgetAnalysis,
            "general_consultation" => ConsultationType::GeneralConsultation,
            _ => return None,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsultationType::FinancialPlanning => "Financial Planning",
            ConsultationType::InvestmentAdvice => "Investment Advice",
            ConsultationType::TaxPlanning => "Tax Planning",
            ConsultationType::RetirementPlanning => "Retirement Planning",
            ConsultationType::DebtManagement => "Debt Management",
            ConsultationType::InsuranceReview => "Insurance Review",
            ConsultationType::BudgetAnalysis => "Budget Analysis",
            ConsultationType::GeneralConsultation => "General Consultation",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub consultant_id: u32,
    pub date: NaiveDate,
    pub time: String,
    pub duration_minutes: u32,
    pub kind: ConsultationType,
    pub notes: String,
}

/// Fee for a session billed pro rata on the hourly rate.
pub fn booking_cost(hourly_rate: Decimal, minutes: u32) -> Decimal {
    hourly_rate * Decimal::from(minutes) / Decimal::from(60)
}

/// The calendar entry recorded for a confirmed booking.
pub fn booking_event(booking: &Booking, consultant: &Consultant) -> NewCalendarEvent {
    let mut description = format!(
        "{} session, {} minutes",
        booking.kind.label(),
        booking.duration_minutes
    );
    if !booking.notes.trim().is_empty() {
        description.push_str(". ");
        description.push_str(booking.notes.trim());
    }
    NewCalendarEvent {
        title: format!("Consultation with {}", consultant.name),
        description,
        amount: Some(booking_cost(consultant.hourly_rate, booking.duration_minutes)),
        kind: EventKind::Expense,
        date: booking.date,
        time: Some(booking.time.clone()),
        recurring: None,
        category: Some("Other Expense".to_string()),
    }
}

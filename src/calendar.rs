// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::PeriodFilter;
use crate::models::{CalendarEvent, EventKind, Recurrence, Transaction, TransactionKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

// long enough for a yearly event that starts on 29 Feb
const OCCURRENCE_SEARCH_DAYS: usize = 4 * 366 + 1;

impl CalendarEvent {
    /// Recurring events repeat from their start date onwards.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        if day < self.date {
            return false;
        }
        match self.recurrence() {
            Recurrence::None => self.date == day,
            Recurrence::Daily => true,
            Recurrence::Weekly => self.date.weekday() == day.weekday(),
            Recurrence::Monthly => self.date.day() == day.day(),
            Recurrence::Yearly => self.date.day() == day.day() && self.date.month() == day.month(),
        }
    }

    /// First day on or after `from` on which the event occurs.
    pub fn next_occurrence(&self, from: NaiveDate) -> Option<NaiveDate> {
        let start = from.max(self.date);
        start
            .iter_days()
            .take(OCCURRENCE_SEARCH_DAYS)
            .find(|d| self.occurs_on(*d))
    }
}

pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.occurs_on(day)).collect()
}

pub fn transactions_on(transactions: &[Transaction], day: NaiveDate) -> Vec<&Transaction> {
    transactions.iter().filter(|t| t.date == day).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

pub fn month_summary(transactions: &[Transaction], year: i32, month: u32) -> MonthSummary {
    let period = PeriodFilter::Month(year, month);
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in transactions.iter().filter(|t| period.contains(t.date)) {
        match t.kind {
            TransactionKind::Income => income += t.amount,
            TransactionKind::Expense => expenses += t.amount,
        }
    }
    MonthSummary {
        income,
        expenses,
        net: income - expenses,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence<'a> {
    pub date: NaiveDate,
    pub event: &'a CalendarEvent,
}

/// Next occurrence of every event from `today` on, soonest first.
pub fn upcoming_events(events: &[CalendarEvent], today: NaiveDate) -> Vec<Occurrence<'_>> {
    let mut out: Vec<Occurrence<'_>> = events
        .iter()
        .filter_map(|event| {
            event
                .next_occurrence(today)
                .map(|date| Occurrence { date, event })
        })
        .collect();
    out.sort_by_key(|o| o.date);
    out
}

/// Bills still due later in the current month.
pub fn upcoming_bills(events: &[CalendarEvent], today: NaiveDate) -> Vec<Occurrence<'_>> {
    let Some(tomorrow) = today.succ_opt() else {
        return Vec::new();
    };
    upcoming_events(events, tomorrow)
        .into_iter()
        .filter(|o| o.event.kind == EventKind::Bill)
        .filter(|o| o.date.year() == today.year() && o.date.month() == today.month())
        .collect()
}

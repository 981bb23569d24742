// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    fn accepts(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Income => kind == TransactionKind::Income,
            KindFilter::Expense => kind == TransactionKind::Expense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Date,
    Amount,
}

/// One or more same-day transactions sharing category and kind. A group of
/// one keeps the transaction's own id and description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionGroup {
    pub id: String,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub count: usize,
    pub original_ids: Vec<String>,
}

impl TransactionGroup {
    fn single(t: &Transaction) -> Self {
        TransactionGroup {
            id: t.id.clone(),
            description: t.description.clone(),
            category: t.category.clone(),
            kind: t.kind,
            date: t.date,
            amount: t.amount,
            count: 1,
            original_ids: vec![t.id.clone()],
        }
    }
}

pub fn group_transactions(transactions: &[Transaction]) -> Vec<TransactionGroup> {
    let mut groups: Vec<TransactionGroup> = Vec::new();
    let mut index: HashMap<(NaiveDate, &str, TransactionKind), usize> = HashMap::new();

    for t in transactions {
        let key = (t.date, t.category.as_str(), t.kind);
        match index.get(&key) {
            Some(&i) => {
                let g = &mut groups[i];
                g.amount += t.amount;
                g.count += 1;
                g.original_ids.push(t.id.clone());
                g.id = format!("group-{}-{}-{}", g.date, g.category, g.kind);
                g.description = format!("{} ({} transactions)", g.category, g.count);
            }
            None => {
                index.insert(key, groups.len());
                groups.push(TransactionGroup::single(t));
            }
        }
    }
    groups
}

/// Rows for the transaction list, newest (or largest) first.
pub fn list_view(
    transactions: &[Transaction],
    filter: KindFilter,
    sort: SortBy,
    grouped: bool,
) -> Vec<TransactionGroup> {
    let mut rows = if grouped {
        group_transactions(transactions)
    } else {
        transactions.iter().map(TransactionGroup::single).collect()
    };
    rows.retain(|r| filter.accepts(r.kind));
    match sort {
        SortBy::Date => rows.sort_by(|a, b| b.date.cmp(&a.date)),
        SortBy::Amount => rows.sort_by(|a, b| b.amount.cmp(&a.amount)),
    }
    rows
}

/// The first `n` transactions in stored (newest-first) order.
pub fn recent(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One user's working set, loaded from a [`Store`].
//!
//! The session is the only writer of the user's collections. Every mutation
//! updates the in-memory lists, applies the budget transforms where a
//! transaction changed, writes the touched collections back and then
//! re-evaluates the notification rules.

use crate::aggregate::compute_dashboard_stats;
use crate::budget_sync::{self, SpendScope};
use crate::config::Settings;
use crate::models::{
    Budget, CalendarEvent, DashboardStats, NewBudget, NewCalendarEvent, NewSavingsGoal,
    NewTransaction, Notification, SavingsGoal, Transaction, User,
};
use crate::notifications::{self, Snapshot};
use crate::store::{load_list, save_list, save_user, Collection, Store, StoreError};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub struct Session<S: Store> {
    store: S,
    user: User,
    scope: SpendScope,
    currency: String,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    goals: Vec<SavingsGoal>,
    events: Vec<CalendarEvent>,
    clock: Option<DateTime<FixedOffset>>,
}

impl<S: Store> Session<S> {
    pub fn open(store: S, user: User, settings: &Settings) -> Result<Self, StoreError> {
        let transactions = load_list(&store, Collection::Transactions, &user.id)?;
        let budgets = load_list(&store, Collection::Budgets, &user.id)?;
        let goals = load_list(&store, Collection::SavingsGoals, &user.id)?;
        let events = load_list(&store, Collection::CalendarEvents, &user.id)?;
        tracing::debug!(
            user = %user.id,
            transactions = transactions.len(),
            budgets = budgets.len(),
            goals = goals.len(),
            events = events.len(),
            "session opened"
        );
        Ok(Session {
            store,
            user,
            scope: settings.budget_scope,
            currency: settings.currency_symbol.clone(),
            transactions,
            budgets,
            goals,
            events,
            clock: None,
        })
    }

    /// Pins the time the session evaluates rules at, instead of the local clock.
    pub fn with_clock<Tz: TimeZone>(mut self, now: DateTime<Tz>) -> Self {
        self.clock = Some(now.fixed_offset());
        self
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.unwrap_or_else(|| Local::now().fixed_offset())
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn scope(&self) -> SpendScope {
        self.scope
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn save_transactions(&mut self) -> Result<(), StoreError> {
        save_list(&mut self.store, Collection::Transactions, &self.user.id, &self.transactions)
    }

    fn save_budgets(&mut self) -> Result<(), StoreError> {
        save_list(&mut self.store, Collection::Budgets, &self.user.id, &self.budgets)
    }

    fn save_goals(&mut self) -> Result<(), StoreError> {
        save_list(&mut self.store, Collection::SavingsGoals, &self.user.id, &self.goals)
    }

    fn save_events(&mut self) -> Result<(), StoreError> {
        save_list(&mut self.store, Collection::CalendarEvents, &self.user.id, &self.events)
    }

    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Transaction, StoreError> {
        let tx = Transaction {
            id: new_id(),
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
            kind: draft.kind,
            date: draft.date,
            user_id: self.user.id.clone(),
        };
        // both lists change in memory before either is written; a failed
        // budget write leaves drift that `doctor --fix` repairs
        self.transactions.insert(0, tx.clone());
        if tx.is_expense() {
            self.budgets = budget_sync::on_transaction_added(&tx, &self.budgets, self.scope);
        }
        self.save_transactions()?;
        if tx.is_expense() {
            self.save_budgets()?;
        }
        tracing::info!(id = %tx.id, kind = %tx.kind, amount = %tx.amount, "transaction added");
        self.reevaluate()?;
        Ok(tx)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Option<Transaction>, StoreError> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let tx = self.transactions.remove(pos);
        if tx.is_expense() {
            self.budgets = budget_sync::on_transaction_removed(&tx, &self.budgets, self.scope);
        }
        self.save_transactions()?;
        if tx.is_expense() {
            self.save_budgets()?;
        }
        tracing::info!(id = %tx.id, "transaction deleted");
        self.reevaluate()?;
        Ok(Some(tx))
    }

    pub fn add_budget(&mut self, draft: NewBudget) -> Result<Budget, StoreError> {
        let spent =
            budget_sync::initial_spent(&draft.category, &draft.month, &self.transactions, self.scope);
        let budget = Budget {
            id: new_id(),
            category: draft.category,
            limit: draft.limit,
            spent,
            month: draft.month,
            user_id: self.user.id.clone(),
        };
        self.budgets.push(budget.clone());
        self.save_budgets()?;
        tracing::info!(id = %budget.id, category = %budget.category, spent = %budget.spent, "budget added");
        self.reevaluate()?;
        Ok(budget)
    }

    pub fn delete_budget(&mut self, id: &str) -> Result<Option<Budget>, StoreError> {
        let Some(pos) = self.budgets.iter().position(|b| b.id == id) else {
            return Ok(None);
        };
        let budget = self.budgets.remove(pos);
        self.save_budgets()?;
        self.reevaluate()?;
        Ok(Some(budget))
    }

    /// Recomputes every budget's `spent` from the ledger; returns how many
    /// budgets had drifted.
    pub fn resync_budgets(&mut self) -> Result<usize, StoreError> {
        let rebuilt = budget_sync::recompute_spent(&self.budgets, &self.transactions, self.scope);
        let drifted = rebuilt
            .iter()
            .zip(&self.budgets)
            .filter(|(new, old)| new.spent != old.spent)
            .count();
        if drifted > 0 {
            tracing::warn!(drifted, "budget consumption was out of sync");
            self.budgets = rebuilt;
            self.save_budgets()?;
            self.reevaluate()?;
        }
        Ok(drifted)
    }

    pub fn add_goal(&mut self, draft: NewSavingsGoal) -> Result<SavingsGoal, StoreError> {
        let goal = SavingsGoal {
            id: new_id(),
            title: draft.title,
            target_amount: draft.target_amount,
            current_amount: draft.current_amount.min(draft.target_amount),
            target_date: draft.target_date,
            user_id: self.user.id.clone(),
        };
        self.goals.push(goal.clone());
        self.save_goals()?;
        self.reevaluate()?;
        Ok(goal)
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<Option<SavingsGoal>, StoreError> {
        let Some(pos) = self.goals.iter().position(|g| g.id == id) else {
            return Ok(None);
        };
        let goal = self.goals.remove(pos);
        self.save_goals()?;
        self.reevaluate()?;
        Ok(Some(goal))
    }

    /// Adds a contribution to a goal, capped at its target.
    pub fn add_money(&mut self, id: &str, amount: Decimal) -> Result<Option<SavingsGoal>, StoreError> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        *goal = goal.add_money(amount);
        let updated = goal.clone();
        self.save_goals()?;
        tracing::info!(id = %updated.id, current = %updated.current_amount, "goal funded");
        self.reevaluate()?;
        Ok(Some(updated))
    }

    pub fn add_event(&mut self, draft: NewCalendarEvent) -> Result<CalendarEvent, StoreError> {
        let event = CalendarEvent {
            id: new_id(),
            title: draft.title,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            date: draft.date,
            time: draft.time,
            recurring: draft.recurring,
            category: draft.category,
            user_id: self.user.id.clone(),
            notification_sent: false,
        };
        self.events.push(event.clone());
        self.save_events()?;
        self.reevaluate()?;
        Ok(event)
    }

    pub fn delete_event(&mut self, id: &str) -> Result<Option<CalendarEvent>, StoreError> {
        let Some(pos) = self.events.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let event = self.events.remove(pos);
        self.save_events()?;
        self.reevaluate()?;
        Ok(Some(event))
    }

    /// Stops the upcoming-event rule from firing for this event.
    pub fn mark_event_notified(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        event.notification_sent = true;
        self.save_events()?;
        self.reevaluate()?;
        Ok(true)
    }

    pub fn update_profile(&mut self, user: User) -> Result<(), StoreError> {
        save_user(&mut self.store, &user)?;
        self.user = user;
        self.reevaluate()?;
        Ok(())
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        compute_dashboard_stats(&self.transactions, Some(&self.user), today).with_goals(&self.goals)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            user: &self.user,
            transactions: &self.transactions,
            budgets: &self.budgets,
            goals: &self.goals,
            events: &self.events,
            currency: &self.currency,
        }
    }

    pub fn refresh_notifications<Tz: TimeZone>(
        &mut self,
        now: DateTime<Tz>,
    ) -> Result<Vec<Notification>, StoreError> {
        let snapshot = Snapshot {
            user: &self.user,
            transactions: &self.transactions,
            budgets: &self.budgets,
            goals: &self.goals,
            events: &self.events,
            currency: &self.currency,
        };
        notifications::refresh(&mut self.store, &snapshot, now)
    }

    fn reevaluate(&mut self) -> Result<(), StoreError> {
        let now = self.now();
        self.refresh_notifications(now).map(|_| ())
    }

    pub fn notifications(&self) -> Result<Vec<Notification>, StoreError> {
        notifications::active(&self.store, &self.user.id)
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<Vec<Notification>, StoreError> {
        notifications::mark_as_read(&mut self.store, &self.user.id, id)
    }

    pub fn mark_all_notifications_read(&mut self) -> Result<(), StoreError> {
        notifications::mark_all_as_read(&mut self.store, &self.user.id)
    }
}

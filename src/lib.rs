// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod budget_sync;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod consultants;
pub mod db;
pub mod ledger;
pub mod models;
pub mod notifications;
pub mod planning;
pub mod session;
pub mod store;
pub mod utils;
pub mod validation;

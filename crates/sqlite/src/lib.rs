// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod connection;
mod database;
mod function;
mod value;
mod vtab;

pub use config::{DbPath, OpenFlags, SqliteConfig};
pub use database::Database;

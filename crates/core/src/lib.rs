// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod context;
pub mod ddl;
pub mod error;
mod function;
pub mod info;
mod listener;
pub mod plan;
mod row;
pub mod table;

pub use context::QueryContext;
pub use error::{AdapterError, FunctionError};
pub use function::{AppFunction, call_function};
pub use info::{ColumnInfo, FunctionInfo, TableInfo};
pub use listener::{CollectingListener, Flow, QueryListener};
pub use row::Row;
pub use table::{ColumnDef, ColumnOptions, Constraint, ConstraintOp, TableDef, VirtualTable};

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The contract a data source implements to be queried as a read-only
//! virtual table.

use std::sync::Arc;

mod constraint;
mod def;

pub use constraint::{Constraint, ConstraintOp};
pub use def::{ColumnDef, ColumnOptions, TableDef};

use crate::{QueryContext, Row};

/// A read-only, schema-defined data source.
///
/// The adapter calls [`prepare`](VirtualTable::prepare) once per filter
/// request, then [`next`](VirtualTable::next) until it reports exhaustion.
/// For an `IN (...)` predicate on an accepted column this happens once per
/// probed value.
pub trait VirtualTable: Send + Sync {
	/// Static schema. Must return the same definition on every call.
	fn definition(&self) -> Arc<TableDef>;

	/// Inspect the pushed down constraints and requested columns and store
	/// whatever iteration state is needed in the context. Must give
	/// equivalent results for equivalent contexts.
	fn prepare(&self, ctx: &mut QueryContext);

	/// Append the next row into `row` and return `true`, or return `false`
	/// once the data set is exhausted.
	fn next(&self, ctx: &mut QueryContext, row: &mut Row) -> bool;
}

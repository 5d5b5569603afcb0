// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Constraint and projection pushdown.
//!
//! Planning is engine agnostic: the binding translates the engine's index
//! request into [`Candidate`]s and a column usage mask, calls [`pushdown`],
//! mints a [`Plan`] in the table's [`PlanBacklog`] and writes the argument
//! slots back to the engine. At filter time the plan id from the engine is
//! looked up again in the backlog.

use std::collections::HashSet;

use tabula_type::Field;
use tracing::trace;

use crate::{AdapterError, ConstraintOp, TableDef};

mod backlog;
mod log;

pub use backlog::{DEFAULT_PLAN_BACKLOG, PlanBacklog};
pub use log::PlanningLog;

pub type PlanId = i32;

const FULL_SCAN_COST: f64 = 1_000_000.0;
const FULL_SCAN_ROWS: i64 = 1_000_000;
const LOOKUP_COST: f64 = 10.0;
const LOOKUP_ROWS: i64 = 10;

/// A constraint accepted during planning. Its value arrives at filter time
/// in the slot matching its position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedConstraint {
	pub field: Field,
	pub op: ConstraintOp,
}

#[derive(Debug)]
pub struct Plan {
	pub id: PlanId,
	pub constraints: Vec<PlannedConstraint>,
	pub requested: HashSet<Field>,
}

/// A predicate offered by the engine. `op` is `None` for operators that
/// cannot be pushed down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
	pub column: i32,
	pub op: Option<ConstraintOp>,
	pub usable: bool,
}

/// Outcome of planning one index request.
#[derive(Debug)]
pub struct Pushdown {
	pub constraints: Vec<PlannedConstraint>,
	/// 1-based argument slot per candidate, `None` when not accepted.
	pub slots: Vec<Option<i32>>,
	pub requested: HashSet<Field>,
	pub estimated_cost: f64,
	pub estimated_rows: i64,
}

/// Decides which candidates the table handles and which columns it has to
/// produce.
///
/// Alias columns are resolved to their target before any test. A column only
/// takes part in pushdown when it is `INDEXED`, `REQUIRED` or `ADDITIONAL`
/// and the operator is one it implements. Fails when a `REQUIRED` column is
/// left without an accepted constraint.
pub fn pushdown(def: &TableDef, candidates: &[Candidate], columns_used: u64) -> Result<Pushdown, AdapterError> {
	let mut constraints = Vec::new();
	let mut slots = Vec::with_capacity(candidates.len());
	let mut constrained = HashSet::new();

	for candidate in candidates {
		let accepted = accept(def, candidate);
		match accepted {
			Some((position, field, op)) => {
				constraints.push(PlannedConstraint { field, op });
				constrained.insert(position);
				slots.push(Some(constraints.len() as i32));
			}
			None => slots.push(None),
		}
	}

	let missing: Vec<String> = def
		.columns
		.iter()
		.enumerate()
		.filter(|(position, column)| {
			!column.is_alias() && column.is_required() && !constrained.contains(position)
		})
		.map(|(_, column)| column.field.name.clone())
		.collect();

	if !missing.is_empty() {
		return Err(AdapterError::MissingRequiredConstraint {
			table: def.name().to_string(),
			missing,
		});
	}

	let (estimated_cost, estimated_rows) = if constraints.is_empty() {
		(FULL_SCAN_COST, FULL_SCAN_ROWS)
	} else {
		(LOOKUP_COST / constraints.len() as f64, LOOKUP_ROWS)
	};

	Ok(Pushdown {
		constraints,
		slots,
		requested: requested_columns(def, columns_used),
		estimated_cost,
		estimated_rows,
	})
}

fn accept(def: &TableDef, candidate: &Candidate) -> Option<(usize, Field, ConstraintOp)> {
	if !candidate.usable {
		return None;
	}
	let op = candidate.op?;
	let index = usize::try_from(candidate.column).ok()?;
	let (position, column) = def.resolve(index)?;

	if !column.is_pushdown_candidate() || !column.accepts(op) {
		trace!(table = def.name(), column = %column.field, op = %op, "constraint left to the engine");
		return None;
	}

	Some((position, column.field.clone(), op))
}

/// Bit `i` of the mask names column `i`; bit 63 stands for every column
/// from 63 on.
pub fn requested_columns(def: &TableDef, columns_used: u64) -> HashSet<Field> {
	let mut requested = HashSet::new();
	for index in 0..def.columns.len() {
		let bit = if index < 63 {
			1u64 << index
		} else {
			1u64 << 63
		};
		if columns_used & bit == 0 {
			continue;
		}
		if let Some((_, column)) = def.resolve(index) {
			requested.insert(column.field.clone());
		}
	}
	requested
}

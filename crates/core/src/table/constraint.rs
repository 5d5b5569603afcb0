// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tabula_type::{Field, Value};

/// Predicate operators a table may accept for pushdown. The discriminants
/// are the engine's constraint codes.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConstraintOp {
	Eq = 2,
	Gt = 4,
	Le = 8,
	Lt = 16,
	Ge = 32,
	Match = 64,
	Like = 65,
	Glob = 66,
	Regex = 67,
}

impl ConstraintOp {
	pub fn code(&self) -> u8 {
		*self as u8
	}

	pub fn from_code(code: u8) -> Option<Self> {
		match code {
			2 => Some(ConstraintOp::Eq),
			4 => Some(ConstraintOp::Gt),
			8 => Some(ConstraintOp::Le),
			16 => Some(ConstraintOp::Lt),
			32 => Some(ConstraintOp::Ge),
			64 => Some(ConstraintOp::Match),
			65 => Some(ConstraintOp::Like),
			66 => Some(ConstraintOp::Glob),
			67 => Some(ConstraintOp::Regex),
			_ => None,
		}
	}
}

impl Display for ConstraintOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ConstraintOp::Eq => f.write_str("EQ"),
			ConstraintOp::Gt => f.write_str("GT"),
			ConstraintOp::Le => f.write_str("LE"),
			ConstraintOp::Lt => f.write_str("LT"),
			ConstraintOp::Ge => f.write_str("GE"),
			ConstraintOp::Match => f.write_str("MATCH"),
			ConstraintOp::Like => f.write_str("LIKE"),
			ConstraintOp::Glob => f.write_str("GLOB"),
			ConstraintOp::Regex => f.write_str("REGEX"),
		}
	}
}

/// A predicate pushed down to a table: `field op value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
	pub field: Field,
	pub op: ConstraintOp,
	pub value: Value,
}

impl Constraint {
	pub fn new(field: Field, op: ConstraintOp, value: Value) -> Self {
		Self { field, op, value }
	}

	pub fn is(&self, field: &Field, op: ConstraintOp) -> bool {
		&self.field == field && self.op == op
	}
}

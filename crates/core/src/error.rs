// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_type::{
	Diagnostic, Error, IntoDiagnostic, Type,
	error::diagnostic::function::{arity_mismatch, execution_failed, invalid_argument_type},
};

/// Failures raised by the virtual table adapter while planning or fetching
/// rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdapterError {
	#[error("missing required constraint on table {table}")]
	MissingRequiredConstraint {
		table: String,
		missing: Vec<String>,
	},

	#[error("unknown plan {plan} for table {table}")]
	UnknownPlan {
		table: String,
		plan: i32,
	},

	#[error("table {table} received {actual} constraint values, plan expects {expected}")]
	SlotCountMismatch {
		table: String,
		expected: usize,
		actual: usize,
	},

	#[error("table {table} failed: {reason}")]
	TableFailed {
		table: String,
		reason: String,
	},

	#[error("invalid definition for table {table}: {reason}")]
	InvalidTableDefinition {
		table: String,
		reason: String,
	},

	#[error("column {column} out of range for table {table}")]
	ColumnOutOfRange {
		table: String,
		column: i32,
		count: usize,
	},

	#[error("table {table} is already registered")]
	TableAlreadyRegistered {
		table: String,
	},

	#[error("table {table} is not registered")]
	UnknownTable {
		table: String,
	},
}

impl IntoDiagnostic for AdapterError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			AdapterError::MissingRequiredConstraint { table, missing } => Diagnostic {
				code: "VTAB_001".to_string(),
				message,
				label: Some(format!("{} requires a constraint on {}", table, missing.join(", "))),
				help: Some(format!(
					"Filter {} by {} using one of its supported operators",
					table,
					missing.join(", ")
				)),
				notes: vec![
					"Required columns cannot be scanned without a constraint".to_string(),
				],
				cause: None,
			},

			AdapterError::UnknownPlan { table, plan } => Diagnostic {
				code: "VTAB_002".to_string(),
				message,
				label: Some(format!("plan {} was evicted or never minted", plan)),
				help: None,
				notes: vec![format!("Planning and row fetch for {} are out of sync", table)],
				cause: None,
			},

			AdapterError::SlotCountMismatch { .. } => Diagnostic {
				code: "VTAB_003".to_string(),
				message,
				label: Some("constraint slot count mismatch".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			AdapterError::TableFailed { .. } => Diagnostic {
				code: "VTAB_004".to_string(),
				message,
				label: Some("table reported an execution error".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			AdapterError::InvalidTableDefinition { .. } => Diagnostic {
				code: "VTAB_005".to_string(),
				message,
				label: Some("invalid table definition".to_string()),
				help: Some(
					"Alias columns must point at a non-alias column of the same table".to_string(),
				),
				notes: vec![],
				cause: None,
			},

			AdapterError::ColumnOutOfRange { count, .. } => Diagnostic {
				code: "VTAB_006".to_string(),
				message,
				label: Some(format!("table declares {} columns", count)),
				help: None,
				notes: vec![],
				cause: None,
			},

			AdapterError::TableAlreadyRegistered { table } => Diagnostic {
				code: "VTAB_007".to_string(),
				message,
				label: None,
				help: Some(format!("Remove {} before registering it again", table)),
				notes: vec![],
				cause: None,
			},

			AdapterError::UnknownTable { .. } => Diagnostic {
				code: "VTAB_008".to_string(),
				message,
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<AdapterError> for Error {
	fn from(err: AdapterError) -> Self {
		Error(err.into_diagnostic())
	}
}

/// Failures raised by the scalar function adapter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunctionError {
	#[error("function {function} expects {expected} arguments, got {actual}")]
	ArityMismatch {
		function: String,
		expected: usize,
		actual: usize,
	},

	#[error("function {function} argument {index} cannot be converted to {expected}")]
	InvalidArgumentType {
		function: String,
		index: usize,
		expected: Type,
		actual: Type,
	},

	#[error("function {function} failed: {reason}")]
	ExecutionFailed {
		function: String,
		reason: String,
	},
}

impl IntoDiagnostic for FunctionError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			FunctionError::ArityMismatch { function, expected, actual } => {
				arity_mismatch(&function, expected, actual)
			}
			FunctionError::InvalidArgumentType { function, index, expected, actual } => {
				invalid_argument_type(&function, index, expected, actual)
			}
			FunctionError::ExecutionFailed { function, reason } => execution_failed(&function, reason),
		}
	}
}

impl From<FunctionError> for Error {
	fn from(err: FunctionError) -> Self {
		Error(err.into_diagnostic())
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;

/// Statement preparation or execution was rejected by the engine
pub fn statement_failed(sql: &str, reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "QUERY_001".to_string(),
		message: format!("Statement failed: {}", reason.into()),
		label: Some(sql.to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

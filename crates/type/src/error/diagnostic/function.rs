// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;
use crate::value::Type;

/// Function called with wrong number of arguments
pub fn arity_mismatch(function: &str, expected: usize, actual: usize) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_002".to_string(),
		message: format!("Function {} expects {} arguments, got {}", function, expected, actual),
		label: Some("wrong number of arguments".to_string()),
		help: Some(format!("Provide exactly {} arguments to function {}", expected, function)),
		notes: vec![],
		cause: None,
	}
}

/// Argument could not be converted to the declared parameter type
pub fn invalid_argument_type(function: &str, index: usize, expected: Type, actual: Type) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_004".to_string(),
		message: format!(
			"Function {} argument {} has invalid type: expected {}, got {}",
			function,
			index + 1,
			expected,
			actual
		),
		label: Some("invalid argument type".to_string()),
		help: Some(format!("Provide an argument of type: {}", expected)),
		notes: vec![],
		cause: None,
	}
}

/// Function body reported a failure
pub fn execution_failed(function: &str, reason: impl Into<String>) -> Diagnostic {
	let reason = reason.into();
	Diagnostic {
		code: "FUNCTION_007".to_string(),
		message: format!("Function {} execution failed: {}", function, reason),
		label: Some("function execution failed".to_string()),
		help: Some(format!("Check function {} arguments and data", function)),
		notes: vec![],
		cause: None,
	}
}

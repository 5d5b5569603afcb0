// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_type::{Result, Type, Value};

use crate::FunctionError;

/// A scalar function callable from SQL.
pub trait AppFunction: Send + Sync {
	fn name(&self) -> &str;

	/// Declared parameter types. The length is the function's arity.
	/// `Type::Any` parameters are passed through unconverted.
	fn expected_args(&self) -> &[Type];

	fn call(&self, args: &[Value]) -> Result<Value>;
}

/// Checks arity, converts every argument to its declared type and invokes
/// the function.
pub fn call_function(function: &dyn AppFunction, args: Vec<Value>) -> Result<Value> {
	let expected = function.expected_args();
	if args.len() != expected.len() {
		return Err(FunctionError::ArityMismatch {
			function: function.name().to_string(),
			expected: expected.len(),
			actual: args.len(),
		}
		.into());
	}

	let mut converted = Vec::with_capacity(args.len());
	for (index, (arg, expected)) in args.into_iter().zip(expected.iter().copied()).enumerate() {
		if expected == Type::Any || arg.is_undefined() || arg.get_type() == expected {
			converted.push(arg);
			continue;
		}

		let value = arg.coerce(expected);
		if value.is_undefined() {
			return Err(FunctionError::InvalidArgumentType {
				function: function.name().to_string(),
				index,
				expected,
				actual: arg.get_type(),
			}
			.into());
		}
		converted.push(value);
	}

	function.call(&converted)
}

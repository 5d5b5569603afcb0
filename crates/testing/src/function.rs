// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_core::AppFunction;
use tabula_type::{
	Result, Type, Value, err,
	error::diagnostic::{function::execution_failed, internal::internal},
};

pub struct PowerFunction;

impl AppFunction for PowerFunction {
	fn name(&self) -> &str {
		"power"
	}

	fn expected_args(&self) -> &[Type] {
		&[Type::Float8, Type::Float8]
	}

	fn call(&self, args: &[Value]) -> Result<Value> {
		let base = args.first().and_then(Value::as_f64);
		let exponent = args.get(1).and_then(Value::as_f64);
		match (base, exponent) {
			(Some(base), Some(exponent)) => Ok(Value::Float8(base.powf(exponent))),
			_ => Ok(Value::Undefined),
		}
	}
}

pub struct SqrtFunction;

impl AppFunction for SqrtFunction {
	fn name(&self) -> &str {
		"sqrt"
	}

	fn expected_args(&self) -> &[Type] {
		&[Type::Float8]
	}

	fn call(&self, args: &[Value]) -> Result<Value> {
		match args.first().and_then(Value::as_f64) {
			Some(v) if v < 0.0 => err!(execution_failed("sqrt", "negative argument")),
			Some(v) => Ok(Value::Float8(v.sqrt())),
			None => Ok(Value::Undefined),
		}
	}
}

pub struct PiFunction;

impl AppFunction for PiFunction {
	fn name(&self) -> &str {
		"pi"
	}

	fn expected_args(&self) -> &[Type] {
		&[]
	}

	fn call(&self, _args: &[Value]) -> Result<Value> {
		Ok(Value::Float8(3.1415))
	}
}

/// Always fails with an execution error.
pub struct FailFunction;

impl AppFunction for FailFunction {
	fn name(&self) -> &str {
		"fail"
	}

	fn expected_args(&self) -> &[Type] {
		&[Type::Any]
	}

	fn call(&self, args: &[Value]) -> Result<Value> {
		match args.first() {
			Some(arg) => err!(execution_failed("fail", format!("refusing {}", arg))),
			None => err!(internal("fail called without arguments")),
		}
	}
}

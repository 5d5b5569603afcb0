// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{panic::AssertUnwindSafe, sync::Arc};

use rusqlite::{Connection, functions::FunctionFlags, types::Value as SqlValue};
use tabula_core::{AppFunction, call_function};
use tabula_type::Value;
use tracing::warn;

use crate::value;

/// Registers `function` under its own name as a variadic scalar function.
/// Arity is checked by [`call_function`] so mismatches surface as
/// diagnostics instead of engine errors.
pub(crate) fn register(conn: &Connection, function: Arc<dyn AppFunction>) -> rusqlite::Result<()> {
	let name = function.name().to_string();
	let function = AssertUnwindSafe(function);

	conn.create_scalar_function(
		name.as_str(),
		-1,
		FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
		move |ctx| invoke(&function, ctx),
	)
}

pub(crate) fn unregister(conn: &Connection, name: &str) -> rusqlite::Result<()> {
	conn.remove_function(name, -1)
}

fn invoke(function: &AssertUnwindSafe<Arc<dyn AppFunction>>, ctx: &rusqlite::functions::Context<'_>) -> rusqlite::Result<SqlValue> {
	let args: Vec<Value> = (0..ctx.len()).map(|idx| value::from_sql(ctx.get_raw(idx))).collect();

	match call_function(function.0.as_ref(), args) {
		Ok(result) => Ok(value::to_sql(&result)),
		Err(err) => {
			warn!(function = function.0.name(), error = %err.summary(), "function call failed");
			Err(rusqlite::Error::UserFunctionError(err.summary().into()))
		}
	}
}

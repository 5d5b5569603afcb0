// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rusqlite::types::{Value as SqlValue, ValueRef};
use tabula_type::Value;

/// Engine representation of a value. Every integer type becomes a 64-bit
/// integer, `Uint8` keeping its bit pattern.
pub(crate) fn to_sql(value: &Value) -> SqlValue {
	match value {
		Value::Undefined => SqlValue::Null,
		Value::Boolean(v) => SqlValue::Integer(*v as i64),
		Value::Float4(v) => SqlValue::Real(*v as f64),
		Value::Float8(v) => SqlValue::Real(*v),
		Value::Int1(v) => SqlValue::Integer(*v as i64),
		Value::Int2(v) => SqlValue::Integer(*v as i64),
		Value::Int4(v) => SqlValue::Integer(*v as i64),
		Value::Int8(v) => SqlValue::Integer(*v),
		Value::Uint1(v) => SqlValue::Integer(*v as i64),
		Value::Uint2(v) => SqlValue::Integer(*v as i64),
		Value::Uint4(v) => SqlValue::Integer(*v as i64),
		Value::Uint8(v) => SqlValue::Integer(*v as i64),
		Value::Utf8(v) => SqlValue::Text(v.clone()),
		Value::Blob(v) => SqlValue::Blob(v.clone()),
	}
}

pub(crate) fn from_sql(value: ValueRef<'_>) -> Value {
	match value {
		ValueRef::Null => Value::Undefined,
		ValueRef::Integer(v) => Value::Int8(v),
		ValueRef::Real(v) => Value::Float8(v),
		ValueRef::Text(v) => Value::Utf8(String::from_utf8_lossy(v).into_owned()),
		ValueRef::Blob(v) => Value::Blob(v.to_vec()),
	}
}

pub(crate) fn from_owned(value: SqlValue) -> Value {
	match value {
		SqlValue::Null => Value::Undefined,
		SqlValue::Integer(v) => Value::Int8(v),
		SqlValue::Real(v) => Value::Float8(v),
		SqlValue::Text(v) => Value::Utf8(v),
		SqlValue::Blob(v) => Value::Blob(v),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_integers_widen() {
		assert_eq!(to_sql(&Value::Uint4(0xaaaa)), SqlValue::Integer(0xaaaa));
		assert_eq!(to_sql(&Value::Int1(-3)), SqlValue::Integer(-3));
		assert_eq!(to_sql(&Value::Boolean(true)), SqlValue::Integer(1));
		assert_eq!(to_sql(&Value::Uint8(u64::MAX)), SqlValue::Integer(-1));
	}

	#[test]
	fn test_other_types() {
		assert_eq!(to_sql(&Value::Undefined), SqlValue::Null);
		assert_eq!(to_sql(&Value::Float4(0.5)), SqlValue::Real(0.5));
		assert_eq!(to_sql(&Value::utf8("x")), SqlValue::Text("x".to_string()));
		assert_eq!(to_sql(&Value::blob(vec![1, 2])), SqlValue::Blob(vec![1, 2]));
	}

	#[test]
	fn test_from_engine() {
		assert_eq!(from_sql(ValueRef::Null), Value::Undefined);
		assert_eq!(from_sql(ValueRef::Integer(7)), Value::Int8(7));
		assert_eq!(from_sql(ValueRef::Real(1.5)), Value::Float8(1.5));
		assert_eq!(from_sql(ValueRef::Text(b"abc")), Value::utf8("abc"));
		assert_eq!(from_sql(ValueRef::Blob(&[9])), Value::blob(vec![9]));
		assert_eq!(from_owned(SqlValue::Text("q".to_string())), Value::utf8("q"));
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Type, Value};

impl Value {
	/// Converts the value to `target`. Conversions that cannot represent the
	/// value (out of range narrowing, unparsable text, blobs that are not
	/// UTF-8) produce `Value::Undefined`.
	pub fn coerce(&self, target: Type) -> Value {
		if target == Type::Any || target == self.get_type() {
			return self.clone();
		}

		match target {
			Type::Any => self.clone(),
			Type::Undefined => Value::Undefined,
			Type::Boolean => self.coerce_bool(),
			Type::Float4 => self.coerce_f64().map(|v| Value::Float4(v as f32)).unwrap_or(Value::Undefined),
			Type::Float8 => self.coerce_f64().map(Value::Float8).unwrap_or(Value::Undefined),
			Type::Int1 => self.narrow(|v| i8::try_from(v).ok().map(Value::Int1)),
			Type::Int2 => self.narrow(|v| i16::try_from(v).ok().map(Value::Int2)),
			Type::Int4 => self.narrow(|v| i32::try_from(v).ok().map(Value::Int4)),
			Type::Int8 => self.narrow(|v| i64::try_from(v).ok().map(Value::Int8)),
			Type::Uint1 => self.narrow(|v| u8::try_from(v).ok().map(Value::Uint1)),
			Type::Uint2 => self.narrow(|v| u16::try_from(v).ok().map(Value::Uint2)),
			Type::Uint4 => self.narrow(|v| u32::try_from(v).ok().map(Value::Uint4)),
			Type::Uint8 => self.narrow(|v| u64::try_from(v).ok().map(Value::Uint8)),
			Type::Utf8 => self.coerce_utf8(),
			Type::Blob => match self {
				Value::Utf8(v) => Value::Blob(v.as_bytes().to_vec()),
				_ => Value::Undefined,
			},
		}
	}

	fn narrow(&self, convert: impl Fn(i128) -> Option<Value>) -> Value {
		self.coerce_i128().and_then(convert).unwrap_or(Value::Undefined)
	}

	fn coerce_i128(&self) -> Option<i128> {
		match self {
			Value::Undefined | Value::Blob(_) => None,
			Value::Boolean(v) => Some(*v as i128),
			Value::Float4(v) => float_to_i128(*v as f64),
			Value::Float8(v) => float_to_i128(*v),
			Value::Int1(v) => Some(*v as i128),
			Value::Int2(v) => Some(*v as i128),
			Value::Int4(v) => Some(*v as i128),
			Value::Int8(v) => Some(*v as i128),
			Value::Uint1(v) => Some(*v as i128),
			Value::Uint2(v) => Some(*v as i128),
			Value::Uint4(v) => Some(*v as i128),
			Value::Uint8(v) => Some(*v as i128),
			Value::Utf8(v) => {
				let text = v.trim();
				text.parse::<i128>().ok().or_else(|| text.parse::<f64>().ok().and_then(float_to_i128))
			}
		}
	}

	fn coerce_f64(&self) -> Option<f64> {
		match self {
			Value::Undefined | Value::Blob(_) => None,
			Value::Utf8(v) => v.trim().parse::<f64>().ok(),
			other => other.as_f64(),
		}
	}

	fn coerce_bool(&self) -> Value {
		match self {
			Value::Undefined | Value::Blob(_) => Value::Undefined,
			Value::Utf8(v) => match v.trim().to_ascii_lowercase().as_str() {
				"true" | "1" => Value::Boolean(true),
				"false" | "0" => Value::Boolean(false),
				_ => Value::Undefined,
			},
			other => other.as_bool().map(Value::Boolean).unwrap_or(Value::Undefined),
		}
	}

	fn coerce_utf8(&self) -> Value {
		match self {
			Value::Undefined => Value::Undefined,
			Value::Blob(v) => String::from_utf8(v.clone()).map(Value::Utf8).unwrap_or(Value::Undefined),
			other => Value::Utf8(other.to_string()),
		}
	}
}

fn float_to_i128(v: f64) -> Option<i128> {
	if v.is_finite() {
		Some(v.trunc() as i128)
	} else {
		None
	}
}

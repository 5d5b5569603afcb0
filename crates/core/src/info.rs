// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Serialisable summaries of registered tables and functions.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tabula_type::{Result, Type, error, error::diagnostic::internal::internal};

use crate::{AppFunction, ConstraintOp, TableDef};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
	pub name: String,
	pub r#type: Type,
	pub options: Vec<String>,
	pub ops: Vec<ConstraintOp>,
	pub description: String,
	pub alias_of: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
	pub name: String,
	pub columns: Vec<ColumnInfo>,
	pub attributes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
	pub name: String,
	pub args: Vec<Type>,
}

impl TableInfo {
	pub fn from_def(def: &TableDef) -> Self {
		let columns = def
			.columns
			.iter()
			.map(|column| ColumnInfo {
				name: column.field.name.clone(),
				r#type: column.field.r#type,
				options: column.options.names().into_iter().filter(|n| *n != "ALIAS").map(String::from).collect(),
				ops: column.ops.iter().copied().collect(),
				description: column.description.clone(),
				alias_of: column.aliased.as_ref().filter(|_| column.is_alias()).map(|f| f.name.clone()),
			})
			.collect();

		Self {
			name: def.name().to_string(),
			columns,
			attributes: def.attributes.clone(),
		}
	}

	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string_pretty(self).map_err(|e| error!(internal(e.to_string())))
	}
}

impl FunctionInfo {
	pub fn from_function(function: &dyn AppFunction) -> Self {
		Self {
			name: function.name().to_string(),
			args: function.expected_args().to_vec(),
		}
	}

	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string_pretty(self).map_err(|e| error!(internal(e.to_string())))
	}
}

impl Display for ColumnInfo {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(target) = &self.alias_of {
			return write!(f, "{} -> {}", self.name, target);
		}

		write!(f, "{} {}", self.name, self.r#type)?;
		for option in &self.options {
			write!(f, " {}", option)?;
		}
		if !self.ops.is_empty() {
			let ops: Vec<String> = self.ops.iter().map(ToString::to_string).collect();
			write!(f, " [{}]", ops.join(","))?;
		}
		Ok(())
	}
}

impl Display for TableInfo {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let columns: Vec<String> = self.columns.iter().map(ToString::to_string).collect();
		write!(f, "{}({})", self.name, columns.join(", "))
	}
}

impl Display for FunctionInfo {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
		write!(f, "{}({})", self.name, args.join(", "))
	}
}

#[cfg(test)]
mod tests {
	use tabula_type::{Registry, Value};

	use super::*;
	use crate::{ColumnDef, ColumnOptions};

	fn users(registry: &Registry) -> TableDef {
		let userid = registry.field(Type::Uint4, "userid");
		TableDef::new(registry.schema("users"), vec![
			ColumnDef::new(userid.clone())
				.options(ColumnOptions::INDEXED)
				.ops([ConstraintOp::Eq, ConstraintOp::Like])
				.description("ID of the user"),
			ColumnDef::new(registry.field(Type::Utf8, "username")),
			ColumnDef::alias(registry.field(Type::Undefined, "uid"), userid),
		])
		.with_attributes(["CACHEABLE"])
	}

	#[test]
	fn test_table_display() {
		let registry = Registry::new();
		let info = TableInfo::from_def(&users(&registry));
		assert_eq!(info.to_string(), "users(userid uint4 INDEXED [EQ,LIKE], username utf8, uid -> userid)");
		assert_eq!(info.attributes, vec!["CACHEABLE".to_string()]);
	}

	#[test]
	fn test_table_json() {
		let registry = Registry::new();
		let json = TableInfo::from_def(&users(&registry)).to_json().unwrap();
		let parsed: TableInfo = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed.columns[0].description, "ID of the user");
		assert_eq!(parsed.columns[2].alias_of.as_deref(), Some("userid"));
	}

	struct Power;

	impl AppFunction for Power {
		fn name(&self) -> &str {
			"power"
		}

		fn expected_args(&self) -> &[Type] {
			&[Type::Float8, Type::Float8]
		}

		fn call(&self, args: &[Value]) -> Result<Value> {
			Ok(Value::Float8(args[0].as_f64().unwrap_or(0.0).powf(args[1].as_f64().unwrap_or(0.0))))
		}
	}

	#[test]
	fn test_function_display() {
		let info = FunctionInfo::from_function(&Power);
		assert_eq!(info.to_string(), "power(float8, float8)");
		assert!(info.to_json().unwrap().contains("\"Float8\""));
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::{BTreeSet, HashSet},
	ops::{BitOr, BitOrAssign},
};

use serde::{Deserialize, Serialize};
use tabula_type::{Field, SchemaId};

use super::ConstraintOp;
use crate::AdapterError;

/// Column option bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnOptions(u32);

impl ColumnOptions {
	pub const NONE: ColumnOptions = ColumnOptions(0);
	/// Lookups by this column are cheap; it becomes a primary key member.
	pub const INDEXED: ColumnOptions = ColumnOptions(1 << 1);
	/// Queries must constrain this column.
	pub const REQUIRED: ColumnOptions = ColumnOptions(1 << 2);
	/// Accepts pushdown and joins the primary key, without being an index.
	pub const ADDITIONAL: ColumnOptions = ColumnOptions(1 << 3);
	/// Addressable by name, excluded from `SELECT *`.
	pub const HIDDEN: ColumnOptions = ColumnOptions(1 << 4);
	/// Pure synonym of another column.
	pub const ALIAS: ColumnOptions = ColumnOptions(1 << 8);

	pub const fn bits(&self) -> u32 {
		self.0
	}

	pub const fn from_bits(bits: u32) -> Self {
		ColumnOptions(bits)
	}

	pub const fn contains(&self, other: ColumnOptions) -> bool {
		self.0 & other.0 == other.0
	}

	pub const fn intersects(&self, other: ColumnOptions) -> bool {
		self.0 & other.0 != 0
	}

	pub const fn is_empty(&self) -> bool {
		self.0 == 0
	}

	pub fn names(&self) -> Vec<&'static str> {
		[
			(ColumnOptions::INDEXED, "INDEXED"),
			(ColumnOptions::REQUIRED, "REQUIRED"),
			(ColumnOptions::ADDITIONAL, "ADDITIONAL"),
			(ColumnOptions::HIDDEN, "HIDDEN"),
			(ColumnOptions::ALIAS, "ALIAS"),
		]
		.into_iter()
		.filter(|(option, _)| self.contains(*option))
		.map(|(_, name)| name)
		.collect()
	}
}

impl BitOr for ColumnOptions {
	type Output = ColumnOptions;

	fn bitor(self, rhs: Self) -> Self::Output {
		ColumnOptions(self.0 | rhs.0)
	}
}

impl BitOrAssign for ColumnOptions {
	fn bitor_assign(&mut self, rhs: Self) {
		self.0 |= rhs.0;
	}
}

#[derive(Clone, Debug)]
pub struct ColumnDef {
	pub field: Field,
	pub options: ColumnOptions,
	pub description: String,
	/// Target of an alias column. Set exactly when `options` has `ALIAS`.
	pub aliased: Option<Field>,
	/// Operators the table implements for this column. Empty means only
	/// equality.
	pub ops: BTreeSet<ConstraintOp>,
}

impl ColumnDef {
	pub fn new(field: Field) -> Self {
		Self {
			field,
			options: ColumnOptions::NONE,
			description: String::new(),
			aliased: None,
			ops: BTreeSet::new(),
		}
	}

	pub fn alias(field: Field, target: Field) -> Self {
		Self {
			field,
			options: ColumnOptions::ALIAS,
			description: String::new(),
			aliased: Some(target),
			ops: BTreeSet::new(),
		}
	}

	pub fn options(mut self, options: ColumnOptions) -> Self {
		self.options |= options;
		self
	}

	pub fn ops(mut self, ops: impl IntoIterator<Item = ConstraintOp>) -> Self {
		self.ops.extend(ops);
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn is_alias(&self) -> bool {
		self.options.contains(ColumnOptions::ALIAS)
	}

	pub fn is_required(&self) -> bool {
		self.options.contains(ColumnOptions::REQUIRED)
	}

	/// Whether constraints on this column may be pushed down at all.
	pub fn is_pushdown_candidate(&self) -> bool {
		self.options.intersects(ColumnOptions::INDEXED | ColumnOptions::REQUIRED | ColumnOptions::ADDITIONAL)
	}

	pub fn accepts(&self, op: ConstraintOp) -> bool {
		if self.ops.is_empty() {
			op == ConstraintOp::Eq
		} else {
			self.ops.contains(&op)
		}
	}
}

/// Immutable schema of a virtual table.
#[derive(Clone, Debug)]
pub struct TableDef {
	pub schema: SchemaId,
	pub columns: Vec<ColumnDef>,
	pub attributes: Vec<String>,
}

impl TableDef {
	pub fn new(schema: SchemaId, columns: Vec<ColumnDef>) -> Self {
		Self { schema, columns, attributes: vec![] }
	}

	pub fn with_attributes<S: Into<String>>(mut self, attributes: impl IntoIterator<Item = S>) -> Self {
		self.attributes.extend(attributes.into_iter().map(Into::into));
		self
	}

	pub fn name(&self) -> &str {
		&self.schema.name
	}

	pub fn column(&self, index: usize) -> Option<&ColumnDef> {
		self.columns.get(index)
	}

	pub fn position(&self, field: &Field) -> Option<usize> {
		self.columns.iter().position(|c| &c.field == field)
	}

	/// Follows alias indirection for the column at `index`, returning the
	/// position and definition of the data bearing column.
	pub fn resolve(&self, index: usize) -> Option<(usize, &ColumnDef)> {
		let column = self.columns.get(index)?;
		match &column.aliased {
			Some(target) if column.is_alias() => {
				let position = self.position(target)?;
				Some((position, &self.columns[position]))
			}
			_ => Some((index, column)),
		}
	}

	pub fn required_columns(&self) -> impl Iterator<Item = &ColumnDef> {
		self.columns.iter().filter(|c| !c.is_alias() && c.is_required())
	}

	pub fn validate(&self) -> Result<(), AdapterError> {
		let invalid = |reason: String| AdapterError::InvalidTableDefinition {
			table: self.name().to_string(),
			reason,
		};

		if self.columns.is_empty() {
			return Err(invalid("no columns".to_string()));
		}

		let mut seen = HashSet::new();
		for column in &self.columns {
			if !seen.insert(column.field.clone()) {
				return Err(invalid(format!("column {} declared twice", column.field.name)));
			}

			match (column.is_alias(), &column.aliased) {
				(true, None) => {
					return Err(invalid(format!("alias column {} has no target", column.field.name)));
				}
				(false, Some(_)) => {
					return Err(invalid(format!(
						"column {} has an alias target but is not an alias",
						column.field.name
					)));
				}
				(true, Some(target)) => {
					let Some(position) = self.position(target) else {
						return Err(invalid(format!(
							"alias column {} points at unknown column {}",
							column.field.name, target.name
						)));
					};
					if self.columns[position].is_alias() {
						return Err(invalid(format!(
							"alias column {} points at alias column {}",
							column.field.name, target.name
						)));
					}
				}
				(false, None) => {}
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tabula_type::{Registry, Type};

	use super::*;

	fn def(registry: &Registry, columns: Vec<ColumnDef>) -> TableDef {
		TableDef::new(registry.schema("def_test"), columns)
	}

	#[test]
	fn test_options() {
		let options = ColumnOptions::INDEXED | ColumnOptions::REQUIRED;
		assert_eq!(options.bits(), 6);
		assert!(options.contains(ColumnOptions::INDEXED));
		assert!(!options.contains(ColumnOptions::HIDDEN));
		assert_eq!(options.names(), vec!["INDEXED", "REQUIRED"]);
		assert_eq!(ColumnOptions::ALIAS.bits(), 256);
	}

	#[test]
	fn test_accepts_defaults_to_eq() {
		let registry = Registry::new();
		let column = ColumnDef::new(registry.field(Type::Utf8, "name"));
		assert!(column.accepts(ConstraintOp::Eq));
		assert!(!column.accepts(ConstraintOp::Like));

		let column = column.ops([ConstraintOp::Like]);
		assert!(column.accepts(ConstraintOp::Like));
		assert!(!column.accepts(ConstraintOp::Eq));
	}

	#[test]
	fn test_resolve_alias() {
		let registry = Registry::new();
		let id = registry.field(Type::Uint4, "id");
		let alias = registry.field(Type::Undefined, "ident");
		let table = def(&registry, vec![
			ColumnDef::new(id.clone()).options(ColumnOptions::INDEXED),
			ColumnDef::new(registry.field(Type::Utf8, "name")),
			ColumnDef::alias(alias, id.clone()),
		]);

		let (position, column) = table.resolve(2).unwrap();
		assert_eq!(position, 0);
		assert_eq!(column.field, id);
		assert_eq!(table.resolve(1).unwrap().0, 1);
		assert!(table.resolve(3).is_none());
		assert!(table.validate().is_ok());
	}

	#[test]
	fn test_validate_rejects_dangling_alias() {
		let registry = Registry::new();
		let table = def(&registry, vec![
			ColumnDef::new(registry.field(Type::Utf8, "name")),
			ColumnDef::alias(registry.field(Type::Undefined, "nick"), registry.field(Type::Utf8, "missing")),
		]);

		let err = table.validate().unwrap_err();
		assert!(matches!(err, AdapterError::InvalidTableDefinition { .. }));
	}

	#[test]
	fn test_validate_rejects_alias_chain() {
		let registry = Registry::new();
		let name = registry.field(Type::Utf8, "name");
		let first = registry.field(Type::Undefined, "first");
		let table = def(&registry, vec![
			ColumnDef::new(name.clone()),
			ColumnDef::alias(first.clone(), name),
			ColumnDef::alias(registry.field(Type::Undefined, "second"), first),
		]);

		assert!(table.validate().is_err());
	}

	#[test]
	fn test_validate_rejects_alias_flag_without_target() {
		let registry = Registry::new();
		let table = def(&registry, vec![
			ColumnDef::new(registry.field(Type::Utf8, "name")).options(ColumnOptions::ALIAS),
		]);

		assert!(table.validate().is_err());
	}

	#[test]
	fn test_required_columns_skip_aliases() {
		let registry = Registry::new();
		let path = registry.field(Type::Utf8, "path");
		let table = def(&registry, vec![
			ColumnDef::new(path.clone()).options(ColumnOptions::REQUIRED),
			ColumnDef::alias(registry.field(Type::Undefined, "p"), path),
		]);

		assert_eq!(table.required_columns().count(), 1);
	}
}

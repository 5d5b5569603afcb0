// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Projection of a [`TableDef`] into the engine's `CREATE TABLE` text.

use tabula_type::Type;

use crate::{ColumnOptions, TableDef};

/// Native column type keyword for a logical type.
pub fn column_type_name(r#type: Type) -> &'static str {
	match r#type {
		Type::Float4 | Type::Float8 => "FLOAT",
		Type::Boolean | Type::Int1 | Type::Int2 | Type::Int4 | Type::Uint1 | Type::Uint2 | Type::Uint4 => {
			"INTEGER"
		}
		Type::Int8 => "BIGINT",
		Type::Uint8 => "UNSIGNED BIGINT",
		Type::Blob => "BLOB",
		Type::Utf8 | Type::Any | Type::Undefined => "TEXT",
	}
}

/// Builds the schema declaration for `def`.
///
/// Every column is declared in definition order so that engine column
/// indexes match `def.columns`. Alias columns take the type of their target
/// and are declared `HIDDEN`. `INDEXED` and `ADDITIONAL` columns form the
/// primary key, together with `WITHOUT ROWID`, but only when at least one
/// column is `INDEXED`.
pub fn create_statement(def: &TableDef) -> String {
	let mut indexed = false;
	let mut keys = Vec::new();
	let mut columns = Vec::with_capacity(def.columns.len());

	for (index, column) in def.columns.iter().enumerate() {
		let r#type = match def.resolve(index) {
			Some((_, target)) if column.is_alias() => target.field.r#type,
			_ => column.field.r#type,
		};

		let mut declaration = format!("`{}` {}", column.field.name, column_type_name(r#type));
		if column.is_alias() || column.options.contains(ColumnOptions::HIDDEN) {
			declaration.push_str(" HIDDEN");
		}
		columns.push(declaration);

		if column.is_alias() {
			continue;
		}
		if column.options.intersects(ColumnOptions::INDEXED | ColumnOptions::ADDITIONAL) {
			indexed |= column.options.contains(ColumnOptions::INDEXED);
			keys.push(format!("`{}`", column.field.name));
		}
	}

	let mut statement = format!("CREATE TABLE {}({}", def.name(), columns.join(", "));
	if indexed {
		statement.push_str(&format!(", PRIMARY KEY ({})", keys.join(", ")));
	}
	statement.push(')');
	if indexed {
		statement.push_str(" WITHOUT ROWID");
	}
	statement
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::{ColumnDef, ColumnOptions, ConstraintOp, QueryContext, Row, TableDef, VirtualTable};
use tabula_type::{Field, SchemaId, Type};

use super::{Counters, like_prefix, next_in_scan, start_scan};

const PATHS: [&str; 11] = [
	"/dev/fd0",
	"/dev/pci0",
	"/dev/usb0",
	"/dev/en0",
	"/dev/en1",
	"/dev/pci1",
	"/dev/ttys001",
	"/home/bob",
	"/home/elaine",
	"/root",
	"/home/staff",
];

/// Length of a path. `path` is required: an equality yields the given path
/// itself, a LIKE pattern lists the known paths sharing its prefix.
pub struct PathLenTable {
	def: Arc<TableDef>,
	pub path: Field,
	pub pathlen: Field,
	pub counters: Counters,
}

impl PathLenTable {
	pub fn new() -> Self {
		let schema = SchemaId::alloc("tpath_len");
		let path = Field::alloc_in(&schema, Type::Utf8, "path");
		let pathlen = Field::alloc_in(&schema, Type::Uint4, "pathlen");

		let def = TableDef::new(
			schema,
			vec![
				ColumnDef::new(path.clone())
					.options(ColumnOptions::REQUIRED)
					.ops([ConstraintOp::Eq, ConstraintOp::Like]),
				ColumnDef::new(pathlen.clone()),
			],
		);

		Self {
			def: Arc::new(def),
			path,
			pathlen,
			counters: Counters::default(),
		}
	}
}

impl Default for PathLenTable {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualTable for PathLenTable {
	fn definition(&self) -> Arc<TableDef> {
		self.def.clone()
	}

	fn prepare(&self, ctx: &mut QueryContext) {
		self.counters.prepared();

		let mut paths: Vec<String> = Vec::new();
		for constraint in ctx.constraints().iter().filter(|c| c.field == self.path) {
			let Some(value) = constraint.value.as_str() else {
				continue;
			};
			match constraint.op {
				ConstraintOp::Eq => paths.push(value.to_string()),
				ConstraintOp::Like => {
					let prefix = like_prefix(value);
					paths.extend(PATHS.iter().filter(|p| p.starts_with(prefix)).map(|p| p.to_string()));
				}
				_ => {}
			}
		}
		start_scan(ctx, paths);
	}

	fn next(&self, ctx: &mut QueryContext, row: &mut Row) -> bool {
		self.counters.advanced();

		let Some(path) = next_in_scan::<String>(ctx) else {
			return false;
		};
		row.set(&self.pathlen, path.len() as u32);
		row.set(&self.path, path);
		true
	}
}

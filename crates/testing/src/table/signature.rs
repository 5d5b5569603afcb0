// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::{ColumnDef, ColumnOptions, ConstraintOp, QueryContext, Row, TableDef, VirtualTable};
use tabula_type::{Field, SchemaId, Type};

use super::{Counters, like_prefix, next_in_scan, start_scan};

const SIGNATURES: [(&str, i32, &str, &str); 7] = [
	("/usr/bin/base64", 1, "e264d46afea7e77cbd81eca5ad245a3bcae99fe0", "com.apple.base64"),
	("/usr/bin/bashbug", 0, "", ""),
	("/usr/bin/binhex", 1, "c5c058f85e064bc4a9a6ef443a3a368ad6dc54ed", "com.apple.binhex"),
	("/usr/local/bin/hyperkit", 1, "51f09d57d4b0be63f7699cf420023adfa30baa3c", "com.docker"),
	("/usr/local/bin/exiftool", 0, "", ""),
	("/usr/local/bin/kubectl", 1, "60b123cff9c66b6c5fd65ef48ea5a2431d4bae0d", "kubectl"),
	("/sbin/launchd", 1, "3278354cbd9820dab665b077dab69b10cd38e64c", "com.apple.xpc.launchd"),
];

/// Code signature per binary path. Computing a signature needs the path, so
/// `path` is required.
pub struct SignatureTable {
	def: Arc<TableDef>,
	pub path: Field,
	pub signed: Field,
	pub cdhash: Field,
	pub identifier: Field,
	pub counters: Counters,
}

impl SignatureTable {
	pub fn new() -> Self {
		let schema = SchemaId::alloc("tsig");
		let path = Field::alloc_in(&schema, Type::Utf8, "path");
		let signed = Field::alloc_in(&schema, Type::Int4, "signed");
		let cdhash = Field::alloc_in(&schema, Type::Utf8, "cdhash");
		let identifier = Field::alloc_in(&schema, Type::Utf8, "identifier");

		let def = TableDef::new(
			schema,
			vec![
				ColumnDef::new(path.clone())
					.options(ColumnOptions::REQUIRED)
					.ops([ConstraintOp::Eq, ConstraintOp::Like]),
				ColumnDef::new(signed.clone()),
				ColumnDef::new(cdhash.clone()),
				ColumnDef::new(identifier.clone()),
			],
		);

		Self {
			def: Arc::new(def),
			path,
			signed,
			cdhash,
			identifier,
			counters: Counters::default(),
		}
	}

	fn matches(&self, ctx: &QueryContext, path: &str) -> bool {
		ctx.constraints().iter().filter(|c| c.field == self.path).all(|c| match (c.op, c.value.as_str()) {
			(ConstraintOp::Eq, Some(value)) => path == value,
			(ConstraintOp::Like, Some(pattern)) => path.starts_with(like_prefix(pattern)),
			_ => false,
		})
	}
}

impl Default for SignatureTable {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualTable for SignatureTable {
	fn definition(&self) -> Arc<TableDef> {
		self.def.clone()
	}

	fn prepare(&self, ctx: &mut QueryContext) {
		self.counters.prepared();

		let rows: Vec<usize> = (0..SIGNATURES.len()).filter(|&idx| self.matches(&*ctx, SIGNATURES[idx].0)).collect();
		start_scan(ctx, rows);
	}

	fn next(&self, ctx: &mut QueryContext, row: &mut Row) -> bool {
		self.counters.advanced();

		let Some(idx) = next_in_scan::<usize>(ctx) else {
			return false;
		};
		let (path, signed, cdhash, identifier) = SIGNATURES[idx];
		row.set(&self.path, path);
		row.set(&self.signed, signed);
		row.set(&self.cdhash, cdhash);
		row.set(&self.identifier, identifier);
		true
	}
}

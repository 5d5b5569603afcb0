// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::{ColumnDef, ColumnOptions, ConstraintOp, QueryContext, Row, TableDef, VirtualTable};
use tabula_type::{Field, SchemaId, Type};

use super::{Counters, next_in_scan, start_scan};

const ROWS: [(&str, u32, f64, i64, bool); 4] = [
	("alpha", 0xaaaa, 0.123, 555444333222111, true),
	("beta", 0xbbbb, 1.1, 111222333444555, true),
	("charlie", 0xcccc, 2.2, -555444333222111, false),
	("delta", 0xdddd, 3.33, -111222333444555, true),
];

/// Four rows covering every native column type, filterable by `u32val`.
/// `name` advertises an index but is never filtered, so the engine has to
/// check it. `longo` is only produced when requested.
pub struct T1Table {
	def: Arc<TableDef>,
	pub u32val: Field,
	pub name: Field,
	pub dval: Field,
	pub longo: Field,
	pub is_active: Field,
	pub dword: Field,
	pub counters: Counters,
}

impl T1Table {
	pub fn new() -> Self {
		let schema = SchemaId::alloc("t1");
		let u32val = Field::alloc_in(&schema, Type::Uint4, "u32val");
		let name = Field::alloc_in(&schema, Type::Utf8, "name");
		let dval = Field::alloc_in(&schema, Type::Float8, "dval");
		let longo = Field::alloc_in(&schema, Type::Int8, "longo");
		let is_active = Field::alloc_in(&schema, Type::Boolean, "is_active");
		let dword = Field::alloc_in(&schema, Type::Undefined, "dword");

		let def = TableDef::new(
			schema,
			vec![
				ColumnDef::new(u32val.clone()).options(ColumnOptions::INDEXED).ops([ConstraintOp::Eq]),
				ColumnDef::new(name.clone()).options(ColumnOptions::INDEXED).ops([ConstraintOp::Eq]),
				ColumnDef::new(dval.clone()),
				ColumnDef::new(longo.clone()),
				ColumnDef::new(is_active.clone()),
				ColumnDef::alias(dword.clone(), u32val.clone()),
			],
		);

		Self {
			def: Arc::new(def),
			u32val,
			name,
			dval,
			longo,
			is_active,
			dword,
			counters: Counters::default(),
		}
	}
}

impl Default for T1Table {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualTable for T1Table {
	fn definition(&self) -> Arc<TableDef> {
		self.def.clone()
	}

	fn prepare(&self, ctx: &mut QueryContext) {
		self.counters.prepared();

		let wanted: Vec<Option<i64>> = ctx
			.constraints()
			.iter()
			.filter(|c| c.is(&self.u32val, ConstraintOp::Eq))
			.map(|c| c.value.as_i64())
			.collect();

		let rows: Vec<usize> = (0..ROWS.len())
			.filter(|&idx| wanted.iter().all(|&v| v == Some(ROWS[idx].1 as i64)))
			.collect();
		start_scan(ctx, rows);
	}

	fn next(&self, ctx: &mut QueryContext, row: &mut Row) -> bool {
		self.counters.advanced();

		let Some(idx) = next_in_scan::<usize>(ctx) else {
			return false;
		};
		let (name, u32val, dval, longo, is_active) = ROWS[idx];

		row.set(&self.u32val, u32val);
		row.set(&self.name, name);
		row.set(&self.dval, dval);
		if ctx.is_requested(&self.longo) {
			row.set(&self.longo, longo);
		}
		row.set(&self.is_active, is_active);
		true
	}
}

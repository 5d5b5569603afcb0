// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::{ColumnDef, QueryContext, Row, TableDef, VirtualTable};
use tabula_type::{Field, SchemaId, Type};

use super::Counters;

/// Produces one row, then reports a failure through the query context.
pub struct FailingTable {
	def: Arc<TableDef>,
	pub id: Field,
	pub counters: Counters,
}

impl FailingTable {
	pub fn new() -> Self {
		let schema = SchemaId::alloc("broken");
		let id = Field::alloc_in(&schema, Type::Int4, "id");
		let def = TableDef::new(schema, vec![ColumnDef::new(id.clone())]);

		Self {
			def: Arc::new(def),
			id,
			counters: Counters::default(),
		}
	}
}

impl Default for FailingTable {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualTable for FailingTable {
	fn definition(&self) -> Arc<TableDef> {
		self.def.clone()
	}

	fn prepare(&self, ctx: &mut QueryContext) {
		self.counters.prepared();
		ctx.set_state(0u32);
	}

	fn next(&self, ctx: &mut QueryContext, row: &mut Row) -> bool {
		self.counters.advanced();

		let Some(produced) = ctx.state_mut::<u32>() else {
			return false;
		};
		if *produced > 0 {
			ctx.fail("backing store went away");
			return false;
		}
		*produced += 1;
		row.set(&self.id, 1i32);
		true
	}
}

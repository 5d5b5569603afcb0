// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::{ColumnDef, ColumnOptions, ConstraintOp, QueryContext, Row, TableDef, VirtualTable};
use tabula_type::{Field, SchemaId, Type};

use super::{Counters, next_in_scan, start_scan};

const USERS: [(u32, &str, &str); 4] = [
	(0, "root", "/root"),
	(501, "bob", "/home/bob"),
	(502, "elaine", "/home/elaine"),
	(503, "staff", "/home/staff"),
];

pub struct UsersTable {
	def: Arc<TableDef>,
	pub userid: Field,
	pub username: Field,
	pub home: Field,
	pub uid: Field,
	pub counters: Counters,
}

impl UsersTable {
	pub fn new() -> Self {
		let schema = SchemaId::alloc("users");
		let userid = Field::alloc_in(&schema, Type::Uint4, "userid");
		let username = Field::alloc_in(&schema, Type::Utf8, "username");
		let home = Field::alloc_in(&schema, Type::Utf8, "home");
		let uid = Field::alloc_in(&schema, Type::Undefined, "uid");

		let def = TableDef::new(
			schema,
			vec![
				ColumnDef::new(userid.clone())
					.options(ColumnOptions::INDEXED)
					.ops([ConstraintOp::Eq, ConstraintOp::Like])
					.description("ID of the user"),
				ColumnDef::new(username.clone()),
				ColumnDef::new(home.clone()).description("Home directory"),
				ColumnDef::alias(uid.clone(), userid.clone()),
			],
		)
		.with_attributes(["fake"]);

		Self {
			def: Arc::new(def),
			userid,
			username,
			home,
			uid,
			counters: Counters::default(),
		}
	}
}

impl Default for UsersTable {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualTable for UsersTable {
	fn definition(&self) -> Arc<TableDef> {
		self.def.clone()
	}

	fn prepare(&self, ctx: &mut QueryContext) {
		self.counters.prepared();

		let ids: Vec<Option<i64>> = ctx
			.constraints()
			.iter()
			.filter(|c| c.is(&self.userid, ConstraintOp::Eq))
			.map(|c| c.value.as_i64())
			.collect();

		let rows: Vec<usize> =
			(0..USERS.len()).filter(|&idx| ids.iter().all(|&id| id == Some(USERS[idx].0 as i64))).collect();
		start_scan(ctx, rows);
	}

	fn next(&self, ctx: &mut QueryContext, row: &mut Row) -> bool {
		self.counters.advanced();

		let Some(idx) = next_in_scan::<usize>(ctx) else {
			return false;
		};
		let (userid, username, home) = USERS[idx];
		row.set(&self.userid, userid);
		row.set(&self.username, username);
		if ctx.is_requested(&self.home) {
			row.set(&self.home, home);
		}
		true
	}
}

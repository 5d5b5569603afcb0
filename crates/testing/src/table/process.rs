// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::{ColumnDef, ColumnOptions, ConstraintOp, QueryContext, Row, TableDef, VirtualTable};
use tabula_type::{Field, SchemaId, Type};

use super::{Counters, next_in_scan, start_scan};

const PROCESSES: [(i32, &str); 5] = [
	(1, "/sbin/launchd"),
	(42, "/usr/sbin/syslogd"),
	(40000, "/bin/bash"),
	(41111, "/usr/bin/base64"),
	(44444, "/usr/local/bin/exiftool"),
];

/// Process list. Only `pid` is indexed, so joins on `path` always scan.
pub struct ProcessTable {
	def: Arc<TableDef>,
	pub pid: Field,
	pub path: Field,
	pub counters: Counters,
}

impl ProcessTable {
	pub fn new() -> Self {
		let schema = SchemaId::alloc("tprocess");
		let pid = Field::alloc_in(&schema, Type::Int4, "pid");
		let path = Field::alloc_in(&schema, Type::Utf8, "path");

		let def = TableDef::new(
			schema,
			vec![ColumnDef::new(pid.clone()).options(ColumnOptions::INDEXED), ColumnDef::new(path.clone())],
		);

		Self {
			def: Arc::new(def),
			pid,
			path,
			counters: Counters::default(),
		}
	}
}

impl Default for ProcessTable {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualTable for ProcessTable {
	fn definition(&self) -> Arc<TableDef> {
		self.def.clone()
	}

	fn prepare(&self, ctx: &mut QueryContext) {
		self.counters.prepared();

		let pids: Vec<Option<i64>> = ctx
			.constraints()
			.iter()
			.filter(|c| c.is(&self.pid, ConstraintOp::Eq))
			.map(|c| c.value.as_i64())
			.collect();

		let rows: Vec<usize> = (0..PROCESSES.len())
			.filter(|&idx| pids.iter().all(|&pid| pid == Some(PROCESSES[idx].0 as i64)))
			.collect();
		start_scan(ctx, rows);
	}

	fn next(&self, ctx: &mut QueryContext, row: &mut Row) -> bool {
		self.counters.advanced();

		let Some(idx) = next_in_scan::<usize>(ctx) else {
			return false;
		};
		let (pid, path) = PROCESSES[idx];
		row.set(&self.pid, pid);
		row.set(&self.path, path);
		true
	}
}

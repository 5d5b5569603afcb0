// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{os::raw::c_int, sync::Arc};

use parking_lot::Mutex;
use rusqlite::{
	ffi,
	types::{Null, Value as SqlValue},
	vtab::{
		Context, CreateVTab, Filters, IndexConstraintOp, IndexInfo, VTab, VTabConnection, VTabCursor,
		VTabKind,
	},
};
use tabula_core::{
	AdapterError, Constraint, ConstraintOp, QueryContext, Row, TableDef, VirtualTable,
	ddl::create_statement,
	plan::{self, Candidate, PlanBacklog, PlanningLog},
};
use tabula_type::{Diagnostic, IntoDiagnostic, internal_error};
use tracing::{debug, instrument, trace, warn};

use crate::value;

/// Everything a module instance needs to serve one registered table.
pub(crate) struct TableBinding {
	pub(crate) table: Arc<dyn VirtualTable>,
	pub(crate) plan_backlog: usize,
	pub(crate) planning: Arc<PlanningLog>,
}

#[repr(C)]
pub(crate) struct AdapterTab {
	base: ffi::sqlite3_vtab,
	binding: Arc<TableBinding>,
	def: Arc<TableDef>,
	backlog: Mutex<PlanBacklog>,
}

impl AdapterTab {
	fn name(&self) -> &str {
		self.def.name()
	}
}

unsafe impl<'vtab> VTab<'vtab> for AdapterTab {
	type Aux = Arc<TableBinding>;
	type Cursor = AdapterCursor<'vtab>;

	#[instrument(name = "sqlite::vtab::connect", level = "debug", skip_all)]
	fn connect(_db: &mut VTabConnection, aux: Option<&Self::Aux>, _args: &[&[u8]]) -> rusqlite::Result<(String, Self)> {
		let Some(binding) = aux else {
			return Err(module_error(internal_error!("virtual table module registered without a table")));
		};

		let def = binding.table.definition();
		def.validate().map_err(|e| module_error(e.into_diagnostic()))?;

		let ddl = create_statement(&def);
		debug!(table = def.name(), ddl = %ddl, "declaring virtual table");

		Ok((
			ddl,
			AdapterTab {
				base: ffi::sqlite3_vtab::default(),
				binding: binding.clone(),
				def,
				backlog: Mutex::new(PlanBacklog::new(binding.plan_backlog)),
			},
		))
	}

	#[instrument(name = "sqlite::vtab::best_index", level = "trace", skip_all, fields(table = self.name()))]
	fn best_index(&self, info: &mut IndexInfo) -> rusqlite::Result<()> {
		let def = self.binding.table.definition();

		let candidates: Vec<Candidate> = info
			.constraints()
			.map(|c| Candidate {
				column: c.column(),
				op: constraint_op(c.operator()),
				usable: c.is_usable(),
			})
			.collect();

		let pushdown = match plan::pushdown(&def, &candidates, info.col_used()) {
			Ok(pushdown) => pushdown,
			Err(err) => {
				let diagnostic = err.into_diagnostic();
				warn!(table = def.name(), error = %diagnostic.summary(), "rejecting plan");
				self.binding.planning.record(diagnostic.clone());
				return Err(rusqlite::Error::SqliteFailure(
					ffi::Error::new(ffi::SQLITE_CONSTRAINT),
					Some(diagnostic.summary()),
				));
			}
		};

		for ((_, mut usage), slot) in info.constraints_and_usages().zip(&pushdown.slots) {
			if let Some(slot) = slot {
				usage.set_argv_index(*slot);
			}
		}

		let plan = self.backlog.lock().mint(pushdown.constraints, pushdown.requested);
		trace!(plan = plan.id, constraints = plan.constraints.len(), "minted plan");

		info.set_idx_num(plan.id);
		info.set_estimated_cost(pushdown.estimated_cost);
		info.set_estimated_rows(pushdown.estimated_rows);
		Ok(())
	}

	fn open(&'vtab mut self) -> rusqlite::Result<AdapterCursor<'vtab>> {
		Ok(AdapterCursor::new(self))
	}
}

impl CreateVTab<'_> for AdapterTab {
	const KIND: VTabKind = VTabKind::Default;
}

#[repr(C)]
pub(crate) struct AdapterCursor<'vtab> {
	base: ffi::sqlite3_vtab_cursor,
	tab: &'vtab AdapterTab,
	context: Option<QueryContext>,
	row: Row,
	rowid: i64,
}

impl<'vtab> AdapterCursor<'vtab> {
	fn new(tab: &'vtab AdapterTab) -> Self {
		Self {
			base: ffi::sqlite3_vtab_cursor::default(),
			tab,
			context: None,
			row: Row::new(),
			rowid: 0,
		}
	}

	fn advance(&mut self) -> rusqlite::Result<()> {
		self.row.clear();

		let Some(context) = self.context.as_mut() else {
			return Err(module_error(internal_error!("cursor advanced before filter")));
		};

		if self.tab.binding.table.next(context, &mut self.row) {
			self.rowid += 1;
		} else {
			self.row.clear();
		}

		self.check_failure()
	}

	fn check_failure(&mut self) -> rusqlite::Result<()> {
		let failure = self.context.as_mut().and_then(QueryContext::take_failure);
		match failure {
			Some(reason) => {
				self.row.clear();
				let err = AdapterError::TableFailed {
					table: self.tab.name().to_string(),
					reason,
				};
				warn!(error = %err, "table reported failure");
				Err(module_error(err.into_diagnostic()))
			}
			None => Ok(()),
		}
	}
}

unsafe impl VTabCursor for AdapterCursor<'_> {
	#[instrument(name = "sqlite::vtab::filter", level = "trace", skip_all, fields(table = self.tab.name(), plan = idx_num))]
	fn filter(&mut self, idx_num: c_int, _idx_str: Option<&str>, args: &Filters<'_>) -> rusqlite::Result<()> {
		let plan = self.tab.backlog.lock().get(idx_num).ok_or_else(|| {
			module_error(
				AdapterError::UnknownPlan {
					table: self.tab.name().to_string(),
					plan: idx_num,
				}
				.into_diagnostic(),
			)
		})?;

		if args.len() != plan.constraints.len() {
			return Err(module_error(
				AdapterError::SlotCountMismatch {
					table: self.tab.name().to_string(),
					expected: plan.constraints.len(),
					actual: args.len(),
				}
				.into_diagnostic(),
			));
		}

		let mut constraints = Vec::with_capacity(plan.constraints.len());
		for (idx, planned) in plan.constraints.iter().enumerate() {
			let value: SqlValue = args.get(idx)?;
			constraints.push(Constraint::new(planned.field.clone(), planned.op, value::from_owned(value)));
		}

		self.rowid = 0;
		self.row.clear();

		let context = self.context.insert(QueryContext::new(constraints, plan.requested.clone()));
		self.tab.binding.table.prepare(context);
		self.check_failure()?;

		self.advance()
	}

	fn next(&mut self) -> rusqlite::Result<()> {
		self.advance()
	}

	fn eof(&self) -> bool {
		self.row.is_empty()
	}

	fn column(&self, ctx: &mut Context, i: c_int) -> rusqlite::Result<()> {
		let def = &self.tab.def;
		let resolved = usize::try_from(i).ok().and_then(|idx| def.resolve(idx));
		let Some((_, column)) = resolved else {
			return Err(module_error(
				AdapterError::ColumnOutOfRange {
					table: def.name().to_string(),
					column: i,
					count: def.columns.len(),
				}
				.into_diagnostic(),
			));
		};

		match self.row.get(&column.field) {
			Some(value) => ctx.set_result(&value::to_sql(value)),
			None => ctx.set_result(&Null),
		}
	}

	fn rowid(&self) -> rusqlite::Result<i64> {
		Ok(self.rowid)
	}
}

fn module_error(diagnostic: Diagnostic) -> rusqlite::Error {
	rusqlite::Error::ModuleError(diagnostic.summary())
}

fn constraint_op(op: IndexConstraintOp) -> Option<ConstraintOp> {
	match op {
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_EQ => Some(ConstraintOp::Eq),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_GT => Some(ConstraintOp::Gt),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_LE => Some(ConstraintOp::Le),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_LT => Some(ConstraintOp::Lt),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_GE => Some(ConstraintOp::Ge),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_MATCH => Some(ConstraintOp::Match),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_LIKE => Some(ConstraintOp::Like),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_GLOB => Some(ConstraintOp::Glob),
		IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_REGEXP => Some(ConstraintOp::Regex),
		_ => None,
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashSet, sync::Arc};

use indexmap::IndexMap;
use parking_lot::{ReentrantMutex, RwLock};
use rusqlite::{Connection, vtab::read_only_module};
use tabula_core::{
	AdapterError, AppFunction, Flow, FunctionInfo, QueryListener, Row, TableInfo, VirtualTable,
	plan::PlanningLog,
};
use tabula_type::{
	Diagnostic, Error, Field, Result, Value, error,
	error::diagnostic::{internal::internal, query::statement_failed},
};
use tracing::{debug, instrument, warn};

use crate::{
	SqliteConfig,
	connection::{connect, convert_flags},
	function, value,
	vtab::{AdapterTab, TableBinding},
};

/// An in-memory SQLite engine exposing registered tables and functions.
///
/// Cloning is cheap and every clone shares the same connection.
#[derive(Clone)]
pub struct Database {
	inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
	conn: ReentrantMutex<Connection>,
	config: SqliteConfig,
	tables: RwLock<IndexMap<String, Arc<dyn VirtualTable>>>,
	functions: RwLock<IndexMap<String, Arc<dyn AppFunction>>>,
	planning: Arc<PlanningLog>,
}

impl Database {
	#[instrument(name = "sqlite::database::new", level = "info", skip(config), fields(path = ?config.path, plan_backlog = config.plan_backlog))]
	pub fn new(config: SqliteConfig) -> Result<Self> {
		let conn = connect(&config.path, convert_flags(&config.flags))?;

		Ok(Self {
			inner: Arc::new(DatabaseInner {
				conn: ReentrantMutex::new(conn),
				config,
				tables: RwLock::new(IndexMap::new()),
				functions: RwLock::new(IndexMap::new()),
				planning: Arc::new(PlanningLog::new()),
			}),
		})
	}

	pub fn in_memory() -> Result<Self> {
		Self::new(SqliteConfig::in_memory())
	}

	pub fn config(&self) -> &SqliteConfig {
		&self.inner.config
	}

	/// Runs `sql`, handing every result row to `listener`.
	///
	/// On failure the listener receives the engine message. When the statement
	/// could not be prepared, the summary of every plan rejected while planning
	/// follows it. Tables and listeners may run nested queries on the same
	/// database.
	#[instrument(name = "sqlite::database::query", level = "debug", skip(self, listener))]
	pub fn query(&self, sql: &str, listener: &mut dyn QueryListener) -> Result<()> {
		let conn = self.inner.conn.lock();
		self.inner.planning.clear();

		let mut stmt = match conn.prepare(sql) {
			Ok(stmt) => stmt,
			Err(err) => return Err(self.report_failure(listener, sql, err, self.inner.planning.drain())),
		};
		self.inner.planning.clear();

		let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

		let mut rows = match stmt.query([]) {
			Ok(rows) => rows,
			Err(err) => return Err(self.report_failure(listener, sql, err, Vec::new())),
		};

		let mut fields: Option<Vec<Field>> = None;
		let mut produced = 0usize;

		loop {
			let row = match rows.next() {
				Ok(Some(row)) => row,
				Ok(None) => break,
				Err(err) => return Err(self.report_failure(listener, sql, err, Vec::new())),
			};

			let values = match read_row(row, names.len()) {
				Ok(values) => values,
				Err(err) => {
					warn!(error = %err, "skipping unreadable result row");
					continue;
				}
			};

			let columns = fields.get_or_insert_with(|| result_fields(&names, &values));

			let result: Row =
				columns.iter().zip(values).map(|(field, value)| (field.clone(), value.coerce(field.r#type))).collect();
			produced += 1;

			if listener.on_result_row(result) == Flow::Abort {
				debug!(rows = produced, "listener aborted query");
				break;
			}
		}

		debug!(rows = produced, "query finished");
		Ok(())
	}

	fn report_failure(
		&self,
		listener: &mut dyn QueryListener,
		sql: &str,
		err: rusqlite::Error,
		rejected: Vec<Diagnostic>,
	) -> Error {
		let message = err.to_string();
		listener.on_query_error(&message);

		for diagnostic in &rejected {
			listener.on_query_error(&diagnostic.summary());
		}

		warn!(error = %message, rejected = rejected.len(), "query failed");

		let mut diagnostic = statement_failed(sql, message);
		for rejected in &rejected {
			diagnostic = diagnostic.with_note(rejected.summary());
		}
		if let Some(first) = rejected.into_iter().next() {
			diagnostic = diagnostic.with_cause(first);
		}
		Error(diagnostic)
	}

	/// Registers `table` as `temp.<name>`.
	#[instrument(name = "sqlite::database::add_table", level = "debug", skip_all)]
	pub fn add_table(&self, table: Arc<dyn VirtualTable>) -> Result<()> {
		let def = table.definition();
		def.validate()?;

		let name = def.name().to_string();
		if self.inner.tables.read().contains_key(&name) {
			return Err(AdapterError::TableAlreadyRegistered {
				table: name,
			}
			.into());
		}

		let binding = Arc::new(TableBinding {
			table: table.clone(),
			plan_backlog: self.inner.config.plan_backlog,
			planning: self.inner.planning.clone(),
		});

		let conn = self.inner.conn.lock();
		conn.create_module(name.as_str(), read_only_module::<AdapterTab>(), Some(binding))
			.map_err(|e| error!(internal(format!("Failed to register module {}: {}", name, e))))?;

		let sql = format!("CREATE VIRTUAL TABLE temp.{name} USING {name}");
		conn.execute_batch(&sql).map_err(|e| error!(statement_failed(&sql, e.to_string())))?;

		debug!(table = %name, "table registered");
		self.inner.tables.write().insert(name, table);
		Ok(())
	}

	#[instrument(name = "sqlite::database::remove_table", level = "debug", skip(self))]
	pub fn remove_table(&self, name: &str) -> Result<()> {
		if !self.inner.tables.read().contains_key(name) {
			return Err(AdapterError::UnknownTable {
				table: name.to_string(),
			}
			.into());
		}

		let sql = format!("DROP TABLE temp.{name}");
		self.inner.conn.lock().execute_batch(&sql).map_err(|e| error!(statement_failed(&sql, e.to_string())))?;

		self.inner.tables.write().shift_remove(name);
		debug!("table removed");
		Ok(())
	}

	/// Registers `function`. Adding a name that is already registered is a
	/// no-op.
	#[instrument(name = "sqlite::database::add_function", level = "debug", skip_all, fields(function = function.name()))]
	pub fn add_function(&self, function: Arc<dyn AppFunction>) -> Result<()> {
		let name = function.name().to_string();
		if self.inner.functions.read().contains_key(&name) {
			debug!("function already registered");
			return Ok(());
		}

		function::register(&self.inner.conn.lock(), function.clone())
			.map_err(|e| error!(internal(format!("Failed to register function {}: {}", name, e))))?;

		self.inner.functions.write().insert(name, function);
		Ok(())
	}

	#[instrument(name = "sqlite::database::remove_function", level = "debug", skip(self))]
	pub fn remove_function(&self, name: &str) -> Result<()> {
		if !self.inner.functions.read().contains_key(name) {
			return Ok(());
		}

		function::unregister(&self.inner.conn.lock(), name)
			.map_err(|e| error!(internal(format!("Failed to remove function {}: {}", name, e))))?;

		self.inner.functions.write().shift_remove(name);
		Ok(())
	}

	/// Descriptions of the registered tables, in registration order.
	pub fn tables(&self) -> Vec<TableInfo> {
		self.inner.tables.read().values().map(|t| Self::table_info(t.as_ref())).collect()
	}

	pub fn functions(&self) -> Vec<FunctionInfo> {
		self.inner.functions.read().values().map(|f| Self::function_info(f.as_ref())).collect()
	}

	pub fn table_info(table: &dyn VirtualTable) -> TableInfo {
		TableInfo::from_def(&table.definition())
	}

	pub fn function_info(function: &dyn AppFunction) -> FunctionInfo {
		FunctionInfo::from_function(function)
	}

	/// Takes the diagnostics of plans rejected while preparing the current
	/// statement, leaving the log empty.
	pub fn take_rejected_plans(&self) -> Vec<Diagnostic> {
		self.inner.planning.drain()
	}
}

/// Result fields typed after the first row. Values of later rows are coerced
/// to these types. A repeated column name is suffixed with its position so no
/// column is lost.
fn result_fields(names: &[String], values: &[Value]) -> Vec<Field> {
	let mut seen = HashSet::new();
	names.iter()
		.zip(values)
		.enumerate()
		.map(|(idx, (name, value))| {
			let name = if seen.insert(name.as_str()) {
				name.clone()
			} else {
				format!("{}:{}", name, idx)
			};
			Field::alloc(value.get_type(), name)
		})
		.collect()
}

fn read_row(row: &rusqlite::Row<'_>, count: usize) -> rusqlite::Result<Vec<Value>> {
	(0..count).map(|idx| row.get_ref(idx).map(value::from_sql)).collect()
}

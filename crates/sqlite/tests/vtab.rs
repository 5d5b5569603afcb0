// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::{CollectingListener, Flow, QueryListener, Row};
use tabula_sqlite::Database;
use tabula_testing::{
	FailFunction, FailingTable, PathLenTable, ProcessTable, SignatureTable, T1Table, UsersTable, init_logging,
};
use tabula_type::Value;

fn database() -> Database {
	init_logging();
	Database::in_memory().unwrap()
}

fn query(db: &Database, sql: &str) -> CollectingListener {
	let mut listener = CollectingListener::new();
	db.query(sql, &mut listener).unwrap();
	assert!(listener.errors.is_empty(), "unexpected errors: {:?}", listener.errors);
	listener
}

fn query_err(db: &Database, sql: &str) -> CollectingListener {
	let mut listener = CollectingListener::new();
	assert!(db.query(sql, &mut listener).is_err());
	listener
}

fn column(row: &Row, name: &str) -> Value {
	row.get_by_name(name).cloned().unwrap_or(Value::Undefined)
}

#[test]
fn test_select_all() {
	let db = database();
	let t1 = Arc::new(T1Table::new());
	db.add_table(t1.clone()).unwrap();

	let result = query(&db, "SELECT * FROM t1");
	assert_eq!(result.rows.len(), 4);
	assert_eq!(t1.counters.prepare_count(), 1);
	assert_eq!(t1.counters.next_count(), 5);

	let first = &result.rows[0];
	assert_eq!(column(first, "name"), Value::utf8("alpha"));
	assert_eq!(column(first, "u32val"), Value::Int8(0xaaaa));
	assert_eq!(column(first, "dval"), Value::Float8(0.123));
	assert_eq!(column(first, "longo"), Value::Int8(555444333222111));
	assert_eq!(column(first, "is_active"), Value::Int8(1));
	assert!(first.get_by_name("dword").is_none());

	assert_eq!(column(&result.rows[2], "longo"), Value::Int8(-555444333222111));
	assert_eq!(column(&result.rows[2], "is_active"), Value::Int8(0));
}

#[test]
fn test_in_list_prepares_per_value() {
	let db = database();
	let t1 = Arc::new(T1Table::new());
	db.add_table(t1.clone()).unwrap();

	let result = query(&db, "SELECT * FROM t1 WHERE u32val IN (0xaaaa, 0xcccc)");
	assert_eq!(result.rows.len(), 2);
	assert_eq!(t1.counters.prepare_count(), 2);
	assert_eq!(t1.counters.next_count(), 4);

	let mut names: Vec<Value> = result.rows.iter().map(|r| column(r, "name")).collect();
	names.sort_by_key(|v| v.to_string());
	assert_eq!(names, vec![Value::utf8("alpha"), Value::utf8("charlie")]);
}

#[test]
fn test_equality_pushdown() {
	let db = database();
	let t1 = Arc::new(T1Table::new());
	db.add_table(t1.clone()).unwrap();

	let result = query(&db, "SELECT name FROM t1 WHERE u32val = 48059");
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "name"), Value::utf8("beta"));
	assert_eq!(t1.counters.prepare_count(), 1);
	assert_eq!(t1.counters.next_count(), 2);
}

#[test]
fn test_unfiltered_index_is_rechecked() {
	let db = database();
	db.add_table(Arc::new(T1Table::new())).unwrap();

	let result = query(&db, "SELECT u32val FROM t1 WHERE name = 'delta'");
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "u32val"), Value::Int8(0xdddd));
}

#[test]
fn test_alias_reads_target() {
	let db = database();
	db.add_table(Arc::new(T1Table::new())).unwrap();

	let result = query(&db, "SELECT u32val, dword FROM t1");
	assert_eq!(result.rows.len(), 4);
	for row in &result.rows {
		assert_eq!(column(row, "u32val"), column(row, "dword"));
	}
}

#[test]
fn test_alias_constraint_pushed_to_target() {
	let db = database();
	let t1 = Arc::new(T1Table::new());
	db.add_table(t1.clone()).unwrap();

	let result = query(&db, "SELECT name FROM t1 WHERE dword = 0xbbbb");
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "name"), Value::utf8("beta"));
	assert_eq!(t1.counters.next_count(), 2);
}

#[test]
fn test_requested_and_alias_columns() {
	let db = database();
	db.add_table(Arc::new(UsersTable::new())).unwrap();

	let result = query(&db, "SELECT username, home FROM users WHERE userid = 501");
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "home"), Value::utf8("/home/bob"));

	let result = query(&db, "SELECT uid FROM users WHERE uid = 0");
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "uid"), Value::Int8(0));
}

#[test]
fn test_required_without_constraint_fails() {
	let db = database();
	let table = Arc::new(PathLenTable::new());
	db.add_table(table.clone()).unwrap();

	let mut listener = CollectingListener::new();
	let err = db.query("SELECT * FROM tpath_len", &mut listener).unwrap_err();

	assert!(listener.rows.is_empty());
	assert_eq!(listener.errors.len(), 2);
	assert!(listener.errors[1].starts_with("VTAB_001"), "{:?}", listener.errors);
	assert_eq!(err.code, "QUERY_001");
	assert_eq!(err.cause.as_ref().map(|c| c.code.as_str()), Some("VTAB_001"));
	assert_eq!(table.counters.prepare_count(), 0);
}

#[test]
fn test_required_with_like() {
	let db = database();
	db.add_table(Arc::new(PathLenTable::new())).unwrap();

	let result = query(&db, "SELECT * FROM tpath_len WHERE path LIKE '/home/%'");
	assert_eq!(result.rows.len(), 3);
	for row in &result.rows {
		assert!(column(row, "path").as_str().unwrap().starts_with("/home/"));
	}
}

#[test]
fn test_required_with_equality() {
	let db = database();
	db.add_table(Arc::new(PathLenTable::new())).unwrap();

	let result = query(&db, "SELECT * FROM tpath_len WHERE path = '/root'");
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "path"), Value::utf8("/root"));
	assert_eq!(column(&result.rows[0], "pathlen"), Value::Int8(5));
}

#[test]
fn test_scan_without_index() {
	let db = database();
	let process = Arc::new(ProcessTable::new());
	db.add_table(process.clone()).unwrap();

	let result = query(&db, "SELECT * FROM tprocess");
	assert_eq!(result.rows.len(), 5);
	assert_eq!(process.counters.prepare_count(), 1);
	assert_eq!(process.counters.next_count(), 6);
}

#[test]
fn test_join_feeds_required_column() {
	let db = database();
	let process = Arc::new(ProcessTable::new());
	let sig = Arc::new(SignatureTable::new());
	db.add_table(process.clone()).unwrap();
	db.add_table(sig.clone()).unwrap();

	let result = query(&db, "SELECT * FROM tprocess JOIN tsig USING (path)");
	assert_eq!(result.rows.len(), 3);
	assert_eq!(process.counters.prepare_count(), 1);
	assert_eq!(process.counters.next_count(), 6);
	assert_eq!(sig.counters.prepare_count(), 5);
}

#[test]
fn test_left_join_with_in_list() {
	let db = database();
	let process = Arc::new(ProcessTable::new());
	let sig = Arc::new(SignatureTable::new());
	db.add_table(process.clone()).unwrap();
	db.add_table(sig.clone()).unwrap();

	let result = query(
		&db,
		"SELECT * FROM tprocess LEFT JOIN tsig USING (PATH) \
		 WHERE path IN ('/usr/bin/base64', '/bin/ls', '/usr/local/bin/exiftool')",
	);
	assert_eq!(result.rows.len(), 2);
	assert_eq!(sig.counters.prepare_count(), 2);
	assert_eq!(sig.counters.next_count(), 4);
	assert_eq!(process.counters.prepare_count(), 1);
	assert_eq!(process.counters.next_count(), 6);

	let identifiers: Vec<Value> = result.rows.iter().map(|r| column(r, "identifier")).collect();
	assert!(identifiers.contains(&Value::utf8("com.apple.base64")));
}

#[test]
fn test_left_join_with_like_and_in_list() {
	let db = database();
	let process = Arc::new(ProcessTable::new());
	let sig = Arc::new(SignatureTable::new());
	db.add_table(process.clone()).unwrap();
	db.add_table(sig.clone()).unwrap();

	let result = query(
		&db,
		"SELECT * FROM tprocess LEFT JOIN tsig USING (PATH) WHERE path LIKE '/usr/%' AND cdhash IN \
		 ('e264d46afea7e77cbd81eca5ad245a3bcae99fe0','c5c058f85e064bc4a9a6ef443a3a368ad6dc54ed',\
		 '60b123cff9c66b6c5fd65ef48ea5a2431d4bae0d')",
	);
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "path"), Value::utf8("/usr/bin/base64"));
	assert_eq!(process.counters.prepare_count(), 1);
	assert_eq!(process.counters.next_count(), 6);
	assert_eq!(sig.counters.prepare_count(), 3);
	assert_eq!(sig.counters.next_count(), 5);
}

#[test]
fn test_self_join_uses_independent_cursors() {
	let db = database();
	let t1 = Arc::new(T1Table::new());
	db.add_table(t1.clone()).unwrap();

	let result = query(
		&db,
		"SELECT a.name AS left_name, b.name AS right_name FROM t1 a JOIN t1 b ON a.u32val = b.u32val",
	);
	assert_eq!(result.rows.len(), 4);
	for row in &result.rows {
		assert_eq!(column(row, "left_name"), column(row, "right_name"));
	}
}

#[test]
fn test_subquery_on_same_table() {
	let db = database();
	db.add_table(Arc::new(T1Table::new())).unwrap();

	let result = query(&db, "SELECT name FROM t1 WHERE u32val IN (SELECT dword FROM t1 WHERE u32val < 0xc000)");
	let mut names: Vec<Value> = result.rows.iter().map(|r| column(r, "name")).collect();
	names.sort_by_key(|v| v.to_string());
	assert_eq!(names, vec![Value::utf8("alpha"), Value::utf8("beta")]);
}

#[test]
fn test_indexed_column_without_operators_scans_for_like() {
	let db = database();
	let process = Arc::new(ProcessTable::new());
	db.add_table(process.clone()).unwrap();

	let result = query(&db, "SELECT pid FROM tprocess WHERE pid LIKE '4%'");
	assert_eq!(result.rows.len(), 4);
	assert_eq!(process.counters.prepare_count(), 1);
	assert_eq!(process.counters.next_count(), 6);

	process.counters.reset();
	let result = query(&db, "SELECT path FROM tprocess WHERE pid = 42");
	assert_eq!(result.rows.len(), 1);
	assert_eq!(column(&result.rows[0], "path"), Value::utf8("/usr/sbin/syslogd"));
	assert_eq!(process.counters.prepare_count(), 1);
	assert_eq!(process.counters.next_count(), 2);
}

#[test]
fn test_execution_failure_omits_planning_errors() {
	let db = database();
	db.add_table(Arc::new(ProcessTable::new())).unwrap();
	db.add_table(Arc::new(SignatureTable::new())).unwrap();
	db.add_function(Arc::new(FailFunction)).unwrap();

	let mut listener = CollectingListener::new();
	let sql = "SELECT fail(tprocess.path) FROM tprocess JOIN tsig USING (path)";
	let err = db.query(sql, &mut listener).unwrap_err();

	assert_eq!(listener.errors.len(), 1, "{:?}", listener.errors);
	assert!(listener.errors[0].contains("FUNCTION_007"), "{:?}", listener.errors);
	assert!(err.cause.is_none());
	assert!(err.notes.is_empty());
	assert!(db.take_rejected_plans().is_empty());
}

#[test]
fn test_table_failure_is_reported() {
	let db = database();
	db.add_table(Arc::new(FailingTable::new())).unwrap();

	let mut listener = CollectingListener::new();
	let err = db.query("SELECT * FROM broken", &mut listener).unwrap_err();

	assert_eq!(listener.rows.len(), 1);
	assert_eq!(listener.errors.len(), 1);
	assert!(listener.errors[0].contains("VTAB_004"), "{:?}", listener.errors);
	assert!(err.message.contains("backing store went away"));
}

struct FirstRow {
	rows: Vec<Row>,
}

impl QueryListener for FirstRow {
	fn on_result_row(&mut self, row: Row) -> Flow {
		self.rows.push(row);
		Flow::Abort
	}

	fn on_query_error(&mut self, message: &str) {
		panic!("unexpected error {}", message);
	}
}

#[test]
fn test_listener_abort_stops_iteration() {
	let db = database();
	let t1 = Arc::new(T1Table::new());
	db.add_table(t1.clone()).unwrap();

	let mut listener = FirstRow {
		rows: vec![],
	};
	db.query("SELECT * FROM t1", &mut listener).unwrap();
	assert_eq!(listener.rows.len(), 1);
	assert_eq!(t1.counters.next_count(), 1);
}

#[test]
fn test_remove_table() {
	let db = database();
	db.add_table(Arc::new(T1Table::new())).unwrap();
	db.remove_table("t1").unwrap();

	let listener = query_err(&db, "SELECT * FROM t1");
	assert!(listener.errors[0].contains("no such table"), "{:?}", listener.errors);

	db.add_table(Arc::new(T1Table::new())).unwrap();
	assert_eq!(query(&db, "SELECT * FROM t1").rows.len(), 4);
}

#[test]
fn test_table_registration_errors() {
	let db = database();
	db.add_table(Arc::new(T1Table::new())).unwrap();

	let err = db.add_table(Arc::new(T1Table::new())).unwrap_err();
	assert_eq!(err.code, "VTAB_007");

	let err = db.remove_table("missing").unwrap_err();
	assert_eq!(err.code, "VTAB_008");
}

#[test]
fn test_query_twice() {
	let db = database();
	let t1 = Arc::new(T1Table::new());
	db.add_table(t1.clone()).unwrap();

	let first = query(&db, "SELECT * FROM t1 WHERE u32val = 0xdddd");
	let second = query(&db, "SELECT * FROM t1 WHERE u32val = 0xdddd");
	assert_eq!(first.rows, second.rows);
	assert_eq!(t1.counters.prepare_count(), 2);

	t1.counters.reset();
	query(&db, "SELECT * FROM t1");
	assert_eq!(t1.counters.prepare_count(), 1);
	assert_eq!(t1.counters.next_count(), 5);
}

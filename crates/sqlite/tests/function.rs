// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tabula_core::CollectingListener;
use tabula_sqlite::Database;
use tabula_testing::{FailFunction, PathLenTable, PiFunction, PowerFunction, SqrtFunction, init_logging};
use tabula_type::{Type, Value};

fn database() -> Database {
	init_logging();
	let db = Database::in_memory().unwrap();
	db.add_function(Arc::new(PowerFunction)).unwrap();
	db.add_function(Arc::new(SqrtFunction)).unwrap();
	db.add_function(Arc::new(PiFunction)).unwrap();
	db.add_function(Arc::new(FailFunction)).unwrap();
	db
}

fn scalar(db: &Database, sql: &str) -> Value {
	let mut listener = CollectingListener::new();
	db.query(sql, &mut listener).unwrap();
	assert_eq!(listener.rows.len(), 1);
	listener.rows[0].get_by_name("val").cloned().unwrap()
}

fn error(db: &Database, sql: &str) -> String {
	let mut listener = CollectingListener::new();
	assert!(db.query(sql, &mut listener).is_err());
	listener.errors.first().cloned().unwrap()
}

#[test]
fn test_power() {
	let db = database();
	assert_eq!(scalar(&db, "SELECT power(2,10) as val"), Value::Float8(1024.0));

	let mut listener = CollectingListener::new();
	db.query("SELECT power(2,10) as val", &mut listener).unwrap();
	assert_eq!(listener.column_for_name("val").unwrap().r#type, Type::Float8);
}

#[test]
fn test_nested_calls() {
	let db = database();
	assert_eq!(scalar(&db, "SELECT power(power(2,2),3) as val"), Value::Float8(64.0));
	assert_eq!(scalar(&db, "SELECT sqrt(power(3,2)) as val"), Value::Float8(3.0));
}

#[test]
fn test_no_arguments() {
	let db = database();
	assert_eq!(scalar(&db, "SELECT pi() as val"), Value::Float8(3.1415));
}

#[test]
fn test_text_argument_converted() {
	let db = database();
	assert_eq!(scalar(&db, "SELECT power('2', 3) as val"), Value::Float8(8.0));
}

#[test]
fn test_null_argument() {
	let db = database();
	assert_eq!(scalar(&db, "SELECT power(NULL, 3) as val"), Value::Undefined);
}

#[test]
fn test_arity_mismatch() {
	let db = database();
	let message = error(&db, "SELECT power(2) as val");
	assert!(message.starts_with("FUNCTION_002"), "{}", message);
}

#[test]
fn test_invalid_argument() {
	let db = database();
	let message = error(&db, "SELECT power('abc', 2) as val");
	assert!(message.starts_with("FUNCTION_004"), "{}", message);
}

#[test]
fn test_function_error() {
	let db = database();
	let message = error(&db, "SELECT fail(1) as val");
	assert!(message.starts_with("FUNCTION_007"), "{}", message);
}

#[test]
fn test_function_over_table() {
	let db = database();
	db.add_table(Arc::new(PathLenTable::new())).unwrap();
	assert_eq!(scalar(&db, "SELECT power(pathlen, 2) as val FROM tpath_len WHERE path = '/root'"), Value::Float8(25.0));
}

#[test]
fn test_remove_function() {
	let db = database();
	db.remove_function("power").unwrap();

	let message = error(&db, "SELECT power(2,10) as val");
	assert!(message.contains("no such function"), "{}", message);

	db.remove_function("power").unwrap();
	db.add_function(Arc::new(PowerFunction)).unwrap();
	assert_eq!(scalar(&db, "SELECT power(2,3) as val"), Value::Float8(8.0));
}

#[test]
fn test_add_twice() {
	let db = database();
	db.add_function(Arc::new(PowerFunction)).unwrap();
	assert_eq!(db.functions().len(), 4);
	assert_eq!(scalar(&db, "SELECT power(2,10) as val"), Value::Float8(1024.0));
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tabula_type::Field;

use crate::Row;

/// Returned by [`QueryListener::on_result_row`] to continue or stop the
/// iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Abort,
}

/// Receives the outcome of a query.
pub trait QueryListener {
	fn on_result_row(&mut self, row: Row) -> Flow;

	fn on_query_error(&mut self, message: &str);
}

/// Listener that keeps every row and error message.
#[derive(Debug, Default)]
pub struct CollectingListener {
	pub rows: Vec<Row>,
	pub errors: Vec<String>,
}

impl CollectingListener {
	pub fn new() -> Self {
		Self::default()
	}

	/// Field of the result column called `name`, taken from the first row.
	pub fn column_for_name(&self, name: &str) -> Option<Field> {
		self.rows.first()?.fields().find(|f| f.name == name).cloned()
	}

	pub fn clear(&mut self) {
		self.rows.clear();
		self.errors.clear();
	}
}

impl QueryListener for CollectingListener {
	fn on_result_row(&mut self, row: Row) -> Flow {
		self.rows.push(row);
		Flow::Continue
	}

	fn on_query_error(&mut self, message: &str) {
		self.errors.push(message.to_string());
	}
}

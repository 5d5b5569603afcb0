// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	collections::HashSet,
	fmt::{Debug, Formatter},
};

use tabula_type::Field;

use crate::Constraint;

/// Per filter negotiation between the adapter and a table.
///
/// Carries the constraints accepted for pushdown, the columns the query
/// reads, a type erased slot for the table's iteration state and an error
/// slot through which a table can fail the current statement.
#[derive(Default)]
pub struct QueryContext {
	constraints: Vec<Constraint>,
	requested: HashSet<Field>,
	state: Option<Box<dyn Any + Send>>,
	failure: Option<String>,
}

impl QueryContext {
	pub fn new(constraints: Vec<Constraint>, requested: HashSet<Field>) -> Self {
		Self {
			constraints,
			requested,
			state: None,
			failure: None,
		}
	}

	pub fn constraints(&self) -> &[Constraint] {
		&self.constraints
	}

	pub fn requested_columns(&self) -> &HashSet<Field> {
		&self.requested
	}

	pub fn is_requested(&self, field: &Field) -> bool {
		self.requested.contains(field)
	}

	/// Replaces the table state for this context.
	pub fn set_state<T: Any + Send>(&mut self, state: T) {
		self.state = Some(Box::new(state));
	}

	pub fn state<T: Any + Send>(&self) -> Option<&T> {
		self.state.as_ref().and_then(|s| s.downcast_ref::<T>())
	}

	pub fn state_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
		self.state.as_mut().and_then(|s| s.downcast_mut::<T>())
	}

	pub fn take_state<T: Any + Send>(&mut self) -> Option<T> {
		let state = self.state.take()?;
		match state.downcast::<T>() {
			Ok(state) => Some(*state),
			Err(state) => {
				self.state = Some(state);
				None
			}
		}
	}

	/// Fails the running statement with `message`. Without a call to `fail`
	/// an empty data set is reported as zero rows.
	pub fn fail(&mut self, message: impl Into<String>) {
		self.failure = Some(message.into());
	}

	pub fn failure(&self) -> Option<&str> {
		self.failure.as_deref()
	}

	pub fn take_failure(&mut self) -> Option<String> {
		self.failure.take()
	}
}

impl Debug for QueryContext {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QueryContext")
			.field("constraints", &self.constraints)
			.field("requested", &self.requested)
			.field("has_state", &self.state.is_some())
			.field("failure", &self.failure)
			.finish()
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use tabula_type::{Field, Value};

/// One row of values keyed by field identity, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row(IndexMap<Field, Value>);

impl Row {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self(IndexMap::with_capacity(capacity))
	}

	pub fn set(&mut self, field: &Field, value: impl Into<Value>) {
		self.0.insert(field.clone(), value.into());
	}

	pub fn get(&self, field: &Field) -> Option<&Value> {
		self.0.get(field)
	}

	/// Looks a value up by column name. Prefer [`get`](Row::get) when the
	/// field handle is at hand.
	pub fn get_by_name(&self, name: &str) -> Option<&Value> {
		self.0.iter().find(|(field, _)| field.name == name).map(|(_, value)| value)
	}

	pub fn contains(&self, field: &Field) -> bool {
		self.0.contains_key(field)
	}

	pub fn fields(&self) -> impl Iterator<Item = &Field> {
		self.0.keys()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Field, &Value)> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}
}

impl FromIterator<(Field, Value)> for Row {
	fn from_iter<T: IntoIterator<Item = (Field, Value)>>(iter: T) -> Self {
		Row(iter.into_iter().collect())
	}
}

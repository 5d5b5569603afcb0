// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Interning of field and schema identities.
//!
//! A [`Field`] is compared and hashed by identity, never by name. Tables,
//! rows and result sets all key their values by the interned handle, so the
//! same `(type, name)` pair must always resolve to the same allocation.

use std::{
	fmt::{Debug, Display, Formatter},
	hash::{Hash, Hasher},
	ops::Deref,
	sync::{Arc, OnceLock},
};

use dashmap::DashMap;

use crate::value::{GetType, Type};

#[derive(Debug)]
pub struct SchemaDef {
	pub name: String,
}

/// Identity of a table, unique by name within a registry.
#[derive(Clone)]
pub struct SchemaId(Arc<SchemaDef>);

#[derive(Debug)]
pub struct FieldDef {
	pub r#type: Type,
	pub name: String,
	pub schema: Option<SchemaId>,
}

/// Interned handle of a named, typed column.
#[derive(Clone)]
pub struct Field(Arc<FieldDef>);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FieldKey {
	schema: Option<String>,
	r#type: Type,
	name: String,
}

/// Name to identity table for fields and schemas.
///
/// `Registry::global()` is the process wide instance used by `Field::alloc`
/// and `SchemaId::alloc`. It is created on first use and never torn down.
/// Separate registries are independent: handles from different registries
/// never compare equal.
#[derive(Default)]
pub struct Registry {
	fields: DashMap<FieldKey, Field>,
	schemas: DashMap<String, SchemaId>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn global() -> &'static Registry {
		static GLOBAL: OnceLock<Registry> = OnceLock::new();
		GLOBAL.get_or_init(Registry::new)
	}

	pub fn field(&self, r#type: Type, name: impl Into<String>) -> Field {
		self.intern_field(None, r#type, name.into())
	}

	pub fn field_in(&self, schema: &SchemaId, r#type: Type, name: impl Into<String>) -> Field {
		self.intern_field(Some(schema.clone()), r#type, name.into())
	}

	pub fn schema(&self, name: impl Into<String>) -> SchemaId {
		let name = name.into();
		if let Some(existing) = self.schemas.get(&name) {
			return existing.value().clone();
		}
		self.schemas
			.entry(name.clone())
			.or_insert_with(|| SchemaId(Arc::new(SchemaDef { name })))
			.value()
			.clone()
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	fn intern_field(&self, schema: Option<SchemaId>, r#type: Type, name: String) -> Field {
		let key = FieldKey {
			schema: schema.as_ref().map(|s| s.name.clone()),
			r#type,
			name,
		};
		if let Some(existing) = self.fields.get(&key) {
			return existing.value().clone();
		}
		let name = key.name.clone();
		self.fields
			.entry(key)
			.or_insert_with(|| Field(Arc::new(FieldDef { r#type, name, schema })))
			.value()
			.clone()
	}
}

impl Field {
	pub fn alloc(r#type: Type, name: impl Into<String>) -> Field {
		Registry::global().field(r#type, name)
	}

	pub fn alloc_in(schema: &SchemaId, r#type: Type, name: impl Into<String>) -> Field {
		Registry::global().field_in(schema, r#type, name)
	}

	/// Allocates the field typed after the native Rust type `T`.
	pub fn of<T: GetType>(name: impl Into<String>) -> Field {
		Self::alloc(T::get_type(), name)
	}

	pub fn def(&self) -> &FieldDef {
		&self.0
	}
}

impl Deref for Field {
	type Target = FieldDef;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq for Field {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for Field {}

impl Hash for Field {
	fn hash<H: Hasher>(&self, state: &mut H) {
		Arc::as_ptr(&self.0).hash(state)
	}
}

impl Debug for Field {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Field({}: {})", self.0.name, self.0.r#type)
	}
}

impl Display for Field {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0.name)
	}
}

impl SchemaId {
	pub fn alloc(name: impl Into<String>) -> SchemaId {
		Registry::global().schema(name)
	}
}

impl Deref for SchemaId {
	type Target = SchemaDef;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq for SchemaId {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for SchemaId {}

impl Hash for SchemaId {
	fn hash<H: Hasher>(&self, state: &mut H) {
		Arc::as_ptr(&self.0).hash(state)
	}
}

impl Debug for SchemaId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "SchemaId({})", self.0.name)
	}
}

impl Display for SchemaId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0.name)
	}
}

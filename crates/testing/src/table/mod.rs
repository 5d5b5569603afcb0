// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Small in-memory tables with call counters, used to observe how the engine
//! drives the adapter.

mod failing;
mod path_len;
mod process;
mod signature;
mod t1;
mod users;

use std::{
	collections::VecDeque,
	sync::atomic::{AtomicU32, Ordering},
};

pub use failing::FailingTable;
pub use path_len::PathLenTable;
pub use process::ProcessTable;
pub use signature::SignatureTable;
pub use t1::T1Table;
pub use users::UsersTable;

use tabula_core::QueryContext;

/// Number of `prepare` and `next` calls a table received.
#[derive(Debug, Default)]
pub struct Counters {
	prepare: AtomicU32,
	next: AtomicU32,
}

impl Counters {
	pub fn prepare_count(&self) -> u32 {
		self.prepare.load(Ordering::SeqCst)
	}

	pub fn next_count(&self) -> u32 {
		self.next.load(Ordering::SeqCst)
	}

	pub fn reset(&self) {
		self.prepare.store(0, Ordering::SeqCst);
		self.next.store(0, Ordering::SeqCst);
	}

	pub(crate) fn prepared(&self) {
		self.prepare.fetch_add(1, Ordering::SeqCst);
	}

	pub(crate) fn advanced(&self) {
		self.next.fetch_add(1, Ordering::SeqCst);
	}
}

/// Rows a statement still has to produce, kept as query state.
struct Scan<T: Send + 'static> {
	rows: VecDeque<T>,
}

fn start_scan<T: Send + 'static>(ctx: &mut QueryContext, rows: impl IntoIterator<Item = T>) {
	ctx.set_state(Scan {
		rows: rows.into_iter().collect(),
	});
}

fn next_in_scan<T: Send + 'static>(ctx: &mut QueryContext) -> Option<T> {
	ctx.state_mut::<Scan<T>>()?.rows.pop_front()
}

/// Prefix of a LIKE pattern up to its first wildcard.
fn like_prefix(pattern: &str) -> &str {
	match pattern.find(['%', '_']) {
		Some(end) => &pattern[..end],
		None => pattern,
	}
}

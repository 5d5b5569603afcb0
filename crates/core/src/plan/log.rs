// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use parking_lot::Mutex;
use tabula_type::Diagnostic;

/// Planning diagnostics recorded while a statement is prepared.
///
/// The engine discards the message of a rejected plan, so rejected plans are
/// recorded here and reported if the statement ends up without any usable
/// plan.
#[derive(Debug, Default)]
pub struct PlanningLog {
	entries: Mutex<Vec<Diagnostic>>,
}

impl PlanningLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `diagnostic` unless an identical one is already present.
	pub fn record(&self, diagnostic: Diagnostic) {
		let mut entries = self.entries.lock();
		if !entries.contains(&diagnostic) {
			entries.push(diagnostic);
		}
	}

	pub fn drain(&self) -> Vec<Diagnostic> {
		std::mem::take(&mut *self.entries.lock())
	}

	pub fn clear(&self) {
		self.entries.lock().clear();
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

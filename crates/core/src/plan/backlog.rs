// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::{BTreeMap, HashSet},
	sync::Arc,
};

use tabula_type::Field;
use tracing::{debug, trace};

use super::{Plan, PlanId, PlannedConstraint};

pub const DEFAULT_PLAN_BACKLOG: usize = 20;

/// Recently minted plans of one table, keyed by plan id.
///
/// Ids increase monotonically. Minting plan `n` evicts every plan with an id
/// at or below `n - window`, so a plan the engine keeps using after `window`
/// newer plans were minted is no longer found.
#[derive(Debug)]
pub struct PlanBacklog {
	window: usize,
	next_id: PlanId,
	plans: BTreeMap<PlanId, Arc<Plan>>,
}

impl PlanBacklog {
	pub fn new(window: usize) -> Self {
		Self {
			window: window.max(1),
			next_id: 1,
			plans: BTreeMap::new(),
		}
	}

	pub fn mint(&mut self, constraints: Vec<PlannedConstraint>, requested: HashSet<Field>) -> Arc<Plan> {
		let id = self.next_id;
		self.next_id = match self.next_id.checked_add(1) {
			Some(next) => next,
			None => {
				debug!("plan ids exhausted, restarting backlog");
				self.plans.clear();
				1
			}
		};

		let plan = Arc::new(Plan { id, constraints, requested });
		self.plans.insert(id, plan.clone());
		self.evict(id);

		trace!(plan = id, constraints = plan.constraints.len(), "plan minted");
		plan
	}

	pub fn get(&self, id: PlanId) -> Option<Arc<Plan>> {
		self.plans.get(&id).cloned()
	}

	pub fn window(&self) -> usize {
		self.window
	}

	pub fn len(&self) -> usize {
		self.plans.len()
	}

	pub fn is_empty(&self) -> bool {
		self.plans.is_empty()
	}

	fn evict(&mut self, newest: PlanId) {
		let oldest_kept = newest.saturating_sub(self.window as PlanId - 1);
		while let Some(entry) = self.plans.first_entry() {
			if *entry.key() >= oldest_kept {
				break;
			}
			trace!(plan = *entry.key(), "plan evicted");
			entry.remove();
		}
	}
}

impl Default for PlanBacklog {
	fn default() -> Self {
		Self::new(DEFAULT_PLAN_BACKLOG)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ids_are_monotonic() {
		let mut backlog = PlanBacklog::default();
		let first = backlog.mint(vec![], HashSet::new());
		let second = backlog.mint(vec![], HashSet::new());
		assert_eq!(first.id, 1);
		assert_eq!(second.id, 2);
		assert_eq!(backlog.get(1).unwrap().id, 1);
	}

	#[test]
	fn test_only_last_window_plans_resolve() {
		let mut backlog = PlanBacklog::new(20);
		for _ in 0..25 {
			backlog.mint(vec![], HashSet::new());
		}

		assert_eq!(backlog.len(), 20);
		for id in 1..=5 {
			assert!(backlog.get(id).is_none(), "plan {} should be evicted", id);
		}
		for id in 6..=25 {
			assert!(backlog.get(id).is_some(), "plan {} should be kept", id);
		}
	}

	#[test]
	fn test_window_of_one() {
		let mut backlog = PlanBacklog::new(0);
		assert_eq!(backlog.window(), 1);
		backlog.mint(vec![], HashSet::new());
		backlog.mint(vec![], HashSet::new());
		assert!(backlog.get(1).is_none());
		assert!(backlog.get(2).is_some());
	}

	#[test]
	fn test_unknown_id() {
		let backlog = PlanBacklog::default();
		assert!(backlog.is_empty());
		assert!(backlog.get(42).is_none());
	}
}

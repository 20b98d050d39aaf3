//! Per-session unit storage.
//!
//! The registry is the authoritative mapping of unit id to mutable combat
//! state for one session. Iteration is always done over sorted ids so that
//! repeated runs of identical input produce identical results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;
use crate::units::{Side, Unit, UnitId};

/// Storage for all units in a combat session.
///
/// Uses a `HashMap` for O(1) lookup by id, with deterministic iteration via
/// sorted keys when resolving ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitRegistry {
    units: HashMap<UnitId, Unit>,
}

impl UnitRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
        }
    }

    /// Build a registry from two rosters, copying every unit.
    ///
    /// Later mutation of the caller's unit values does not affect the
    /// session. Duplicate ids are not rejected; the later insert wins and
    /// breaks per-id lookups for the shadowed unit, so callers should avoid
    /// them.
    #[must_use]
    pub fn from_rosters(player_units: &[Unit], enemy_units: &[Unit]) -> Self {
        let mut units = HashMap::with_capacity(player_units.len() + enemy_units.len());
        for unit in player_units.iter().chain(enemy_units) {
            units.insert(unit.id.clone(), unit.clone());
        }
        Self { units }
    }

    /// Get a unit by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Get a mutable reference to a unit by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Unit> {
        self.units.get_mut(id)
    }

    /// Check if a unit exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.units.contains_key(id)
    }

    /// Get the number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get sorted unit ids for deterministic iteration.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<UnitId> {
        let mut ids: Vec<_> = self.units.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all units (not in deterministic order).
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Ids of living units on the given side, in ascending id order.
    #[must_use]
    pub fn living_ids(&self, side: Side) -> Vec<UnitId> {
        let mut ids: Vec<_> = self
            .units
            .values()
            .filter(|u| u.side == side && u.is_alive())
            .map(|u| u.id.clone())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Whether any unit on the given side is still alive.
    #[must_use]
    pub fn any_alive(&self, side: Side) -> bool {
        self.units
            .values()
            .any(|u| u.side == side && u.is_alive())
    }

    /// Whether any unit other than `excluding_id` holds the given tile.
    ///
    /// Occupancy ignores hit points: a defeated unit's corpse still blocks
    /// its tile.
    #[must_use]
    pub fn is_occupied(&self, pos: GridPos, excluding_id: &str) -> bool {
        self.units
            .values()
            .any(|u| u.id != excluding_id && u.position == Some(pos))
    }
}

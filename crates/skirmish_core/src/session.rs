//! The combat session: action processing, tick simulation, win detection.
//!
//! A session owns the full mutable state of one encounter. All operations
//! are deterministic:
//! - Consistent iteration order (sorted unit ids)
//! - Turn order ties broken by ascending unit id
//! - Same inputs always produce same outputs
//!
//! # Example
//!
//! ```
//! use skirmish_core::prelude::*;
//!
//! # fn roster() -> (Vec<Unit>, Vec<Unit>) {
//! #     let player = Unit {
//! #         id: "p1".into(), kind: UnitKind::Warrior, name: "Warrior".into(),
//! #         hp: 100, max_hp: 100, attack: 15, defense: 10, speed: 1.0,
//! #         position: Some(GridPos::new(2, 2)), side: Side::Player,
//! #     };
//! #     let enemy = Unit {
//! #         id: "e1".into(), kind: UnitKind::Warrior, name: "Goblin".into(),
//! #         hp: 80, max_hp: 80, attack: 12, defense: 8, speed: 1.1,
//! #         position: Some(GridPos::new(2, 8)), side: Side::Enemy,
//! #     };
//! #     (vec![player], vec![enemy])
//! # }
//! let (player_units, enemy_units) = roster();
//! let mut session = CombatSession::new("demo", &player_units, &enemy_units);
//!
//! session.tick();
//! assert_eq!(session.get_tick(), 1);
//! assert_eq!(session.status(), BattleStatus::Active);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionError, ActionOutcome};
use crate::combat::calculate_damage;
use crate::config::BattleConfig;
use crate::error::{CoreError, Result};
use crate::grid::GridPos;
use crate::registry::UnitRegistry;
use crate::units::{Side, Unit, UnitId};

/// Status of a combat encounter.
///
/// `Active` is the only state that accepts actions and ticks; the other
/// three are terminal with no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    /// Combat is in progress.
    Active,
    /// All enemy units defeated.
    PlayerWon,
    /// All player units defeated.
    EnemyWon,
    /// The tick ceiling was reached with both sides still standing.
    Draw,
}

impl BattleStatus {
    /// Whether this status ends the encounter.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, BattleStatus::Active)
    }
}

/// A point-in-time view of a session.
///
/// Contains everything needed to render the battlefield or persist the
/// encounter. A session reconstructed from a snapshot via
/// [`CombatSession::from_snapshot`] continues identically to the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session identifier.
    pub session_id: String,
    /// Current status.
    pub status: BattleStatus,
    /// Current tick count.
    pub tick: u64,
    /// All units, in ascending id order.
    pub units: Vec<Unit>,
    /// Action-log entries accumulated since the last tick.
    pub pending_actions: Vec<String>,
}

/// The full mutable state of one combat encounter.
///
/// Created once from two rosters, mutated only through
/// [`process_action`](Self::process_action) and [`tick`](Self::tick), both
/// of which either fully commit or leave the session exactly as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSession {
    /// Session identifier.
    id: String,
    /// Monotonically increasing tick counter.
    tick: u64,
    /// Current status.
    status: BattleStatus,
    /// All units in the encounter.
    units: UnitRegistry,
    /// Human-readable action descriptions, cleared every tick.
    action_log: Vec<String>,
    /// Battle configuration.
    config: BattleConfig,
}

impl CombatSession {
    /// Create a session from two rosters with the default configuration.
    ///
    /// Units are copied into the session; later mutation of the caller's
    /// unit values does not affect the encounter.
    #[must_use]
    pub fn new(id: impl Into<String>, player_units: &[Unit], enemy_units: &[Unit]) -> Self {
        Self::with_config(id, player_units, enemy_units, BattleConfig::default())
    }

    /// Create a session with an explicit configuration.
    #[must_use]
    pub fn with_config(
        id: impl Into<String>,
        player_units: &[Unit],
        enemy_units: &[Unit],
        config: BattleConfig,
    ) -> Self {
        Self {
            id: id.into(),
            tick: 0,
            status: BattleStatus::Active,
            units: UnitRegistry::from_rosters(player_units, enemy_units),
            action_log: Vec::new(),
            config,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current tick count.
    #[must_use]
    pub const fn get_tick(&self) -> u64 {
        self.tick
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> BattleStatus {
        self.status
    }

    /// The unit registry.
    #[must_use]
    pub const fn units(&self) -> &UnitRegistry {
        &self.units
    }

    /// The battle configuration.
    #[must_use]
    pub const fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// A point-in-time view of the session, units in ascending id order.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let units = self
            .units
            .sorted_ids()
            .into_iter()
            .filter_map(|id| self.units.get(&id).cloned())
            .collect();

        Snapshot {
            session_id: self.id.clone(),
            status: self.status,
            tick: self.tick,
            units,
            pending_actions: self.action_log.clone(),
        }
    }

    /// Process one player action.
    ///
    /// Every outcome is soft: rejections carry the unchanged current
    /// snapshot, a false success flag, and a human-readable message.
    pub fn process_action(&mut self, action: &Action) -> ActionOutcome {
        if self.status.is_terminal() {
            return ActionOutcome::rejected(&ActionError::CombatEnded, self.snapshot());
        }

        match action {
            Action::PlaceUnit { unit_id, position } => self.place_unit(unit_id, *position),
            Action::CastSpell { .. } => {
                ActionOutcome::rejected(&ActionError::SpellsNotImplemented, self.snapshot())
            }
            Action::UseAbility { .. } => {
                ActionOutcome::rejected(&ActionError::AbilitiesNotImplemented, self.snapshot())
            }
        }
    }

    /// Deploy a reserve unit onto the board.
    fn place_unit(&mut self, unit_id: &str, position: GridPos) -> ActionOutcome {
        let name = match self.units.get(unit_id) {
            None => return ActionOutcome::rejected(&ActionError::UnknownUnit, self.snapshot()),
            Some(unit) if unit.side != Side::Player => {
                return ActionOutcome::rejected(&ActionError::NotOwned, self.snapshot());
            }
            Some(unit) => unit.name.clone(),
        };

        if !self.config.in_bounds(position) {
            return ActionOutcome::rejected(&ActionError::OutOfBounds, self.snapshot());
        }
        if !self.config.in_deployment_zone(Side::Player, position) {
            return ActionOutcome::rejected(&ActionError::OutsideZone, self.snapshot());
        }
        if self.units.is_occupied(position, unit_id) {
            return ActionOutcome::rejected(&ActionError::Occupied, self.snapshot());
        }

        if let Some(unit) = self.units.get_mut(unit_id) {
            unit.position = Some(position);
        }
        self.action_log.push(format!("Placed {name}"));
        tracing::debug!(session = %self.id, unit = unit_id, x = position.x, y = position.y, "Unit placed");

        ActionOutcome::accepted(
            format!("Placed {name} at ({}, {})", position.x, position.y),
            self.snapshot(),
        )
    }

    /// Advance the simulation by one tick.
    ///
    /// No-op on a terminal session. Otherwise every deployed, living unit
    /// acts once in turn order (descending speed, ties by ascending id):
    /// it attacks the nearest living opposing unit if in range, or steps
    /// one tile toward it along the dominant axis. Win conditions are
    /// checked before anyone acts and again over the final population.
    pub fn tick(&mut self) {
        if self.status.is_terminal() {
            return;
        }

        self.tick += 1;

        // Living rosters at tick start. Units killed mid-tick are excluded
        // from targeting by a liveness re-check at evaluation time.
        let player_living = self.units.living_ids(Side::Player);
        let enemy_living = self.units.living_ids(Side::Enemy);

        if enemy_living.is_empty() {
            self.status = BattleStatus::PlayerWon;
            tracing::debug!(session = %self.id, tick = self.tick, "Player won");
            return;
        }
        if player_living.is_empty() {
            self.status = BattleStatus::EnemyWon;
            tracing::debug!(session = %self.id, tick = self.tick, "Enemy won");
            return;
        }

        for actor_id in self.turn_order() {
            let (side, pos, range) = match self.units.get(&actor_id) {
                Some(unit) if unit.is_alive() => match unit.position {
                    Some(pos) => (unit.side, pos, unit.kind.attack_range()),
                    None => continue,
                },
                _ => continue,
            };

            let candidates = match side {
                Side::Player => &enemy_living,
                Side::Enemy => &player_living,
            };

            let Some((target_id, target_pos)) = self.nearest_living(pos, candidates) else {
                continue;
            };

            if pos.distance(target_pos) <= range {
                self.attack(&actor_id, &target_id);
            } else {
                self.advance(&actor_id, pos, target_pos);
            }
        }

        self.action_log.clear();

        // Win conditions over the current full population.
        if !self.units.any_alive(Side::Enemy) {
            self.status = BattleStatus::PlayerWon;
        } else if !self.units.any_alive(Side::Player) {
            self.status = BattleStatus::EnemyWon;
        } else if self.tick >= self.config.max_ticks {
            self.status = BattleStatus::Draw;
        }

        #[cfg(debug_assertions)]
        {
            let hash = self.state_hash();
            tracing::debug!(session = %self.id, tick = self.tick, state_hash = hash, "Tick complete");
        }
    }

    /// All unit ids sorted by descending speed, ties by ascending id.
    fn turn_order(&self) -> Vec<UnitId> {
        let mut order: Vec<(f64, UnitId)> = self
            .units
            .iter()
            .map(|unit| (unit.speed, unit.id.clone()))
            .collect();
        order.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        order.into_iter().map(|(_, id)| id).collect()
    }

    /// The nearest living, deployed candidate by Euclidean distance.
    ///
    /// Candidates are scanned in ascending id order with a strict
    /// comparison, so the lowest id wins at equal distance.
    fn nearest_living(&self, from: GridPos, candidates: &[UnitId]) -> Option<(UnitId, GridPos)> {
        let mut nearest: Option<(UnitId, GridPos)> = None;
        let mut min_distance = f64::INFINITY;

        for id in candidates {
            let Some(unit) = self.units.get(id) else {
                continue;
            };
            if !unit.is_alive() {
                continue;
            }
            let Some(pos) = unit.position else {
                continue;
            };

            let distance = from.distance(pos);
            if distance < min_distance {
                min_distance = distance;
                nearest = Some((id.clone(), pos));
            }
        }

        nearest
    }

    /// Resolve one attack, clamping the target's hit points at zero.
    fn attack(&mut self, attacker_id: &str, target_id: &str) {
        let Some(attacker) = self.units.get(attacker_id).cloned() else {
            return;
        };
        let Some(target) = self.units.get_mut(target_id) else {
            return;
        };

        let damage = calculate_damage(&attacker, target);
        target.apply_damage(damage);
        tracing::trace!(
            session = %self.id,
            attacker = attacker_id,
            target = target_id,
            damage,
            target_hp = target.hp,
            "Attack resolved"
        );
    }

    /// Step one tile toward the target; blocked tiles (dead or alive
    /// occupant) leave the unit in place.
    fn advance(&mut self, actor_id: &str, from: GridPos, target_pos: GridPos) {
        let dest = from.step_toward(target_pos);
        if self.units.is_occupied(dest, actor_id) {
            return;
        }
        if let Some(unit) = self.units.get_mut(actor_id) {
            unit.position = Some(dest);
            tracing::trace!(session = %self.id, unit = actor_id, x = dest.x, y = dest.y, "Unit moved");
        }
    }

    /// Reconstruct a live session from a snapshot.
    ///
    /// The persistence layer serializes snapshots verbatim; this rebuilds
    /// an equivalent session that continues identically to the original.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, config: BattleConfig) -> Self {
        let (player_units, enemy_units): (Vec<Unit>, Vec<Unit>) = snapshot
            .units
            .iter()
            .cloned()
            .partition(|unit| unit.side == Side::Player);

        Self {
            id: snapshot.session_id.clone(),
            tick: snapshot.tick,
            status: snapshot.status,
            units: UnitRegistry::from_rosters(&player_units, &enemy_units),
            action_log: snapshot.pending_actions.clone(),
            config,
        }
    }

    /// Serialize the session state for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialize`] if serialization fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CoreError::Serialize(e.to_string()))
    }

    /// Deserialize session state from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Deserialize`] if the bytes are not a valid
    /// serialized session.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data).map_err(|e| CoreError::Deserialize(e.to_string()))
    }

    /// Calculate a hash of the current session state.
    ///
    /// Two sessions with identical state produce identical hashes; used by
    /// determinism tests.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.tick.hash(&mut hasher);
        self.status.hash(&mut hasher);

        let ids = self.units.sorted_ids();
        ids.len().hash(&mut hasher);

        for id in ids {
            if let Some(unit) = self.units.get(&id) {
                unit.id.hash(&mut hasher);
                unit.kind.hash(&mut hasher);
                unit.side.hash(&mut hasher);
                unit.hp.hash(&mut hasher);
                unit.max_hp.hash(&mut hasher);
                unit.attack.hash(&mut hasher);
                unit.defense.hash(&mut hasher);
                unit.speed.to_bits().hash(&mut hasher);
                unit.position.hash(&mut hasher);
            }
        }

        hasher.finish()
    }
}

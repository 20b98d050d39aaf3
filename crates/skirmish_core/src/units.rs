//! Unit definitions: kinds, sides, and per-unit combat stats.
//!
//! Units are pure data with no behavior beyond small stat queries. All
//! mutation happens through the session's action processor and tick
//! simulator.

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;

/// Unique identifier for units within one session.
pub type UnitId = String;

/// The roster a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Player-controlled units. Deploy near the bottom of the board.
    Player,
    /// Enemy-controlled units. Deploy near the top of the board.
    Enemy,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Battlefield role of a unit.
///
/// The kind determines attack range; all other stats are carried per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Melee front-liner.
    Warrior,
    /// Long-range bow attacker.
    Archer,
    /// Mid-range spell attacker.
    Mage,
    /// Armored melee unit.
    Knight,
    /// Short-range support unit.
    Healer,
}

impl UnitKind {
    /// Attack range in grid units.
    ///
    /// Melee kinds reach adjacent tiles including diagonals (1.5); ranged
    /// kinds strike across the board.
    #[must_use]
    pub const fn attack_range(self) -> f64 {
        match self {
            UnitKind::Warrior | UnitKind::Knight => 1.5,
            UnitKind::Archer => 5.0,
            UnitKind::Mage => 4.0,
            UnitKind::Healer => 3.0,
        }
    }
}

/// A combat unit.
///
/// Hit points, attack, and defense are integers; speed is a real number
/// used only for turn ordering. A unit with no position is undeployed and
/// never moves or attacks, but still occupies a roster slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier within the session.
    pub id: UnitId,
    /// Battlefield role.
    pub kind: UnitKind,
    /// Display name.
    pub name: String,
    /// Current hit points. Zero means defeated.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Attack power.
    pub attack: u32,
    /// Defense value. Halved (integer floor) when absorbing damage.
    pub defense: u32,
    /// Acting speed. Higher speed acts earlier each tick.
    pub speed: f64,
    /// Current grid position, if deployed.
    pub position: Option<GridPos>,
    /// The roster this unit fights for.
    pub side: Side,
}

impl Unit {
    /// Whether the unit still has hit points left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Whether the unit has been placed on the board.
    #[must_use]
    pub const fn is_deployed(&self) -> bool {
        self.position.is_some()
    }

    /// Apply incoming damage, clamping hit points at zero.
    pub fn apply_damage(&mut self, damage: u32) {
        self.hp = self.hp.saturating_sub(damage);
    }
}

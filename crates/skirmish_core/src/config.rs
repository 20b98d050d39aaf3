//! Battle configuration.
//!
//! Board dimensions, deployment zones, and the tick ceiling. Defaults match
//! the reference battlefield; overrides can be deserialized from RON.
//!
//! # Example RON
//!
//! ```ron
//! BattleConfig(
//!     grid_width: 8,
//!     grid_height: 10,
//!     player_zone_max_y: 3,
//!     enemy_zone_min_y: 7,
//!     max_ticks: 1000,
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::grid::GridPos;
use crate::units::Side;

/// Configuration for one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Board width in tiles.
    pub grid_width: i32,
    /// Board height in tiles.
    pub grid_height: i32,
    /// Highest row the player may deploy on (inclusive).
    pub player_zone_max_y: i32,
    /// Lowest row the enemy may deploy on (inclusive).
    pub enemy_zone_min_y: i32,
    /// Tick count at which a still-undecided battle ends in a draw.
    pub max_ticks: u64,
    /// Nominal wall-clock duration of one tick, in milliseconds.
    ///
    /// Informational only: the core never sleeps. Callers pacing a battle
    /// for presentation use this value.
    pub tick_duration_ms: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            grid_width: 8,
            grid_height: 10,
            player_zone_max_y: 3,
            enemy_zone_min_y: 7,
            max_ticks: 1000,
            tick_duration_ms: 500,
        }
    }
}

impl BattleConfig {
    /// Whether a position lies on the board.
    #[must_use]
    pub const fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.grid_width && pos.y >= 0 && pos.y < self.grid_height
    }

    /// Whether a position lies in the deployment zone for the given side.
    ///
    /// The player deploys on low rows, the enemy on high rows. Only the row
    /// is constrained here; board bounds are checked separately.
    #[must_use]
    pub const fn in_deployment_zone(&self, side: Side, pos: GridPos) -> bool {
        match side {
            Side::Player => pos.y <= self.player_zone_max_y,
            Side::Enemy => pos.y >= self.enemy_zone_min_y,
        }
    }

    /// Parse a configuration from RON text.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] when the text is not valid RON
    /// for this structure.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

//! Player command types and action outcomes.
//!
//! Commands arrive as a tagged union, one variant per kind, each carrying
//! only the fields that kind requires. Submitted over a wire as JSON they
//! look like:
//!
//! ```json
//! {"kind": "place_unit", "unit_id": "p1", "position": {"x": 2, "y": 1}}
//! ```
//!
//! Every outcome is soft: a success flag, a human-readable message, and the
//! session snapshot after the attempt. Rejections never mutate the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::GridPos;
use crate::session::Snapshot;
use crate::units::UnitId;

/// A player command submitted to an active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Deploy a reserve unit onto the board.
    PlaceUnit {
        /// The unit to place.
        unit_id: UnitId,
        /// Target tile.
        position: GridPos,
    },

    /// Cast a spell. Placeholder: the spell system is not implemented.
    CastSpell {
        /// The spell to cast.
        spell_id: String,
        /// Optional target tile.
        #[serde(default)]
        target: Option<GridPos>,
    },

    /// Use a unit ability. Placeholder: the ability system is not implemented.
    UseAbility {
        /// The ability to use.
        ability_id: String,
        /// Optional unit performing the ability.
        #[serde(default)]
        unit_id: Option<UnitId>,
    },
}

/// Why an action was rejected.
///
/// The display text is the message carried back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The session has already reached a terminal status.
    #[error("Combat has ended")]
    CombatEnded,

    /// The referenced unit does not exist in this session.
    #[error("Unit not found")]
    UnknownUnit,

    /// The referenced unit belongs to the enemy roster.
    #[error("Cannot place enemy units")]
    NotOwned,

    /// The target tile is off the board.
    #[error("Position is outside the battlefield")]
    OutOfBounds,

    /// The target row is outside the player's deployment zone.
    #[error("Cannot deploy outside player zone")]
    OutsideZone,

    /// Another unit (dead or alive) already holds the target tile.
    #[error("Position already occupied")]
    Occupied,

    /// The spell system exists only as an extension point.
    #[error("Spell system not yet implemented")]
    SpellsNotImplemented,

    /// The ability system exists only as an extension point.
    #[error("Ability system not yet implemented")]
    AbilitiesNotImplemented,
}

/// The result of processing one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether the action was accepted and applied.
    pub success: bool,
    /// Human-readable result message.
    pub message: String,
    /// Session snapshot after the attempt (unchanged on rejection).
    pub snapshot: Snapshot,
}

impl ActionOutcome {
    /// Build a successful outcome.
    #[must_use]
    pub fn accepted(message: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            success: true,
            message: message.into(),
            snapshot,
        }
    }

    /// Build a rejection outcome from an [`ActionError`].
    #[must_use]
    pub fn rejected(error: &ActionError, snapshot: Snapshot) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_unit_wire_shape() {
        let json = r#"{"kind": "place_unit", "unit_id": "p1", "position": {"x": 2, "y": 1}}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            Action::PlaceUnit {
                unit_id: "p1".into(),
                position: GridPos::new(2, 1),
            }
        );
    }

    #[test]
    fn test_cast_spell_target_is_optional() {
        let json = r#"{"kind": "cast_spell", "spell_id": "fireball"}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            Action::CastSpell {
                spell_id: "fireball".into(),
                target: None,
            }
        );
    }

    #[test]
    fn test_missing_required_field_is_a_wire_error() {
        // place_unit without a position cannot be constructed at all.
        let json = r#"{"kind": "place_unit", "unit_id": "p1"}"#;
        assert!(serde_json::from_str::<Action>(json).is_err());
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(ActionError::CombatEnded.to_string(), "Combat has ended");
        assert_eq!(ActionError::UnknownUnit.to_string(), "Unit not found");
        assert_eq!(
            ActionError::NotOwned.to_string(),
            "Cannot place enemy units"
        );
        assert_eq!(
            ActionError::OutsideZone.to_string(),
            "Cannot deploy outside player zone"
        );
        assert_eq!(
            ActionError::Occupied.to_string(),
            "Position already occupied"
        );
    }
}

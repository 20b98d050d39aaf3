//! Damage resolution.
//!
//! Damage is a pure function of the attacker's attack and the defender's
//! defense: `attack - defense / 2` with integer floor division on the
//! defense term, never below [`MIN_DAMAGE`].

use crate::units::Unit;

/// Minimum damage floor - attacks always deal at least 1 damage.
pub const MIN_DAMAGE: u32 = 1;

/// Calculate the damage dealt by `attacker` to `defender`.
///
/// ```
/// use skirmish_core::combat::calculate_damage;
/// use skirmish_core::grid::GridPos;
/// use skirmish_core::units::{Side, Unit, UnitKind};
///
/// let attacker = Unit {
///     id: "a".into(),
///     kind: UnitKind::Warrior,
///     name: "Attacker".into(),
///     hp: 100,
///     max_hp: 100,
///     attack: 20,
///     defense: 0,
///     speed: 1.0,
///     position: Some(GridPos::new(0, 0)),
///     side: Side::Player,
/// };
/// let defender = Unit { id: "d".into(), defense: 10, side: Side::Enemy, ..attacker.clone() };
/// assert_eq!(calculate_damage(&attacker, &defender), 15);
/// ```
#[must_use]
pub fn calculate_damage(attacker: &Unit, defender: &Unit) -> u32 {
    let base = i64::from(attacker.attack) - i64::from(defender.defense) / 2;
    if base < i64::from(MIN_DAMAGE) {
        MIN_DAMAGE
    } else {
        // base fits in u32: it is at most attacker.attack.
        base as u32
    }
}

//! Test fixtures and helpers.
//!
//! Pre-built units and rosters for consistent testing across crates.

use skirmish_core::grid::GridPos;
use skirmish_core::units::{Side, Unit, UnitKind};

/// Build a unit with sensible stats for its kind.
///
/// Stats are deliberately small round numbers so damage math stays easy to
/// verify by hand in assertions.
#[must_use]
pub fn unit(id: &str, kind: UnitKind, side: Side, position: Option<GridPos>) -> Unit {
    let (hp, attack, defense, speed) = match kind {
        UnitKind::Warrior => (100, 15, 10, 1.0),
        UnitKind::Archer => (60, 20, 5, 1.2),
        UnitKind::Mage => (50, 25, 3, 1.1),
        UnitKind::Knight => (140, 12, 20, 0.8),
        UnitKind::Healer => (70, 8, 6, 1.0),
    };

    Unit {
        id: id.into(),
        kind,
        name: id.to_ascii_uppercase(),
        hp,
        max_hp: hp,
        attack,
        defense,
        speed,
        position,
        side,
    }
}

/// A small deployed player roster: a warrior and an archer.
#[must_use]
pub fn player_squad() -> Vec<Unit> {
    vec![
        unit(
            "p1",
            UnitKind::Warrior,
            Side::Player,
            Some(GridPos::new(2, 2)),
        ),
        unit(
            "p2",
            UnitKind::Archer,
            Side::Player,
            Some(GridPos::new(4, 2)),
        ),
    ]
}

/// A small deployed enemy roster: two warriors on the far rows.
#[must_use]
pub fn enemy_squad() -> Vec<Unit> {
    vec![
        unit(
            "e1",
            UnitKind::Warrior,
            Side::Enemy,
            Some(GridPos::new(3, 7)),
        ),
        unit(
            "e2",
            UnitKind::Warrior,
            Side::Enemy,
            Some(GridPos::new(5, 8)),
        ),
    ]
}

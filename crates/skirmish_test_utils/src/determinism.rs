//! Determinism test harness.
//!
//! Runs the same battle twice from identical rosters and asserts the state
//! hashes stay in lockstep tick for tick.

use skirmish_core::session::CombatSession;
use skirmish_core::units::Unit;

/// Run two sessions from identical rosters and compare hashes every tick.
///
/// Returns the tick at which the hashes first diverged, or `None` when the
/// runs stayed identical for all `ticks`.
#[must_use]
pub fn first_divergence(
    player_units: &[Unit],
    enemy_units: &[Unit],
    ticks: u64,
) -> Option<u64> {
    let mut a = CombatSession::new("determinism-a", player_units, enemy_units);
    let mut b = CombatSession::new("determinism-a", player_units, enemy_units);

    for _ in 0..ticks {
        a.tick();
        b.tick();
        if a.state_hash() != b.state_hash() {
            return Some(a.get_tick());
        }
    }

    None
}

/// Assert that identical rosters simulate identically for `ticks` ticks.
///
/// # Panics
///
/// Panics with the diverging tick when the two runs disagree.
pub fn assert_deterministic(player_units: &[Unit], enemy_units: &[Unit], ticks: u64) {
    if let Some(tick) = first_divergence(player_units, enemy_units, ticks) {
        panic!("simulation diverged at tick {tick}");
    }
}

//! Simulation benchmarks for skirmish_core.
//!
//! Run with: `cargo bench -p skirmish_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skirmish_core::session::CombatSession;
use skirmish_test_utils::fixtures::{enemy_squad, player_squad};

/// Runs a full battle from fresh rosters to a terminal status.
fn run_battle() -> u64 {
    let mut session = CombatSession::new("bench", &player_squad(), &enemy_squad());
    while !session.status().is_terminal() {
        session.tick();
    }
    session.get_tick()
}

pub fn simulation_benchmark(c: &mut Criterion) {
    c.bench_function("battle_to_completion", |b| {
        b.iter(|| black_box(run_battle()))
    });

    c.bench_function("single_tick", |b| {
        let mut session = CombatSession::new("bench", &player_squad(), &enemy_squad());
        b.iter(|| {
            session.tick();
            black_box(session.get_tick())
        })
    });
}

criterion_group!(benches, simulation_benchmark);
criterion_main!(benches);

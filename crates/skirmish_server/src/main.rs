//! Skirmish - Headless Session Server
//!
//! Runs a demonstration battle end to end: create a session, deploy the
//! reserve, tick to a terminal status, report the result.

use skirmish_core::actions::Action;
use skirmish_core::config::BattleConfig;
use skirmish_core::grid::GridPos;
use skirmish_core::units::{Side, Unit, UnitKind};
use skirmish_server::{Result, SessionManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn unit(
    id: &str,
    kind: UnitKind,
    side: Side,
    stats: (u32, u32, u32, f64),
    position: Option<GridPos>,
) -> Unit {
    let (hp, attack, defense, speed) = stats;
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

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Skirmish session server");

    let manager = SessionManager::new(BattleConfig::default());

    let player_units = vec![
        unit(
            "warrior",
            UnitKind::Warrior,
            Side::Player,
            (100, 15, 10, 1.0),
            Some(GridPos::new(2, 2)),
        ),
        // Held in reserve, deployed below through the action processor.
        unit("archer", UnitKind::Archer, Side::Player, (60, 20, 5, 1.2), None),
    ];
    let enemy_units = vec![
        unit(
            "goblin",
            UnitKind::Warrior,
            Side::Enemy,
            (80, 12, 8, 1.1),
            Some(GridPos::new(3, 7)),
        ),
        unit(
            "orc",
            UnitKind::Warrior,
            Side::Enemy,
            (120, 18, 12, 0.9),
            Some(GridPos::new(5, 8)),
        ),
    ];

    let (id, snapshot) = manager.create(&player_units, &enemy_units).await;
    tracing::info!(session = %id, units = snapshot.units.len(), "Battle begins");

    let outcome = manager
        .submit_action(
            id,
            &Action::PlaceUnit {
                unit_id: "archer".into(),
                position: GridPos::new(4, 1),
            },
        )
        .await?;
    tracing::info!(success = outcome.success, message = %outcome.message, "Reserve deployed");

    // The tick ceiling guarantees this loop terminates.
    let final_snapshot = loop {
        let snapshot = manager.tick(id).await?;
        let alive = snapshot.units.iter().filter(|u| u.hp > 0).count();
        tracing::debug!(tick = snapshot.tick, alive, "Tick complete");
        if snapshot.status.is_terminal() {
            break snapshot;
        }
    };

    tracing::info!(
        tick = final_snapshot.tick,
        status = ?final_snapshot.status,
        "Battle over"
    );

    manager.delete(id).await?;
    Ok(())
}

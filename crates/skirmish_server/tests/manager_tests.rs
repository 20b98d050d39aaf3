//! Session manager lifecycle and concurrency tests.

use std::sync::Arc;

use skirmish_core::actions::Action;
use skirmish_core::config::BattleConfig;
use skirmish_core::grid::GridPos;
use skirmish_core::session::BattleStatus;
use skirmish_core::units::{Side, UnitKind};
use skirmish_server::{SessionError, SessionManager};
use skirmish_test_utils::fixtures::{enemy_squad, player_squad, unit};

#[tokio::test]
async fn create_returns_initial_snapshot() {
    let manager = SessionManager::default();
    let (id, snapshot) = manager.create(&player_squad(), &enemy_squad()).await;

    assert_eq!(snapshot.session_id, id.to_string());
    assert_eq!(snapshot.status, BattleStatus::Active);
    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.units.len(), 4);
    assert_eq!(manager.session_count().await, 1);
}

#[tokio::test]
async fn state_of_unknown_session_is_not_found() {
    let manager = SessionManager::default();
    let id = uuid::Uuid::new_v4();

    assert_eq!(
        manager.state(id).await.unwrap_err(),
        SessionError::NotFound(id)
    );
}

#[tokio::test]
async fn submit_action_places_reserve_unit() {
    let manager = SessionManager::default();
    let mut player = player_squad();
    player.push(unit("p3", UnitKind::Healer, Side::Player, None));

    let (id, _) = manager.create(&player, &enemy_squad()).await;
    let outcome = manager
        .submit_action(
            id,
            &Action::PlaceUnit {
                unit_id: "p3".into(),
                position: GridPos::new(0, 0),
            },
        )
        .await
        .unwrap();

    assert!(outcome.success);
    let placed = outcome
        .snapshot
        .units
        .iter()
        .find(|u| u.id == "p3")
        .unwrap();
    assert_eq!(placed.position, Some(GridPos::new(0, 0)));
}

#[tokio::test]
async fn tick_advances_the_session() {
    let manager = SessionManager::default();
    let (id, _) = manager.create(&player_squad(), &enemy_squad()).await;

    let snapshot = manager.tick(id).await.unwrap();
    assert_eq!(snapshot.tick, 1);
    let snapshot = manager.tick(id).await.unwrap();
    assert_eq!(snapshot.tick, 2);
}

#[tokio::test]
async fn delete_is_not_idempotent() {
    let manager = SessionManager::default();
    let (id, _) = manager.create(&player_squad(), &enemy_squad()).await;

    assert!(manager.delete(id).await.is_ok());
    assert_eq!(
        manager.delete(id).await.unwrap_err(),
        SessionError::NotFound(id)
    );
    assert_eq!(
        manager.state(id).await.unwrap_err(),
        SessionError::NotFound(id)
    );
}

#[tokio::test]
async fn actions_on_deleted_session_are_not_found() {
    let manager = SessionManager::default();
    let (id, _) = manager.create(&player_squad(), &enemy_squad()).await;
    manager.delete(id).await.unwrap();

    let action = Action::PlaceUnit {
        unit_id: "p1".into(),
        position: GridPos::new(0, 0),
    };
    assert!(matches!(
        manager.submit_action(id, &action).await,
        Err(SessionError::NotFound(_))
    ));
    assert!(matches!(
        manager.tick(id).await,
        Err(SessionError::NotFound(_))
    ));
}

#[tokio::test]
async fn concurrent_ticks_on_one_session_serialize() {
    let manager = Arc::new(SessionManager::default());

    // Undeployed-but-alive rosters: every tick counts, nobody can win, so
    // the counter measures exactly how many ticks ran.
    let player = vec![unit("p1", UnitKind::Warrior, Side::Player, None)];
    let enemy = vec![unit("e1", UnitKind::Warrior, Side::Enemy, None)];
    let (id, _) = manager.create(&player, &enemy).await;

    let mut handles = Vec::new();
    for _ in 0..32 {
        let manager = Arc::clone(&manager);
        handles.push(tokio::spawn(async move { manager.tick(id).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let snapshot = manager.state(id).await.unwrap();
    assert_eq!(snapshot.tick, 32);
}

#[tokio::test]
async fn sessions_are_independent() {
    let manager = SessionManager::default();
    let (a, _) = manager.create(&player_squad(), &enemy_squad()).await;
    let (b, _) = manager.create(&player_squad(), &enemy_squad()).await;

    for _ in 0..5 {
        manager.tick(a).await.unwrap();
    }
    for _ in 0..3 {
        manager.tick(b).await.unwrap();
    }

    assert_eq!(manager.state(a).await.unwrap().tick, 5);
    assert_eq!(manager.state(b).await.unwrap().tick, 3);
    assert_eq!(manager.session_count().await, 2);
}

#[tokio::test]
async fn custom_config_applies_to_new_sessions() {
    let config = BattleConfig {
        max_ticks: 2,
        ..BattleConfig::default()
    };
    let manager = SessionManager::new(config);

    let player = vec![unit("p1", UnitKind::Warrior, Side::Player, None)];
    let enemy = vec![unit("e1", UnitKind::Warrior, Side::Enemy, None)];
    let (id, _) = manager.create(&player, &enemy).await;

    manager.tick(id).await.unwrap();
    let snapshot = manager.tick(id).await.unwrap();
    assert_eq!(snapshot.status, BattleStatus::Draw);
}

//! # Skirmish Core
//!
//! Deterministic tactical-combat simulation core.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness
//! - No wall-clock access
//!
//! A combat session holds two rosters of units on a small grid and advances
//! one discrete tick at a time: each deployed, living unit either attacks
//! the nearest opposing unit in range or steps one tile toward it. Player
//! commands (unit placement) are validated and applied between ticks. The
//! session ends when one side has no living units left, or in a draw when
//! the configured tick ceiling is reached.
//!
//! This separation enables:
//! - Headless session hosting (see `skirmish_server`)
//! - Snapshot persistence and session reconstruction
//! - Determinism testing
//!
//! ## Crate Structure
//!
//! - [`grid`] - Integer grid coordinates and distance math
//! - [`units`] - Unit stats, kinds, and sides
//! - [`registry`] - Per-session unit storage
//! - [`combat`] - Damage resolution
//! - [`actions`] - Player command types and outcomes
//! - [`session`] - The combat session and tick simulator
//! - [`config`] - Battle configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod actions;
pub mod combat;
pub mod config;
pub mod error;
pub mod grid;
pub mod registry;
pub mod session;
pub mod units;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::actions::{Action, ActionError, ActionOutcome};
    pub use crate::combat::{calculate_damage, MIN_DAMAGE};
    pub use crate::config::BattleConfig;
    pub use crate::error::{CoreError, Result};
    pub use crate::grid::GridPos;
    pub use crate::registry::UnitRegistry;
    pub use crate::session::{BattleStatus, CombatSession, Snapshot};
    pub use crate::units::{Side, Unit, UnitId, UnitKind};
}

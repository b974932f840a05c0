//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removal by mark-and-compact)
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ProjectileHit, TrackedRegion, circle_contains};
pub use config::{FrameModel, SimConfig, SpawnModel, TurnModel};
pub use snapshot::Snapshot;
pub use spawn::HazardKind;
pub use state::{
    Asteroid, Explosion, GameEvent, GamePhase, GameState, Projectile, Rocket, Viewport,
};
pub use tick::{TickInput, fire, reset, set_viewport, start_countdown, tick, tracked_region};

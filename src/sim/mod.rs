//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per 60 Hz frame, no delta scaling)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod physics;
pub mod scroller;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_enemies, resolve_platforms, resolve_springs};
pub use generator::Generator;
pub use physics::resolve_player;
pub use scroller::{advance_projectiles, follow_camera, recycle_platforms};
pub use state::{
    Enemy, Facing, GameEvent, GamePhase, GameState, Platform, PlatformKind, Player, Projectile,
    Spring,
};
pub use tick::{TickInput, autopilot, tick};

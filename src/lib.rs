//! Sky Hop - A single-screen vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, streaming, game state)
//! - `renderer`: Draw command list plus native/browser backends
//! - `assets`: Sprite catalog with placeholder fallbacks
//! - `input`: Keyboard/touch normalization into per-tick input
//! - `timing`: Fixed-step frame pacing

pub mod assets;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod timing;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum catch-up ticks per animation frame
    pub const MAX_CATCHUP_STEPS: u32 = 4;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Hitboxes are narrower than the sprites they belong to
    pub const HITBOX_INSET: f32 = 10.0;

    /// Player spawn point
    pub const PLAYER_SPAWN_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PLAYER_SPAWN_Y: f32 = 500.0;
    /// Anchor platform placed under the spawn point
    pub const ANCHOR_PLATFORM_Y: f32 = 600.0;

    /// Vertical motion (per frame)
    pub const GRAVITY_STEP: f32 = 0.5;
    pub const JUMP_DECAY: f32 = 0.5;
    pub const BOUNCE_IMPULSE: f32 = 15.0;
    pub const SPRING_IMPULSE: f32 = 50.0;
    /// Extra scroll credit granted by a spring
    pub const SPRING_CAMERA_KICK: f32 = 50.0;

    /// Horizontal motion (per frame)
    pub const MOVE_ACCEL: f32 = 0.5;
    pub const MAX_MOVE_SPEED: f32 = 10.0;

    /// Camera follow
    pub const CAMERA_THRESHOLD: f32 = 200.0;
    pub const CAMERA_STEP: f32 = 10.0;

    /// Platform geometry
    pub const PLATFORM_WIDTH: f32 = 70.0;
    pub const PLATFORM_HEIGHT: f32 = 10.0;
    pub const PLATFORM_GAP_MIN: u32 = 40;
    pub const PLATFORM_GAP_MAX: u32 = 60;
    /// Initial population stops once the cursor passes this altitude
    pub const INITIAL_FILL_TOP: f32 = -100.0;
    pub const MOVING_PLATFORM_SPEED: f32 = 5.0;
    /// Moving platforms turn around this far from the right edge
    pub const MOVING_PLATFORM_EDGE: f32 = 50.0;

    /// Spring geometry
    pub const SPRING_WIDTH: f32 = 30.0;
    pub const SPRING_HEIGHT: f32 = 20.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 70.0;
    pub const ENEMY_SPEED: f32 = 3.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 5.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Projectiles are dropped once this far above the camera
    pub const PROJECTILE_DESPAWN_MARGIN: f32 = 100.0;

    /// Spawn rolls are drawn from 0..=SPAWN_ROLL_MAX
    pub const SPAWN_ROLL_MAX: u32 = 1000;
    pub const SPRING_ROLL_THRESHOLD: u32 = 900;
    pub const ENEMY_ROLL_THRESHOLD: u32 = 950;

    /// Scoring
    pub const SCORE_PER_PLATFORM: u64 = 100;
    pub const SCORE_PER_ENEMY: u64 = 500;
}

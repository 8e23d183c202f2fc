//! Game state and core simulation types
//!
//! `GameState` is the world aggregate: one player, the camera, every entity
//! collection, the score and the session phase. It is owned by the frontend
//! and handed to `tick` by exclusive reference once per frame.

use glam::Vec2;

use super::collision::Aabb;
use super::generator::Generator;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player fell off or touched an enemy; waits for restart
    GameOver,
}

/// Horizontal heading, shared by the player sprite and patrolling entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Unit step along x for this heading
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner in world space (y grows downward)
    pub pos: Vec2,
    /// Horizontal velocity, ramps toward ±MAX_MOVE_SPEED
    pub vel_x: f32,
    /// Remaining upward impulse; zero means the player is under gravity
    pub jump: f32,
    /// Downward speed accumulated while not jumping
    pub gravity: f32,
    /// Sprite facing (render only)
    pub facing: Facing,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel_x: 0.0,
            jump: 0.0,
            gravity: 0.0,
            facing: Facing::Right,
        }
    }
}

impl Player {
    /// Still consuming a jump impulse
    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump > 0.0
    }

    /// Gravity has built up, so the player can land on things
    #[inline]
    pub fn is_falling(&self) -> bool {
        self.gravity > 0.0
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(
            self.pos.x,
            self.pos.y,
            PLAYER_WIDTH - HITBOX_INSET,
            PLAYER_HEIGHT,
        )
    }

    /// Horizontal center of the sprite
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH / 2.0
    }

    /// Start a platform bounce
    pub fn bounce(&mut self) {
        self.jump = BOUNCE_IMPULSE;
        self.gravity = 0.0;
    }
}

/// Platform types, each carrying its own mutable sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Normal,
    /// Patrols horizontally; landing turns it toward the right
    Moving { heading: Facing },
    /// Cracks (visually) the first time it is landed on
    Breakable { broken: bool },
}

impl PlatformKind {
    pub const MOVING: PlatformKind = PlatformKind::Moving {
        heading: Facing::Left,
    };
    pub const BREAKABLE: PlatformKind = PlatformKind::Breakable { broken: false };

    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, PlatformKind::Normal)
    }
}

/// A platform entity
#[derive(Debug, Clone)]
pub struct Platform {
    pub pos: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(x: f32, y: f32, kind: PlatformKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(
            self.pos.x,
            self.pos.y,
            PLATFORM_WIDTH - HITBOX_INSET,
            PLATFORM_HEIGHT,
        )
    }

    /// Self-propel moving platforms, turning around at the screen edges
    pub fn advance(&mut self) {
        if let PlatformKind::Moving { heading } = &mut self.kind {
            self.pos.x += heading.sign() * MOVING_PLATFORM_SPEED;
            if self.pos.x > SCREEN_WIDTH - MOVING_PLATFORM_EDGE {
                *heading = Facing::Left;
            } else if self.pos.x <= 0.0 {
                *heading = Facing::Right;
            }
        }
    }
}

/// A one-shot spring; stays collidable after use
#[derive(Debug, Clone)]
pub struct Spring {
    pub pos: Vec2,
    pub used: bool,
}

impl Spring {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            used: false,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, SPRING_WIDTH, SPRING_HEIGHT)
    }
}

/// A patrolling enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub heading: Facing,
}

impl Enemy {
    pub fn new(x: f32, y: f32, heading: Facing) -> Self {
        Self {
            pos: Vec2::new(x, y),
            heading,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, ENEMY_SIZE, ENEMY_SIZE)
    }

    /// Patrol step, reversing at the screen edges
    pub fn advance(&mut self) {
        self.pos.x += self.heading.sign() * ENEMY_SPEED;
        if self.pos.x > SCREEN_WIDTH - ENEMY_SIZE {
            self.heading = Facing::Left;
        } else if self.pos.x < 0.0 {
            self.heading = Facing::Right;
        }
    }
}

/// A player shot travelling straight up
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub speed: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            speed: PROJECTILE_SPEED,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// Things that happened during a tick, for logging and effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Landed on a platform and bounced
    Bounce,
    /// Landed on a moving platform (no bounce)
    MovingPlatformActivated,
    SpringBoost,
    EnemyKilled { score: u64 },
    PlatformRecycled { kind: PlatformKind },
    Shot,
    GameOver { score: u64 },
    Restarted,
}

/// Complete world state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Content stream, kept running across restarts
    pub generator: Generator,
    pub phase: GamePhase,
    /// Score
    pub score: u64,
    /// Vertical camera offset; only ever decreases during a session
    pub camera_y: f32,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    /// Sessions started since construction (1 = first run)
    pub session: u32,
    pub player: Player,
    /// Live platforms; the count is fixed after the initial fill
    pub platforms: Vec<Platform>,
    pub springs: Vec<Spring>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            generator: Generator::new(seed),
            phase: GamePhase::Playing,
            score: 0,
            camera_y: 0.0,
            time_ticks: 0,
            session: 0,
            player: Player::default(),
            platforms: Vec::new(),
            springs: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
        };
        state.start_session();
        state
    }

    /// Reset everything but the generator stream and start a fresh session
    pub fn restart(&mut self) {
        self.start_session();
        self.events.push(GameEvent::Restarted);
        log::info!("Session {} started", self.session);
    }

    fn start_session(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.camera_y = 0.0;
        self.time_ticks = 0;
        self.session += 1;
        self.player = Player::default();
        self.springs.clear();
        self.enemies.clear();
        self.projectiles.clear();

        self.platforms.clear();
        self.platforms.push(Platform::new(
            PLAYER_SPAWN_X,
            ANCHOR_PLATFORM_Y,
            PlatformKind::Normal,
        ));
        self.generator.populate(&mut self.platforms);
    }

    /// Fire a projectile from the player's position
    pub fn spawn_projectile(&mut self) {
        let x = self.player.center_x();
        let y = self.player.pos.y;
        self.projectiles.push(Projectile::new(x, y));
        self.events.push(GameEvent::Shot);
    }

    /// Y coordinate of the highest (smallest y) platform, or the anchor altitude if there are none
    pub fn highest_platform_y(&self) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.pos.y)
            .reduce(f32::min)
            .unwrap_or(ANCHOR_PLATFORM_Y)
    }

    /// Player has dropped below the bottom of the visible window
    pub fn player_fell(&self) -> bool {
        self.player.pos.y - self.camera_y > SCREEN_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_spawns_player_over_anchor() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
        assert_eq!(state.platforms[0].pos, Vec2::new(PLAYER_SPAWN_X, ANCHOR_PLATFORM_Y));
        assert!(state.platforms[0].kind.is_normal());
        assert!(state.springs.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.session, 1);
    }

    #[test]
    fn test_moving_platform_turns_at_edges() {
        let mut platform = Platform::new(SCREEN_WIDTH - MOVING_PLATFORM_EDGE, 100.0, PlatformKind::Moving {
            heading: Facing::Right,
        });
        platform.advance();
        assert_eq!(platform.kind, PlatformKind::Moving { heading: Facing::Left });
        platform.advance();
        assert_eq!(platform.pos.x, SCREEN_WIDTH - MOVING_PLATFORM_EDGE);

        let mut platform = Platform::new(3.0, 100.0, PlatformKind::MOVING);
        platform.advance();
        assert_eq!(platform.pos.x, -2.0);
        assert_eq!(platform.kind, PlatformKind::Moving { heading: Facing::Right });
    }

    #[test]
    fn test_static_platforms_do_not_move() {
        let mut platform = Platform::new(10.0, 100.0, PlatformKind::BREAKABLE);
        platform.advance();
        assert_eq!(platform.pos.x, 10.0);
    }

    #[test]
    fn test_enemy_patrol_reverses() {
        let mut enemy = Enemy::new(SCREEN_WIDTH - ENEMY_SIZE, 0.0, Facing::Right);
        enemy.advance();
        assert_eq!(enemy.heading, Facing::Left);

        let mut enemy = Enemy::new(1.0, 0.0, Facing::Left);
        enemy.advance();
        assert_eq!(enemy.heading, Facing::Right);
    }

    #[test]
    fn test_generator_follows_state_seed() {
        let mut state = GameState::new(42);
        let mut expected = vec![Platform::new(PLAYER_SPAWN_X, ANCHOR_PLATFORM_Y, PlatformKind::Normal)];
        let mut generator = Generator::new(state.seed);
        generator.populate(&mut expected);

        let positions = |platforms: &[Platform]| platforms.iter().map(|p| p.pos).collect::<Vec<_>>();
        assert_eq!(positions(&state.platforms), positions(&expected));

        // The next streamed platform matches the same stream too
        let next = generator.next_platform(0.0);
        assert_eq!(state.generator.next_platform(0.0).pos, next.pos);
    }

    #[test]
    fn test_highest_platform_tracks_live_platforms() {
        let mut state = GameState::new(1);
        state.platforms = vec![
            Platform::new(0.0, 700.0, PlatformKind::Normal),
            Platform::new(0.0, 650.0, PlatformKind::BREAKABLE),
        ];
        // Everything sits below the anchor altitude
        assert_eq!(state.highest_platform_y(), 650.0);

        state.platforms.clear();
        assert_eq!(state.highest_platform_y(), ANCHOR_PLATFORM_Y);
    }

    #[test]
    fn test_projectile_spawns_at_player_center() {
        let mut state = GameState::new(1);
        state.spawn_projectile();
        let shot = &state.projectiles[0];
        assert_eq!(shot.pos.x, PLAYER_SPAWN_X + PLAYER_WIDTH / 2.0);
        assert_eq!(shot.pos.y, PLAYER_SPAWN_Y);
        assert_eq!(shot.speed, PROJECTILE_SPEED);
        assert_eq!(state.events, vec![GameEvent::Shot]);
    }
}

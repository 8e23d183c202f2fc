//! Sprite catalog with placeholder fallbacks
//!
//! Artwork is optional. Any sprite that fails to load is replaced by a
//! colored rectangle so the game stays playable; the failure is logged as a
//! warning and never propagated. Simulation geometry uses the canonical sizes
//! below, so loaded artwork is always scaled to them.

use glam::Vec2;

use crate::consts::*;
use crate::renderer::{Color, colors};

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    PlatformNormal,
    PlatformMoving,
    PlatformBreakable,
    PlatformBroken,
    PlayerRight,
    PlayerRightJump,
    PlayerLeft,
    PlayerLeftJump,
    Spring,
    SpringUsed,
    Enemy,
}

impl SpriteId {
    pub const ALL: [SpriteId; 11] = [
        SpriteId::PlatformNormal,
        SpriteId::PlatformMoving,
        SpriteId::PlatformBreakable,
        SpriteId::PlatformBroken,
        SpriteId::PlayerRight,
        SpriteId::PlayerRightJump,
        SpriteId::PlayerLeft,
        SpriteId::PlayerLeftJump,
        SpriteId::Spring,
        SpriteId::SpringUsed,
        SpriteId::Enemy,
    ];

    /// Image file name inside the asset directory
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteId::PlatformNormal => "green.png",
            SpriteId::PlatformMoving => "blue.png",
            SpriteId::PlatformBreakable => "red.png",
            SpriteId::PlatformBroken => "red_1.png",
            SpriteId::PlayerRight => "right.png",
            SpriteId::PlayerRightJump => "right_1.png",
            SpriteId::PlayerLeft => "left.png",
            SpriteId::PlayerLeftJump => "left_1.png",
            SpriteId::Spring => "spring.png",
            SpriteId::SpringUsed => "spring_1.png",
            SpriteId::Enemy => "enemy.png",
        }
    }

    /// Canonical on-screen size
    pub fn size(self) -> Vec2 {
        match self {
            SpriteId::PlatformNormal
            | SpriteId::PlatformMoving
            | SpriteId::PlatformBreakable
            | SpriteId::PlatformBroken => Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            SpriteId::PlayerRight
            | SpriteId::PlayerRightJump
            | SpriteId::PlayerLeft
            | SpriteId::PlayerLeftJump => Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            SpriteId::Spring | SpriteId::SpringUsed => Vec2::new(SPRING_WIDTH, SPRING_HEIGHT),
            SpriteId::Enemy => Vec2::splat(ENEMY_SIZE),
        }
    }

    pub fn placeholder(self) -> Placeholder {
        let color = match self {
            SpriteId::PlatformNormal => colors::PLATFORM_NORMAL,
            SpriteId::PlatformMoving => colors::PLATFORM_MOVING,
            SpriteId::PlatformBreakable => colors::PLATFORM_BREAKABLE,
            SpriteId::PlatformBroken => colors::PLATFORM_BROKEN,
            SpriteId::PlayerRight
            | SpriteId::PlayerRightJump
            | SpriteId::PlayerLeft
            | SpriteId::PlayerLeftJump => colors::PLAYER,
            SpriteId::Spring => colors::SPRING,
            SpriteId::SpringUsed => colors::SPRING_USED,
            SpriteId::Enemy => colors::ENEMY,
        };
        Placeholder {
            size: self.size(),
            color,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Colored rectangle drawn in place of missing artwork
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub size: Vec2,
    pub color: Color,
}

/// A sprite slot: backend image or fallback rectangle
#[derive(Debug, Clone)]
pub enum SpriteSource<I> {
    Image(I),
    Placeholder(Placeholder),
}

/// All sprites, indexed by `SpriteId`. `I` is the backend's image handle.
#[derive(Debug, Clone)]
pub struct SpriteCatalog<I> {
    sprites: Vec<SpriteSource<I>>,
}

impl<I> SpriteCatalog<I> {
    /// Catalog made only of placeholders
    pub fn placeholders() -> Self {
        Self {
            sprites: SpriteId::ALL
                .iter()
                .map(|id| SpriteSource::Placeholder(id.placeholder()))
                .collect(),
        }
    }

    /// Load every sprite through `loader`, substituting placeholders on failure
    pub fn load_with<E, F>(mut loader: F) -> Self
    where
        E: std::fmt::Debug,
        F: FnMut(SpriteId) -> Result<I, E>,
    {
        let sprites = SpriteId::ALL
            .iter()
            .map(|&id| match loader(id) {
                Ok(image) => SpriteSource::Image(image),
                Err(e) => {
                    log::warn!(
                        "Failed to load '{}' ({:?}). Using fallback image.",
                        id.file_name(),
                        e
                    );
                    SpriteSource::Placeholder(id.placeholder())
                }
            })
            .collect();
        Self { sprites }
    }

    pub fn get(&self, id: SpriteId) -> &SpriteSource<I> {
        &self.sprites[id.index()]
    }

    /// Swap a sprite for its placeholder (e.g. after an async load error)
    pub fn mark_failed(&mut self, id: SpriteId) {
        self.sprites[id.index()] = SpriteSource::Placeholder(id.placeholder());
    }

    /// Number of sprites currently drawn as placeholders
    pub fn placeholder_count(&self) -> usize {
        self.sprites
            .iter()
            .filter(|s| matches!(s, SpriteSource::Placeholder(_)))
            .count()
    }
}

/// Decode every sprite from `dir` into RGBA buffers
#[cfg(not(target_arch = "wasm32"))]
pub fn load_from_dir(dir: &std::path::Path) -> SpriteCatalog<image::RgbaImage> {
    let catalog = SpriteCatalog::load_with(|id| {
        image::open(dir.join(id.file_name())).map(|img| img.to_rgba8())
    });
    log::info!(
        "Loaded sprites from {} ({} placeholders)",
        dir.display(),
        catalog.placeholder_count()
    );
    catalog
}

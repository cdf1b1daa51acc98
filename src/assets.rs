//! Sprite assets
//!
//! Sprites are small vector drawings. They come either from built-in
//! procedural art (ready immediately) or from JSON files fetched by the
//! host (pending until installed). The renderer checks `is_ready` and draws
//! a placeholder shape until then.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::EnemyVariant;

pub type Rgba = [f32; 4];

/// One filled primitive in art-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polygon { points: Vec<Vec2>, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Rect { min: Vec2, size: Vec2, color: Rgba },
}

/// A vector drawing with its own coordinate box (`width` x `height`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorArt {
    pub width: f32,
    pub height: f32,
    pub shapes: Vec<Shape>,
}

/// Which sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Bullet,
    Enemy(EnemyVariant),
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Player,
        SpriteId::Bullet,
        SpriteId::Enemy(EnemyVariant::Red),
        SpriteId::Enemy(EnemyVariant::Purple),
        SpriteId::Enemy(EnemyVariant::Blue),
    ];

    /// File name used when sprites are served from a directory
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteId::Player => "player.json",
            SpriteId::Bullet => "bullet.json",
            SpriteId::Enemy(EnemyVariant::Red) => "enemy-red.json",
            SpriteId::Enemy(EnemyVariant::Purple) => "enemy-purple.json",
            SpriteId::Enemy(EnemyVariant::Blue) => "enemy-blue.json",
        }
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteId::Player => write!(f, "player"),
            SpriteId::Bullet => write!(f, "bullet"),
            SpriteId::Enemy(variant) => write!(f, "enemy ({:?})", variant),
        }
    }
}

/// Where a sprite's art comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteSource {
    Procedural,
    File(String),
}

/// Asset loading errors
#[derive(Debug)]
pub enum AssetError {
    /// Sprite file is not valid JSON art
    Parse {
        sprite: SpriteId,
        source: serde_json::Error,
    },
    /// Sprite file parsed but has nothing to draw
    EmptyArt { sprite: SpriteId },
    /// Host could not fetch the file
    Fetch { url: String, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { sprite, source } => write!(f, "invalid {sprite} sprite: {source}"),
            Self::EmptyArt { sprite } => write!(f, "{sprite} sprite has no drawable shapes"),
            Self::Fetch { url, reason } => write!(f, "failed to fetch {url}: {reason}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A sprite handle with a readiness flag
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    pub source: SpriteSource,
    art: Option<VectorArt>,
}

impl Sprite {
    pub fn procedural(id: SpriteId) -> Self {
        Self {
            id,
            source: SpriteSource::Procedural,
            art: Some(procedural_art(id)),
        }
    }

    pub fn from_file(id: SpriteId, url: String) -> Self {
        Self {
            id,
            source: SpriteSource::File(url),
            art: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.art.is_some()
    }

    /// Art to draw, if loaded
    pub fn art(&self) -> Option<&VectorArt> {
        self.art.as_ref()
    }
}

/// Every sprite the game draws
#[derive(Debug, Clone)]
pub struct AssetSet {
    pub player: Sprite,
    pub bullet: Sprite,
    pub enemies: [Sprite; 3],
}

impl Default for AssetSet {
    fn default() -> Self {
        Self::procedural()
    }
}

impl AssetSet {
    /// Built-in art; everything is ready immediately
    pub fn procedural() -> Self {
        Self {
            player: Sprite::procedural(SpriteId::Player),
            bullet: Sprite::procedural(SpriteId::Bullet),
            enemies: EnemyVariant::ALL.map(|v| Sprite::procedural(SpriteId::Enemy(v))),
        }
    }

    /// Sprites served as JSON files under `base_url`; all pending until the
    /// host installs them
    pub fn from_directory(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let file = |id: SpriteId| Sprite::from_file(id, format!("{}/{}", base, id.file_name()));
        Self {
            player: file(SpriteId::Player),
            bullet: file(SpriteId::Bullet),
            enemies: EnemyVariant::ALL.map(|v| file(SpriteId::Enemy(v))),
        }
    }

    pub fn sprite(&self, id: SpriteId) -> &Sprite {
        match id {
            SpriteId::Player => &self.player,
            SpriteId::Bullet => &self.bullet,
            SpriteId::Enemy(variant) => &self.enemies[variant.index()],
        }
    }

    fn sprite_mut(&mut self, id: SpriteId) -> &mut Sprite {
        match id {
            SpriteId::Player => &mut self.player,
            SpriteId::Bullet => &mut self.bullet,
            SpriteId::Enemy(variant) => &mut self.enemies[variant.index()],
        }
    }

    /// Sprites still waiting on their file, with the URL to fetch
    pub fn pending(&self) -> Vec<(SpriteId, String)> {
        SpriteId::ALL
            .iter()
            .filter_map(|&id| {
                let sprite = self.sprite(id);
                match &sprite.source {
                    SpriteSource::File(url) if !sprite.is_ready() => Some((id, url.clone())),
                    _ => None,
                }
            })
            .collect()
    }

    /// Parse a fetched sprite file and mark the sprite ready
    pub fn install(&mut self, id: SpriteId, json: &str) -> Result<(), AssetError> {
        let art: VectorArt = serde_json::from_str(json)
            .map_err(|source| AssetError::Parse { sprite: id, source })?;
        if art.shapes.is_empty() || art.width <= 0.0 || art.height <= 0.0 {
            return Err(AssetError::EmptyArt { sprite: id });
        }
        log::debug!("Installed {} sprite ({} shapes)", id, art.shapes.len());
        self.sprite_mut(id).art = Some(art);
        Ok(())
    }

    /// A sprite file could not be used; fall back to the built-in art
    pub fn mark_failed(&mut self, id: SpriteId, err: &AssetError) {
        log::warn!("{}; using built-in {} art", err, id);
        self.sprite_mut(id).art = Some(procedural_art(id));
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Built-in art for each sprite
pub fn procedural_art(id: SpriteId) -> VectorArt {
    match id {
        SpriteId::Player => player_art(),
        SpriteId::Bullet => VectorArt {
            width: 20.0,
            height: 20.0,
            shapes: vec![Shape::Circle {
                center: Vec2::new(10.0, 10.0),
                radius: 6.0,
                color: rgb(0xFF, 0xD1, 0x66),
            }],
        },
        SpriteId::Enemy(variant) => enemy_art(enemy_color(variant)),
    }
}

/// Body colour for each enemy variant
pub fn enemy_color(variant: EnemyVariant) -> Rgba {
    match variant {
        EnemyVariant::Red => rgb(0xFF, 0x6B, 0x6B),
        EnemyVariant::Purple => rgb(0xC0, 0x84, 0xFC),
        EnemyVariant::Blue => rgb(0x60, 0xA5, 0xFA),
    }
}

/// Delta-wing ship, two-tone green with a dark exhaust bar
fn player_art() -> VectorArt {
    let nose = Vec2::new(60.0, 8.0);
    VectorArt {
        width: 120.0,
        height: 80.0,
        shapes: vec![
            Shape::Polygon {
                points: vec![nose, Vec2::new(14.0, 64.0), Vec2::new(60.0, 64.0)],
                color: rgb(0x4E, 0xE0, 0xA4),
            },
            Shape::Polygon {
                points: vec![nose, Vec2::new(60.0, 64.0), Vec2::new(106.0, 64.0)],
                color: rgb(0x2C, 0xB6, 0x7D),
            },
            Shape::Rect {
                min: Vec2::new(48.0, 54.0),
                size: Vec2::new(24.0, 6.0),
                color: rgb(0x07, 0x4C, 0x3B),
            },
        ],
    }
}

/// Glossy orb with a soft shadow underneath
fn enemy_art(color: Rgba) -> VectorArt {
    VectorArt {
        width: 80.0,
        height: 80.0,
        shapes: vec![
            Shape::Rect {
                min: Vec2::new(24.0, 46.0),
                size: Vec2::new(32.0, 8.0),
                color: [0.133, 0.133, 0.133, 0.25],
            },
            Shape::Circle {
                center: Vec2::new(40.0, 32.0),
                radius: 22.0,
                color,
            },
            Shape::Circle {
                center: Vec2::new(40.0, 24.0),
                radius: 9.0,
                color: [1.0, 1.0, 1.0, 0.35],
            },
        ],
    }
}

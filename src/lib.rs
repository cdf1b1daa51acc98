//! Star Guard - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, spawning, collisions, bookkeeping)
//! - `platform`: Input sampling from keyboard/pointer/touch events
//! - `assets`: Sprite providers (procedural vector art or JSON sprite files)
//! - `renderer`: Scene drawing against an abstract canvas, plus the WebGPU backend
//! - `settings`: Player preferences read from the page URL or environment

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, AssetSet, SpriteId};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Largest step the simulation will integrate in one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 56.0;
    pub const PLAYER_HEIGHT: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 420.0;
    /// Player centre sits this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

    /// Bullets
    pub const BULLET_RADIUS: f32 = 6.0;
    pub const BULLET_SPEED: f32 = 900.0;
    /// Bullets appear this far above the bottom edge (the ship's nose)
    pub const BULLET_SPAWN_OFFSET: f32 = 82.0;
    /// Bullets are dropped once they climb this far past the top edge
    pub const BULLET_TOP_MARGIN: f32 = 20.0;

    /// Enemies
    pub const ENEMY_RADIUS: f32 = 24.0;
    pub const ENEMY_SPAWN_Y: f32 = -40.0;
    /// Keeps spawned enemies clear of the side edges
    pub const ENEMY_SPAWN_MARGIN: f32 = 40.0;
    pub const ENEMY_BASE_SPEED: f32 = 60.0;
    pub const ENEMY_SPEED_JITTER: f32 = 140.0;
    /// Extra speed per point of score
    pub const ENEMY_SPEED_PER_SCORE: f32 = 0.4;
    /// An enemy below `height - ENEMY_BREACH_OFFSET` has breached the defence line
    pub const ENEMY_BREACH_OFFSET: f32 = 60.0;
    /// Breach bursts are emitted at `height - BREACH_BURST_OFFSET`
    pub const BREACH_BURST_OFFSET: f32 = 72.0;

    /// Spawn pacing (milliseconds)
    pub const SPAWN_INTERVAL_START_MS: f32 = 900.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 300.0;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.993;

    /// Session bookkeeping
    pub const STARTING_LIVES: u8 = 3;
    pub const SCORE_PER_KILL: u64 = 10;

    /// Particle bursts
    pub const BURST_MIN_PARTICLES: usize = 14;
    pub const BURST_EXTRA_PARTICLES: usize = 8;
    pub const PARTICLE_MIN_SPEED: f32 = 60.0;
    pub const PARTICLE_SPEED_JITTER: f32 = 220.0;
    pub const PARTICLE_MIN_LIFE: f32 = 0.9;
    pub const PARTICLE_LIFE_JITTER: f32 = 0.6;
    pub const PARTICLE_GRAVITY: f32 = 300.0;
    pub const PARTICLE_RADIUS: f32 = 3.5;
    /// Default particle cap when no quality preset is applied
    pub const MAX_PARTICLES: usize = 512;

    /// Background star field
    pub const MIN_STARS: usize = 60;
    /// One star per this many units of play-area width
    pub const STAR_SPACING: f32 = 8.0;
    pub const STAR_SCROLL_FACTOR: f32 = 0.5;
    /// Stars that scroll off the bottom re-enter at this height
    pub const STAR_WRAP_Y: f32 = -2.0;
}

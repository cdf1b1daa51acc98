//! Simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per animation frame, dt clamped to `MAX_FRAME_DT`
//! - Seeded RNG only, so a seed replays the same session
//! - Play-area size is passed in every frame, never cached
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hit, circles_overlap, resolve_hits};
pub use spawn::{seed_stars, spawn_burst, spawn_enemy};
pub use state::{
    Bullet, Enemy, EnemyVariant, GameEvent, Particle, ParticleTint, PlayArea, Player,
    SessionPhase, Star, World,
};
pub use tick::{TickInput, tick};

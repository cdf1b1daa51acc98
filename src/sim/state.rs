//! Game state and core simulation types
//!
//! A single owned `World` holds every entity and counter for one session.
//! The host passes it into `tick` and the renderer; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn::seed_stars;
use crate::consts::*;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Before the first start; overlay shown
    Idle,
    /// Simulation advances every frame
    Running,
    /// Lives exhausted; frozen until restart
    GameOver,
}

/// Enemy sprite variant (fixed palette of three)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyVariant {
    Red,
    Purple,
    Blue,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [EnemyVariant::Red, EnemyVariant::Purple, EnemyVariant::Blue];

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            EnemyVariant::Red => 0,
            EnemyVariant::Purple => 1,
            EnemyVariant::Blue => 2,
        }
    }
}

/// Particle colour tag (looked up by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleTint {
    /// Enemy shot down
    Destruction,
    /// Enemy slipped past the defence line
    Breach,
}

/// Logical (CSS-pixel) play-area size, re-read by the host every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical centre line of the player ship
    pub fn player_y(&self) -> f32 {
        self.height - PLAYER_BOTTOM_OFFSET
    }

    /// Enemies below this line cost a life
    pub fn breach_y(&self) -> f32 {
        self.height - ENEMY_BREACH_OFFSET
    }
}

/// The player's ship. Only `x` moves; `y` is derived from the play area.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Player {
    pub fn centered(area: PlayArea) -> Self {
        Self {
            x: area.width / 2.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
        }
    }

    /// Horizontal range the ship's centre may occupy
    pub fn x_bounds(&self, area: PlayArea) -> (f32, f32) {
        let half = self.width / 2.0;
        // A play area narrower than the ship pins it to the left bound
        (half, (area.width - half).max(half))
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub radius: f32,
    /// Upward speed (units/s)
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Downward speed (units/s)
    pub speed: f32,
    pub variant: EnemyVariant,
}

/// Cosmetic particle; no gameplay effect
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub tint: ParticleTint,
}

/// Background star, recycled at the top when it scrolls off the bottom
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub alpha: f32,
}

/// Notable things that happened during a tick, for the host's HUD and logs
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    EnemyDestroyed { pos: Vec2 },
    EnemyBreached { x: f32 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    pub phase: SessionPhase,
    /// +10 per enemy destroyed, never decreases within a session
    pub score: u64,
    pub lives: u8,
    /// Time between automatic spawns (ms); only ever shrinks
    pub spawn_interval_ms: f32,
    /// Time accumulated since the last spawn (ms)
    pub spawn_timer_ms: f32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub(crate) rng: Pcg32,
    /// Maximum live particles (0 disables bursts)
    pub(crate) particle_budget: usize,
    events: Vec<GameEvent>,
}

impl World {
    /// Create an idle world: player centred, star field seeded, nothing spawned
    pub fn new(seed: u64, area: PlayArea) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = seed_stars(&mut rng, area);
        Self {
            phase: SessionPhase::Idle,
            score: 0,
            lives: STARTING_LIVES,
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            spawn_timer_ms: 0.0,
            player: Player::centered(area),
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            stars,
            rng,
            particle_budget: MAX_PARTICLES,
            events: Vec::new(),
        }
    }

    /// Start (or restart) a session. Resets every counter and collection,
    /// re-centres the player and regenerates the star field for `area`.
    pub fn start(&mut self, area: PlayArea) {
        self.phase = SessionPhase::Running;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.spawn_interval_ms = SPAWN_INTERVAL_START_MS;
        self.spawn_timer_ms = 0.0;
        self.player = Player::centered(area);
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.stars = seed_stars(&mut self.rng, area);
        self.events.clear();
        self.events.push(GameEvent::SessionStarted);

        log::info!(
            "Session started ({}x{}, {} stars)",
            area.width,
            area.height,
            self.stars.len()
        );
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Cap live particles (from the quality preset). Excess particles are
    /// dropped oldest-first.
    pub fn set_particle_budget(&mut self, budget: usize) {
        self.particle_budget = budget;
        if self.particles.len() > budget {
            let excess = self.particles.len() - budget;
            self.particles.drain(..excess);
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

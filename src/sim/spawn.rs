//! Entity creation: enemies, particle bursts and the star field

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, EnemyVariant, Particle, ParticleTint, PlayArea, Star, World};
use crate::consts::*;

/// Spawn one enemy just above the top edge.
///
/// Horizontal position is uniform inside the play area minus a margin on
/// each side; speed grows with the current score.
pub fn spawn_enemy(world: &mut World, area: PlayArea) {
    let usable = (area.width - 2.0 * ENEMY_SPAWN_MARGIN).max(0.0);
    let x = world.rng.random::<f32>() * usable + ENEMY_SPAWN_MARGIN;
    let speed = ENEMY_BASE_SPEED
        + world.rng.random::<f32>() * ENEMY_SPEED_JITTER
        + world.score as f32 * ENEMY_SPEED_PER_SCORE;
    let variant = EnemyVariant::ALL[world.rng.random_range(0..EnemyVariant::ALL.len())];

    log::debug!("Spawned {:?} enemy at x={:.0} speed={:.0}", variant, x, speed);

    world.enemies.push(Enemy {
        pos: Vec2::new(x, ENEMY_SPAWN_Y),
        radius: ENEMY_RADIUS,
        speed,
        variant,
    });
}

/// Emit a radial burst of particles at `pos`
pub fn spawn_burst(world: &mut World, pos: Vec2, tint: ParticleTint) {
    if world.particle_budget == 0 {
        return;
    }

    let count = BURST_MIN_PARTICLES + world.rng.random_range(0..BURST_EXTRA_PARTICLES);
    for _ in 0..count {
        if world.particles.len() >= world.particle_budget {
            // Remove oldest particles to make room
            world.particles.remove(0);
        }
        let angle = world.rng.random::<f32>() * std::f32::consts::TAU;
        let speed = PARTICLE_MIN_SPEED + world.rng.random::<f32>() * PARTICLE_SPEED_JITTER;
        let life = PARTICLE_MIN_LIFE + world.rng.random::<f32>() * PARTICLE_LIFE_JITTER;
        world.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            tint,
        });
    }
}

/// Generate a fresh star field sized to the play area
pub fn seed_stars(rng: &mut Pcg32, area: PlayArea) -> Vec<Star> {
    let count = MIN_STARS.max((area.width / STAR_SPACING) as usize);
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random::<f32>() * area.width,
                rng.random::<f32>() * area.height,
            ),
            radius: rng.random::<f32>() * 1.6 + 0.3,
            speed: rng.random::<f32>() * 20.0 + 10.0,
            alpha: rng.random::<f32>() * 0.8 + 0.2,
        })
        .collect()
}

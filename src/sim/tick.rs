//! Per-frame simulation step
//!
//! Advances the world by one (clamped) frame delta. Sub-steps run in a fixed
//! order: fire, player, bullets, spawner, enemies, collisions, particles, stars.

use glam::Vec2;

use super::collision::resolve_hits;
use super::spawn::{spawn_burst, spawn_enemy};
use super::state::{Bullet, GameEvent, ParticleTint, PlayArea, SessionPhase, World};
use crate::consts::*;

/// Input commands for a single frame, sampled from `platform::InputState`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Fire events since the last frame; each one spawns exactly one bullet
    pub fire_triggers: u32,
}

impl TickInput {
    /// -1, 0 or +1
    fn horizontal(&self) -> f32 {
        let mut dir = 0.0;
        if self.move_right {
            dir += 1.0;
        }
        if self.move_left {
            dir -= 1.0;
        }
        dir
    }
}

impl World {
    /// Spawn one bullet at the player's nose. No cooldown.
    ///
    /// Returns false (and does nothing) unless a session is running.
    pub fn fire(&mut self, area: PlayArea) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.bullets.push(Bullet {
            pos: Vec2::new(self.player.x, area.height - BULLET_SPAWN_OFFSET),
            radius: BULLET_RADIUS,
            speed: BULLET_SPEED,
        });
        true
    }
}

/// Advance the world by `dt` seconds (clamped to `MAX_FRAME_DT`)
pub fn tick(world: &mut World, input: &TickInput, area: PlayArea, dt: f32) {
    if world.phase != SessionPhase::Running {
        return;
    }

    // Frame drops (tab backgrounding) must not produce one huge step
    let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_FRAME_DT) };

    for _ in 0..input.fire_triggers {
        world.fire(area);
    }

    // 1. Player motion
    let (min_x, max_x) = world.player.x_bounds(area);
    let px = world.player.x + input.horizontal() * world.player.speed * dt;
    world.player.x = px.clamp(min_x, max_x);

    // 2. Bullets travel up and expire past the top margin
    for bullet in &mut world.bullets {
        bullet.pos.y -= bullet.speed * dt;
    }
    world.bullets.retain(|b| b.pos.y >= -BULLET_TOP_MARGIN);

    // 3. Spawner
    world.spawn_timer_ms += dt * 1000.0;
    if world.spawn_timer_ms > world.spawn_interval_ms {
        world.spawn_timer_ms = 0.0;
        spawn_enemy(world, area);
        if world.spawn_interval_ms > SPAWN_INTERVAL_FLOOR_MS {
            world.spawn_interval_ms =
                (world.spawn_interval_ms * SPAWN_INTERVAL_DECAY).max(SPAWN_INTERVAL_FLOOR_MS);
        }
    }

    // 4. Enemies descend; those past the defence line cost a life
    let breach_y = area.breach_y();
    let mut breaches = Vec::new();
    world.enemies.retain_mut(|enemy| {
        enemy.pos.y += enemy.speed * dt;
        if enemy.pos.y > breach_y {
            breaches.push(enemy.pos.x);
            false
        } else {
            true
        }
    });
    for x in breaches {
        world.lives = world.lives.saturating_sub(1);
        world.push_event(GameEvent::EnemyBreached { x });
        spawn_burst(
            world,
            Vec2::new(x, area.height - BREACH_BURST_OFFSET),
            ParticleTint::Breach,
        );
        log::debug!("Enemy breached at x={:.0}, {} lives left", x, world.lives);

        if world.lives == 0 {
            world.phase = SessionPhase::GameOver;
            world.push_event(GameEvent::GameOver { score: world.score });
            log::info!("Game over with score {}", world.score);
            // Terminal: nothing else moves this frame
            return;
        }
    }

    // 5. Bullet/enemy collisions
    let hits = resolve_hits(&mut world.enemies, &mut world.bullets);
    for hit in hits {
        world.score += SCORE_PER_KILL;
        world.push_event(GameEvent::EnemyDestroyed { pos: hit.pos });
        spawn_burst(world, hit.pos, ParticleTint::Destruction);
        log::debug!("{:?} enemy destroyed, score {}", hit.variant, world.score);
    }

    // 6. Particles: ballistic with gravity, expire when life runs out
    world.particles.retain_mut(|p| {
        p.pos += p.vel * dt;
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.life -= dt;
        p.life > 0.0
    });

    // 7. Star field parallax
    for star in &mut world.stars {
        star.pos.y += star.speed * STAR_SCROLL_FACTOR * dt;
        if star.pos.y > area.height {
            star.pos.y = STAR_WRAP_Y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyVariant, Particle};

    const STEP: f32 = 0.05;

    fn running_world(area: PlayArea) -> World {
        let mut world = World::new(12345, area);
        world.start(area);
        world.drain_events();
        world
    }

    /// Keep the spawner quiet so scenarios only see the entities they set up
    fn silence_spawner(world: &mut World) {
        world.spawn_interval_ms = 1.0e9;
    }

    fn enemy_at(x: f32, y: f32, speed: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            radius: ENEMY_RADIUS,
            speed,
            variant: EnemyVariant::Purple,
        }
    }

    #[test]
    fn test_idle_world_does_not_advance() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = World::new(1, area);
        let stars_before: Vec<f32> = world.stars.iter().map(|s| s.pos.y).collect();
        let input = TickInput {
            move_right: true,
            fire_triggers: 3,
            ..Default::default()
        };
        tick(&mut world, &input, area, STEP);
        assert_eq!(world.player.x, 400.0);
        assert!(world.bullets.is_empty());
        assert_eq!(world.spawn_timer_ms, 0.0);
        let stars_after: Vec<f32> = world.stars.iter().map(|s| s.pos.y).collect();
        assert_eq!(stars_before, stars_after);
    }

    #[test]
    fn test_move_right_one_second() {
        let area = PlayArea::new(2000.0, 800.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut world, &input, area, STEP);
        }
        assert!((world.player.x - 1420.0).abs() < 0.01);
    }

    #[test]
    fn test_player_clamped_at_edges() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut world, &right, area, STEP);
        }
        assert_eq!(world.player.x, 800.0 - PLAYER_WIDTH / 2.0);

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut world, &left, area, STEP);
        }
        assert_eq!(world.player.x, PLAYER_WIDTH / 2.0);

        // Both held cancel out
        let both = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut world, &both, area, STEP);
        assert_eq!(world.player.x, PLAYER_WIDTH / 2.0);
    }

    #[test]
    fn test_player_reclamped_after_shrink() {
        let wide = PlayArea::new(1200.0, 600.0);
        let mut world = running_world(wide);
        silence_spawner(&mut world);
        world.player.x = 1100.0;

        let narrow = PlayArea::new(500.0, 600.0);
        tick(&mut world, &TickInput::default(), narrow, STEP);
        assert_eq!(world.player.x, 500.0 - PLAYER_WIDTH / 2.0);
    }

    #[test]
    fn test_fire_once_spawns_one_bullet_at_player() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.player.x = 321.0;

        let input = TickInput {
            fire_triggers: 1,
            ..Default::default()
        };
        tick(&mut world, &input, area, 0.0);

        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].pos.x, 321.0);
        assert_eq!(world.bullets[0].pos.y, 600.0 - BULLET_SPAWN_OFFSET);
    }

    #[test]
    fn test_rapid_fire_one_bullet_per_trigger() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        let input = TickInput {
            fire_triggers: 5,
            ..Default::default()
        };
        tick(&mut world, &input, area, 0.016);
        assert_eq!(world.bullets.len(), 5);
    }

    #[test]
    fn test_fire_ignored_unless_running() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = World::new(2, area);
        assert!(!world.fire(area));
        world.start(area);
        assert!(world.fire(area));
        world.phase = SessionPhase::GameOver;
        assert!(!world.fire(area));
        assert_eq!(world.bullets.len(), 1);
    }

    #[test]
    fn test_bullets_rise_and_expire() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.fire(area);
        let mut last_y = world.bullets[0].pos.y;

        let mut frames = 0;
        while !world.bullets.is_empty() {
            tick(&mut world, &TickInput::default(), area, STEP);
            if let Some(b) = world.bullets.first() {
                assert!(b.pos.y < last_y);
                last_y = b.pos.y;
            }
            frames += 1;
            assert!(frames < 100, "bullet never expired");
        }
        // 518 units up to the top, then 20 more at 45 units per frame
        assert_eq!(frames, 12);
    }

    #[test]
    fn test_enemy_descends_six_seconds() {
        let area = PlayArea::new(800.0, 900.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.enemies.push(enemy_at(400.0, -40.0, 100.0));

        for _ in 0..120 {
            tick(&mut world, &TickInput::default(), area, STEP);
        }
        assert_eq!(world.enemies.len(), 1);
        assert!((world.enemies[0].pos.y - 560.0).abs() < 0.01);
        assert_eq!(world.lives(), 3);
    }

    #[test]
    fn test_dt_clamped_to_max_step() {
        let area = PlayArea::new(800.0, 900.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.enemies.push(enemy_at(400.0, 0.0, 100.0));

        // Two seconds of wall clock (tab in background) counts as 50ms
        tick(&mut world, &TickInput::default(), area, 2.0);
        assert!((world.enemies[0].pos.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_spawner_fires_after_interval() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);

        // 18 * 50ms = 900ms, not yet strictly past the interval
        for _ in 0..18 {
            tick(&mut world, &TickInput::default(), area, STEP);
        }
        assert!(world.enemies.is_empty());

        tick(&mut world, &TickInput::default(), area, STEP);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.spawn_timer_ms, 0.0);
        assert!((world.spawn_interval_ms - 900.0 * 0.993).abs() < 0.001);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        world.spawn_interval_ms = 300.5;
        world.spawn_timer_ms = 300.0;
        tick(&mut world, &TickInput::default(), area, 0.001);
        assert_eq!(world.spawn_interval_ms, SPAWN_INTERVAL_FLOOR_MS);

        world.spawn_timer_ms = 300.0;
        tick(&mut world, &TickInput::default(), area, 0.001);
        assert_eq!(world.spawn_interval_ms, SPAWN_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn test_collision_scores_and_bursts() {
        let area = PlayArea::new(800.0, 800.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.enemies.push(enemy_at(100.0, 500.0, 0.0));
        world.bullets.push(Bullet {
            pos: Vec2::new(100.0, 500.0),
            radius: BULLET_RADIUS,
            speed: 0.0,
        });

        tick(&mut world, &TickInput::default(), area, STEP);

        assert_eq!(world.score(), 10);
        assert!(world.enemies.is_empty());
        assert!(world.bullets.is_empty());
        assert!(world.particles.len() >= BURST_MIN_PARTICLES);
        assert!(world.particles.iter().all(|p| p.tint == ParticleTint::Destruction));
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::EnemyDestroyed {
                pos: Vec2::new(100.0, 500.0)
            }]
        );
    }

    #[test]
    fn test_three_breaches_end_the_session() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);

        for breach in 1..=3u8 {
            world.enemies.push(enemy_at(200.0, area.breach_y() - 1.0, 100.0));
            tick(&mut world, &TickInput::default(), area, STEP);
            assert_eq!(world.lives(), 3 - breach);
            assert!(world.enemies.is_empty());
            if breach < 3 {
                assert!(world.is_running(), "game over after breach {breach}");
            }
        }

        assert!(world.is_game_over());
        let events = world.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyBreached { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_breach_burst_at_defence_line() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.enemies.push(enemy_at(250.0, area.breach_y() - 1.0, 100.0));
        tick(&mut world, &TickInput::default(), area, 0.02);

        assert!(!world.particles.is_empty());
        assert!(world.particles.iter().all(|p| p.tint == ParticleTint::Breach));
    }

    #[test]
    fn test_simultaneous_breaches_stop_at_zero() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        for i in 0..5 {
            world
                .enemies
                .push(enemy_at(100.0 + i as f32 * 60.0, area.breach_y() - 1.0, 100.0));
        }
        tick(&mut world, &TickInput::default(), area, STEP);
        assert_eq!(world.lives(), 0);
        assert!(world.is_game_over());

        // Frozen: further ticks change nothing
        let snapshot = (world.player.x, world.bullets.len(), world.particles.len());
        tick(
            &mut world,
            &TickInput {
                move_left: true,
                fire_triggers: 1,
                ..Default::default()
            },
            area,
            STEP,
        );
        assert_eq!(
            snapshot,
            (world.player.x, world.bullets.len(), world.particles.len())
        );
    }

    #[test]
    fn test_restart_after_game_over() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        world.lives = 1;
        world.enemies.push(enemy_at(200.0, area.breach_y() - 1.0, 100.0));
        tick(&mut world, &TickInput::default(), area, STEP);
        assert!(world.is_game_over());

        world.start(area);
        assert!(world.is_running());
        assert_eq!(world.lives(), 3);
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_particles_fall_and_expire() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(10.0, 0.0),
            life: 0.12,
            tint: ParticleTint::Destruction,
        });

        tick(&mut world, &TickInput::default(), area, STEP);
        let p = &world.particles[0];
        assert!((p.pos.x - 100.5).abs() < 0.001);
        assert!((p.vel.y - 15.0).abs() < 0.001);
        assert!((p.life - 0.07).abs() < 0.001);

        tick(&mut world, &TickInput::default(), area, STEP);
        tick(&mut world, &TickInput::default(), area, STEP);
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_stars_wrap_to_top() {
        let area = PlayArea::new(800.0, 600.0);
        let mut world = running_world(area);
        silence_spawner(&mut world);
        world.stars.truncate(1);
        world.stars[0].pos.y = 599.9;
        world.stars[0].speed = 20.0;

        tick(&mut world, &TickInput::default(), area, STEP);
        assert_eq!(world.stars.len(), 1);
        assert_eq!(world.stars[0].pos.y, STAR_WRAP_Y);
    }
}

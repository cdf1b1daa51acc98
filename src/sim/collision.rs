//! Bullet/enemy collision detection
//!
//! Both entities are circles, so a hit is simply centre distance below the
//! sum of radii. Resolution is first-match-wins, scanning newest to oldest.

use glam::Vec2;

use super::state::{Bullet, Enemy, EnemyVariant};

/// An enemy destroyed by a bullet this step
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Enemy centre at the moment of impact
    pub pos: Vec2,
    pub variant: EnemyVariant,
}

/// True if two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Remove every enemy that overlaps a bullet, together with that bullet.
///
/// Enemies are visited newest first; each takes the newest bullet that
/// overlaps it, not the nearest. A removed bullet cannot hit a later enemy,
/// so each enemy and each bullet takes part in at most one hit.
pub fn resolve_hits(enemies: &mut Vec<Enemy>, bullets: &mut Vec<Bullet>) -> Vec<Hit> {
    let mut hits = Vec::new();

    // Back to front so removals never shift an index still to be visited
    for i in (0..enemies.len()).rev() {
        let enemy = &enemies[i];
        let struck = bullets
            .iter()
            .rposition(|b| circles_overlap(enemy.pos, enemy.radius, b.pos, b.radius));
        if let Some(idx) = struck {
            bullets.remove(idx);
            let enemy = enemies.remove(i);
            hits.push(Hit {
                pos: enemy.pos,
                variant: enemy.variant,
            });
        }
    }

    hits
}

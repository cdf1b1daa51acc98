//! World to picture
//!
//! `draw_world` reads the world and writes draw calls; it never mutates game
//! state, so it can run any number of times per tick.

use glam::Vec2;

use super::canvas::{Canvas, draw_art};
use super::vertex::colors;
use crate::assets::{AssetSet, Sprite, SpriteId, enemy_color};
use crate::consts::PARTICLE_RADIUS;
use crate::settings::Settings;
use crate::sim::{ParticleTint, PlayArea, SessionPhase, World};

/// On-screen sprite boxes
const PLAYER_SPRITE_SIZE: Vec2 = Vec2::new(80.0, 60.0);
const BULLET_SPRITE_SIZE: Vec2 = Vec2::new(16.0, 16.0);
const ENEMY_SPRITE_SIZE: Vec2 = Vec2::new(56.0, 56.0);
/// Height of the bottom haze band as a fraction of the play area
const HAZE_FRACTION: f32 = 0.35;

const TITLE_GLYPH_HEIGHT: f32 = 21.0;
const SCORE_GLYPH_HEIGHT: f32 = 14.0;

/// Paint one frame
pub fn draw_world<C: Canvas + ?Sized>(
    world: &World,
    area: PlayArea,
    assets: &AssetSet,
    settings: &Settings,
    canvas: &mut C,
) {
    let full = Vec2::new(area.width, area.height);
    canvas.set_alpha(1.0);
    canvas.fill_rect(Vec2::ZERO, full, colors::BACKGROUND);

    if settings.starfield_enabled() {
        for star in &world.stars {
            canvas.set_alpha(star.alpha);
            canvas.fill_circle(star.pos, star.radius, colors::STAR);
        }
        canvas.set_alpha(1.0);
    }

    let haze_height = area.height * HAZE_FRACTION;
    canvas.fill_vertical_gradient(
        Vec2::new(0.0, area.height - haze_height),
        Vec2::new(area.width, haze_height),
        colors::HAZE_TOP,
        colors::HAZE_BOTTOM,
    );

    draw_player(world, area, assets.sprite(SpriteId::Player), canvas);

    let bullet = assets.sprite(SpriteId::Bullet);
    for b in &world.bullets {
        if !draw_sprite(canvas, bullet, b.pos, BULLET_SPRITE_SIZE) {
            canvas.fill_circle(b.pos, b.radius, colors::BULLET_FALLBACK);
        }
    }

    for e in &world.enemies {
        let sprite = assets.sprite(SpriteId::Enemy(e.variant));
        if !draw_sprite(canvas, sprite, e.pos, ENEMY_SPRITE_SIZE) {
            canvas.fill_circle(e.pos, e.radius, enemy_color(e.variant));
        }
    }

    for p in &world.particles {
        canvas.set_alpha(p.life.clamp(0.0, 1.0));
        let color = match p.tint {
            ParticleTint::Destruction => colors::PARTICLE_DESTRUCTION,
            ParticleTint::Breach => colors::PARTICLE_BREACH,
        };
        canvas.fill_circle(p.pos, PARTICLE_RADIUS, color);
    }
    canvas.set_alpha(1.0);

    match world.phase {
        SessionPhase::Running => {}
        SessionPhase::Idle => canvas.fill_rect(Vec2::ZERO, full, colors::IDLE_TINT),
        SessionPhase::GameOver => {
            canvas.fill_rect(Vec2::ZERO, full, colors::GAME_OVER_TINT);
            let mid = full / 2.0;
            canvas.draw_text(
                "GAME OVER",
                mid - Vec2::new(0.0, 20.0),
                TITLE_GLYPH_HEIGHT,
                colors::TEXT,
            );
            canvas.draw_text(
                &format!("SCORE: {}", world.score),
                mid + Vec2::new(0.0, 12.0),
                SCORE_GLYPH_HEIGHT,
                colors::TEXT,
            );
        }
    }
}

fn draw_player<C: Canvas + ?Sized>(world: &World, area: PlayArea, sprite: &Sprite, canvas: &mut C) {
    let player = &world.player;
    let center = Vec2::new(player.x, area.player_y());
    if draw_sprite(canvas, sprite, center, PLAYER_SPRITE_SIZE) {
        return;
    }

    // Placeholder ship: upward triangle on the player's hitbox
    let half = player.width / 2.0;
    canvas.fill_polygon(
        &[
            Vec2::new(center.x, center.y - player.height),
            Vec2::new(center.x - half, center.y + player.height),
            Vec2::new(center.x + half, center.y + player.height),
        ],
        colors::PLAYER_FALLBACK,
    );
}

/// Draw a ready sprite; `false` if the caller should draw a placeholder
fn draw_sprite<C: Canvas + ?Sized>(canvas: &mut C, sprite: &Sprite, center: Vec2, size: Vec2) -> bool {
    match sprite.art() {
        Some(art) => {
            draw_art(canvas, art, center, size);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Rgba;
    use crate::sim::{Bullet, Enemy, EnemyVariant, Particle};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Alpha(f32),
        Rect(Vec2, Vec2, Rgba),
        Circle(Vec2, f32, Rgba),
        Polygon(usize, Rgba),
        Gradient,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn set_alpha(&mut self, alpha: f32) {
            self.ops.push(Op::Alpha(alpha));
        }
        fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
            self.ops.push(Op::Rect(min, size, color));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
            self.ops.push(Op::Circle(center, radius, color));
        }
        fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
            self.ops.push(Op::Polygon(points.len(), color));
        }
        fn fill_vertical_gradient(&mut self, _: Vec2, _: Vec2, _: Rgba, _: Rgba) {
            self.ops.push(Op::Gradient);
        }
    }

    fn area() -> PlayArea {
        PlayArea::new(800.0, 600.0)
    }

    fn render(world: &World, assets: &AssetSet, settings: &Settings) -> Vec<Op> {
        let mut canvas = Recorder::default();
        draw_world(world, area(), assets, settings, &mut canvas);
        canvas.ops
    }

    fn running_world() -> World {
        let mut world = World::new(3, area());
        world.start(area());
        world
    }

    #[test]
    fn test_background_first() {
        let ops = render(&World::new(1, area()), &AssetSet::procedural(), &Settings::default());
        assert_eq!(ops[1], Op::Rect(Vec2::ZERO, Vec2::new(800.0, 600.0), colors::BACKGROUND));
    }

    #[test]
    fn test_idle_tint_last() {
        let ops = render(&World::new(1, area()), &AssetSet::procedural(), &Settings::default());
        assert_eq!(
            ops.last(),
            Some(&Op::Rect(Vec2::ZERO, Vec2::new(800.0, 600.0), colors::IDLE_TINT))
        );
    }

    #[test]
    fn test_running_has_no_overlay() {
        let ops = render(&running_world(), &AssetSet::procedural(), &Settings::default());
        assert!(!ops.iter().any(|op| matches!(op, Op::Rect(_, _, c) if *c == colors::IDLE_TINT || *c == colors::GAME_OVER_TINT)));
    }

    #[test]
    fn test_game_over_panel() {
        let mut world = running_world();
        world.phase = SessionPhase::GameOver;
        world.score = 120;
        let ops = render(&world, &AssetSet::procedural(), &Settings::default());
        let tint = ops
            .iter()
            .position(|op| matches!(op, Op::Rect(_, _, c) if *c == colors::GAME_OVER_TINT))
            .expect("game over tint");
        let text_rects = ops[tint + 1..]
            .iter()
            .filter(|op| matches!(op, Op::Rect(_, _, c) if *c == colors::TEXT))
            .count();
        assert!(text_rects > 20);
    }

    #[test]
    fn test_pending_sprites_use_placeholders() {
        let mut world = running_world();
        world.bullets.push(Bullet {
            pos: Vec2::new(100.0, 300.0),
            radius: 6.0,
            speed: 900.0,
        });
        world.enemies.push(Enemy {
            pos: Vec2::new(200.0, 100.0),
            radius: 24.0,
            speed: 80.0,
            variant: EnemyVariant::Purple,
        });
        let assets = AssetSet::from_directory("sprites");
        let ops = render(&world, &assets, &Settings::default());

        assert!(ops.contains(&Op::Polygon(3, colors::PLAYER_FALLBACK)));
        assert!(ops.contains(&Op::Circle(Vec2::new(100.0, 300.0), 6.0, colors::BULLET_FALLBACK)));
        assert!(ops.contains(&Op::Circle(
            Vec2::new(200.0, 100.0),
            24.0,
            enemy_color(EnemyVariant::Purple)
        )));
    }

    #[test]
    fn test_ready_sprites_skip_placeholders() {
        let ops = render(&running_world(), &AssetSet::procedural(), &Settings::default());
        assert!(!ops.contains(&Op::Polygon(3, colors::PLAYER_FALLBACK)));
    }

    #[test]
    fn test_particle_alpha_clamped() {
        let mut world = running_world();
        for life in [1.4, 0.5, -0.2] {
            world.particles.push(Particle {
                pos: Vec2::new(10.0, 10.0),
                vel: Vec2::ZERO,
                life,
                tint: ParticleTint::Destruction,
            });
        }
        let mut settings = Settings::default();
        settings.starfield = false;
        let ops = render(&world, &AssetSet::procedural(), &settings);
        let alphas: Vec<f32> = ops
            .iter()
            .filter_map(|op| match op {
                Op::Alpha(a) if *a != 1.0 => Some(*a),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.5, 0.0]);
        let particle_circles = ops
            .iter()
            .filter(|op| matches!(op, Op::Circle(_, r, c) if *r == PARTICLE_RADIUS && *c == colors::PARTICLE_DESTRUCTION))
            .count();
        assert_eq!(particle_circles, 3);
    }

    #[test]
    fn test_stars_follow_setting() {
        let world = running_world();
        let star_ops = |settings: &Settings| {
            render(&world, &AssetSet::procedural(), settings)
                .iter()
                .filter(|op| matches!(op, Op::Circle(_, _, c) if *c == colors::STAR))
                .count()
        };
        assert_eq!(star_ops(&Settings::default()), world.stars.len());
        assert_eq!(star_ops(&Settings::from_query("quality=low")), 0);
        assert_eq!(star_ops(&Settings::from_query("stars=off")), 0);
    }
}

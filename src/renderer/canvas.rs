//! Drawing surface abstraction
//!
//! The scene is described in logical pixels against a `Canvas`. `MeshCanvas`
//! turns it into triangles for the GPU; tests use a recording double.

use glam::Vec2;

use super::font;
use crate::assets::{Rgba, Shape, VectorArt};

pub trait Canvas {
    /// Global opacity applied to everything drawn until changed (0..=1)
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Fill a convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    fn fill_vertical_gradient(&mut self, min: Vec2, size: Vec2, top: Rgba, bottom: Rgba);

    /// Centred text in the built-in block font
    fn draw_text(&mut self, text: &str, center: Vec2, glyph_height: f32, color: Rgba) {
        for (min, size) in font::layout(text, center, glyph_height) {
            self.fill_rect(min, size, color);
        }
    }
}

/// Draw vector art stretched into the box centred on `center`
pub fn draw_art<C: Canvas + ?Sized>(canvas: &mut C, art: &VectorArt, center: Vec2, size: Vec2) {
    let scale = size / Vec2::new(art.width, art.height);
    let origin = center - size / 2.0;
    let map = |p: Vec2| origin + p * scale;

    for shape in &art.shapes {
        match shape {
            Shape::Polygon { points, color } => {
                let mapped: Vec<Vec2> = points.iter().map(|&p| map(p)).collect();
                canvas.fill_polygon(&mapped, *color);
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => canvas.fill_circle(map(*center), radius * scale.min_element(), *color),
            Shape::Rect { min, size, color } => canvas.fill_rect(map(*min), *size * scale, *color),
        }
    }
}

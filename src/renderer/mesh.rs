//! Triangle-mesh canvas feeding the wgpu pipeline

use glam::Vec2;

use super::canvas::Canvas;
use super::shapes;
use super::vertex::Vertex;
use crate::assets::Rgba;

/// Collects triangles in logical pixel coordinates
#[derive(Debug)]
pub struct MeshCanvas {
    vertices: Vec<Vertex>,
    alpha: f32,
}

impl Default for MeshCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshCanvas {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            alpha: 1.0,
        }
    }

    /// Start a new frame, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.alpha = 1.0;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn tint(&self, color: Rgba) -> Rgba {
        [color[0], color[1], color[2], color[3] * self.alpha]
    }

    fn push(&mut self, mut verts: Vec<Vertex>) {
        if self.alpha < 1.0 {
            for v in &mut verts {
                v.color[3] *= self.alpha;
            }
        }
        self.vertices.append(&mut verts);
    }
}

impl Canvas for MeshCanvas {
    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.push(shapes::rect(min, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let color = self.tint(color);
        self.vertices
            .extend(shapes::circle(center, radius, color, shapes::circle_segments(radius)));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.push(shapes::polygon(points, color));
    }

    fn fill_vertical_gradient(&mut self, min: Vec2, size: Vec2, top: Rgba, bottom: Rgba) {
        self.push(shapes::vertical_gradient(min, size, top, bottom));
    }
}

//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.024, 0.075, 0.129, 1.0]; // #061321
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HAZE_TOP: [f32; 4] = [0.039, 0.071, 0.118, 0.0];
    pub const HAZE_BOTTOM: [f32; 4] = [0.012, 0.027, 0.047, 0.25];
    // Placeholders while sprites load
    pub const PLAYER_FALLBACK: [f32; 4] = [0.306, 0.878, 0.643, 1.0];
    pub const BULLET_FALLBACK: [f32; 4] = [1.0, 0.820, 0.400, 1.0];
    pub const PARTICLE_DESTRUCTION: [f32; 4] = [1.0, 0.545, 0.545, 1.0];
    pub const PARTICLE_BREACH: [f32; 4] = [1.0, 0.706, 0.706, 1.0];
    pub const IDLE_TINT: [f32; 4] = [0.0, 0.0, 0.0, 0.45];
    pub const GAME_OVER_TINT: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

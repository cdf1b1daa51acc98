//! Rendering
//!
//! `draw_world` describes a frame against the `Canvas` trait in logical
//! pixels. `MeshCanvas` tessellates it into triangles and `RenderState`
//! uploads them to a WebGPU surface.

pub mod canvas;
pub mod font;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, draw_art};
pub use mesh::MeshCanvas;
pub use pipeline::RenderState;
pub use scene::draw_world;
pub use vertex::Vertex;

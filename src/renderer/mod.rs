//! Rendering module
//!
//! `scene` tessellates the world into a triangle list in canvas pixels;
//! `pipeline` uploads it and draws it with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;

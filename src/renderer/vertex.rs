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

/// Colors for game elements (straight alpha, sRGB values)
pub mod colors {
    pub const ROCK_LIGHT: [f32; 4] = [0.612, 0.639, 0.686, 1.0]; // #9ca3af
    pub const ROCK_DARK: [f32; 4] = [0.216, 0.255, 0.318, 1.0]; // #374151
    pub const ROCK_OUTLINE: [f32; 4] = [0.122, 0.161, 0.216, 1.0]; // #1f2937

    pub const APPLE_NORMAL: [f32; 4] = [0.937, 0.267, 0.267, 1.0]; // #ef4444
    pub const APPLE_NORMAL_GLOW: [f32; 4] = [0.988, 0.647, 0.647, 1.0];
    pub const APPLE_DOUBLE: [f32; 4] = [0.984, 0.749, 0.141, 1.0]; // gold
    pub const APPLE_DOUBLE_GLOW: [f32; 4] = [0.992, 0.878, 0.278, 1.0];
    pub const APPLE_INVINCIBLE: [f32; 4] = [0.231, 0.510, 0.965, 1.0]; // blue
    pub const APPLE_INVINCIBLE_GLOW: [f32; 4] = [0.576, 0.773, 0.992, 1.0];
    pub const APPLE_GLYPH: [f32; 4] = [1.0, 1.0, 1.0, 0.6];

    pub const SNAKE_DEAD: [f32; 4] = APPLE_NORMAL;
    pub const EYE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Surface clear color: transparent so the camera feed shows through
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
}

//! Hand Snake - a finger-steered snake arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, per-frame step)
//! - `renderer`: Scene tessellation and the WebGPU pipeline
//! - `session`: Platform-independent frame driver and presentation sync
//! - `input`: Hand landmark to canvas pointer adapter
//! - `settings`: User preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{EffectSink, Frame, Session};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Snake length (segments) at the start of a round
    pub const INITIAL_SNAKE_LENGTH: f32 = 20.0;
    /// Segments added to the target length per apple
    pub const GROWTH_PER_APPLE: f32 = 8.0;
    /// Rendered length catch-up per frame
    pub const GROWTH_SPEED: f32 = 0.2;

    /// Entity radii (canvas pixels)
    pub const APPLE_RADIUS: f32 = 12.0;
    pub const HEAD_RADIUS: f32 = 16.0;
    pub const BODY_RADIUS: f32 = 12.0;
    pub const MIN_BODY_RADIUS: f32 = 4.0;
    pub const ROCK_RADIUS_MIN: f32 = 20.0;
    pub const ROCK_RADIUS_MAX: f32 = 40.0;

    /// Vertices in a rock silhouette
    pub const ROCK_VERTEX_COUNT: usize = 8;
    /// Per-vertex radius jitter range (fraction of base radius)
    pub const ROCK_JAGGEDNESS_MIN: f32 = 0.7;
    pub const ROCK_JAGGEDNESS_MAX: f32 = 1.1;

    /// Rock timing (milliseconds)
    pub const ROCK_LIFETIME_MS: f64 = 30_000.0;
    pub const ROCK_FADE_MS: f64 = 2_000.0;
    pub const ROCK_SPAWN_INTERVAL_MS: f64 = 25_000.0;

    /// Invincibility window granted by a blue apple
    pub const INVINCIBLE_DURATION_MS: f64 = 5_000.0;

    /// Apple kind probabilities, applied against a single draw
    pub const CHANCE_INVINCIBLE: f32 = 0.08;
    pub const CHANCE_DOUBLE: f32 = 0.15;

    /// Apple placement
    pub const APPLE_PADDING: f32 = 50.0;
    pub const APPLE_ROCK_MARGIN: f32 = 10.0;
    pub const APPLE_SPAWN_ATTEMPTS: u32 = 10;

    /// Rock placement
    pub const ROCK_PADDING: f32 = 40.0;
    pub const ROCK_APPLE_MARGIN: f32 = 20.0;
    pub const ROCK_HEAD_CLEARANCE: f32 = 150.0;
    pub const ROCK_SPAWN_ATTEMPTS: u32 = 5;

    /// Rock hits need this much overlap before they count
    pub const ROCK_HIT_FORGIVENESS: f32 = 5.0;

    /// Scoring
    pub const POINTS_NORMAL: u32 = 10;
    pub const POINTS_DOUBLE: u32 = 20;
    pub const POINTS_INVINCIBLE: u32 = 10;
    pub const POINTS_SMASH: u32 = 5;

    /// Canvas size used until the camera reports its resolution
    pub const FALLBACK_CANVAS_WIDTH: u32 = 640;
    pub const FALLBACK_CANVAS_HEIGHT: u32 = 480;

    /// Sentinel position for "no apple on the board"
    pub const OFFSCREEN: f32 = -100.0;
}

/// Linear interpolation between `start` and `end`
#[inline]
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}

//! Simulation module
//!
//! All gameplay logic lives here:
//! - Wall-clock timestamps passed in, never read
//! - Seeded RNG owned by the world
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, find_rock_hit, head_touches_apple};
pub use geom::{jagged_polygon, sample_inset};
pub use spawn::{roll_apple_kind, spawn_apple, spawn_rock};
pub use state::{Apple, AppleKind, GameEvent, GamePhase, GameState, Rock, World};
pub use tick::{TickInput, smoothing_for_distance, tick};

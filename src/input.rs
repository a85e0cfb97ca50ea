//! Hand landmark input adapter
//!
//! The tracker reports hands as lists of 21 normalized landmarks. Only the
//! index fingertip of the first hand steers the snake.

use glam::Vec2;
use serde::Deserialize;

/// Landmark index of the index fingertip
pub const INDEX_FINGER_TIP: usize = 8;

/// One normalized landmark (0-1 in both axes, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// Scale a normalized coordinate to canvas pixels
pub fn to_canvas(landmark: Landmark, canvas: Vec2) -> Vec2 {
    Vec2::new(landmark.x * canvas.x, landmark.y * canvas.y)
}

/// Pointer target from a set of detected hands, if any
pub fn fingertip_target(hands: &[Vec<Landmark>], canvas: Vec2) -> Option<Vec2> {
    let tip = hands.first()?.get(INDEX_FINGER_TIP)?;
    Some(to_canvas(*tip, canvas))
}

/// Parse the tracker's `multiHandLandmarks` JSON payload.
///
/// A missing or null field means no hands were seen.
pub fn parse_hands(json: &str) -> Result<Vec<Vec<Landmark>>, serde_json::Error> {
    let hands: Option<Vec<Vec<Landmark>>> = serde_json::from_str(json)?;
    Ok(hands.unwrap_or_default())
}

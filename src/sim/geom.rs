//! Geometry helpers shared by spawning and rendering

use glam::Vec2;
use rand::Rng;

use crate::consts::{ROCK_JAGGEDNESS_MAX, ROCK_JAGGEDNESS_MIN, ROCK_VERTEX_COUNT};

/// Generate a jagged closed polygon around the origin.
///
/// Vertices are evenly spaced in angle; each one gets its own radius in
/// `[0.7, 1.1) * radius`, which is what makes every rock look different.
pub fn jagged_polygon<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> [Vec2; ROCK_VERTEX_COUNT] {
    let mut vertices = [Vec2::ZERO; ROCK_VERTEX_COUNT];
    let jitter = ROCK_JAGGEDNESS_MAX - ROCK_JAGGEDNESS_MIN;
    for (i, vertex) in vertices.iter_mut().enumerate() {
        let angle = std::f32::consts::TAU * i as f32 / ROCK_VERTEX_COUNT as f32;
        let r = radius * (ROCK_JAGGEDNESS_MIN + rng.random::<f32>() * jitter);
        *vertex = Vec2::new(angle.cos() * r, angle.sin() * r);
    }
    vertices
}

/// Uniform sample inside the rectangle `bounds` inset by `padding` on every side
pub fn sample_inset<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, padding: f32) -> Vec2 {
    Vec2::new(
        padding + rng.random::<f32>() * (bounds.x - padding * 2.0),
        padding + rng.random::<f32>() * (bounds.y - padding * 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_jagged_polygon_radii_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let verts = jagged_polygon(&mut rng, 30.0);
            for v in verts {
                let r = v.length();
                assert!(r >= 30.0 * 0.7 - 1e-3, "radius {r} too small");
                assert!(r <= 30.0 * 1.1 + 1e-3, "radius {r} too large");
            }
        }
    }

    #[test]
    fn test_jagged_polygon_vertex_angles() {
        let mut rng = Pcg32::seed_from_u64(1);
        let verts = jagged_polygon(&mut rng, 25.0);
        // First vertex sits on the +x axis
        assert!(verts[0].y.abs() < 1e-4);
        assert!(verts[0].x > 0.0);
        // Third vertex is a quarter turn later
        assert!(verts[2].x.abs() < 1e-3);
        assert!(verts[2].y > 0.0);
    }

    #[test]
    fn test_sample_inset_stays_inside() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = Vec2::new(640.0, 480.0);
        for _ in 0..500 {
            let p = sample_inset(&mut rng, bounds, 50.0);
            assert!(p.x >= 50.0 && p.x <= 590.0);
            assert!(p.y >= 50.0 && p.y <= 430.0);
        }
    }
}

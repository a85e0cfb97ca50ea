//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in canvas pixels.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;

/// Convert HSL (hue in degrees, saturation/lightness in 0-1) to RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, alpha]
}

/// Linear blend between two colors
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Multiply a color's alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Ring whose color blends from `inner_color` to `outer_color`.
///
/// With a transparent outer color this reads as a soft glow.
pub fn soft_ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Closed polygon filled as a fan around `center`, shaded by a radial
/// gradient that runs from `focus` (relative to center) out to `extent`.
pub fn radial_polygon(
    center: Vec2,
    outline: &[Vec2],
    focus: Vec2,
    extent: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
) -> Vec<Vertex> {
    let shade = |p: Vec2| mix(inner_color, outer_color, p.distance(focus) / extent);
    let hub = shade(Vec2::ZERO);
    let mut vertices = Vec::with_capacity(outline.len() * 3);

    for (i, &a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, hub));
        vertices.push(Vertex::new(center.x + a.x, center.y + a.y, shade(a)));
        vertices.push(Vertex::new(center.x + b.x, center.y + b.y, shade(b)));
    }

    vertices
}

/// A straight stroke between two points
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Stroke the closed outline of a polygon
pub fn polygon_outline(center: Vec2, outline: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(outline.len() * 6);
    for (i, &a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        vertices.extend(line(center + a, center + b, width, color));
    }
    vertices
}

/// Five-pointed star, point up
pub fn star(center: Vec2, outer_radius: f32, inner_radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let points: Vec<Vec2> = (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            let theta = -PI / 2.0 + i as f32 * PI / 5.0;
            Vec2::new(theta.cos() * r, theta.sin() * r)
        })
        .collect();

    let mut vertices = Vec::with_capacity(30);
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(center.x + a.x, center.y + a.y, color));
        vertices.push(Vertex::new(center.x + b.x, center.y + b.y, color));
    }
    vertices
}

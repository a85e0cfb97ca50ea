//! Scene tessellation
//!
//! Turns the current world into a triangle list, back to front: rocks,
//! apple, then the snake from tail to head. Read-only over the world.

use glam::Vec2;

use super::shapes::{
    circle, hsl_to_rgba, line, polygon_outline, radial_polygon, soft_ring, star, with_alpha,
};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Apple, AppleKind, GamePhase, Rock, World};

/// Glow width around apples
const APPLE_GLOW: f32 = 15.0;
/// Glow width around the invincible snake
const SNAKE_GLOW: f32 = 10.0;
/// Eye layout relative to the head center
const EYE_SPACING: f32 = 5.0;
const EYE_RADIUS: f32 = 5.0;
const PUPIL_RADIUS: f32 = 2.5;
const GAZE_DISTANCE: f32 = 3.0;

/// Build the full frame
pub fn build_scene(world: &World, now_ms: f64, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);
    let segments = settings.quality.circle_segments();

    for rock in &world.rocks {
        draw_rock(&mut out, rock, now_ms);
    }
    if world.apple.is_present() {
        draw_apple(&mut out, &world.apple, now_ms, settings);
    }
    draw_snake(
        &mut out,
        world,
        now_ms,
        segments,
        settings.quality.glow_enabled(),
    );

    out
}

fn draw_rock(out: &mut Vec<Vertex>, rock: &Rock, now_ms: f64) {
    let alpha = rock.fade_alpha(now_ms);
    if alpha <= 0.0 {
        return;
    }

    let focus = Vec2::splat(-rock.radius / 3.0);
    out.extend(radial_polygon(
        rock.pos,
        &rock.vertices,
        focus,
        rock.radius,
        with_alpha(colors::ROCK_LIGHT, alpha),
        with_alpha(colors::ROCK_DARK, alpha),
    ));
    out.extend(polygon_outline(
        rock.pos,
        &rock.vertices,
        2.0,
        with_alpha(colors::ROCK_OUTLINE, alpha),
    ));
}

/// Pulse scale for invincible apples
pub fn apple_pulse(now_ms: f64) -> f32 {
    1.0 + (now_ms / 100.0).sin() as f32 * 0.1
}

fn draw_apple(out: &mut Vec<Vertex>, apple: &Apple, now_ms: f64, settings: &Settings) {
    let segments = settings.quality.circle_segments();
    let (fill, glow) = match apple.kind {
        AppleKind::Normal => (colors::APPLE_NORMAL, colors::APPLE_NORMAL_GLOW),
        AppleKind::Double => (colors::APPLE_DOUBLE, colors::APPLE_DOUBLE_GLOW),
        AppleKind::Invincible => (colors::APPLE_INVINCIBLE, colors::APPLE_INVINCIBLE_GLOW),
    };
    let scale = if apple.kind == AppleKind::Invincible && settings.pulse_enabled() {
        apple_pulse(now_ms)
    } else {
        1.0
    };
    let radius = APPLE_RADIUS * scale;

    if settings.quality.glow_enabled() {
        out.extend(soft_ring(
            apple.pos,
            radius,
            radius + APPLE_GLOW * scale,
            with_alpha(glow, 0.7),
            with_alpha(glow, 0.0),
            segments,
        ));
    }
    out.extend(circle(apple.pos, radius, fill, segments));

    // Glyphs sit one pixel below center
    let anchor = apple.pos + Vec2::new(0.0, scale);
    match apple.kind {
        AppleKind::Double => double_label(out, anchor, scale),
        AppleKind::Invincible => out.extend(star(anchor, 5.0 * scale, 2.2 * scale, colors::APPLE_GLYPH)),
        AppleKind::Normal => {}
    }
}

/// "x2" drawn as strokes
fn double_label(out: &mut Vec<Vertex>, anchor: Vec2, scale: f32) {
    let w = 1.1 * scale;
    let p = |x: f32, y: f32| anchor + Vec2::new(x, y) * scale;
    let strokes = [
        // x
        (p(-5.5, -1.0), p(-1.5, 3.0)),
        (p(-1.5, -1.0), p(-5.5, 3.0)),
        // 2
        (p(0.5, -3.5), p(4.5, -3.5)),
        (p(4.5, -3.5), p(4.5, 0.0)),
        (p(4.5, 0.0), p(0.5, 0.0)),
        (p(0.5, 0.0), p(0.5, 3.5)),
        (p(0.5, 3.5), p(4.5, 3.5)),
    ];
    for (a, b) in strokes {
        out.extend(line(a, b, w, colors::APPLE_GLYPH));
    }
}

/// Radius of segment `index` in a body of `len` segments
pub fn segment_radius(index: usize, len: usize) -> f32 {
    if index == 0 {
        HEAD_RADIUS
    } else {
        let ratio = 1.0 - index as f32 / len as f32;
        (BODY_RADIUS * ratio).max(MIN_BODY_RADIUS)
    }
}

/// Color of segment `index`
pub fn segment_color(index: usize, now_ms: f64, game_over: bool, invincible: bool) -> [f32; 4] {
    if game_over {
        colors::SNAKE_DEAD
    } else if invincible {
        let hue = ((now_ms / 5.0 + index as f64 * 10.0) % 360.0) as f32;
        hsl_to_rgba(hue, 0.9, 0.6, 1.0)
    } else {
        let hue = (140.0 + index as f32 * 2.0) % 360.0;
        hsl_to_rgba(hue, 0.8, 0.5, 1.0)
    }
}

fn draw_snake(out: &mut Vec<Vertex>, world: &World, now_ms: f64, segments: u32, glow: bool) {
    let len = world.segments.len();
    if len == 0 {
        return;
    }

    let game_over = world.phase == GamePhase::GameOver;
    let invincible = world.is_invincible(now_ms);

    for (i, &pos) in world.segments.iter().enumerate().rev() {
        let radius = segment_radius(i, len);
        let color = segment_color(i, now_ms, game_over, invincible);

        if invincible && !game_over && glow {
            out.extend(soft_ring(
                pos,
                radius,
                radius + SNAKE_GLOW,
                with_alpha(color, 0.6),
                with_alpha(color, 0.0),
                segments,
            ));
        }
        out.extend(circle(pos, radius, color, segments));

        if i == 0 {
            draw_face(out, pos, world.apple.pos, game_over, segments);
        }
    }
}

/// Eyes that look toward the apple, or X marks once dead
fn draw_face(out: &mut Vec<Vertex>, head: Vec2, apple: Vec2, game_over: bool, segments: u32) {
    let delta = apple - head;
    let angle = delta.y.atan2(delta.x);
    let look = Vec2::new(angle.cos(), angle.sin()) * GAZE_DISTANCE;

    for side in [-1.0, 1.0] {
        let socket = head + Vec2::new(side * EYE_SPACING, -EYE_SPACING);
        out.extend(circle(socket + look * 0.5, EYE_RADIUS, colors::EYE_WHITE, segments));

        if game_over {
            out.extend(line(
                socket + Vec2::new(-2.0, -2.0),
                socket + Vec2::new(2.0, 2.0),
                2.0,
                colors::PUPIL,
            ));
            out.extend(line(
                socket + Vec2::new(2.0, -2.0),
                socket + Vec2::new(-2.0, 2.0),
                2.0,
                colors::PUPIL,
            ));
        } else {
            out.extend(circle(socket + look, PUPIL_RADIUS, colors::PUPIL, segments));
        }
    }
}

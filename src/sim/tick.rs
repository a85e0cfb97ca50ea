//! Per-frame simulation step
//!
//! Advances the world by one display frame. Timing is wall-clock based:
//! rock lifetimes and invincibility compare against `now_ms`, while growth
//! and head smoothing advance a fixed amount per frame.

use glam::Vec2;

use super::collision::{find_rock_hit, head_touches_apple};
use super::state::{AppleKind, GameEvent, GamePhase, World};
use crate::consts::*;
use crate::lerp;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock time of this frame (ms)
    pub now_ms: f64,
    /// Fresh pointer target, if the tracker produced one since last frame.
    /// `None` keeps the previous target.
    pub pointer: Option<Vec2>,
}

/// Head smoothing factor: big gaps close fast, fine positioning stays steady
pub fn smoothing_for_distance(dist: f32) -> f32 {
    if dist > 100.0 {
        0.5
    } else if dist > 50.0 {
        0.3
    } else {
        0.15
    }
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput) {
    if let Some(pointer) = input.pointer {
        world.target = Some(pointer);
    }

    if world.phase != GamePhase::Playing {
        return;
    }

    let now = input.now_ms;

    // Invincibility mirror; the session republishes only when it flips
    let invincible = world.is_invincible(now);
    world.invincible_shown = invincible;

    // Rock lifecycle
    world.rocks.retain(|rock| rock.is_alive(now));
    if now - world.last_rock_spawn_ms > ROCK_SPAWN_INTERVAL_MS {
        world.try_spawn_rock(now);
        world.last_rock_spawn_ms = now;
    }

    // Head motion
    if let Some(target) = world.target {
        world.head = Some(match world.head {
            None => target,
            Some(head) => {
                let factor = smoothing_for_distance(head.distance(target));
                Vec2::new(lerp(head.x, target.x, factor), lerp(head.y, target.y, factor))
            }
        });
    }

    let Some(head) = world.head else {
        return;
    };

    grow(world);

    // Rocks
    if let Some(index) = find_rock_hit(head, &world.rocks) {
        if invincible {
            let rock = world.rocks.remove(index);
            world.score += POINTS_SMASH;
            world.events.push(GameEvent::Smash);
            log::debug!("Smashed rock {}", rock.id);
        } else {
            world.end_round();
            return;
        }
    }

    // Body
    world.segments.push_front(head);
    world.segments.truncate(world.length.floor() as usize);

    // Apple
    if head_touches_apple(head, &world.apple) {
        let kind = world.apple.kind;
        world.score += kind.points();
        if kind == AppleKind::Invincible {
            world.invincible_until_ms = now + INVINCIBLE_DURATION_MS;
            world.events.push(GameEvent::PowerUp);
            log::debug!("Invincible until {:.0}", world.invincible_until_ms);
        } else {
            world.events.push(GameEvent::Eat);
        }
        world.target_length += GROWTH_PER_APPLE;
        world.respawn_apple();
    }
}

/// Move the rendered length one step toward the target length
fn grow(world: &mut World) {
    if world.length < world.target_length {
        world.length = (world.length + GROWTH_SPEED).min(world.target_length);
        // Absorb f32 drift so the target is reached on schedule
        if world.target_length - world.length < 1e-3 {
            world.length = world.target_length;
        }
    }
}

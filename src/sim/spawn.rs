//! Apple and rock placement
//!
//! Both use bounded rejection sampling. Apples fall back to an unchecked
//! position when every attempt collides; rocks simply skip the cycle.

use glam::Vec2;
use rand::Rng;

use super::geom::{jagged_polygon, sample_inset};
use super::state::{Apple, AppleKind, Rock, World};
use crate::consts::*;

/// Pick an apple kind from one uniform draw
pub fn roll_apple_kind<R: Rng + ?Sized>(rng: &mut R) -> AppleKind {
    let roll: f32 = rng.random();
    if roll < CHANCE_INVINCIBLE {
        AppleKind::Invincible
    } else if roll < CHANCE_INVINCIBLE + CHANCE_DOUBLE {
        AppleKind::Double
    } else {
        AppleKind::Normal
    }
}

/// Place a new apple away from the given rocks
pub fn spawn_apple<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, rocks: &[Rock]) -> Apple {
    let mut pos = None;
    for _ in 0..APPLE_SPAWN_ATTEMPTS {
        let candidate = sample_inset(rng, bounds, APPLE_PADDING);
        let blocked = rocks.iter().any(|rock| {
            candidate.distance(rock.pos) < rock.radius + APPLE_RADIUS + APPLE_ROCK_MARGIN
        });
        if !blocked {
            pos = Some(candidate);
            break;
        }
    }

    let pos = pos.unwrap_or_else(|| {
        log::debug!("No clear apple site after {APPLE_SPAWN_ATTEMPTS} attempts, placing unchecked");
        sample_inset(rng, bounds, APPLE_PADDING)
    });

    Apple {
        pos,
        kind: roll_apple_kind(rng),
    }
}

/// Try to place a rock clear of the apple and the snake head.
///
/// Returns `None` when all attempts are rejected; that is routine.
pub fn spawn_rock<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Vec2,
    apple: &Apple,
    head: Option<Vec2>,
    now_ms: f64,
    id: u32,
) -> Option<Rock> {
    let radius = ROCK_RADIUS_MIN + rng.random::<f32>() * (ROCK_RADIUS_MAX - ROCK_RADIUS_MIN);

    for _ in 0..ROCK_SPAWN_ATTEMPTS {
        let pos = sample_inset(rng, bounds, ROCK_PADDING);
        let clear_of_apple = pos.distance(apple.pos) > radius + APPLE_RADIUS + ROCK_APPLE_MARGIN;
        let clear_of_head = head.is_none_or(|h| pos.distance(h) > ROCK_HEAD_CLEARANCE);

        if clear_of_apple && clear_of_head {
            return Some(Rock {
                id,
                pos,
                radius,
                spawned_at_ms: now_ms,
                vertices: jagged_polygon(rng, radius),
            });
        }
    }

    None
}

impl World {
    /// Replace the apple with a freshly placed one
    pub fn respawn_apple(&mut self) {
        self.apple = spawn_apple(&mut self.rng, self.bounds, &self.rocks);
        log::debug!(
            "Apple {:?} at ({:.0}, {:.0})",
            self.apple.kind,
            self.apple.pos.x,
            self.apple.pos.y
        );
    }

    /// Attempt one rock spawn; returns whether a rock was added.
    ///
    /// An ID is only consumed when a rock is placed.
    pub fn try_spawn_rock(&mut self, now_ms: f64) -> bool {
        let id = self.next_rock_id;
        match spawn_rock(&mut self.rng, self.bounds, &self.apple, self.head, now_ms, id) {
            Some(rock) => {
                self.next_rock_id();
                log::debug!("Rock {} (r={:.1}) at ({:.0}, {:.0})", rock.id, rock.radius, rock.pos.x, rock.pos.y);
                self.rocks.push(rock);
                true
            }
            None => {
                log::debug!("Rock spawn skipped: no clear site");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(640.0, 480.0);

    fn rock(pos: Vec2, radius: f32) -> Rock {
        Rock {
            id: 0,
            pos,
            radius,
            spawned_at_ms: 0.0,
            vertices: [Vec2::ZERO; ROCK_VERTEX_COUNT],
        }
    }

    #[test]
    fn test_apple_kind_distribution() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let trials = 100_000;
        let (mut invincible, mut double, mut normal) = (0u32, 0u32, 0u32);
        for _ in 0..trials {
            match roll_apple_kind(&mut rng) {
                AppleKind::Invincible => invincible += 1,
                AppleKind::Double => double += 1,
                AppleKind::Normal => normal += 1,
            }
        }
        let frac = |n: u32| n as f64 / trials as f64;
        assert!((frac(invincible) - 0.08).abs() < 0.01);
        assert!((frac(double) - 0.15).abs() < 0.01);
        assert!((frac(normal) - 0.77).abs() < 0.01);
    }

    #[test]
    fn test_apple_avoids_rocks() {
        let mut rng = Pcg32::seed_from_u64(5);
        let rocks = vec![
            rock(Vec2::new(200.0, 200.0), 40.0),
            rock(Vec2::new(400.0, 300.0), 40.0),
        ];
        for _ in 0..200 {
            let apple = spawn_apple(&mut rng, BOUNDS, &rocks);
            for r in &rocks {
                assert!(apple.pos.distance(r.pos) >= r.radius + APPLE_RADIUS + APPLE_ROCK_MARGIN);
            }
        }
    }

    #[test]
    fn test_apple_falls_back_when_board_is_covered() {
        let mut rng = Pcg32::seed_from_u64(9);
        // One enormous rock covering the whole safe rectangle
        let rocks = vec![rock(Vec2::new(320.0, 240.0), 1_000.0)];
        let apple = spawn_apple(&mut rng, BOUNDS, &rocks);
        assert!(apple.is_present());
        assert!(apple.pos.x >= APPLE_PADDING && apple.pos.x <= BOUNDS.x - APPLE_PADDING);
        assert!(apple.pos.y >= APPLE_PADDING && apple.pos.y <= BOUNDS.y - APPLE_PADDING);
    }

    #[test]
    fn test_rock_skipped_when_head_everywhere() {
        let mut rng = Pcg32::seed_from_u64(11);
        // A board no larger than the head clearance leaves no valid site
        let small = Vec2::new(200.0, 200.0);
        let apple = Apple::absent();
        let rock = spawn_rock(&mut rng, small, &apple, Some(Vec2::new(100.0, 100.0)), 0.0, 1);
        assert!(rock.is_none());
    }

    #[test]
    fn test_rock_spawn_without_head() {
        let mut rng = Pcg32::seed_from_u64(12);
        let apple = Apple::absent();
        let rock = spawn_rock(&mut rng, BOUNDS, &apple, None, 1_234.0, 7).expect("open board");
        assert_eq!(rock.id, 7);
        assert_eq!(rock.spawned_at_ms, 1_234.0);
        assert!(rock.radius >= ROCK_RADIUS_MIN && rock.radius <= ROCK_RADIUS_MAX);
    }

    #[test]
    fn test_world_try_spawn_rock_appends() {
        let mut world = World::new(3, BOUNDS);
        world.start(0.0);
        let mut added = 0;
        for i in 0..20 {
            if world.try_spawn_rock(i as f64) {
                added += 1;
            }
        }
        assert_eq!(world.rocks.len(), added);
        assert!(added > 0);
    }

    #[test]
    fn test_skipped_spawn_keeps_rock_id() {
        let mut world = World::new(3, Vec2::new(200.0, 200.0));
        world.start(0.0);
        world.head = Some(Vec2::new(100.0, 100.0));
        assert!(!world.try_spawn_rock(0.0));
        assert!(!world.try_spawn_rock(1.0));

        world.bounds = BOUNDS;
        world.head = None;
        world.apple = Apple::absent();
        assert!(world.try_spawn_rock(2.0));
        assert_eq!(world.rocks[0].id, 1);
        assert!(world.try_spawn_rock(3.0));
        assert_eq!(world.rocks[1].id, 2);
    }

    proptest! {
        #[test]
        fn prop_accepted_rock_respects_clearances(
            seed in any::<u64>(),
            apple_x in 50.0f32..590.0,
            apple_y in 50.0f32..430.0,
            head in proptest::option::of((0.0f32..640.0, 0.0f32..480.0)),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let apple = Apple { pos: Vec2::new(apple_x, apple_y), kind: AppleKind::Normal };
            let head = head.map(|(x, y)| Vec2::new(x, y));
            if let Some(rock) = spawn_rock(&mut rng, BOUNDS, &apple, head, 0.0, 1) {
                prop_assert!(rock.pos.distance(apple.pos) > rock.radius + APPLE_RADIUS + ROCK_APPLE_MARGIN);
                if let Some(h) = head {
                    prop_assert!(rock.pos.distance(h) > ROCK_HEAD_CLEARANCE);
                }
                prop_assert!(rock.pos.x >= ROCK_PADDING && rock.pos.x <= BOUNDS.x - ROCK_PADDING);
                prop_assert!(rock.pos.y >= ROCK_PADDING && rock.pos.y <= BOUNDS.y - ROCK_PADDING);
            }
        }
    }
}

//! Circle-vs-circle collision checks
//!
//! Everything in Hand Snake collides as a circle: the head, the apple and
//! each rock (by its base radius, not its jagged outline).

use glam::Vec2;

use super::state::{Apple, Rock};
use crate::consts::{APPLE_RADIUS, HEAD_RADIUS, ROCK_HIT_FORGIVENESS};

/// True if two circles overlap by more than `slack`
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32, slack: f32) -> bool {
    a.distance(b) < ra + rb - slack
}

/// Index of the first rock the head is hitting, if any.
///
/// A near miss within `ROCK_HIT_FORGIVENESS` pixels is not a hit.
pub fn find_rock_hit(head: Vec2, rocks: &[Rock]) -> Option<usize> {
    rocks
        .iter()
        .position(|rock| circles_overlap(head, HEAD_RADIUS, rock.pos, rock.radius, ROCK_HIT_FORGIVENESS))
}

/// True if the head is touching the apple
pub fn head_touches_apple(head: Vec2, apple: &Apple) -> bool {
    apple.is_present() && circles_overlap(head, HEAD_RADIUS, apple.pos, APPLE_RADIUS, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ROCK_VERTEX_COUNT;
    use crate::sim::state::AppleKind;

    fn rock(x: f32, y: f32, radius: f32) -> Rock {
        Rock {
            id: 0,
            pos: Vec2::new(x, y),
            radius,
            spawned_at_ms: 0.0,
            vertices: [Vec2::ZERO; ROCK_VERTEX_COUNT],
        }
    }

    #[test]
    fn test_rock_hit_threshold() {
        let rocks = vec![rock(100.0, 100.0, 30.0)];
        // Threshold is 16 + 30 - 5 = 41
        assert_eq!(find_rock_hit(Vec2::new(140.0, 100.0), &rocks), Some(0));
        assert_eq!(find_rock_hit(Vec2::new(141.0, 100.0), &rocks), None);
        assert_eq!(find_rock_hit(Vec2::new(145.0, 100.0), &rocks), None);
    }

    #[test]
    fn test_rock_hit_returns_first_match() {
        let rocks = vec![
            rock(500.0, 500.0, 20.0),
            rock(100.0, 100.0, 30.0),
            rock(110.0, 100.0, 30.0),
        ];
        assert_eq!(find_rock_hit(Vec2::new(105.0, 100.0), &rocks), Some(1));
    }

    #[test]
    fn test_apple_touch() {
        let apple = Apple {
            pos: Vec2::new(200.0, 200.0),
            kind: AppleKind::Normal,
        };
        assert!(head_touches_apple(Vec2::new(227.0, 200.0), &apple));
        assert!(!head_touches_apple(Vec2::new(228.0, 200.0), &apple));
    }

    #[test]
    fn test_absent_apple_never_touched() {
        let apple = Apple::absent();
        assert!(!head_touches_apple(apple.pos, &apple));
    }
}

//! Game state and core simulation types
//!
//! `World` is the simulation state, mutated every frame without notifying
//! anyone. `GameState` is the small snapshot the presentation layer sees.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Snake hit a rock; frozen until the next start
    GameOver,
}

/// Effect signals raised by the simulation, consumed fire-and-forget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ate a normal or double apple
    Eat,
    /// Hit a rock while vulnerable
    Die,
    /// Ate an invincible apple
    PowerUp,
    /// Smashed a rock while invincible
    Smash,
}

/// Apple types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppleKind {
    #[default]
    Normal,
    Double,
    Invincible,
}

impl AppleKind {
    /// Points awarded for eating this apple.
    ///
    /// Invincible apples pay base points; their reward is the
    /// invulnerability window.
    pub fn points(self) -> u32 {
        match self {
            AppleKind::Normal => POINTS_NORMAL,
            AppleKind::Double => POINTS_DOUBLE,
            AppleKind::Invincible => POINTS_INVINCIBLE,
        }
    }
}

/// The single apple on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Apple {
    pub pos: Vec2,
    pub kind: AppleKind,
}

impl Apple {
    /// Sentinel apple parked off the board
    pub const fn absent() -> Self {
        Self {
            pos: Vec2::new(OFFSCREEN, OFFSCREEN),
            kind: AppleKind::Normal,
        }
    }

    pub fn is_present(&self) -> bool {
        self.pos.x >= 0.0
    }
}

impl Default for Apple {
    fn default() -> Self {
        Self::absent()
    }
}

/// An obstacle rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rock {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Wall-clock creation time (ms)
    pub spawned_at_ms: f64,
    /// Silhouette, relative to `pos`. Fixed at creation.
    pub vertices: [Vec2; ROCK_VERTEX_COUNT],
}

impl Rock {
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.spawned_at_ms
    }

    /// A rock lives while its age is strictly below the lifetime
    pub fn is_alive(&self, now_ms: f64) -> bool {
        self.age_ms(now_ms) < ROCK_LIFETIME_MS
    }

    /// Opacity for drawing: 1.0 until the last `ROCK_FADE_MS`, then ramps to 0
    pub fn fade_alpha(&self, now_ms: f64) -> f32 {
        let age = self.age_ms(now_ms);
        if age > ROCK_LIFETIME_MS - ROCK_FADE_MS {
            ((ROCK_LIFETIME_MS - age) / ROCK_FADE_MS).clamp(0.0, 1.0) as f32
        } else {
            1.0
        }
    }
}

/// Presentation snapshot. Only this crosses into the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub is_game_over: bool,
    pub is_playing: bool,
    pub high_score: u32,
    /// Mirror of `now < invincible_until`, refreshed once per frame
    pub is_invincible: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Canvas size in pixels
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    /// Body positions, head first
    pub segments: VecDeque<Vec2>,
    /// Smoothed head position (None until the first pointer arrives)
    pub head: Option<Vec2>,
    /// Latest pointer target; last write wins
    pub target: Option<Vec2>,
    /// Rendered length, catches up with `target_length`
    pub length: f32,
    pub target_length: f32,
    pub apple: Apple,
    pub rocks: Vec<Rock>,
    pub last_rock_spawn_ms: f64,
    pub invincible_until_ms: f64,
    /// Invincibility as last published to the snapshot
    pub invincible_shown: bool,
    /// Effect signals raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) next_rock_id: u32,
}

impl World {
    /// Create an idle world with the given RNG seed
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            bounds,
            phase: GamePhase::NotStarted,
            score: 0,
            high_score: 0,
            segments: VecDeque::new(),
            head: None,
            target: None,
            length: INITIAL_SNAKE_LENGTH,
            target_length: INITIAL_SNAKE_LENGTH,
            apple: Apple::absent(),
            rocks: Vec::new(),
            last_rock_spawn_ms: 0.0,
            invincible_until_ms: 0.0,
            invincible_shown: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_rock_id: 1,
        }
    }

    /// Reset everything round-scoped and begin playing.
    ///
    /// High score and the pointer target survive.
    pub fn start(&mut self, now_ms: f64) {
        self.score = 0;
        self.length = INITIAL_SNAKE_LENGTH;
        self.target_length = INITIAL_SNAKE_LENGTH;
        self.segments.clear();
        self.head = None;
        self.rocks.clear();
        self.last_rock_spawn_ms = now_ms;
        self.invincible_until_ms = 0.0;
        self.invincible_shown = false;
        self.events.clear();
        self.phase = GamePhase::Playing;
        self.respawn_apple();
        log::info!("Round started on {}x{} board", self.bounds.x, self.bounds.y);
    }

    pub fn is_invincible(&self, now_ms: f64) -> bool {
        now_ms < self.invincible_until_ms
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Allocate a new rock ID
    pub fn next_rock_id(&mut self) -> u32 {
        let id = self.next_rock_id;
        self.next_rock_id += 1;
        id
    }

    /// End the round and fold the score into the session best
    pub fn end_round(&mut self) {
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::Die);
        log::info!("Game over: score {} (best {})", self.score, self.high_score);
    }

    /// Take the effects raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Build the presentation snapshot
    pub fn snapshot(&self) -> GameState {
        GameState {
            score: self.score,
            is_game_over: self.phase == GamePhase::GameOver,
            is_playing: self.phase != GamePhase::NotStarted,
            high_score: self.high_score,
            is_invincible: self.invincible_shown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock_at(spawned_at_ms: f64) -> Rock {
        Rock {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            radius: 30.0,
            spawned_at_ms,
            vertices: [Vec2::ZERO; ROCK_VERTEX_COUNT],
        }
    }

    #[test]
    fn test_apple_points() {
        assert_eq!(AppleKind::Normal.points(), 10);
        assert_eq!(AppleKind::Double.points(), 20);
        assert_eq!(AppleKind::Invincible.points(), 10);
    }

    #[test]
    fn test_absent_apple() {
        assert!(!Apple::absent().is_present());
        let apple = Apple {
            pos: Vec2::new(60.0, 70.0),
            kind: AppleKind::Double,
        };
        assert!(apple.is_present());
    }

    #[test]
    fn test_rock_lifetime_and_fade() {
        let rock = rock_at(1_000.0);
        assert!(rock.is_alive(1_000.0));
        assert_eq!(rock.fade_alpha(1_000.0), 1.0);
        // Halfway through the fade window
        let t = 1_000.0 + ROCK_LIFETIME_MS - ROCK_FADE_MS / 2.0;
        assert!((rock.fade_alpha(t) - 0.5).abs() < 1e-4);
        assert!(!rock.is_alive(1_000.0 + ROCK_LIFETIME_MS));
        assert_eq!(rock.fade_alpha(1_000.0 + ROCK_LIFETIME_MS + 10.0), 0.0);
    }

    #[test]
    fn test_start_resets_round() {
        let mut world = World::new(42, Vec2::new(640.0, 480.0));
        world.score = 90;
        world.high_score = 120;
        world.target_length = 44.0;
        world.length = 40.0;
        world.rocks.push(rock_at(0.0));
        world.segments.push_front(Vec2::new(1.0, 1.0));
        world.head = Some(Vec2::new(1.0, 1.0));
        world.target = Some(Vec2::new(300.0, 200.0));
        world.invincible_until_ms = 9_000.0;

        world.start(5_000.0);

        assert_eq!(world.score, 0);
        assert_eq!(world.length, INITIAL_SNAKE_LENGTH);
        assert_eq!(world.target_length, INITIAL_SNAKE_LENGTH);
        assert!(world.rocks.is_empty());
        assert!(world.segments.is_empty());
        assert!(world.head.is_none());
        assert_eq!(world.last_rock_spawn_ms, 5_000.0);
        assert!(!world.is_invincible(5_000.0));
        assert!(world.apple.is_present());
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.high_score, 120);
        assert_eq!(world.target, Some(Vec2::new(300.0, 200.0)));
    }

    #[test]
    fn test_end_round_updates_high_score() {
        let mut world = World::new(1, Vec2::new(640.0, 480.0));
        world.start(0.0);
        world.score = 70;
        world.end_round();
        assert_eq!(world.high_score, 70);
        assert_eq!(world.drain_events(), vec![GameEvent::Die]);

        world.start(10.0);
        world.score = 30;
        world.end_round();
        assert_eq!(world.high_score, 70);
    }

    #[test]
    fn test_snapshot_flags() {
        let mut world = World::new(1, Vec2::new(640.0, 480.0));
        let snap = world.snapshot();
        assert!(!snap.is_playing);
        assert!(!snap.is_game_over);

        world.start(0.0);
        let snap = world.snapshot();
        assert!(snap.is_playing);
        assert!(!snap.is_game_over);

        world.end_round();
        let snap = world.snapshot();
        assert!(snap.is_playing);
        assert!(snap.is_game_over);
    }
}

//! Frame driver
//!
//! Owns the world and everything that happens once per display frame,
//! independent of how frames are scheduled. The browser shell and the
//! native headless runner both drive a `Session`.

use glam::Vec2;

use crate::consts::{FALLBACK_CANVAS_HEIGHT, FALLBACK_CANVAS_WIDTH};
use crate::input;
use crate::renderer::{Vertex, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, World, tick};

/// Receiver for gameplay effects (sounds)
pub trait EffectSink {
    fn trigger(&mut self, event: GameEvent);
}

impl<F: FnMut(GameEvent)> EffectSink for F {
    fn trigger(&mut self, event: GameEvent) {
        self(event)
    }
}

/// Output of one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Triangle list in canvas pixels
    pub vertices: Vec<Vertex>,
    /// New presentation snapshot, only when it differs from the last one
    pub hud: Option<GameState>,
}

pub struct Session {
    world: World,
    pub settings: Settings,
    /// Last snapshot handed to the presentation layer
    published: Option<GameState>,
    /// Latest fingertip since the previous frame (last write wins)
    pending_pointer: Option<Vec2>,
}

impl Session {
    pub fn new(seed: u64, settings: Settings) -> Self {
        let bounds = Vec2::new(FALLBACK_CANVAS_WIDTH as f32, FALLBACK_CANVAS_HEIGHT as f32);
        Self {
            world: World::new(seed, bounds),
            settings,
            published: None,
            pending_pointer: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Canvas size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.world.bounds.x as u32, self.world.bounds.y as u32)
    }

    /// Match the board to the camera resolution.
    ///
    /// A zero dimension (video not ready yet) falls back to 640x480.
    /// Returns the size actually applied.
    pub fn resize(&mut self, width: u32, height: u32) -> (u32, u32) {
        let size = if width == 0 || height == 0 {
            (FALLBACK_CANVAS_WIDTH, FALLBACK_CANVAS_HEIGHT)
        } else {
            (width, height)
        };
        let bounds = Vec2::new(size.0 as f32, size.1 as f32);
        if bounds != self.world.bounds {
            log::debug!("Board resized to {}x{}", size.0, size.1);
            self.world.bounds = bounds;
        }
        size
    }

    /// Feed a pointer position directly (canvas pixels)
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pending_pointer = Some(pointer);
    }

    /// Feed a tracker result (`multiHandLandmarks` as JSON).
    ///
    /// Frames without a hand keep the previous target.
    pub fn on_hand_results(&mut self, json: &str) {
        match input::parse_hands(json) {
            Ok(hands) => {
                if let Some(pointer) = input::fingertip_target(&hands, self.world.bounds) {
                    self.pending_pointer = Some(pointer);
                }
            }
            Err(e) => log::warn!("Ignoring malformed hand results: {e}"),
        }
    }

    /// Start or restart a round
    pub fn start(&mut self, now_ms: f64) {
        self.world.start(now_ms);
    }

    /// Run one frame: step the world, dispatch effects, and build the scene
    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn EffectSink) -> Frame {
        let input = TickInput {
            now_ms,
            pointer: self.pending_pointer.take(),
        };
        tick(&mut self.world, &input);

        for event in self.world.drain_events() {
            sink.trigger(event);
        }

        let snapshot = self.world.snapshot();
        let hud = if self.published != Some(snapshot) {
            self.published = Some(snapshot);
            Some(snapshot)
        } else {
            None
        };

        Frame {
            vertices: build_scene(&self.world, now_ms, &self.settings),
            hud,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Apple, AppleKind, Rock, jagged_polygon};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn hand_json(x: f32, y: f32) -> String {
        let mut points = vec![r#"{"x":0.0,"y":0.0,"z":0.0}"#.to_string(); 21];
        points[8] = format!(r#"{{"x":{x},"y":{y},"z":0.0}}"#);
        format!("[[{}]]", points.join(","))
    }

    fn rock_at(pos: Vec2, spawned_at_ms: f64) -> Rock {
        Rock {
            id: 99,
            pos,
            radius: 30.0,
            spawned_at_ms,
            vertices: jagged_polygon(&mut Pcg32::seed_from_u64(2), 30.0),
        }
    }

    #[test]
    fn test_first_frame_publishes_then_stays_quiet() {
        let mut session = Session::new(1, Settings::default());
        let mut sink = |_: GameEvent| {};

        let first = session.frame(0.0, &mut sink);
        assert_eq!(first.hud, Some(GameState::default()));
        let second = session.frame(FRAME_MS, &mut sink);
        assert_eq!(second.hud, None);
    }

    #[test]
    fn test_start_republishes() {
        let mut session = Session::new(1, Settings::default());
        let mut sink = |_: GameEvent| {};
        session.frame(0.0, &mut sink);

        session.start(10.0);
        let frame = session.frame(20.0, &mut sink);
        let hud = frame.hud.expect("snapshot after start");
        assert!(hud.is_playing);
        assert!(!hud.is_game_over);
        assert_eq!(hud.score, 0);
    }

    #[test]
    fn test_resize_falls_back_on_zero() {
        let mut session = Session::new(1, Settings::default());
        assert_eq!(session.resize(1280, 720), (1280, 720));
        assert_eq!(session.canvas_size(), (1280, 720));
        assert_eq!(session.resize(0, 720), (640, 480));
        assert_eq!(session.world().bounds, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_hand_results_steer_head() {
        let mut session = Session::new(1, Settings::default());
        let mut sink = |_: GameEvent| {};
        session.start(0.0);

        session.on_hand_results(&hand_json(0.5, 0.5));
        session.frame(FRAME_MS, &mut sink);
        assert_eq!(session.world().head, Some(Vec2::new(320.0, 240.0)));

        // Empty and malformed results leave the target alone
        session.on_hand_results("[]");
        session.on_hand_results("not json");
        session.frame(2.0 * FRAME_MS, &mut sink);
        assert_eq!(session.world().target, Some(Vec2::new(320.0, 240.0)));
    }

    #[test]
    fn test_eating_triggers_sound_and_hud() {
        let mut session = Session::new(1, Settings::default());
        let mut events: Vec<GameEvent> = Vec::new();
        session.start(0.0);
        session.frame(FRAME_MS, &mut |e: GameEvent| events.push(e));

        session.world.apple = Apple {
            pos: Vec2::new(200.0, 200.0),
            kind: AppleKind::Double,
        };
        session.set_pointer(Vec2::new(200.0, 200.0));
        session.world.head = Some(Vec2::new(200.0, 200.0));
        let frame = session.frame(2.0 * FRAME_MS, &mut |e: GameEvent| events.push(e));

        assert_eq!(events, vec![GameEvent::Eat]);
        assert_eq!(frame.hud.map(|h| h.score), Some(POINTS_DOUBLE));
        assert!(!frame.vertices.is_empty());
    }

    #[test]
    fn test_death_published_once() {
        let mut session = Session::new(1, Settings::default());
        let mut events: Vec<GameEvent> = Vec::new();
        session.start(0.0);
        session.world.score = 40;
        session.world.apple = Apple::absent();
        session.world.rocks.push(rock_at(Vec2::new(300.0, 300.0), 0.0));
        session.set_pointer(Vec2::new(300.0, 300.0));

        let frame = session.frame(FRAME_MS, &mut |e: GameEvent| events.push(e));
        assert_eq!(events, vec![GameEvent::Die]);
        let hud = frame.hud.expect("game over snapshot");
        assert!(hud.is_game_over);
        assert_eq!(hud.high_score, 40);

        // Later frames stay quiet
        let later = session.frame(2.0 * FRAME_MS, &mut |e: GameEvent| events.push(e));
        assert_eq!(later.hud, None);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_invincibility_expiry_republishes() {
        let mut session = Session::new(1, Settings::default());
        let mut sink = |_: GameEvent| {};
        session.start(0.0);
        session.world.invincible_until_ms = 100.0;

        let on = session.frame(50.0, &mut sink).hud.expect("invincible on");
        assert!(on.is_invincible);
        assert_eq!(session.frame(60.0, &mut sink).hud, None);
        let off = session.frame(150.0, &mut sink).hud.expect("invincible off");
        assert!(!off.is_invincible);
    }
}

//! Hand Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlVideoElement};

    use hand_snake::Session;
    use hand_snake::audio::AudioManager;
    use hand_snake::renderer::RenderState;
    use hand_snake::settings::Settings;
    use hand_snake::sim::{GameEvent, GameState};

    /// How often the canvas follows the camera resolution
    const RESIZE_INTERVAL_MS: i32 = 1000;

    // JS binding for the MediaPipe hand tracker and camera helper
    #[wasm_bindgen(inline_js = "
        export function start_tracker(video, options, on_results, on_ready, on_error) {
            const handle = { hands: null, camera: null, stopped: false };
            try {
                const opts = JSON.parse(options);
                handle.hands = new window.Hands({
                    locateFile: (file) => `https://cdn.jsdelivr.net/npm/@mediapipe/hands/${file}`,
                });
                handle.hands.setOptions({
                    maxNumHands: opts.maxNumHands,
                    modelComplexity: opts.modelComplexity,
                    minDetectionConfidence: opts.minDetectionConfidence,
                    minTrackingConfidence: opts.minTrackingConfidence,
                });
                handle.hands.onResults((results) => {
                    if (!handle.stopped) {
                        on_results(JSON.stringify(results.multiHandLandmarks ?? null));
                    }
                });
                handle.camera = new window.Camera(video, {
                    onFrame: async () => {
                        if (!handle.stopped) {
                            await handle.hands.send({ image: video });
                        }
                    },
                    width: opts.captureWidth,
                    height: opts.captureHeight,
                });
                handle.camera.start()
                    .then(() => { if (!handle.stopped) on_ready(); })
                    .catch((e) => on_error(String(e)));
            } catch (e) {
                on_error(String(e));
            }
            return handle;
        }

        export function stop_tracker(handle) {
            handle.stopped = true;
            if (handle.camera) handle.camera.stop();
            if (handle.hands) handle.hands.close();
        }
    ")]
    extern "C" {
        fn start_tracker(
            video: &HtmlVideoElement,
            options: &str,
            on_results: &Closure<dyn FnMut(String)>,
            on_ready: &Closure<dyn FnMut()>,
            on_error: &Closure<dyn FnMut(String)>,
        ) -> JsValue;
        fn stop_tracker(handle: &JsValue);
    }

    /// App instance holding all browser-side state
    struct App {
        session: Session,
        render_state: Option<RenderState>,
        /// Acquired on the first Start click
        audio: Option<AudioManager>,
        /// Tracker handle from `start_tracker`
        tracker: Option<JsValue>,
        canvas: HtmlCanvasElement,
        video: HtmlVideoElement,
        /// Pending animation frame request
        raf_handle: Option<i32>,
        resize_handle: Option<i32>,
        /// Cleared at teardown; no frames are scheduled afterwards
        running: bool,
        /// Vision still initializing
        loading: bool,
        hud: GameState,
    }

    impl App {
        fn new(seed: u64, settings: Settings, canvas: HtmlCanvasElement, video: HtmlVideoElement) -> Self {
            Self {
                session: Session::new(seed, settings),
                render_state: None,
                audio: None,
                tracker: None,
                canvas,
                video,
                raf_handle: None,
                resize_handle: None,
                running: true,
                loading: true,
                hud: GameState::default(),
            }
        }

        /// Follow the camera resolution (640x480 until it reports one)
        fn sync_canvas_size(&mut self) {
            let (w, h) = self
                .session
                .resize(self.video.video_width(), self.video.video_height());
            if self.canvas.width() != w || self.canvas.height() != h {
                self.canvas.set_width(w);
                self.canvas.set_height(h);
                log::info!("Canvas resized to {}x{}", w, h);
            }
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(w, h);
            }
        }

        fn start_round(&mut self) {
            if self.audio.is_none() {
                self.audio = Some(AudioManager::new(&self.session.settings));
            }
            if let Some(audio) = &self.audio {
                audio.resume();
            }
            self.session.start(js_sys::Date::now());
        }

        /// Apply a preference change, persist it, and refresh the controls
        fn change_settings(&mut self, change: fn(&mut Settings)) {
            change(&mut self.session.settings);
            self.session.settings.save();
            if let Some(audio) = &mut self.audio {
                audio.apply_settings(&self.session.settings);
            }
            self.update_settings_labels();
        }

        fn update_settings_labels(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let settings = &self.session.settings;
            set_text(
                &document,
                "mute-btn",
                if settings.muted { "Sound: Off" } else { "Sound: On" },
            );
            set_text(
                &document,
                "quality-btn",
                &format!("Quality: {}", settings.quality.as_str()),
            );
            set_text(
                &document,
                "motion-btn",
                if settings.reduced_motion { "Motion: Reduced" } else { "Motion: Full" },
            );
        }

        /// Step, draw, and publish one frame
        fn frame(&mut self) {
            let now = js_sys::Date::now();
            let frame = match &mut self.audio {
                Some(audio) => self.session.frame(now, audio),
                None => self.session.frame(now, &mut |_: GameEvent| {}),
            };

            if let Some(render_state) = &mut self.render_state {
                match render_state.render(&frame.vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        render_state.config.width = w;
                        render_state.config.height = h;
                        render_state.surface.configure(&render_state.device, &render_state.config);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if let Some(state) = frame.hud {
                self.hud = state;
                self.update_hud();
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.hud;

            set_text(&document, "score", &format!("{:03}", state.score));
            set_text(&document, "high-score", &state.high_score.to_string());
            set_visible(&document, "invincible", state.is_invincible);
            set_visible(&document, "loading", self.loading);

            let show_overlay = (!state.is_playing || state.is_game_over) && !self.loading;
            set_visible(&document, "overlay", show_overlay);
            if state.is_game_over {
                set_text(&document, "overlay-title", "GAME OVER");
                set_text(&document, "overlay-text", &format!("Final Score: {}", state.score));
                set_text(&document, "start-btn", "PLAY AGAIN");
            } else {
                set_text(&document, "overlay-title", "HAND SNAKE");
                set_text(&document, "overlay-text", "Control the snake with your Index Finger");
                set_text(&document, "start-btn", "START GAME");
            }
        }

        /// Release everything tied to the page
        fn teardown(&mut self) {
            if !self.running {
                return;
            }
            self.running = false;

            if let Some(window) = web_sys::window() {
                if let Some(handle) = self.raf_handle.take() {
                    let _ = window.cancel_animation_frame(handle);
                }
                if let Some(handle) = self.resize_handle.take() {
                    window.clear_interval_with_handle(handle);
                }
            }
            if let Some(tracker) = self.tracker.take() {
                stop_tracker(&tracker);
            }
            if let Some(audio) = &mut self.audio {
                audio.close();
            }
            log::info!("Hand Snake stopped");
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Hand Snake starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = element(&document, "canvas")?;
        let video: HtmlVideoElement = element(&document, "video")?;

        let settings = Settings::load();
        let tracker_options = settings.tracker_json();

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, settings, canvas.clone(), video.clone())));
        app.borrow_mut().sync_canvas_size();
        log::info!("Game initialized with seed: {}", seed);

        let (width, height) = app.borrow().session.canvas_size();
        app.borrow_mut().render_state = init_renderer(canvas, width, height).await;

        setup_tracker(&video, &tracker_options, app.clone());
        setup_start_button(&document, app.clone());
        setup_settings_controls(&document, app.clone());
        setup_resize_timer(&window, app.clone());
        setup_teardown(&window, app.clone());

        app.borrow().update_hud();
        app.borrow().update_settings_labels();
        request_animation_frame(app);

        log::info!("Hand Snake running!");
        Ok(())
    }

    /// Bring up the GPU surface; the game keeps simulating without one
    async fn init_renderer(canvas: HtmlCanvasElement, width: u32, height: u32) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Renderer unavailable: {e}");
                None
            }
        }
    }

    fn setup_tracker(video: &HtmlVideoElement, options: &str, app: Rc<RefCell<App>>) {
        let on_results = {
            let app = app.clone();
            Closure::<dyn FnMut(String)>::new(move |json: String| {
                app.borrow_mut().session.on_hand_results(&json);
            })
        };

        let on_ready = {
            let app = app.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut a = app.borrow_mut();
                a.loading = false;
                a.update_hud();
                log::info!("Hand tracking ready");
            })
        };

        // Loading indicator stays up; no retry
        let on_error = Closure::<dyn FnMut(String)>::new(move |message: String| {
            log::error!("Hand tracking failed: {message}");
        });

        let handle = start_tracker(video, options, &on_results, &on_ready, &on_error);
        app.borrow_mut().tracker = Some(handle);

        on_results.forget();
        on_ready.forget();
        on_error.forget();
    }

    fn setup_start_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().start_round();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_settings_controls(document: &Document, app: Rc<RefCell<App>>) {
        let controls: [(&str, fn(&mut Settings)); 3] = [
            ("mute-btn", Settings::toggle_mute),
            ("quality-btn", Settings::cycle_quality),
            ("motion-btn", Settings::toggle_reduced_motion),
        ];
        for (id, change) in controls {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().change_settings(change);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_timer(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = {
            let app = app.clone();
            Closure::<dyn FnMut()>::new(move || {
                app.borrow_mut().sync_canvas_size();
            })
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            RESIZE_INTERVAL_MS,
        ) {
            Ok(handle) => app.borrow_mut().resize_handle = Some(handle),
            Err(e) => log::warn!("Resize timer unavailable: {e:?}"),
        }
        closure.forget();
    }

    fn setup_teardown(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
            // Pages kept in the back/forward cache resume as they were
            if event.persisted() {
                log::info!("Page cached; keeping tracker and loop");
                return;
            }
            app.borrow_mut().teardown();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = {
            let app = app.clone();
            Closure::once(move |_time: f64| {
                game_loop(app);
            })
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.raf_handle = None;
            if !a.running {
                return;
            }
            a.frame();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Hand Snake failed to start: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hand Snake (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Steer the snake in a circle for a minute of simulated time
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use glam::Vec2;
    use hand_snake::sim::GameEvent;
    use hand_snake::{Session, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 60 * 60;

    let mut session = Session::new(42, Settings::load());
    let (w, h) = session.resize(0, 0);
    let center = Vec2::new(w as f32, h as f32) / 2.0;

    let mut eaten = 0u32;
    let mut sink = |event: GameEvent| {
        if matches!(event, GameEvent::Eat | GameEvent::PowerUp) {
            eaten += 1;
        }
        log::debug!("Effect: {:?}", event);
    };

    session.start(0.0);
    for i in 0..FRAMES {
        let now = i as f64 * FRAME_MS;
        let angle = now as f32 / 1500.0;
        session.set_pointer(center + Vec2::new(angle.cos(), angle.sin()) * 150.0);

        let frame = session.frame(now, &mut sink);
        if let Some(hud) = frame.hud {
            log::info!(
                "t={:.1}s score={} best={} invincible={} over={}",
                now / 1000.0,
                hud.score,
                hud.high_score,
                hud.is_invincible,
                hud.is_game_over
            );
            if hud.is_game_over {
                break;
            }
        }
    }

    let world = session.world();
    println!(
        "Final score {} with {} apples, {} segments, {} rocks on the board",
        world.score,
        eaten,
        world.segments.len(),
        world.rocks.len()
    );
}

//! Rocket Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent};

    use rocket_drift::consts::*;
    use rocket_drift::sim::{self, GameEvent, GamePhase, GameState, Snapshot, Viewport};
    use rocket_drift::{AssetManifest, InputState, Preloader, Settings};

    // The page owns drawing; it receives one snapshot per frame
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = window, js_name = renderSnapshot)]
        fn render_snapshot(json: &str) -> Result<(), JsValue>;
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        input: InputState,
        preloader: Preloader,
        canvas: HtmlCanvasElement,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_phase: GamePhase,
        render_warned: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, canvas: HtmlCanvasElement) -> Self {
            let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);
            Self {
                state: GameState::new(seed, settings.sim_config(), viewport),
                settings,
                input: InputState::new(),
                preloader: Preloader::new(AssetManifest::default()),
                canvas,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Menu,
                render_warned: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // One-shot presses are consumed by the first substep
                let input = self.input.take_tick_input();
                sim::tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in self.state.drain_events() {
                    self.on_event(&event);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            let current_phase = self.state.phase;
            if current_phase != self.last_phase {
                if current_phase == GamePhase::Countdown {
                    set_display("gameOver", "none");
                }
                self.last_phase = current_phase;
            }
        }

        fn on_event(&self, event: &GameEvent) {
            match event {
                GameEvent::RocketDestroyed { score } => {
                    set_text("finalScore", &score.to_string());
                    set_display("gameOver", "flex");
                }
                GameEvent::CountdownFinished => log::info!("Run started"),
                GameEvent::AsteroidDestroyed { .. } => {}
            }
        }

        /// Hand the current frame to the page renderer
        fn render(&mut self) {
            let json = Snapshot::capture(&self.state).to_json();
            if let Err(e) = render_snapshot(&json) {
                if !self.render_warned {
                    log::warn!("window.renderSnapshot failed: {:?}", e);
                    self.render_warned = true;
                }
            }
            if self.settings.show_fps {
                set_text("fps", &self.fps.to_string());
            }
        }

        /// Start a run from the menu once every sprite is available
        fn play(&mut self) {
            match self.preloader.ready() {
                Ok(true) => {
                    set_display("menu", "none");
                    let _ = self.canvas.style().set_property("display", "block");
                    self.state.config = self.settings.sim_config();
                    sim::start_countdown(&mut self.state);
                }
                Ok(false) => log::info!(
                    "Still loading assets ({:.0}%)",
                    self.preloader.progress() * 100.0
                ),
                Err(e) => {
                    log::error!("Cannot start: {}", e);
                    set_text("loading", &e.to_string());
                }
            }
        }

        fn refresh_loading(&self) {
            match self.preloader.ready() {
                Ok(true) => set_display("loading", "none"),
                Ok(false) => set_text(
                    "loading",
                    &format!("Loading {:.0}%", self.preloader.progress() * 100.0),
                ),
                Err(e) => set_text("loading", &e.to_string()),
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            sim::set_viewport(&mut self.state, width as f32, height as f32);
        }
    }

    fn element(id: &str) -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn set_display(id: &str, value: &str) {
        if let Some(el) = element(id) {
            let _ = el.style().set_property("display", value);
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn window_size() -> (u32, u32) {
        let window = web_sys::window().expect("no window");
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rocket Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = window_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Preset {} with seed {}", settings.preset.as_str(), seed);

        let game = Rc::new(RefCell::new(Game::new(seed, settings, canvas)));

        preload_assets(game.clone());
        setup_input_handlers(game.clone());
        setup_play_button(game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Rocket Drift running!");
    }

    fn preload_assets(game: Rc<RefCell<Game>>) {
        let paths: Vec<String> = game
            .borrow()
            .preloader
            .manifest()
            .paths()
            .map(String::from)
            .collect();
        game.borrow().refresh_loading();

        for path in paths {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    log::error!("Cannot create image for {}: {:?}", path, e);
                    continue;
                }
            };

            {
                let game = game.clone();
                let path = path.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    let mut g = game.borrow_mut();
                    if let Err(e) = g.preloader.mark_loaded(&path) {
                        log::warn!("{}", e);
                    }
                    g.refresh_loading();
                });
                img.set_onload(Some(closure.as_ref().unchecked_ref()));
                closure.forget();
            }

            {
                let game = game.clone();
                let path = path.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    let mut g = game.borrow_mut();
                    if let Err(e) = g.preloader.mark_failed(&path) {
                        log::warn!("{}", e);
                    }
                    g.refresh_loading();
                });
                img.set_onerror(Some(closure.as_ref().unchecked_ref()));
                closure.forget();
            }

            img.set_src(&path);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events are lost, release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = element("playBtn") else {
            log::warn!("No play button found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().play();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size();
            game.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rocket_drift::consts::{REFERENCE_HZ, SIM_DT};
    use rocket_drift::sim::{self, GameEvent, GamePhase, GameState, Viewport};
    use rocket_drift::{Preset, Settings};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let preset = args
        .next()
        .and_then(|s| Preset::from_str(&s))
        .unwrap_or_default();
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    log::info!("Rocket Drift (native) starting...");
    log::info!(
        "Headless {} run for {}s with seed {}",
        preset.as_str(),
        seconds,
        seed
    );

    let settings = Settings::from_preset(preset);
    let mut state = GameState::new(seed, settings.sim_config(), Viewport::new(1280.0, 720.0));
    sim::start_countdown(&mut state);

    let mut destroyed = 0u32;
    let max_ticks = (seconds * REFERENCE_HZ) as u64;
    for _ in 0..max_ticks {
        let input = autopilot(&state);
        sim::tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::AsteroidDestroyed { .. } => destroyed += 1,
                GameEvent::RocketDestroyed { score } => {
                    log::info!("Rocket lost after {} ticks", state.time_ticks);
                    log::info!("Final score: {}", score);
                }
                GameEvent::CountdownFinished => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "{}: score {} ({} hazards destroyed, {} ticks, {})",
        preset.as_str(),
        state.score,
        destroyed,
        state.time_ticks,
        if state.phase == GamePhase::GameOver {
            "destroyed"
        } else {
            "survived"
        }
    );
}

/// Steer toward the nearest hazard and shoot when roughly aligned
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &rocket_drift::sim::GameState) -> rocket_drift::sim::TickInput {
    use rocket_drift::normalize_angle;
    use rocket_drift::sim::TickInput;

    let rocket = &state.rocket;
    let nearest = state.asteroids.iter().min_by(|a, b| {
        a.pos
            .distance_squared(rocket.pos)
            .partial_cmp(&b.pos.distance_squared(rocket.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(target) = nearest else {
        return TickInput::default();
    };

    let to_target = target.pos - rocket.pos;
    let error = normalize_angle(to_target.y.atan2(to_target.x) - rocket.angle);

    TickInput {
        turn_left: error < -0.05,
        turn_right: error > 0.05,
        fire: error.abs() < 0.2 && state.time_ticks % 10 == 0,
        restart: false,
    }
}

//! Flappy Gates entry point
//!
//! Handles platform-specific initialization and drives the simulation.
//! In the browser the page's own renderer draws each frame from a JSON
//! snapshot; natively the autopilot plays a headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use flappy_gates::Tuning;
    use flappy_gates::platform;
    use flappy_gates::sim::{GameEvent, GameState, Signal, SignalQueue, Viewport, autopilot};

    // Hooks into the page: drawing and toasts live in JS
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (typeof window.flappyRender === 'function') {
                window.flappyRender(JSON.parse(json));
            }
        }

        export function show_toast(title, body) {
            if (typeof window.flappyToast === 'function') {
                window.flappyToast(title, body);
            } else {
                console.log(title + ': ' + body);
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
        fn show_toast(title: &str, body: &str);
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        queue: SignalQueue,
        /// Pending animation frame while a session runs
        frame_handle: Option<i32>,
        /// Spawn interval while a session runs
        spawn_handle: Option<i32>,
        spawn_closure: Option<Closure<dyn FnMut()>>,
        autopilot: bool,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
            Self {
                state: GameState::new(seed, tuning, viewport),
                queue: SignalQueue::new(),
                frame_handle: None,
                spawn_handle: None,
                spawn_closure: None,
                autopilot: false,
            }
        }

        /// Apply queued signals, one at a time
        fn pump(&mut self) -> Vec<GameEvent> {
            let Game { state, queue, .. } = self;
            queue.pump(state)
        }

        /// Hand the current frame to the page renderer and HUD
        fn render(&self) {
            match self.state.snapshot().to_json() {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Snapshot encode failed: {}", e),
            }
            self.update_hud();
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-high-score") {
                el.set_text_content(Some(&self.state.high_score.best.to_string()));
            }
            // Menu overlay only while idle
            if let Some(el) = document.get_element_by_id("menu") {
                let class = if self.state.is_running() { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("menu-button") {
                let label = if self.state.score > 0 {
                    "Play Again"
                } else {
                    "Start Game"
                };
                el.set_text_content(Some(label));
            }
        }
    }

    fn window_viewport() -> Viewport {
        let window = web_sys::window();
        let size = |v: Option<Result<JsValue, JsValue>>| {
            v.and_then(|r| r.ok()).and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport::new(
            size(window.as_ref().map(|w| w.inner_width())),
            size(window.as_ref().map(|w| w.inner_height())),
        )
    }

    /// Enqueue a signal, apply it, then react to the resulting events
    fn dispatch(game: &Rc<RefCell<Game>>, signal: Signal) {
        let events = {
            let mut g = game.borrow_mut();
            g.queue.push(signal);
            g.pump()
        };
        for event in events {
            handle_event(game, event);
        }
    }

    fn handle_event(game: &Rc<RefCell<Game>>, event: GameEvent) {
        if let Some((title, body)) = platform::notification(&event) {
            show_toast(title, &body);
        }

        match event {
            GameEvent::SessionStarted => {
                start_spawn_timer(game);
                request_animation_frame(game.clone());
            }
            GameEvent::GameOver { .. } => {
                stop_timers(game);
                game.borrow().render();
            }
            GameEvent::HighScoreReached { .. } => {}
        }
    }

    fn start_spawn_timer(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let interval_ms = game.borrow().state.tuning.spawn_interval_ms;

        let closure = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || dispatch(&game, Signal::Spawn))
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => {
                let mut g = game.borrow_mut();
                g.spawn_handle = Some(handle);
                g.spawn_closure = Some(closure);
            }
            Err(e) => log::error!("Failed to start spawn timer: {:?}", e),
        }
    }

    /// Cancel the frame loop and spawn timer so nothing mutates an ended session
    fn stop_timers(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut g = game.borrow_mut();
        if let Some(handle) = g.spawn_handle.take() {
            window.clear_interval_with_handle(handle);
        }
        g.spawn_closure = None;
        if let Some(handle) = g.frame_handle.take() {
            let _ = window.cancel_animation_frame(handle);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = {
            let game = game.clone();
            Closure::once(move |_time: f64| {
                game_loop(game);
            })
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            if g.autopilot && autopilot::wants_flap(&g.state) {
                g.queue.push(Signal::Activate);
            }
        }

        dispatch(&game, Signal::Tick);

        let running = {
            let g = game.borrow();
            g.render();
            g.state.is_running()
        };
        if running {
            request_animation_frame(game);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let code = event.code();
                if code == platform::AUTOPILOT_KEY {
                    let mut g = game.borrow_mut();
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                } else if let Some(signal) = platform::key_signal(&code) {
                    event.prevent_default();
                    dispatch(&game, signal);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press anywhere
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                dispatch(&game, Signal::Activate);
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let viewport = window_viewport();
                dispatch(
                    &game,
                    Signal::Resize {
                        width: viewport.width,
                        height: viewport.height,
                    },
                );
                game.borrow().render();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Gates starting...");

        let tuning = Tuning::load();
        let viewport = window_viewport();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, viewport)));
        log::info!(
            "Game initialized with seed {} ({}x{})",
            seed,
            viewport.width,
            viewport.height
        );

        setup_input_handlers(game.clone());

        // Idle frame with the menu
        game.borrow().render();

        log::info!("Flappy Gates ready - press Space or click to start");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Gates (native) starting...");

    // Optional frame budget, default one minute at 60 Hz
    let max_frames: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(60 * 60);

    let summary = headless::run(max_frames);
    println!(
        "Autopilot session: score {} after {} frames (high score {})",
        summary.score, summary.frames, summary.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy_gates::consts::FRAME_MS;
    use flappy_gates::platform;
    use flappy_gates::sim::{GameEvent, GameState, Signal, SignalQueue, SpawnClock, Viewport, autopilot};
    use flappy_gates::Tuning;

    pub struct Summary {
        pub frames: u64,
        pub score: u32,
        pub high_score: u32,
    }

    /// Play one autopilot session in an 800x600 viewport
    pub fn run(max_frames: u64) -> Summary {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let tuning = Tuning::load();
        let interval_ms = tuning.spawn_interval_ms;
        let mut state = GameState::new(seed, tuning, Viewport::new(800.0, 600.0));
        let mut queue = SignalQueue::new();
        let mut clock = SpawnClock::new();

        log::info!("Headless run with seed {}", seed);
        queue.push(Signal::Activate);
        if report(queue.pump(&mut state)) {
            clock.reset();
        }

        let mut frames = 0;
        while frames < max_frames && state.is_running() {
            for _ in 0..clock.advance(FRAME_MS, interval_ms) {
                queue.push(Signal::Spawn);
            }
            if autopilot::wants_flap(&state) {
                queue.push(Signal::Activate);
            }
            queue.push(Signal::Tick);
            if report(queue.pump(&mut state)) {
                clock.reset();
            }
            frames += 1;
        }

        Summary {
            frames,
            score: state.score,
            high_score: state.high_score.best,
        }
    }

    /// Log notifications. Returns true if a session started.
    fn report(events: Vec<GameEvent>) -> bool {
        let mut started = false;
        for event in &events {
            if let Some((title, body)) = platform::notification(event) {
                log::info!("{}: {}", title, body);
            }
            started |= *event == GameEvent::SessionStarted;
        }
        started
    }
}

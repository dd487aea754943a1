//! Space Defender entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use space_defender::consts::*;
    use space_defender::renderer::CanvasRenderer;
    use space_defender::settings::Settings;
    use space_defender::sim::{Action, GamePhase, GameState, KeyBindings, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        input: TickInput,
        bindings: KeyBindings,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                renderer: None,
                settings: Settings::load(),
                input: TickInput::default(),
                bindings: KeyBindings::default(),
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pause_pressed = false;
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.draw(&self.state, &self.settings);
            }
        }

        /// Mirror game state into the DOM HUD and overlays
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-wave .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.wave.to_string()));
            }

            set_overlay_visible(&document, "start-screen", self.state.phase == GamePhase::Start);
            set_overlay_visible(&document, "pause-menu", self.state.phase == GamePhase::Paused);

            let over = self.state.phase == GamePhase::GameOver;
            set_overlay_visible(&document, "game-over", over);
            if over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-wave") {
                    el.set_text_content(Some(&self.state.wave.to_string()));
                }
            }
        }

        fn begin_game(&mut self) {
            self.state.begin_game();
            self.input = TickInput::default();
            self.accumulator = 0.0;
        }
    }

    fn set_overlay_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    /// Warn once at startup about missing HUD hooks so a broken page is
    /// diagnosable; per-frame updates then skip silently.
    fn check_hud_hooks(document: &web_sys::Document) {
        for selector in ["#hud-score .hud-value", "#hud-lives .hud-value", "#hud-wave .hud-value"] {
            if document.query_selector(selector).ok().flatten().is_none() {
                log::warn!("HUD hook {selector} not found; counter will not display");
            }
        }
        for id in ["start-screen", "pause-menu", "game-over"] {
            if document.get_element_by_id(id).is_none() {
                log::warn!("Overlay #{id} not found");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Space Defender starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed-size playfield; the page scales the canvas with CSS
        canvas.set_width(PLAYFIELD_W as u32);
        canvas.set_height(PLAYFIELD_H as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        check_hud_hooks(&document);

        match CanvasRenderer::new(&canvas) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Renderer init failed: {:?}", e),
        }

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Space Defender running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                let Some(action) = g.bindings.lookup(&key) else {
                    return;
                };
                event.prevent_default();

                match action {
                    Action::PauseToggle => {
                        if !event.repeat() {
                            g.input.pause_pressed = true;
                        }
                    }
                    Action::Fire
                        if matches!(g.state.phase, GamePhase::Start | GamePhase::GameOver) =>
                    {
                        g.begin_game();
                    }
                    _ => g.input.held.press(action),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(action) = g.bindings.lookup(&event.key()) {
                    g.input.held.release(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Start / play-again both begin a fresh run
        for id in ["start-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().begin_game();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.pause_pressed = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().begin_game();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause_pressed = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause_pressed = true;
                    log::info!("Auto-paused (window blur)");
                }
                // Held keys would otherwise stick while unfocused
                g.input.held.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_defender::consts::SIM_DT;
    use space_defender::sim::{Action, GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Space Defender (native) starting...");
    log::info!("Run with `trunk serve` for the web version; native mode runs a headless demo.");

    // Headless autoplay: hold fire and sweep left-right for up to two
    // minutes of simulated time.
    let mut state = GameState::new(2024);
    state.begin_game();

    let mut input = TickInput::default();
    input.held.press(Action::Fire);

    let mut frame = 0u32;
    while state.phase == GamePhase::Playing && frame < 120 * 60 {
        if frame % 180 == 0 {
            let sweep_left = (frame / 180) % 2 == 0;
            input.held.release(Action::MoveLeft);
            input.held.release(Action::MoveRight);
            input.held.press(if sweep_left {
                Action::MoveLeft
            } else {
                Action::MoveRight
            });
        }
        tick(&mut state, &input, SIM_DT);
        frame += 1;
    }

    println!(
        "Demo finished after {:.1}s: score {}, wave {}, lives {}",
        frame as f32 * SIM_DT,
        state.score,
        state.wave,
        state.lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

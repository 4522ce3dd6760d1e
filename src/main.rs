//! Lung Defender entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent, TouchEvent};

    use lung_defender::audio::{AudioManager, SoundEffect};
    use lung_defender::consts::*;
    use lung_defender::i18n::{Language, Translator};
    use lung_defender::renderer::Renderer;
    use lung_defender::sim::{GameEvent, GameMode, GamePhase, GameWorld, TickInput, tick};
    use lung_defender::{HighScore, Settings, format_time};

    /// Game instance holding all state
    struct Game {
        world: GameWorld,
        renderer: Option<Renderer>,
        audio: AudioManager,
        settings: Settings,
        translator: Translator,
        high_score: HighScore,
        new_record: bool,
        last_mode: GameMode,
        last_time: f64,
        input: TickInput,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_muted(!settings.sound_enabled);
            let translator = Translator::new(settings.language());

            Self {
                world: GameWorld::new(seed),
                renderer: None,
                audio,
                translator,
                settings,
                high_score: HighScore::load(),
                new_record: false,
                last_mode: GameMode::Endless,
                last_time: 0.0,
                input: TickInput::default(),
                last_phase: GamePhase::Idle,
            }
        }

        fn start(&mut self, mode: GameMode) {
            let seed = js_sys::Date::now() as u64;
            self.world.start(mode, seed);
            self.last_mode = mode;
            self.new_record = false;
            self.input = TickInput::default();
            self.audio.resume();
            log::info!("Session started with seed: {seed}");
        }

        /// Run one simulation step and drain its side effects
        fn update(&mut self, dt: f32) {
            let input = self.input;
            tick(&mut self.world, &input, dt);
            self.input.pause = false;

            // Record the best score live, not just at game over
            if self.high_score.record(self.world.score) {
                self.high_score.save();
                self.new_record = true;
            }

            for event in std::mem::take(&mut self.world.events) {
                let effect = match event {
                    GameEvent::Blocked => SoundEffect::Block,
                    GameEvent::PowerUp => SoundEffect::PowerUp,
                    GameEvent::Damaged => SoundEffect::Damage,
                    GameEvent::LevelUp { level } => {
                        log::info!("Reached level {level}");
                        SoundEffect::LevelUp
                    }
                    GameEvent::GameOver => SoundEffect::GameOver,
                };
                self.audio.play(effect);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(renderer) = &self.renderer {
                if let Err(e) = renderer.draw(&self.world) {
                    log::warn!("Render error: {e:?}");
                }
            }
        }

        fn toggle_sound(&mut self) {
            self.settings.sound_enabled = !self.settings.sound_enabled;
            self.audio.set_muted(!self.settings.sound_enabled);
            self.settings.save();
        }

        fn toggle_language(&mut self) {
            let next = match self.settings.language() {
                Language::Id => Language::En,
                Language::En => Language::Id,
            };
            self.settings.set_language(next);
            self.translator = Translator::new(next);
            self.settings.save();
        }

        /// Push simulation state into the DOM HUD
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = self.world.snapshot();
            let t = &self.translator;

            set_text(&document, "hud-score", &snap.score.to_string());
            set_text(&document, "hud-highscore", &self.high_score.score.to_string());
            set_text(&document, "hud-level", &snap.level.to_string());
            set_text(&document, "hud-combo", &format!("x{}", snap.combo));
            set_text(&document, "hud-time", &format_time(snap.survival_time));

            // Meters as percentage widths
            set_bar(&document, "health-bar", snap.health);
            set_bar(&document, "tar-bar", snap.tar);

            set_visible(&document, "start-screen", snap.phase == GamePhase::Idle);
            set_visible(&document, "pause-overlay", snap.phase == GamePhase::Paused);
            set_visible(&document, "levelup-panel", snap.phase == GamePhase::LevelUp);
            set_visible(&document, "game-over", snap.phase == GamePhase::GameOver);
            let show_target = snap.mode == GameMode::Survival && snap.phase == GamePhase::Playing;
            set_visible(&document, "survival-target", show_target);
            if show_target {
                set_text(
                    &document,
                    "survival-target",
                    &format!(
                        "{} / {}",
                        format_time(snap.survival_time),
                        format_time(SURVIVAL_TARGET)
                    ),
                );
            }

            if snap.phase == GamePhase::Idle {
                set_text(&document, "tagline", t.get("tagline"));
                set_text(&document, "rule", t.get("rule"));
                set_text(&document, "endless-btn", t.get("mode_endless"));
                set_text(&document, "survival-btn", t.get("mode_survival"));
                set_text(&document, "controls-hint", t.get("controls_hint"));
            }

            if snap.phase == GamePhase::Paused {
                set_text(&document, "pause-title", t.get("paused"));
            }

            if snap.phase == GamePhase::LevelUp {
                set_text(&document, "levelup-title", t.get("level_up"));
                set_text(&document, "levelup-subtitle", t.get("speed_increased"));
                if let Some(fact) = snap.fact_index.and_then(|i| t.fact(i)) {
                    set_text(&document, "levelup-fact", fact);
                }
            }

            if snap.phase == GamePhase::GameOver {
                let title = if snap.tar >= 100.0 {
                    t.get("gameover_tar")
                } else {
                    t.get("gameover_health")
                };
                set_text(&document, "gameover-title", title);
                set_text(&document, "final-score-label", t.get("final_score"));
                set_text(&document, "final-score", &snap.score.to_string());
                set_text(&document, "final-time-label", t.get("survival_time"));
                set_text(&document, "final-time", &format_time(snap.survival_time));
                set_text(&document, "final-blocked-label", t.get("toxins_blocked"));
                set_text(
                    &document,
                    "final-blocked",
                    &snap.stats.hazards_blocked.to_string(),
                );
                set_text(&document, "final-combo-label", t.get("max_combo"));
                set_text(&document, "final-combo", &format!("x{}", snap.max_combo));
                set_text(&document, "final-level-label", t.get("level_reached"));
                set_text(&document, "final-level", &snap.level.to_string());
                set_text(&document, "final-highscore-label", t.get("high_score"));
                set_text(
                    &document,
                    "final-highscore",
                    &self.high_score.score.to_string(),
                );
                set_text(
                    &document,
                    "new-record",
                    &format!("\u{2B50} {}", t.get("new_high_score")),
                );
                set_text(&document, "replay-btn", t.get("play_again"));
                set_visible(&document, "new-record", self.new_record && snap.score > 0);
            }

            // Screen shake and damage flash on the canvas wrapper, suppressed
            // when the reduced-motion preference is set
            let motion = !self.settings.reduced_motion;
            if let Some(el) = document.get_element_by_id("game-frame") {
                if let Ok(frame) = el.dyn_into::<HtmlElement>() {
                    if motion && snap.screen_shake > 0.0 {
                        let dx = (js_sys::Math::random() - 0.5) * snap.screen_shake as f64 * 2.0;
                        let dy = (js_sys::Math::random() - 0.5) * snap.screen_shake as f64 * 2.0;
                        let _ = frame
                            .style()
                            .set_property("transform", &format!("translate({dx:.1}px, {dy:.1}px)"));
                    } else {
                        let _ = frame.style().remove_property("transform");
                    }
                }
            }
            if let Some(el) = document.get_element_by_id("damage-flash") {
                let _ = el
                    .class_list()
                    .toggle_with_force("flash", motion && snap.damage_flash);
            }
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_bar(document: &web_sys::Document, id: &str, percent: f32) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Ok(bar) = el.dyn_into::<HtmlElement>() {
                let _ = bar
                    .style()
                    .set_property("width", &format!("{}%", percent.clamp(0.0, 100.0)));
            }
        }
    }

    /// Toggle only the `hidden` token so layout classes on the element survive
    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lung Defender starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical resolution; CSS scales the element
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        match Renderer::new(&canvas) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Failed to create renderer: {e:?}"),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Lung Defender running!");
    }

    /// Map a client-space x coordinate into field units
    fn client_to_field_x(canvas: &HtmlCanvasElement, client_x: f32) -> f32 {
        let rect = canvas.get_bounding_client_rect();
        let scale = GAME_WIDTH / rect.width().max(1.0) as f32;
        (client_x - rect.left() as f32) * scale
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer move steers the shield target
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let x = client_to_field_x(&canvas_clone, event.client_x() as f32);
                game.borrow_mut().input.target_x = Some(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let x = client_to_field_x(&canvas_clone, touch.client_x() as f32);
                    game.borrow_mut().input.target_x = Some(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: arrows/A/D nudge, Escape pauses
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        let target = g.input.target_x.unwrap_or(g.world.shield.target_x);
                        g.input.target_x = Some(target - KEY_MOVE_STEP);
                    }
                    "ArrowRight" | "d" | "D" => {
                        let target = g.input.target_x.unwrap_or(g.world.shield.target_x);
                        g.input.target_x = Some(target + KEY_MOVE_STEP);
                    }
                    "Escape" | "p" | "P" => g.input.pause = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Mode select buttons on the start screen
        for (id, mode) in [
            ("endless-btn", GameMode::Endless),
            ("survival-btn", GameMode::Survival),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start(mode);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Play again restarts in the last mode
        if let Some(btn) = document.get_element_by_id("replay-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mode = game.borrow().last_mode;
                game.borrow_mut().start(mode);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("sound-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().toggle_sound();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("lang-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().toggle_language();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tab switch or minimize
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.world.phase == GamePhase::Playing {
                        g.input.pause = true;
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

        // Window blur
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.world.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
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
                1.0 / 60.0
            };
            g.last_time = time;

            g.update(dt.min(MAX_FRAME_DT));
            g.render();
            g.update_hud();

            if g.world.phase != g.last_phase {
                log::info!("Phase: {:?} -> {:?}", g.last_phase, g.world.phase);
                g.last_phase = g.world.phase;
            }
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
    use lung_defender::consts::MAX_FRAME_DT;
    use lung_defender::sim::{GameMode, GamePhase, GameWorld, TickInput, tick};

    env_logger::init();
    log::info!("Lung Defender (native) starting...");
    log::info!("Run with `trunk serve` for the playable web version");

    // Headless demo session: park the shield in the center and let it run
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut world = GameWorld::new(seed);
    world.start(GameMode::Endless, seed);

    let input = TickInput::default();
    let dt = MAX_FRAME_DT / 6.0;
    let mut steps = 0u32;
    while world.phase != GamePhase::GameOver && steps < 60 * 300 {
        tick(&mut world, &input, dt);
        steps += 1;
    }

    log::info!(
        "Demo session over: score {}, level {}, survived {:.1}s, blocked {}",
        world.score,
        world.level,
        world.survival_time,
        world.stats.hazards_blocked
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

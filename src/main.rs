//! Dino Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use dino_pong::consts::*;
    use dino_pong::history::MatchHistory;
    use dino_pong::renderer::Renderer;
    use dino_pong::sim::{GameEvent, GamePhase, GameState, Rect, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        history: MatchHistory,
        renderer: Renderer,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn new(seed: u64, renderer: Renderer, canvas: HtmlCanvasElement) -> Self {
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                history: MatchHistory::load(),
                renderer,
                canvas,
            }
        }

        /// One animation frame: sample the obstacle rect, run one sim
        /// tick, act on events, render. The render happens whether or
        /// not the simulation is running so the idle frame still draws.
        fn frame(&mut self) {
            self.input.calc_rect = calc_hitbox(&self.canvas);
            tick(&mut self.state, &self.input);

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.launch_confetti = false;

            self.drain_events();
            self.renderer.draw(&self.state, &self.input.calc_rect);
            self.update_score_display();
        }

        fn drain_events(&mut self) {
            for event in std::mem::take(&mut self.state.events) {
                match event {
                    GameEvent::PointScored { .. } => {}
                    GameEvent::MatchOver {
                        player_won,
                        player_score,
                        ai_score,
                    } => {
                        self.history.save_match(
                            player_won,
                            player_score,
                            ai_score,
                            js_sys::Date::now(),
                        );
                        self.history.save();
                        set_message(if player_won {
                            "You Win! Press SPACE to play again"
                        } else {
                            "AI Wins! Press SPACE to play again"
                        });
                        update_stats_display(&self.history);
                        log::info!(
                            "Match over: {} {}-{}",
                            if player_won { "WIN" } else { "LOSS" },
                            player_score,
                            ai_score
                        );
                    }
                }
            }
        }

        fn update_score_display(&self) {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(el) = document.get_element_by_id("playerScore") {
                el.set_text_content(Some(&self.state.player_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("aiScore") {
                el.set_text_content(Some(&self.state.ai_score.to_string()));
            }
        }
    }

    /// Calculator widget hitbox in playfield coordinates, expanded by a
    /// fixed margin so the ball bounces just outside its border
    fn calc_hitbox(canvas: &HtmlCanvasElement) -> Rect {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(el) = document.get_element_by_id("calculator") else {
            return Rect::default();
        };
        let rect = el.get_bounding_client_rect();
        let canvas_rect = canvas.get_bounding_client_rect();
        Rect::new(
            (rect.left() - canvas_rect.left()) as f32 - 5.0,
            (rect.top() - canvas_rect.top()) as f32 - 5.0,
            rect.width() as f32 + 10.0,
            rect.height() as f32 + 10.0,
        )
    }

    fn set_message(text: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("message") {
            el.set_text_content(Some(text));
        }
    }

    fn update_stats_display(history: &MatchHistory) {
        let document = web_sys::window().unwrap().document().unwrap();
        let stats = history.stats();

        if let Some(el) = document.get_element_by_id("totalWins") {
            el.set_text_content(Some(&stats.wins.to_string()));
        }
        if let Some(el) = document.get_element_by_id("totalLosses") {
            el.set_text_content(Some(&stats.losses.to_string()));
        }
        if let Some(el) = document.get_element_by_id("winRate") {
            el.set_text_content(Some(&format!("{}%", stats.win_rate)));
        }
        if let Some(el) = document.get_element_by_id("recentList") {
            if history.is_empty() {
                el.set_text_content(Some("No matches yet"));
            } else {
                let lines: Vec<String> = history
                    .recent(5)
                    .iter()
                    .map(|m| {
                        format!(
                            "{} {}-{}",
                            if m.won { "WIN" } else { "LOSS" },
                            m.player_score,
                            m.ai_score
                        )
                    })
                    .collect();
                el.set_text_content(Some(&lines.join("\n")));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("pong")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            Renderer::new(ctx),
            canvas.clone(),
        )));
        log::info!("Game initialized with seed: {}", seed);

        update_stats_display(&game.borrow().history);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Dino Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Mouse tracking for the player paddle - works anywhere on the page
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                let mouse_y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().input.paddle_y = Some(mouse_y - PADDLE_HEIGHT / 2.0);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space to start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Idle {
                        event.prevent_default();
                        g.input.start = true;
                        set_message("");
                    }
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Confetti launcher button (wired from the calculator panel)
        if let Some(btn) = document.get_element_by_id("launchConfetti") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.launch_confetti = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
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
    use dino_pong::consts::*;
    use dino_pong::sim::{GameState, Rect, TickInput, tick};

    env_logger::init();
    log::info!("Dino Pong (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: a minute of simulated play with a fixed
    // obstacle rect where the calculator would sit
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    let calc_rect = Rect::new(380.0, 180.0, 140.0, 240.0);

    let mut input = TickInput {
        start: true,
        calc_rect,
        ..Default::default()
    };
    tick(&mut state, &input);
    input.start = false;

    input.launch_confetti = true;
    tick(&mut state, &input);
    input.launch_confetti = false;

    for _ in 0..3600 {
        tick(&mut state, &input);
        state.events.clear();
    }

    log::info!(
        "After 1 min at seed {}: ticks={}, dinosaurs={}, confetti={}, ball at ({:.0}, {:.0})",
        seed,
        state.time_ticks,
        state.dinosaurs.len(),
        state.confetti.len(),
        state.ball.pos.x,
        state.ball.pos.y
    );
    assert!(state.ball.spin.abs() <= MAX_SPIN);
    println!("Headless run complete.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

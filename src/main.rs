//! Circle Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use circle_shooter::consts::*;
    use circle_shooter::platform::web::{BrowserTimers, CanvasRenderer, DomScoreBoard};
    use circle_shooter::platform::{Renderer, TimerId, client_to_world};
    use circle_shooter::{FrameOutcome, GameSession, Settings};

    /// Game instance holding the session and its collaborators
    struct Game {
        session: GameSession,
        renderer: CanvasRenderer,
        score_board: DomScoreBoard,
        timers: BrowserTimers,
        last_time: f64,
    }

    impl Game {
        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let surface = self.renderer.surface();
            self.session
                .start(surface, seed, &mut self.timers, &mut self.score_board);
            self.last_time = 0.0;
        }
    }

    fn timer_dispatch(game: Weak<RefCell<Game>>) -> Rc<dyn Fn(TimerId)> {
        Rc::new(move |id| {
            if let Some(game) = game.upgrade() {
                if let Ok(mut g) = game.try_borrow_mut() {
                    g.session.on_interval(id);
                }
            }
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Circle Shooter starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };
        let Some(canvas) = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no canvas element");
            return;
        };

        // Full width, most of the height
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0)
            * CANVAS_HEIGHT_FRACTION;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let Some(renderer) = CanvasRenderer::new(canvas.clone()) else {
            log::error!("canvas has no 2d context");
            return;
        };

        let settings = Settings::load();
        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            RefCell::new(Game {
                session: GameSession::new(settings),
                renderer,
                score_board: DomScoreBoard::new("score"),
                timers: BrowserTimers::new(timer_dispatch(weak.clone())),
                last_time: 0.0,
            })
        });

        setup_click_handler(&canvas, game.clone());
        setup_restart_button(game.clone());

        game.borrow_mut().start();
        request_animation_frame(game);

        log::info!("Circle Shooter running!");
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let mut g = game.borrow_mut();
            let surface = g.renderer.surface();
            let target = client_to_world(
                Vec2::new(event.client_x() as f32, event.client_y() as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
                surface,
            );
            g.session.fire(target);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let restart_loop = {
                    let mut g = game.borrow_mut();
                    let was_running = g.session.is_running();
                    g.start();
                    !was_running
                };
                // The frame loop stops when a session ends
                if restart_loop {
                    request_animation_frame(game.clone());
                }
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let Game {
                session,
                renderer,
                score_board,
                timers,
                ..
            } = &mut *g;
            session.frame(dt, renderer, score_board, timers)
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(game),
            FrameOutcome::GameOver => log::info!("Game over"),
            FrameOutcome::Idle => {}
        }
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
    log::info!("Circle Shooter (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build for the playable game");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let stats = autopilot::run(circle_shooter::Settings::load(), seed);
    println!(
        "Autopilot survived {} ticks: score {}, {} shots, {}/{} enemies destroyed",
        stats.ticks,
        stats.final_score,
        stats.shots_fired,
        stats.enemies_destroyed,
        stats.enemies_spawned
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless play-through against in-memory collaborators
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use circle_shooter::consts::SIM_DT;
    use circle_shooter::platform::{HeadlessRenderer, LogScoreBoard, Renderer, VirtualTimers};
    use circle_shooter::session::SessionStats;
    use circle_shooter::sim::Entity;
    use circle_shooter::sim::Surface;
    use circle_shooter::{FrameOutcome, GameSession, Settings};

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    /// Frames between shots
    const FIRE_EVERY: u32 = 12;

    pub fn run(settings: Settings, seed: u64) -> SessionStats {
        let mut renderer = HeadlessRenderer::new(Surface::new(1280.0, 720.0));
        let mut board = LogScoreBoard::default();
        let mut timers = VirtualTimers::new();
        let mut session = GameSession::new(settings);

        session.start(renderer.surface(), seed, &mut timers, &mut board);

        let frame_ms = (SIM_DT * 1000.0).round() as u64;
        for frame in 0..MAX_FRAMES {
            for id in timers.advance(frame_ms) {
                session.on_interval(id);
            }

            // Shoot at whichever enemy is closest to the player
            if frame % FIRE_EVERY == 0 {
                let target = session.state().and_then(|state| {
                    let player = state.player.pos();
                    state
                        .enemies
                        .iter()
                        .map(|e| e.pos())
                        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
                });
                if let Some(target) = target {
                    session.fire(target);
                }
            }

            match session.frame(SIM_DT, &mut renderer, &mut board, &mut timers) {
                FrameOutcome::Continue => {}
                FrameOutcome::GameOver | FrameOutcome::Idle => break,
            }
        }

        session.end(&mut timers);
        log::info!("{} frames rendered, last board text {:?}", renderer.frames_rendered, board.text());
        session.stats()
    }
}

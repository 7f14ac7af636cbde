//! Heart Hunter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, MouseEvent};

    use heart_hunter::renderer::{Canvas2dSurface, draw_frame};
    use heart_hunter::sim::{self, GameState, RunOutcome, RunPhase};
    use heart_hunter::tuning;
    use heart_hunter::ui::{self, Screen, SequenceStep};
    use heart_hunter::Progress;

    /// Background art, served next to the page
    const BACKDROP_SRC: &str = "backdrop.png";

    /// One in-progress run and its countdown timer handle
    struct Run {
        state: GameState,
        countdown_handle: i32,
    }

    /// Application state shared by every callback
    struct App {
        screen: Screen,
        progress: Progress,
        run: Option<Run>,
        surface: Option<Canvas2dSurface>,
        canvas: HtmlCanvasElement,
        /// Clicks received since the last frame, in surface coordinates
        pending_clicks: Vec<(f32, f32)>,
        loading: Option<ui::LoadingSequence>,
        tips: Option<ui::TipReel>,
        tip_cursor: usize,
        current_level: u32,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Hunter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let app = Rc::new(RefCell::new(App {
            screen: Screen::Loading,
            progress: Progress::load(),
            run: None,
            surface: None,
            canvas: canvas.clone(),
            pending_clicks: Vec::new(),
            loading: None,
            tips: None,
            tip_cursor: 0,
            current_level: 1,
        }));

        size_canvas(&app.borrow());
        init_surface(&mut app.borrow_mut());

        {
            let mut a = app.borrow_mut();
            let now = now_ms();
            a.loading = Some(ui::LoadingSequence::new(now));
            show_screen(&document, Screen::Loading);
        }

        setup_canvas_click(&canvas, app.clone());
        setup_resize(app.clone());
        setup_buttons(&document, app.clone());

        request_animation_frame(app);

        log::info!("Heart Hunter running!");
    }

    /// Monotonic milliseconds on the same clock requestAnimationFrame uses
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Match the backing store to the CSS size, scaled for the device pixel
    /// ratio so drawing stays in CSS pixel coordinates.
    fn size_canvas(a: &App) {
        let window = web_sys::window().expect("no window");
        let dpr = window.device_pixel_ratio();
        let cw = a.canvas.client_width();
        let ch = a.canvas.client_height();
        a.canvas.set_width((cw as f64 * dpr) as u32);
        a.canvas.set_height((ch as f64 * dpr) as u32);
    }

    fn init_surface(a: &mut App) {
        let ctx: web_sys::CanvasRenderingContext2d = a
            .canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let dpr = web_sys::window().expect("no window").device_pixel_ratio();
        ctx.scale(dpr, dpr).ok();

        let mut surface = Canvas2dSurface::new(ctx);
        if let Ok(image) = HtmlImageElement::new() {
            image.set_src(BACKDROP_SRC);
            surface.set_backdrop(image);
        }
        a.surface = Some(surface);
    }

    /// Show exactly one screen container, hide the rest
    fn show_screen(document: &Document, screen: Screen) {
        for s in Screen::ALL {
            if let Some(el) = document.get_element_by_id(s.element_id()) {
                let class = if s == screen { "screen" } else { "screen hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn goto(a: &mut App, document: &Document, screen: Screen) {
        a.screen = screen;
        show_screen(document, screen);
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn refresh_level_select(document: &Document, progress: &Progress) {
        for level in 1..=tuning::MAX_LEVEL {
            let unlocked = progress.is_unlocked(level);
            if let Some(el) = document.get_element_by_id(&format!("level-{}", level)) {
                let class = if unlocked {
                    "level-card"
                } else {
                    "level-card level-locked"
                };
                let _ = el.set_attribute("class", class);
            }
            let label = if unlocked {
                format!("Best: {}", progress.best_score(level))
            } else {
                "Locked".to_string()
            };
            set_text(document, &format!("level-{}-score", level), &label);
        }
        set_text(
            document,
            "unlocked-levels",
            &progress.unlocked_levels.to_string(),
        );
    }

    fn update_hud(document: &Document, state: &GameState) {
        set_text(document, "hud-score", &state.score.to_string());
        set_text(document, "hud-timer", &state.time_left.to_string());
        // Goal progress bar
        if let Some(el) = document.get_element_by_id("goal-fill") {
            let fraction = (state.score.max(0) as f32 / state.config.required_score as f32)
                .clamp(0.0, 1.0);
            let _ = el.set_attribute("style", &format!("width: {}%", (fraction * 100.0) as u32));
        }
    }

    /// Start (or restart) a run on the given level
    fn start_run(app: &Rc<RefCell<App>>, level: u32) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let mut a = app.borrow_mut();
        teardown_run(&mut a);

        // A button for a level without balance data is an integration bug
        let config = tuning::level_config(level).expect("missing level configuration");

        let seed = js_sys::Date::now() as u64;
        let bounds = glam::Vec2::new(a.canvas.client_width() as f32, a.canvas.client_height() as f32);
        let now = now_ms();
        let mut state = GameState::new(level, &config, seed, bounds, now);
        state.start();
        log::info!("Run seed: {}", seed);

        // Countdown ticks once a second, independent of the render loop.
        // The guard at the top keeps a stale interval from touching a new
        // or finished run.
        let countdown_handle = {
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut a = app.borrow_mut();
                let outcome = match a.run.as_mut() {
                    Some(run) if run.state.phase == RunPhase::Running => {
                        sim::countdown_second(&mut run.state)
                    }
                    _ => return,
                };
                if let Some(outcome) = outcome {
                    let document = web_sys::window()
                        .and_then(|w| w.document())
                        .expect("no document");
                    finish_run(&mut a, &document, outcome);
                }
            });
            let handle = web_sys::window()
                .expect("no window")
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    1000,
                )
                .expect("failed to schedule countdown");
            closure.forget();
            handle
        };

        a.current_level = level;
        a.pending_clicks.clear();
        a.run = Some(Run {
            state,
            countdown_handle,
        });
        set_text(&document, "current-level", &level.to_string());
        set_text(&document, "goal-score", &config.required_score.to_string());
        goto(&mut a, &document, Screen::Game);
    }

    /// Cancel the countdown and drop the run. Safe to call repeatedly and
    /// from any state.
    fn teardown_run(a: &mut App) {
        if let Some(mut run) = a.run.take() {
            let _ = run.state.end();
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(run.countdown_handle);
            }
            log::info!("Run torn down");
        }
        a.pending_clicks.clear();
    }

    /// Completion path, invoked exactly once per run by the countdown
    fn finish_run(a: &mut App, document: &Document, outcome: RunOutcome) {
        let level = a.current_level;
        let update = a.progress.record_run(level, outcome.score, outcome.success);
        if update.new_best || update.unlocked_level.is_some() {
            a.progress.save();
        }
        teardown_run(a);

        set_text(document, "final-score", &outcome.score.to_string());
        set_text(document, "game-over-title", ui::result_title(outcome.score));
        match update.unlocked_level {
            Some(next) => {
                set_text(
                    document,
                    "unlock-message",
                    &format!("🎉 Level {} unlocked!", next),
                );
                if let Some(el) = document.get_element_by_id("next-level-btn") {
                    let _ = el.set_attribute("style", "display: block");
                }
            }
            None => {
                set_text(document, "unlock-message", "");
                if let Some(el) = document.get_element_by_id("next-level-btn") {
                    let _ = el.set_attribute("style", "display: none");
                }
            }
        }
        goto(a, document, Screen::GameOver);
    }

    fn setup_canvas_click(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut a = app.borrow_mut();
            if a.screen == Screen::Game {
                a.pending_clicks
                    .push((event.offset_x() as f32, event.offset_y() as f32));
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            size_canvas(&a);
            init_surface(&mut a);
            let (w, h) = (a.canvas.client_width() as f32, a.canvas.client_height() as f32);
            if let Some(run) = a.run.as_mut() {
                run.state.set_bounds(w, h);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Attach a click handler to an element by id, if present
    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&document.clone(), "play-btn", move |_| {
                let mut a = app.borrow_mut();
                refresh_level_select(&document, &a.progress);
                goto(&mut a, &document, Screen::LevelSelect);
            });
        }
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&document.clone(), "back-to-menu-btn", move |_| {
                let mut a = app.borrow_mut();
                refresh_level_select(&document, &a.progress);
                goto(&mut a, &document, Screen::Menu);
            });
        }
        // Leaving a run in progress must always tear it down
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&document.clone(), "quit-btn", move |_| {
                let mut a = app.borrow_mut();
                teardown_run(&mut a);
                refresh_level_select(&document, &a.progress);
                goto(&mut a, &document, Screen::Menu);
            });
        }
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&document.clone(), "menu-btn", move |_| {
                let mut a = app.borrow_mut();
                refresh_level_select(&document, &a.progress);
                goto(&mut a, &document, Screen::Menu);
            });
        }
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&document.clone(), "restart-btn", move |_| {
                let mut a = app.borrow_mut();
                refresh_level_select(&document, &a.progress);
                goto(&mut a, &document, Screen::LevelSelect);
            });
        }
        {
            let app = app.clone();
            on_click(document, "replay-btn", move |_| {
                let level = app.borrow().current_level;
                start_run(&app, level);
            });
        }
        {
            let app = app.clone();
            on_click(document, "next-level-btn", move |_| {
                let next = app.borrow().current_level + 1;
                if next <= tuning::MAX_LEVEL && app.borrow().progress.is_unlocked(next) {
                    start_run(&app, next);
                }
            });
        }
        {
            let app = app.clone();
            let document = document.clone();
            on_click(&document.clone(), "reset-progress-btn", move |_| {
                let mut a = app.borrow_mut();
                a.progress.reset();
                Progress::clear_saved();
                refresh_level_select(&document, &a.progress);
            });
        }
        for level in 1..=tuning::MAX_LEVEL {
            let app = app.clone();
            on_click(document, &format!("level-{}", level), move |_| {
                if app.borrow().progress.is_unlocked(level) {
                    start_run(&app, level);
                }
            });
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let document = web_sys::window()
                .and_then(|w| w.document())
                .expect("no document");

            match a.screen {
                Screen::Loading => {
                    if let Some(step) = a.loading.as_mut().map(|seq| seq.poll(time)) {
                        match step {
                            SequenceStep::Show((text, pct)) => {
                                set_text(&document, "loading-text", text);
                                if let Some(el) = document.get_element_by_id("loading-bar") {
                                    let _ = el
                                        .set_attribute("style", &format!("width: {}%", pct));
                                }
                            }
                            SequenceStep::Done => {
                                a.loading = None;
                                let cursor = a.tip_cursor;
                                a.tips = Some(ui::TipReel::new(time, cursor));
                                goto(&mut a, &document, Screen::Tips);
                            }
                            SequenceStep::Waiting => {}
                        }
                    }
                }
                Screen::Tips => {
                    if let Some(step) = a.tips.as_mut().map(|reel| reel.poll(time)) {
                        match step {
                            SequenceStep::Show(tip) => set_text(&document, "current-tip", tip),
                            SequenceStep::Done => {
                                a.tip_cursor = a.tips.as_ref().map(|r| r.cursor()).unwrap_or(0);
                                a.tips = None;
                                refresh_level_select(&document, &a.progress);
                                goto(&mut a, &document, Screen::Menu);
                            }
                            SequenceStep::Waiting => {}
                        }
                    }
                }
                Screen::Game => {
                    let clicks: Vec<_> = a.pending_clicks.drain(..).collect();
                    let App { surface, run, .. } = &mut *a;
                    if let Some(run) = run.as_mut() {
                        for (x, y) in clicks {
                            sim::handle_click(&mut run.state, x, y, time);
                        }
                        sim::tick(&mut run.state, time);
                        if let Some(surface) = surface.as_mut() {
                            draw_frame(surface, &run.state);
                        }
                        update_hud(&document, &run.state);
                    }
                }
                Screen::Menu | Screen::LevelSelect | Screen::GameOver => {
                    a.pending_clicks.clear();
                }
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Heart Hunter (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the real game");

    headless_smoke();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a short synthetic run to prove the sim end-to-end off the browser
#[cfg(not(target_arch = "wasm32"))]
fn headless_smoke() {
    use heart_hunter::sim::{self, GameState, RunPhase};
    use heart_hunter::tuning;

    let config = tuning::level_config(1).expect("missing level configuration");
    let mut state = GameState::new(1, &config, 42, glam::Vec2::new(800.0, 600.0), 0.0);
    state.start();

    // ~5 simulated seconds at 60 fps, clicking whatever drifts by
    let mut now = 0.0;
    for frame in 0..300 {
        now += 1000.0 / 60.0;
        if frame % 30 == 0 {
            if let Some(heart) = state.hearts.iter().find(|h| !h.exploding && !h.scored) {
                let (x, y) = (heart.pos.x, heart.pos.y);
                sim::handle_click(&mut state, x, y, now);
            }
        }
        sim::tick(&mut state, now);
    }
    for _ in 0..60 {
        if sim::countdown_second(&mut state).is_some() {
            break;
        }
    }

    assert_eq!(state.phase, RunPhase::Ended);
    println!("✓ Headless run finished with score {}", state.score);
}

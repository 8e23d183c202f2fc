//! Sky Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_hop::Settings;
    use sky_hop::consts::*;
    use sky_hop::input::{InputTracker, Key, TouchRegion};
    use sky_hop::renderer::{CanvasRenderer, Renderer, build_frame};
    use sky_hop::sim::{GameState, tick};
    use sky_hop::timing::FramePacer;

    /// Mouse is treated as one more touch point
    const MOUSE_TOUCH_ID: i32 = -1;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        pacer: FramePacer,
        input: InputTracker,
        settings: Settings,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                renderer,
                pacer: FramePacer::new(),
                input: InputTracker::new(),
                settings,
                last_time: 0.0,
            }
        }

        /// Run due simulation ticks, then draw
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            self.last_time = time;

            for _ in 0..self.pacer.advance(elapsed) {
                let input = self.input.snapshot();
                tick(&mut self.state, &input);
                for event in &self.state.events {
                    log::debug!("{:?}", event);
                }
            }

            let commands = build_frame(&self.state, &self.settings, self.pacer.fps());
            self.renderer.render_frame(&commands);
        }

        /// Focus lost: release events will not arrive, and the gap until the
        /// next frame should not be replayed as catch-up ticks
        fn suspend(&mut self) {
            self.input.release_all();
            self.pacer.reset();
            self.last_time = 0.0;
            log::info!("Input released (focus lost)");
        }

        fn toggle_grid(&mut self) {
            self.settings.show_grid = !self.settings.show_grid;
            self.settings.save();
        }

        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            self.settings.save();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let renderer = CanvasRenderer::new(ctx, &settings.asset_dir);
        let game = Rc::new(RefCell::new(Game::new(seed, renderer, settings)));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&window, game.clone())?;
        setup_touch(&canvas, game.clone())?;
        setup_mouse(&canvas, game.clone())?;
        setup_focus(&window, game.clone())?;

        request_animation_frame(game);

        log::info!("Sky Hop running!");
        Ok(())
    }

    /// Screen third under a viewport point, in game coordinates
    fn region_at(canvas: &HtmlCanvasElement, client_x: i32) -> TouchRegion {
        let rect = canvas.get_bounding_client_rect();
        let x = if rect.width() > 0.0 {
            ((client_x as f64 - rect.left()) / rect.width()) as f32 * SCREEN_WIDTH
        } else {
            0.0
        };
        TouchRegion::from_x(x, SCREEN_WIDTH)
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let name = event.key();
                if let Some(key) = Key::from_key_name(&name) {
                    event.prevent_default();
                    g.input.press_key(key);
                    return;
                }
                match name.as_str() {
                    "g" | "G" => g.toggle_grid(),
                    "f" | "F" => g.toggle_fps(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_key_name(&event.key()) {
                    game.borrow_mut().input.release_key(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Touch start (press-and-hold per region)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let touches = event.changed_touches();
                let mut g = game.borrow_mut();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let region = region_at(&canvas_clone, touch.client_x());
                        g.input.touch_start(touch.identifier(), region);
                    }
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end / cancel
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let touches = event.changed_touches();
                let mut g = game.borrow_mut();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        g.input.touch_end(touch.identifier());
                    }
                }
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_mouse(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let region = region_at(&canvas_clone, event.client_x());
                game.borrow_mut().input.touch_start(MOUSE_TOUCH_ID, region);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        for name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.touch_end(MOUSE_TOUCH_ID);
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_focus(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().suspend();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native build: headless demo run driven by the autopilot
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use sky_hop::Settings;
    use sky_hop::assets::load_from_dir;
    use sky_hop::consts::*;
    use sky_hop::renderer::{Renderer, SoftwareRenderer, build_frame};
    use sky_hop::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Hop (native) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!(
        "Simulating {} frames with seed {}",
        settings.headless_frames,
        seed
    );

    let mut state = GameState::new(seed);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut best: u64 = 0;
    for _ in 0..settings.headless_frames {
        tick(&mut state, &input);
        for event in &state.events {
            log::debug!("{:?}", event);
            if let GameEvent::GameOver { score } = event {
                best = best.max(*score);
            }
        }
    }
    best = best.max(state.score);
    log::info!(
        "Finished after {} session(s); best score {}",
        state.session,
        best
    );

    let sprites = load_from_dir(Path::new(&settings.asset_dir));
    let mut renderer = SoftwareRenderer::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, sprites);
    renderer.render_frame(&build_frame(&state, &settings, None));
    for caption in renderer.captions() {
        log::info!("Final frame: {}", caption);
    }

    if let Some(path) = &settings.screenshot_path {
        match renderer.save_png(Path::new(path)) {
            Ok(()) => log::info!("Saved screenshot to {}", path),
            Err(e) => log::warn!("Failed to save screenshot {}: {}", path, e),
        }
    }
}

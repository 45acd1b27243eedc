//! Parallax Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
        MouseEvent,
    };

    use parallax_shooter::GameConfig;
    use parallax_shooter::platform::{FrameClock, KeyEvent, apply_key, to_playfield};
    use parallax_shooter::renderer::{Canvas, Sprite, TextStyle, draw_scene};
    use parallax_shooter::sim::{ClickAction, GameSession, InputSnapshot, Rect, handle_click, tick};

    /// `Canvas` backed by a 2D context; images are looked up by DOM id
    struct WebCanvas {
        ctx: CanvasRenderingContext2d,
        document: Document,
        images: HashMap<Sprite, HtmlImageElement>,
    }

    impl WebCanvas {
        fn image(&mut self, sprite: Sprite) -> Option<HtmlImageElement> {
            if let Some(img) = self.images.get(&sprite) {
                return Some(img.clone());
            }
            let img = self
                .document
                .get_element_by_id(&sprite.element_id())?
                .dyn_into::<HtmlImageElement>()
                .ok()?;
            self.images.insert(sprite, img.clone());
            Some(img)
        }
    }

    fn report(result: Result<(), JsValue>, what: &str) {
        if let Err(e) = result {
            log::warn!("{} failed: {:?}", what, e);
        }
    }

    impl Canvas for WebCanvas {
        fn clear(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn draw_image(&mut self, sprite: Sprite, src: Option<Rect>, dst: Rect, alpha: f32) {
            let Some(img) = self.image(sprite) else {
                return;
            };
            self.ctx.set_global_alpha(alpha as f64);
            let result = match src {
                Some(s) => self
                    .ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        &img,
                        s.x as f64,
                        s.y as f64,
                        s.width as f64,
                        s.height as f64,
                        dst.x as f64,
                        dst.y as f64,
                        dst.width as f64,
                        dst.height as f64,
                    ),
                None => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &img,
                    dst.x as f64,
                    dst.y as f64,
                    dst.width as f64,
                    dst.height as f64,
                ),
            };
            self.ctx.set_global_alpha(1.0);
            report(result, "drawImage");
        }

        fn draw_image_rotated(&mut self, sprite: Sprite, center: Vec2, angle: f32, size: Vec2) {
            let Some(img) = self.image(sprite) else {
                return;
            };
            self.ctx.save();
            let result = self
                .ctx
                .translate(center.x as f64, center.y as f64)
                .and_then(|_| self.ctx.rotate(angle as f64))
                .and_then(|_| {
                    self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &img,
                        (-size.x / 2.0) as f64,
                        (-size.y / 2.0) as f64,
                        size.x as f64,
                        size.y as f64,
                    )
                });
            self.ctx.restore();
            report(result, "rotated drawImage");
        }

        fn fill_rect(&mut self, rect: Rect, color: [f32; 3], alpha: f32) {
            let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
            self.ctx.save();
            self.ctx.set_global_alpha(alpha as f64);
            self.ctx.set_fill_style_str(&format!("rgb({}, {}, {})", r, g, b));
            self.ctx.fill_rect(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            );
            self.ctx.restore();
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
            self.ctx.save();
            self.ctx.set_font(&style.font);
            self.ctx.set_fill_style_str(&style.color);
            self.ctx.set_text_align("left");
            let result = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
            self.ctx.restore();
            report(result, "fillText");
        }
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        input: InputSnapshot,
        clock: FrameClock,
        canvas: WebCanvas,
        element: HtmlCanvasElement,
    }

    impl Game {
        /// Pointer position in playfield coordinates
        fn pointer_pos(&self, event: &MouseEvent) -> Vec2 {
            let pf = &self.session.config.playfield;
            to_playfield(
                Vec2::new(event.offset_x() as f32, event.offset_y() as f32),
                Vec2::new(
                    self.element.client_width() as f32,
                    self.element.client_height() as f32,
                ),
                Vec2::new(pf.width, pf.height),
            )
        }

        fn frame(&mut self, time: f64) {
            let frame = self.clock.frame(time);
            tick(&mut self.session, &mut self.input, frame);
            draw_scene(&self.session, &mut self.canvas);
        }
    }

    /// Config overrides from an inline `<script id="game-config">` JSON block
    fn load_config(document: &Document) -> GameConfig {
        let Some(json) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config overrides");
                config
            }
            Err(e) => {
                log::warn!("Ignoring game config: {}", e);
                GameConfig::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Parallax Shooter starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let element = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no #canvas element"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let config = load_config(&document);
        element.set_width(config.playfield.width as u32);
        element.set_height(config.playfield.height as u32);

        let ctx = element
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let seed = js_sys::Date::now() as u64;
        let clock = FrameClock::new(config.max_frame_delta_ms);
        let game = Rc::new(RefCell::new(Game {
            session: GameSession::new(config, seed),
            input: InputSnapshot::new(),
            clock,
            canvas: WebCanvas {
                ctx,
                document,
                images: HashMap::new(),
            },
            element: element.clone(),
        }));

        setup_input_handlers(&element, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Parallax Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Keyboard
        for (name, kind) in [("keydown", KeyEvent::Down), ("keyup", KeyEvent::Up)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if apply_key(&mut g.input, &event.key(), kind) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur - key-up events are lost while unfocused
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
                log::debug!("Input cleared (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - aim point and restart button hover
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.pointer_pos(&event);
                g.input.set_pointer(pos);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click - shoot, or restart from the game-over screen
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                let pos = g.pointer_pos(&event);
                let action = handle_click(&mut g.session, &mut g.input, pos);
                if action == ClickAction::Restarted {
                    log::info!("Restart requested at ({:.0}, {:.0})", pos.x, pos.y);
                }
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; game loop stopped");
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
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Parallax Shooter (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path),
        None => parallax_shooter::GameConfig::default(),
    };
    headless_run(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> parallax_shooter::GameConfig {
    use parallax_shooter::GameConfig;

    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("Using default config ({}: {})", path, e);
            GameConfig::default()
        }
    }
}

/// Scripted one-minute session: run back and forth, jump and keep shooting
/// ahead; restart once if the run ends
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(config: parallax_shooter::GameConfig) {
    use glam::Vec2;
    use parallax_shooter::platform::FrameClock;
    use parallax_shooter::renderer::{DrawList, draw_scene};
    use parallax_shooter::sim::{Direction, GameSession, InputSnapshot, handle_click, tick};

    const FRAMES: u32 = 60 * 60;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    let mut clock = FrameClock::new(config.max_frame_delta_ms);
    let mut session = GameSession::new(config, 42);
    let mut input = InputSnapshot::new();
    let mut canvas = DrawList::new();
    let mut restarts = 0;
    let mut draw_calls = 0;

    for i in 0..FRAMES {
        let heading = if (i / 120) % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        };
        input.release(Direction::Left);
        input.release(Direction::Right);
        input.press(heading);
        if i % 90 == 0 {
            input.press(Direction::Up);
        } else {
            input.release(Direction::Up);
        }

        if session.is_game_over() {
            let settled = session
                .game_over
                .is_settled(session.current_time, &session.config.game_over);
            if restarts == 0 && settled {
                let button = session.restart_button.rect.center();
                handle_click(&mut session, &mut input, button);
                restarts += 1;
            }
        } else if i % 10 == 0 {
            let target = session.player.center() + Vec2::new(400.0, -150.0 + (i % 300) as f32);
            handle_click(&mut session, &mut input, target);
        }

        let frame = clock.frame(i as f64 * FRAME_MS);
        tick(&mut session, &mut input, frame);
        draw_scene(&session, &mut canvas);
        draw_calls += canvas.len();
    }

    log::info!(
        "Headless run finished: {} frames, {} draw calls, health {}/{}, phase {:?}, restarts {}",
        FRAMES,
        draw_calls,
        session.player.health,
        session.player.max_health,
        session.phase,
        restarts
    );
    log::info!(
        "Active: {} projectiles, {} drifters, {} collectibles; pool built {} shots",
        session.projectiles.len(),
        session.drifters.len(),
        session.collectibles.len(),
        session.pool.created()
    );
}

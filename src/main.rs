//! Star Guard entry point
//!
//! In the browser this wires DOM events, the HUD and the animation-frame loop
//! around the simulation. Natively it plays a short headless session with an
//! autopilot, which is handy for smoke-testing the simulation and renderer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, Response, TouchEvent};

    use star_guard::platform::InputState;
    use star_guard::renderer::{MeshCanvas, RenderState, draw_world};
    use star_guard::sim::{GameEvent, PlayArea, World, tick};
    use star_guard::{AssetError, AssetSet, Settings, SpriteId};

    /// Game instance holding all state
    struct Game {
        world: World,
        input: InputState,
        area: PlayArea,
        assets: AssetSet,
        settings: Settings,
        mesh: MeshCanvas,
        render_state: Option<RenderState>,
        last_time: f64,
        /// An animation-frame chain is scheduled
        loop_active: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings, seed: u64, area: PlayArea) -> Self {
            let assets = match &settings.sprite_dir {
                Some(dir) => AssetSet::from_directory(dir),
                None => AssetSet::procedural(),
            };
            let mut world = World::new(seed, area);
            world.set_particle_budget(settings.max_particles());
            Self {
                world,
                input: InputState::new(),
                area,
                assets,
                settings,
                mesh: MeshCanvas::new(),
                render_state: None,
                last_time: 0.0,
                loop_active: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn start(&mut self) {
            self.world.start(self.area);
            self.input.reset();
            self.last_time = 0.0;
        }

        /// One tick plus one render
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input.sample();
            tick(&mut self.world, &input, self.area, dt);

            for event in self.world.drain_events() {
                if let GameEvent::GameOver { score } = event {
                    log::info!("Final score: {}", score);
                    set_start_label("Restart");
                }
            }

            self.track_fps(time);
            self.render();
            self.update_hud();
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&mut self) {
            self.mesh.clear();
            draw_world(
                &self.world,
                self.area,
                &self.assets,
                &self.settings,
                &mut self.mesh,
            );

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.mesh.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.world.score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&self.world.lives().to_string()));
            }
            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.remove_attribute("hidden");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("hidden", "");
                }
            }
        }

        /// Resize the backing store to the canvas' CSS size times the device pixel ratio
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let (area, physical) = measure_canvas(canvas);
            self.area = area;
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(physical, (area.width, area.height));
            }
            if !self.loop_active {
                self.render();
            }
        }
    }

    fn measure_canvas(canvas: &HtmlCanvasElement) -> (PlayArea, (u32, u32)) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let css_w = canvas.client_width().max(1) as f64;
        let css_h = canvas.client_height().max(1) as f64;
        let width = ((css_w * dpr).floor() as u32).max(1);
        let height = ((css_h * dpr).floor() as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (PlayArea::new(css_w as f32, css_h as f32), (width, height))
    }

    fn set_start_label(label: &str) {
        if let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("startBtn"))
        {
            btn.set_text_content(Some(label));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Star Guard starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!(
            "Settings: quality {}, particles {}, seed {}",
            settings.quality.as_str(),
            settings.max_particles(),
            seed
        );

        let (area, physical) = measure_canvas(&canvas);
        let game = Rc::new(RefCell::new(Game::new(settings, seed, area)));

        let render_state = init_renderer(&canvas, physical, area).await;
        game.borrow_mut().render_state = render_state;

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(game.clone());
        setup_resize(&canvas, game.clone());
        load_sprites(game.clone());

        // Idle frame with the pre-start overlay
        game.borrow_mut().render();
        game.borrow().update_hud();

        log::info!("Star Guard ready");
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        physical: (u32, u32),
        area: PlayArea,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
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
                log::error!("No WebGPU adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, physical, (area.width, area.height)).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard (window-wide)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if event.repeat() && star_guard::platform::is_fire_key(&key) {
                    event.prevent_default();
                    return;
                }
                let mut g = game.borrow_mut();
                if g.input.key_down(&key) || g.input.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if !g.input.key_up(&key) {
                    g.input.key_up(&event.code());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click to fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_fire();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: steer toward the touched half and fire
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let width = canvas_clone.client_width() as f32;
                    game.borrow_mut().input.touch_start(x, width);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(btn) = document.get_element_by_id("startBtn") else {
            log::warn!("No #startBtn element; the game cannot be started");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            start_session(&game);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Reset the world and make sure exactly one frame chain is running
    fn start_session(game: &Rc<RefCell<Game>>) {
        let schedule = {
            let mut g = game.borrow_mut();
            g.start();
            !std::mem::replace(&mut g.loop_active, true)
        };
        if schedule {
            request_animation_frame(game.clone());
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
        let running = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.loop_active = g.world.is_running();
            g.loop_active
        };

        if running {
            request_animation_frame(game);
        }
    }

    /// Fetch every file-backed sprite in the background
    fn load_sprites(game: Rc<RefCell<Game>>) {
        let pending = game.borrow().assets.pending();
        for (id, url) in pending {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_text(&url).await;
                let mut g = game.borrow_mut();
                install_sprite(&mut g.assets, id, result);
                if !g.loop_active {
                    g.render();
                }
            });
        }
    }

    fn install_sprite(assets: &mut AssetSet, id: SpriteId, fetched: Result<String, AssetError>) {
        let installed = fetched.and_then(|json| assets.install(id, &json));
        if let Err(e) = installed {
            assets.mark_failed(id, &e);
        }
    }

    async fn fetch_text(url: &str) -> Result<String, AssetError> {
        let fail = |reason: String| AssetError::Fetch {
            url: url.to_string(),
            reason,
        };

        let window = web_sys::window().ok_or_else(|| fail("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| fail(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| fail("not a Response".into()))?;

        if !response.ok() {
            return Err(fail(format!("HTTP {}", response.status())));
        }

        let body = response.text().map_err(|e| fail(format!("{:?}", e)))?;
        JsFuture::from(body)
            .await
            .map_err(|e| fail(format!("{:?}", e)))?
            .as_string()
            .ok_or_else(|| fail("body is not text".into()))
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use star_guard::renderer::{MeshCanvas, draw_world};
    use star_guard::sim::{GameEvent, PlayArea, TickInput, World, tick};
    use star_guard::{AssetSet, Settings};

    /// 60 fps frame step
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Default session length: two minutes of play
    pub const DEFAULT_FRAMES: u32 = 60 * 120;
    /// Horizontal slack before the autopilot fires at its target
    const AIM_TOLERANCE: f32 = 14.0;
    /// Frames between autopilot shots
    const FIRE_EVERY: u32 = 8;

    /// Steer under the lowest enemy and shoot when lined up
    fn autopilot(world: &World, frame: u32) -> TickInput {
        let Some(target) = world
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        else {
            return TickInput::default();
        };

        let dx = target.pos.x - world.player.x;
        TickInput {
            move_left: dx < -AIM_TOLERANCE,
            move_right: dx > AIM_TOLERANCE,
            fire_triggers: u32::from(dx.abs() <= AIM_TOLERANCE * 2.0 && frame % FIRE_EVERY == 0),
        }
    }

    pub fn run(settings: &Settings, seed: u64, frames: u32) {
        let area = PlayArea::new(800.0, 600.0);
        let assets = AssetSet::procedural();
        let mut world = World::new(seed, area);
        world.set_particle_budget(settings.max_particles());
        world.start(area);

        let mut canvas = MeshCanvas::new();
        let mut peak_vertices = 0;
        let mut kills = 0u32;
        let mut breaches = 0u32;
        let mut played = 0;

        for frame in 0..frames {
            let input = autopilot(&world, frame);
            tick(&mut world, &input, area, FRAME_DT);
            played = frame + 1;

            for event in world.drain_events() {
                match event {
                    GameEvent::EnemyDestroyed { .. } => kills += 1,
                    GameEvent::EnemyBreached { .. } => breaches += 1,
                    _ => {}
                }
            }

            canvas.clear();
            draw_world(&world, area, &assets, settings, &mut canvas);
            peak_vertices = peak_vertices.max(canvas.vertices().len());

            if !world.is_running() {
                break;
            }
        }

        log::info!(
            "Headless run: {} frames, phase {:?}, score {}, lives {}, {} kills, {} breaches, peak {} vertices",
            played,
            world.phase(),
            world.score(),
            world.lives(),
            kills,
            breaches,
            peak_vertices
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_guard::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Star Guard (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the web version");

    let settings = Settings::from_env();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(headless::DEFAULT_FRAMES);

    log::info!("Seed {}, {} frames", seed, frames);
    headless::run(&settings, seed, frames);
}

//! Flap Fish entry point
//!
//! On the web: wires the canvas, input and audio around the simulation and
//! runs the frame loop. Natively: runs a headless autopilot game and logs the
//! result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use flap_fish::audio::AudioManager;
    use flap_fish::controls::{self, SwipeTracker};
    use flap_fish::sim::{Intent, Simulation};
    use flap_fish::view::{self, EnergyBand, SpriteKind};
    use flap_fish::{Settings, Tuning};

    /// Source cell sizes on the sprite sheets
    const PLAYER_CELL: f64 = 200.0;
    const OBSTACLE_CELL: f64 = 120.0;

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        audio: AudioManager,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        player_image: Option<HtmlImageElement>,
        obstacle_image: Option<HtmlImageElement>,
        swipe: SwipeTracker,
        last_time: f64,
    }

    impl Game {
        fn push(&mut self, intent: Intent) {
            self.sim.push_intent(intent);
        }

        fn resize(&mut self, width: f64, height: f64) {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            if let Err(err) = self.sim.reset(width as f32, height as f32) {
                log::error!("Resize rejected: {}", err);
            }
        }

        fn frame(&mut self, time: f64) {
            let delta = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            self.sim.advance(delta as f32);
            for event in self.sim.drain_events() {
                self.audio.play(event);
            }
            self.draw();
        }

        fn draw(&self) {
            let ctx = &self.ctx;
            let width = self.sim.scaled.width as f64;
            let height = self.sim.scaled.height as f64;
            ctx.clear_rect(0.0, 0.0, width, height);

            for sprite in view::sprites(&self.sim) {
                let (image, cell) = match sprite.kind {
                    SpriteKind::Player => (&self.player_image, PLAYER_CELL),
                    SpriteKind::Obstacle => (&self.obstacle_image, OBSTACLE_CELL),
                };
                let Some(image) = image else { continue };
                let _ = ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        image,
                        sprite.frame as f64 * cell,
                        sprite.pose_index as f64 * cell,
                        cell,
                        cell,
                        sprite.x as f64,
                        sprite.y as f64,
                        sprite.width as f64,
                        sprite.height as f64,
                    );
            }

            if self.settings.show_collision_circles {
                ctx.set_stroke_style_str("white");
                for circle in view::collision_circles(&self.sim) {
                    ctx.begin_path();
                    let _ = ctx.arc(
                        circle.center.x as f64,
                        circle.center.y as f64,
                        circle.radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.stroke();
                }
            }

            self.draw_status(width, height);
        }

        fn draw_status(&self, width: f64, height: f64) {
            let ctx = &self.ctx;
            let hud = view::hud(&self.sim);
            let layout = view::layout(&self.sim);
            let small = format!("{}px impact", layout.small_font);

            ctx.save();
            ctx.set_fill_style_str("black");
            ctx.set_font(&small);
            ctx.set_text_align("right");
            let _ = ctx.fill_text(&format!("Score: {}", hud.score), width - 10.0, 30.0);
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&format!("Timer: {}", hud.timer_text), 10.0, 30.0);

            if hud.game_over {
                let large = layout.large_font as f64;
                ctx.set_text_align("center");
                ctx.set_font(&format!("{}px impact", layout.large_font));
                let _ = ctx.fill_text_with_max_width(
                    &hud.message1,
                    width * 0.5,
                    height * 0.5 - large,
                    width,
                );
                ctx.set_font(&small);
                let _ = ctx.fill_text_with_max_width(
                    &hud.message2,
                    width * 0.5,
                    height * 0.5 - layout.small_font as f64 + 20.0,
                    width,
                );
                let _ = ctx.fill_text_with_max_width(
                    "Press 'R' to try again. ",
                    width * 0.5,
                    height * 0.5 - 80.0,
                    width,
                );
            }

            match hud.energy_band {
                EnergyBand::Low => ctx.set_fill_style_str("darkorange"),
                EnergyBand::Full => ctx.set_fill_style_str("red"),
                EnergyBand::Normal => {}
            }
            let bar = layout.bar_size as f64;
            for i in 0..hud.energy {
                ctx.fill_rect(10.0, height - 10.0 - bar * i as f64, bar * 4.0, bar);
            }
            ctx.restore();
        }
    }

    fn image_by_id(document: &web_sys::Document, id: &str) -> Option<HtmlImageElement> {
        let image = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
        if image.is_none() {
            log::warn!("Sprite sheet '{}' not found, drawing without it", id);
        }
        image
    }

    fn window_size(window: &web_sys::Window) -> (f64, f64) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        (width, height)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flap Fish starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas1")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        ctx.set_line_width(1.0);

        let settings = match canvas.get_attribute("data-settings") {
            Some(json) => Settings::from_json(&json).unwrap_or_else(|err| {
                log::warn!("Ignoring data-settings: {}", err);
                Settings::default()
            }),
            None => Settings::default(),
        };

        let (width, height) = window_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let sim = Simulation::new(Tuning::default(), width as f32, height as f32, seed)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            sim,
            audio: AudioManager::new(&settings),
            settings,
            ctx,
            canvas: canvas.clone(),
            player_image: image_by_id(&document, "player_fish"),
            obstacle_image: image_by_id(&document, "smallGears"),
            swipe: SwipeTracker::default(),
            last_time: 0.0,
        }));

        setup_input_handlers(&window, &canvas, game.clone());
        request_animation_frame(game);

        log::info!("Flap Fish running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Resize is a full reset
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    let (width, height) = window_size(&window);
                    game.borrow_mut().resize(width, height);
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().push(controls::mouse_move());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().push(controls::mouse_up());
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(intent) = controls::key_down(&event.key()) {
                    game.borrow_mut().push(intent);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().push(controls::key_up(&event.key()));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: tap flaps, swipe right charges
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut().swipe.touch_start(touch.page_x() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut g = game.borrow_mut();
                    let intent = g.swipe.touch_end(touch.page_x() as f32);
                    g.push(intent);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
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

/// Native: play one game headless with a simple autopilot.
///
/// Usage: `flap-fish [seed] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use flap_fish::Tuning;
    use flap_fish::sim::{GameEvent, Simulation};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => 1,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };

    let mut sim = Simulation::new(tuning, 1280.0, 720.0, seed)?;
    log::info!("Flap Fish (native) autopilot, seed {}", seed);

    const FRAME_MS: f32 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let mut flaps = 0;
    for _ in 0..MAX_FRAMES {
        if sim.game_over {
            break;
        }
        if let Some(intent) = autopilot(&sim) {
            sim.push_intent(intent);
        }
        sim.advance(FRAME_MS);
        flaps += sim
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Flap { .. }))
            .count();
    }

    if sim.game_over {
        println!("{}", sim.message1);
        println!("{}", sim.message2);
    } else {
        println!("Out of time after {}s", flap_fish::format_seconds(sim.timer_ms));
    }
    println!("Score: {} | Flaps: {}", sim.score, flaps);
    Ok(())
}

/// Hover in the gap away from the next obstacle; charge when it is far off
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(sim: &flap_fish::sim::Simulation) -> Option<flap_fish::sim::Intent> {
    use flap_fish::sim::Intent;

    let player = sim.player.collision_circle();
    let next = sim
        .obstacles
        .iter()
        .map(|o| o.collision_circle())
        .find(|c| c.center.x + c.radius >= player.center.x - player.radius)?;

    let gap = next.center.x - player.center.x;
    let spare_energy = sim.player.energy >= sim.player.min_energy + 10;
    if gap > sim.scaled.width * 0.5 && !sim.player.charging && spare_energy {
        return Some(Intent::StartCharge);
    }

    let target_y = if next.center.y > sim.scaled.height * 0.5 {
        sim.scaled.height * 0.25
    } else {
        sim.scaled.height * 0.75
    };
    (player.center.y > target_y && sim.player.vel_y >= 0.0).then_some(Intent::Flap)
}

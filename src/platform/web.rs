//! Browser platform: canvas 2D surface, DOM HUD and keyboard wiring

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent};

use crate::consts::SIM_DT;
use crate::hud::{GameOverStats, Hud, present_hud};
use crate::renderer::{Shape, Style, Surface, TextLine, TextSize, draw_frame};
use crate::settings::Settings;
use crate::sim::{SimulationLoop, World};

/// Colors for game elements
mod colors {
    pub const BACKGROUND: &str = "#05050d";
    pub const PLAYER: &str = "#33cc66";
    pub const ENEMY: &str = "#e0413a";
    pub const PROJECTILE: &str = "#f5e663";
    pub const INDICATOR: &str = "rgba(120, 180, 255, 0.8)";
    pub const TEXT: &str = "#ffffff";
}

struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn trace(&self, points: &[glam::Vec2]) {
        self.ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(p.x as f64, p.y as f64);
            } else {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.set_fill_style_str(colors::BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_shape(&mut self, shape: &Shape) {
        match *shape {
            Shape::Triangle { points, style } => {
                self.trace(&points);
                self.ctx.close_path();
                if style == Style::Filled {
                    self.ctx.set_fill_style_str(colors::ENEMY);
                    self.ctx.fill();
                } else {
                    self.ctx.set_line_width(2.0);
                    self.ctx.set_stroke_style_str(colors::PLAYER);
                    self.ctx.stroke();
                }
            }
            Shape::Line { from, to, style } => {
                let (color, width) = match style {
                    Style::Indicator => (colors::INDICATOR, 1.0),
                    _ => (colors::PROJECTILE, 2.0),
                };
                self.trace(&[from, to]);
                self.ctx.set_line_width(width);
                self.ctx.set_stroke_style_str(color);
                self.ctx.stroke();
            }
        }
    }

    fn draw_text(&mut self, line: &TextLine) {
        let font = match line.size {
            TextSize::Title => "bold 28px monospace",
            TextSize::Body => "16px monospace",
        };
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(colors::TEXT);
        if let Err(e) = self
            .ctx
            .fill_text(&line.text, line.center.x as f64, line.center.y as f64)
        {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}

/// HUD backed by DOM text nodes
struct DomHud {
    health: Option<Element>,
    game_over: Option<Element>,
    stats: [Option<Element>; 4],
    overlay_visible: bool,
}

impl DomHud {
    fn new(document: &Document) -> Self {
        let el = |id: &str| document.get_element_by_id(id);
        Self {
            health: el("hud-health"),
            game_over: el("game-over"),
            stats: [
                el("stat-hits"),
                el("stat-time"),
                el("stat-spawned"),
                el("stat-score"),
            ],
            overlay_visible: false,
        }
    }
}

impl Hud for DomHud {
    fn set_health(&mut self, health: f32) {
        if let Some(el) = &self.health {
            el.set_text_content(Some(&health.to_string()));
        }
    }

    fn show_game_over(&mut self, stats: &GameOverStats) {
        let values = [
            stats.hits.to_string(),
            format!("{:.1}", stats.elapsed_secs),
            stats.enemies_spawned.to_string(),
            stats.score.to_string(),
        ];
        for (el, value) in self.stats.iter().zip(values) {
            if let Some(el) = el {
                el.set_text_content(Some(&value));
            }
        }
        if !self.overlay_visible {
            set_class(self.game_over.as_ref(), "");
            self.overlay_visible = true;
        }
    }

    fn hide_game_over(&mut self) {
        if self.overlay_visible {
            set_class(self.game_over.as_ref(), "hidden");
            self.overlay_visible = false;
        }
    }
}

fn set_class(el: Option<&Element>, class: &str) {
    if let Some(el) = el {
        if let Err(e) = el.set_attribute("class", class) {
            log::warn!("Failed to set class {:?}: {:?}", class, e);
        }
    }
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    window: &web_sys::Window,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    if let Err(e) = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("Failed to register {} listener: {:?}", event, e);
    }
    closure.forget();
}

/// Game instance holding all state
struct Game {
    world: World,
    sim: SimulationLoop,
    surface: CanvasSurface,
    hud: DomHud,
    last_time: f64,
}

impl Game {
    /// Run every fixed step that fits in `dt`, drawing after each
    fn update(&mut self, dt: f32) {
        // A restart triggered during these steps gets a fresh seed
        self.world.set_next_seed(js_sys::Date::now() as u64);
        self.sim.advance(&mut self.world, dt, |world, report| {
            if let Some(stats) = &report.finished {
                log::info!("Restarted after scoring {}", stats.score);
            }
            draw_frame(world, &mut self.surface);
            present_hud(world, &mut self.hud);
        });
    }
}

fn load_settings(canvas: &HtmlCanvasElement) -> Settings {
    match canvas.get_attribute("data-settings") {
        Some(json) => match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from data-settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring data-settings: {}", e);
                Settings::default().with_seed(js_sys::Date::now() as u64)
            }
        },
        None => Settings::default().with_seed(js_sys::Date::now() as u64),
    }
}

/// Boot the game on the page's `#canvas`
pub fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Delta Defense starting...");

    let window = web_sys::window().expect("no window");
    let document = window.document().expect("no document");

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .expect("no canvas")
        .dyn_into()
        .expect("not a canvas");

    let settings = load_settings(&canvas);
    canvas.set_width(settings.tuning.canvas_width as u32);
    canvas.set_height(settings.tuning.canvas_height as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .expect("no 2d context")
        .dyn_into()
        .expect("not a 2d context");

    let game = Rc::new(RefCell::new(Game {
        world: World::new(&settings),
        sim: SimulationLoop::new(SIM_DT, settings.max_substeps),
        surface: CanvasSurface { ctx },
        hud: DomHud::new(&document),
        last_time: 0.0,
    }));

    setup_input_handlers(game.clone());
    request_animation_frame(game);

    log::info!("Delta Defense running!");
}

fn setup_input_handlers(game: Rc<RefCell<Game>>) {
    let window = web_sys::window().expect("no window");

    // Key down
    {
        let game = game.clone();
        listen(&window, "keydown", move |event: KeyboardEvent| {
            if game.borrow_mut().world.input.key_down(&event.code()) {
                event.prevent_default();
            }
        });
    }

    // Key up
    {
        let game = game.clone();
        listen(&window, "keyup", move |event: KeyboardEvent| {
            game.borrow_mut().world.input.key_up(&event.code());
        });
    }

    // Window blur: key-up events are lost while unfocused
    listen(&window, "blur", move |_event: web_sys::FocusEvent| {
        game.borrow_mut().world.input.clear();
        log::info!("Input cleared (window blur)");
    });
}

fn request_animation_frame(game: Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, time);
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
    {
        let mut g = game.borrow_mut();

        // Calculate delta time
        let dt = if g.last_time > 0.0 {
            ((time - g.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        g.last_time = time;

        g.update(dt);
    }

    request_animation_frame(game);
}

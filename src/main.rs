//! Trisolaris entry point
//!
//! On the web this drives the simulation from `requestAnimationFrame` and
//! draws to a 2D canvas. Natively it runs headless and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

    use trisolaris::Settings;
    use trisolaris::render::{BodySnapshot, Renderer, css_color, css_color_alpha, display_position};
    use trisolaris::sim::{BodyRole, Command, FrameOutcome, Simulation, Viewport, tick};
    use trisolaris::ui::{StatusReport, format_years};

    const CANVAS_ID: &str = "simulationCanvas";
    const BACKGROUND: &str = "#00001a";

    /// Canvas 2D renderer
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        halos: bool,
    }

    impl CanvasRenderer {
        fn draw_body(&self, body: &BodySnapshot, viewport: &Viewport) -> Result<(), JsValue> {
            let pos = display_position(body, viewport);
            let (x, y) = (pos.x as f64, pos.y as f64);
            let r = body.radius as f64;

            if self.halos {
                let halo = body.halo_radius() as f64;
                let gradient = self.ctx.create_radial_gradient(x, y, r * 0.5, x, y, halo)?;
                let inner_alpha = match body.role {
                    BodyRole::Star => 0xCC,
                    BodyRole::Planet => 0x66,
                };
                gradient.add_color_stop(0.0, &css_color_alpha(body.color, inner_alpha))?;
                gradient.add_color_stop(1.0, &css_color_alpha(body.color, 0x00))?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
                self.ctx.begin_path();
                self.ctx.arc(x, y, halo, 0.0, TAU)?;
                self.ctx.fill();
            }

            self.ctx.set_fill_style_str(&css_color(body.color));
            self.ctx.begin_path();
            self.ctx.arc(x, y, r, 0.0, TAU)?;
            self.ctx.fill();
            Ok(())
        }
    }

    impl Renderer for CanvasRenderer {
        fn render(&mut self, bodies: &[BodySnapshot], viewport: &Viewport) {
            self.ctx.set_fill_style_str(BACKGROUND);
            self.ctx
                .fill_rect(0.0, 0.0, viewport.width() as f64, viewport.height() as f64);
            for body in bodies {
                if let Err(e) = self.draw_body(body, viewport) {
                    log::warn!("Failed to draw body {}: {:?}", body.id, e);
                }
            }
        }
    }

    /// A queued animation frame; dropping it cancels the callback
    struct AnimationFrame {
        id: i32,
    }

    impl AnimationFrame {
        /// The callback ran; nothing left to cancel
        fn fired(self) {
            std::mem::forget(self);
        }
    }

    impl Drop for AnimationFrame {
        fn drop(&mut self) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(self.id);
            }
        }
    }

    /// Host state shared by the frame loop and the button handlers
    struct Host {
        sim: Simulation,
        renderer: CanvasRenderer,
        pending: Option<AnimationFrame>,
        settings: Settings,
        document: Document,
        /// History revision last drawn into the panel
        history_drawn: Option<u64>,
    }

    impl Host {
        /// Apply a UI command; restart the loop if it replaced the system
        fn dispatch(host: &Rc<RefCell<Host>>, command: Command) {
            let replaced = {
                let mut h = host.borrow_mut();
                let replaced = h.sim.apply(command, js_sys::Date::now());
                if replaced {
                    h.pending = None;
                }
                replaced
            };
            if replaced {
                schedule_frame(host);
            }
            host.borrow_mut().update_hud();
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_style(&self, id: &str, property: &str, value: &str) {
            let el = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(el) = el {
                let _ = el.style().set_property(property, value);
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let report = StatusReport::from_simulation(&self.sim);

            self.set_text("simulationTime", &format_years(report.simulated_years));
            self.set_text(
                "surfaceTemp",
                &format!("{:.1}°C ({})", report.temperature, report.climate.as_str()),
            );
            self.set_style("tempPointer", "left", &format!("{:.1}%", report.temperature_percent));
            self.set_text(
                "lifeStatus",
                if report.life_exists { "Life present" } else { "No life" },
            );

            let era_label = report.era_label();
            self.set_text("currentEra", era_label);
            self.set_text("techLevel", era_label);
            if let Some(color) = report.era_color {
                self.set_style("currentEra", "color", &css_color(color));
            }

            self.set_style("progressFill", "width", &format!("{:.1}%", report.era_progress));
            self.set_text("progressText", &format!("{:.1}%", report.era_progress));
            self.set_text("developmentTime", &format_years(report.development_years));

            let overall = format!("{:.1}%", report.overall_progress);
            self.set_style("totalProgressFill", "width", &overall);
            self.set_text("totalProgressText", &overall);
            self.set_text("overallProgress", &overall);
            self.set_style("overallProgress", "color", &css_color(report.progress_band.color()));

            self.set_text("startBtn", if report.is_running { "Pause" } else { "Start" });
            self.set_text("fastForwardBtn", &format!("{}x", report.time_scale));

            self.set_hidden("gameHistory", !self.settings.show_history);
            if self.settings.show_history {
                self.update_history();
            }
        }

        fn update_history(&mut self) {
            let revision = self.sim.history().revision();
            if self.history_drawn == Some(revision) {
                return;
            }
            let Some(panel) = self.document.get_element_by_id("gameHistory") else {
                return;
            };
            self.history_drawn = Some(revision);
            panel.set_inner_html("");
            for entry in self.sim.history().iter() {
                if let Ok(line) = self.document.create_element("div") {
                    line.set_text_content(Some(&format!(
                        "[{}] {}",
                        format_years(entry.simulated_years),
                        entry.message
                    )));
                    let _ = panel.append_child(&line);
                }
            }
        }

        fn show_win(&self) {
            self.set_text(
                "successMessage",
                &format!(
                    "Your civilisation escaped the three-body system after {}!",
                    format_years(self.sim.clock().simulated_years)
                ),
            );
            self.set_hidden("overlay", false);
        }
    }

    fn schedule_frame(host: &Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let ticket = host.borrow().sim.schedule();
        let frame_host = Rc::clone(host);
        let closure = Closure::once(move |now: f64| {
            frame(frame_host, ticket, now);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => host.borrow_mut().pending = Some(AnimationFrame { id }),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn frame(host: Rc<RefCell<Host>>, ticket: trisolaris::sim::TickTicket, now: f64) {
        {
            let mut h = host.borrow_mut();
            let outcome = tick(&mut h.sim, ticket, now);
            if outcome.is_stale() {
                return;
            }
            if let Some(pending) = h.pending.take() {
                pending.fired();
            }

            let snapshots = h.sim.snapshots();
            let viewport = *h.sim.viewport();
            h.renderer.render(&snapshots, &viewport);
            if outcome == FrameOutcome::Evaluated {
                h.update_hud();
            }

            if h.sim.take_win_signal() {
                log::info!("Civilisation won at {:.0} years", h.sim.clock().simulated_years);
                h.show_win();
            }
        }
        schedule_frame(&host);
    }

    fn on_click(
        document: &Document,
        id: &str,
        host: &Rc<RefCell<Host>>,
        handler: fn(&Rc<RefCell<Host>>),
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            handler(&host);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, host: &Rc<RefCell<Host>>) {
        on_click(document, "randomizeBtn", host, |host| {
            Host::dispatch(host, Command::Randomize);
        });
        on_click(document, "resetBtn", host, |host| {
            Host::dispatch(host, Command::Reset);
        });
        on_click(document, "restartBtn", host, |host| {
            host.borrow().set_hidden("overlay", true);
            Host::dispatch(host, Command::RestartAfterWin);
        });
        on_click(document, "startBtn", host, |host| {
            Host::dispatch(host, Command::ToggleRun);
        });
        on_click(document, "fastForwardBtn", host, |host| {
            Host::dispatch(host, Command::CycleTimeScale);
            let mut h = host.borrow_mut();
            let index = h.sim.clock().time_scale_index();
            h.settings.time_scale_index = index;
            h.settings.save();
        });
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Trisolaris starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("canvas not found")?
            .dyn_into()?;

        let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        log::info!("Seed: {}", seed);

        let mut sim = Simulation::new(seed, viewport);
        sim.set_time_scale_index(settings.time_scale_index);

        let host = Rc::new(RefCell::new(Host {
            sim,
            renderer: CanvasRenderer {
                ctx,
                halos: !settings.reduced_motion,
            },
            pending: None,
            settings,
            document: document.clone(),
            history_drawn: None,
        }));

        setup_buttons(&document, &host);
        Host::dispatch(&host, Command::Randomize);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_host::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use trisolaris::Settings;
    use trisolaris::consts::MAX_FRAME_MS;
    use trisolaris::sim::{Command, Simulation, Viewport, tick};
    use trisolaris::ui::{StatusReport, format_years};

    env_logger::init();
    log::info!("Trisolaris (headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3600);
    log::info!("Seed {}, running {} frames", seed, frames);

    let mut sim = Simulation::new(seed, Viewport::default());
    sim.set_time_scale_index(settings.time_scale_index);
    sim.apply(Command::Randomize, 0.0);
    sim.apply(Command::ToggleRun, 0.0);

    let mut now = 0.0;
    for _ in 0..frames {
        now += MAX_FRAME_MS;
        let ticket = sim.schedule();
        tick(&mut sim, ticket, now);
        if sim.take_win_signal() {
            break;
        }
    }

    let report = StatusReport::from_simulation(&sim);
    println!("\nSeed:             {}", seed);
    println!("Simulated time:   {}", format_years(report.simulated_years));
    println!(
        "Temperature:      {:.1}°C ({})",
        report.temperature,
        report.climate.as_str()
    );
    println!("Era:              {}", report.era_name.unwrap_or("-"));
    println!("Overall progress: {:.1}%", report.overall_progress);
    if report.won {
        println!("The civilisation escaped the three-body system!");
    }

    println!("\nHistory (newest first):");
    for entry in sim.history().iter() {
        println!("  [{}] {}", format_years(entry.simulated_years), entry.message);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

//! Immediate-mode 2D canvas renderer
//!
//! Redraws the full frame from `GameState` every animation frame. Reads the
//! state and settings, never mutates either; all animation (twinkle, blink,
//! engine pulse) derives from the accumulated animation phase.

mod shapes;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::settings::Settings;
use crate::sim::state::{GamePhase, GameState};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw one complete frame
    pub fn draw(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;
        ctx.save();

        let shake = (state.shake * settings.effective_screen_shake()) as f64;
        if shake > 0.0 {
            // Deterministic jitter from the animation phase
            let t = state.anim_phase_ms as f64;
            let _ = ctx.translate((t * 0.131).sin() * shake, (t * 0.173).cos() * shake);
        }

        self.draw_background(state, settings);

        for power_up in &state.power_ups {
            shapes::draw_power_up(ctx, power_up);
        }
        for enemy in &state.enemies {
            shapes::draw_enemy(ctx, enemy);
        }
        for bullet in &state.bullets {
            shapes::draw_bullet(ctx, bullet);
        }
        if state.phase != GamePhase::GameOver {
            shapes::draw_player(ctx, &state.player, state.anim_phase_ms);
        }

        let mut particle_budget = settings.quality.max_particles;
        for explosion in &state.explosions {
            if particle_budget == 0 {
                break;
            }
            shapes::draw_explosion(ctx, explosion);
            particle_budget = particle_budget.saturating_sub(shapes::PARTICLES_PER_EXPLOSION);
        }

        for text in &state.texts {
            shapes::draw_floating_text(ctx, text);
        }

        ctx.restore();

        // Dim the frame beneath any non-playing overlay; the DOM overlay on
        // top carries the text and buttons.
        if state.phase != GamePhase::Playing {
            ctx.set_fill_style_str("rgba(10, 17, 40, 0.6)");
            ctx.fill_rect(0.0, 0.0, self.width, self.height);
        }
    }

    fn draw_background(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;

        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        let _ = gradient.add_color_stop(0.0, "#0a1128");
        let _ = gradient.add_color_stop(1.0, "#1a1a2e");
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        if settings.quality.nebula_enabled {
            self.draw_nebula(0.3 * self.width, 0.7 * self.height, 200.0, "#00b4d8");
            self.draw_nebula(0.7 * self.width, 0.3 * self.height, 150.0, "#ff6b6b");
        }

        if settings.quality.starfield_enabled {
            let phase = state.anim_phase_ms;
            ctx.set_fill_style_str("#ffffff");
            for star in &state.stars {
                let twinkle = 0.8 + (phase * 0.001 + star.twinkle_phase).sin() * 0.2;
                ctx.set_global_alpha((star.alpha * twinkle) as f64);
                ctx.fill_rect(
                    star.pos.x as f64,
                    star.pos.y as f64,
                    star.size as f64,
                    star.size as f64,
                );
            }
            ctx.set_global_alpha(1.0);
        }
    }

    fn draw_nebula(&self, x: f64, y: f64, radius: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(0.1);
        if let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius) {
            let _ = gradient.add_color_stop(0.0, color);
            let _ = gradient.add_color_stop(1.0, "transparent");
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill_rect(x - radius, y - radius, radius * 2.0, radius * 2.0);
        }
        ctx.restore();
    }
}

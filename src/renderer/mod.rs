//! Canvas2D rendering module
//!
//! Draws the whole frame back-to-front: sky gradient, drifting haze, the
//! lungs, the shield, falling entities, particles, floating texts. Pure
//! function of the world; never mutates simulation state.

mod lungs;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{EntityKind, GameWorld};

/// Canvas2D render state
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Render one frame
    pub fn draw(&self, world: &GameWorld) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);

        self.draw_background(world)?;
        lungs::draw(ctx, world.health(), world.tar(), world.game_time)?;
        self.draw_shield(world)?;
        self.draw_entities(world)?;
        self.draw_particles(world)?;
        self.draw_floating_texts(world)?;

        Ok(())
    }

    /// Sky gradient that darkens with tar, plus drifting haze blobs
    fn draw_background(&self, world: &GameWorld) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let p = (world.tar() / 100.0) as f64;
        let t = world.game_time as f64;

        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, GAME_HEIGHT as f64);
        // Polluted sky at the top, clean blue fading out below
        gradient.add_color_stop(
            0.0,
            &rgb(60.0 + p * 30.0, 60.0 + p * 20.0, 70.0 + p * 20.0),
        )?;
        gradient.add_color_stop(
            0.15,
            &rgb(80.0 + p * 40.0, 80.0 + p * 30.0, 90.0 + p * 30.0),
        )?;
        gradient.add_color_stop(
            0.4,
            &rgb(120.0 - p * 40.0, 150.0 - p * 60.0, 180.0 - p * 80.0),
        )?;
        gradient.add_color_stop(
            0.7,
            &rgb(160.0 - p * 60.0, 200.0 - p * 80.0, 230.0 - p * 100.0),
        )?;
        gradient.add_color_stop(
            1.0,
            &rgb(200.0 - p * 80.0, 220.0 - p * 90.0, 240.0 - p * 100.0),
        )?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);

        // Haze blobs scroll sideways, thicker as tar builds
        ctx.set_fill_style_str(&format!("rgba(100, 100, 100, {})", 0.1 + p * 0.2));
        for i in 0..15 {
            let fi = i as f64;
            let x = (t * 20.0 + fi * 50.0) % (GAME_WIDTH as f64 + 100.0) - 50.0;
            let y = 30.0 + (t + fi).sin() * 20.0 + fi * 15.0;
            let r = 15.0 + (t * 2.0 + fi).sin() * 5.0;
            ctx.begin_path();
            ctx.arc(x, y, r, 0.0, std::f64::consts::TAU)?;
            ctx.fill();
        }

        if world.tar() > 30.0 {
            let alpha = (world.tar() as f64 - 30.0) / 200.0;
            ctx.set_fill_style_str(&format!("rgba(20, 15, 10, {alpha})"));
            ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);
        }

        Ok(())
    }

    fn draw_shield(&self, world: &GameWorld) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let left = world.shield.left() as f64;
        let top = SHIELD_Y as f64;

        let gradient = ctx.create_linear_gradient(
            left,
            top,
            world.shield.right() as f64,
            top + SHIELD_HEIGHT as f64,
        );
        gradient.add_color_stop(0.0, "#3b82f6")?;
        gradient.add_color_stop(0.5, "#60a5fa")?;
        gradient.add_color_stop(1.0, "#3b82f6")?;

        ctx.set_shadow_color("#3b82f6");
        ctx.set_shadow_blur(20.0);
        ctx.set_fill_style_canvas_gradient(&gradient);
        rounded_rect(ctx, left, top, SHIELD_WIDTH as f64, SHIELD_HEIGHT as f64, 7.0)?;
        ctx.fill();

        ctx.set_stroke_style_str("#93c5fd");
        ctx.set_line_width(2.0);
        ctx.stroke();
        ctx.set_shadow_blur(0.0);

        Ok(())
    }

    fn draw_entities(&self, world: &GameWorld) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for entity in &world.entities {
            let (bg, border, glyph) = entity_style(entity.kind);
            let x = entity.pos.x as f64;
            let y = entity.pos.y as f64;
            let size = entity.size as f64;

            ctx.save();
            ctx.set_global_alpha(entity.opacity as f64);

            // Pickups glow
            if !entity.kind.is_hazard() {
                ctx.set_shadow_color(bg);
                ctx.set_shadow_blur(15.0);
            }

            ctx.set_fill_style_str(bg);
            ctx.begin_path();
            ctx.arc(x, y, size / 2.0, 0.0, std::f64::consts::TAU)?;
            ctx.fill();

            ctx.set_stroke_style_str(border);
            ctx.set_line_width(2.0);
            ctx.stroke();
            ctx.set_shadow_blur(0.0);

            ctx.set_font(&format!("{}px Arial", size * 0.55));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(glyph, x, y)?;

            if entity.kind == EntityKind::SmokeFast {
                ctx.set_fill_style_str("#fca5a5");
                ctx.set_font("bold 10px Arial");
                ctx.fill_text("\u{26a1}", x + size / 2.0 - 5.0, y - size / 2.0 + 5.0)?;
            }

            ctx.restore();
        }
        Ok(())
    }

    fn draw_particles(&self, world: &GameWorld) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for p in &world.particles {
            ctx.set_global_alpha(p.life as f64);
            ctx.set_fill_style_str(p.color);
            ctx.begin_path();
            ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                (p.size * p.life) as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn draw_floating_texts(&self, world: &GameWorld) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_text_align("center");
        for ft in &world.floating_texts {
            ctx.set_global_alpha(ft.life as f64);
            ctx.set_fill_style_str(ft.color);
            ctx.set_font("bold 18px Arial");
            ctx.fill_text(&ft.text, ft.pos.x as f64, ft.pos.y as f64)?;
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}

/// Fill/border colors and emoji glyph per entity kind
fn entity_style(kind: EntityKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        EntityKind::Smoke => ("#6b7280", "#9ca3af", "\u{1f4a8}"),
        EntityKind::SmokeFast => ("#ef4444", "#fca5a5", "\u{1f4a8}"),
        EntityKind::SmokeBig => ("#4b5563", "#6b7280", "\u{1f4a8}"),
        EntityKind::SmokeZigzag => ("#8b5cf6", "#a78bfa", "\u{1f4a8}"),
        EntityKind::Tar => ("#1f2937", "#374151", "\u{1f5a4}"),
        EntityKind::Cigarette => ("#ea580c", "#fb923c", "\u{1f6ac}"),
        EntityKind::FreshAir => ("#06b6d4", "#22d3ee", "\u{1f32c}\u{fe0f}"),
        EntityKind::Medicine => ("#22c55e", "#4ade80", "\u{1f48a}"),
    }
}

/// Begin a rounded-rectangle path (arcTo keeps us off newer canvas APIs)
pub(crate) fn rounded_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), JsValue> {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}

pub(crate) fn rgb(r: f64, g: f64, b: f64) -> String {
    format!(
        "rgb({}, {}, {})",
        r.clamp(0.0, 255.0).floor(),
        g.clamp(0.0, 255.0).floor(),
        b.clamp(0.0, 255.0).floor()
    )
}

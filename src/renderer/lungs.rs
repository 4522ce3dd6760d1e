//! Lung illustration
//!
//! Anatomical-ish lungs at the bottom of the field: trachea with cartilage
//! rings, bronchi, two lobed lung bodies with fissures, bronchial branches.
//! The tissue color shifts from soft pink toward gray-brown as tar builds,
//! tar spots and darkened vessels appear with damage, and healthy lungs get
//! a slow breathing glow.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{rgb, rounded_rect};
use crate::consts::{GAME_WIDTH, LUNG_Y};

const SCALE: f64 = 1.2;

pub fn draw(
    ctx: &CanvasRenderingContext2d,
    health: f32,
    tar: f32,
    game_time: f32,
) -> Result<(), JsValue> {
    let cx = GAME_WIDTH as f64 / 2.0;
    let health_factor = (health / 100.0) as f64;
    let tar_factor = (tar / 100.0) as f64;

    // Healthy = soft pink pastel, damaged = brownish gray
    let r = 245.0 - tar_factor * 140.0;
    let g = 180.0 - tar_factor * 120.0 + health_factor * 15.0;
    let b = 185.0 - tar_factor * 130.0;

    let lung = rgb(r, g, b);
    let darker = rgb(r * 0.75, g * 0.75, b * 0.75);
    let highlight = rgb(r + 25.0, g + 30.0, b + 30.0);
    let shadow = rgb(r * 0.6, g * 0.6, b * 0.6);
    let outline = format!(
        "rgba({}, {}, {}, 0.6)",
        (r * 0.5).floor(),
        (g * 0.5).floor(),
        (b * 0.5).floor()
    );

    ctx.save();

    // Trachea with cartilage rings
    let trachea_top = LUNG_Y as f64 - 50.0 * SCALE;
    let trachea_w = 14.0 * SCALE;
    let trachea_h = 45.0 * SCALE;

    ctx.set_fill_style_str(&shadow);
    rounded_rect(ctx, cx - trachea_w / 2.0 + 2.0, trachea_top + 2.0, trachea_w, trachea_h, 4.0)?;
    ctx.fill();

    let trachea_grad =
        ctx.create_linear_gradient(cx - trachea_w / 2.0, 0.0, cx + trachea_w / 2.0, 0.0);
    trachea_grad.add_color_stop(0.0, &darker)?;
    trachea_grad.add_color_stop(0.3, &lung)?;
    trachea_grad.add_color_stop(0.7, &lung)?;
    trachea_grad.add_color_stop(1.0, &darker)?;
    ctx.set_fill_style_canvas_gradient(&trachea_grad);
    rounded_rect(ctx, cx - trachea_w / 2.0, trachea_top, trachea_w, trachea_h, 4.0)?;
    ctx.fill();

    ctx.set_stroke_style_str(&darker);
    ctx.set_line_width(1.5);
    for i in 0..6 {
        let ring_y = trachea_top + 8.0 + i as f64 * 7.0 * SCALE;
        ctx.begin_path();
        ctx.move_to(cx - trachea_w / 2.0 + 2.0, ring_y);
        ctx.line_to(cx + trachea_w / 2.0 - 2.0, ring_y);
        ctx.stroke();
    }

    ctx.set_stroke_style_str(&outline);
    ctx.set_line_width(1.5);
    rounded_rect(ctx, cx - trachea_w / 2.0, trachea_top, trachea_w, trachea_h, 4.0)?;
    ctx.stroke();

    // Main bronchi Y-split
    let bronchi_y = trachea_top + trachea_h;
    ctx.set_fill_style_str(&darker);
    for side in [-1.0f64, 1.0] {
        ctx.begin_path();
        ctx.move_to(cx + side * 5.0, bronchi_y);
        ctx.quadratic_curve_to(
            cx + side * 25.0 * SCALE,
            bronchi_y + 15.0 * SCALE,
            cx + side * 40.0 * SCALE,
            bronchi_y + 20.0 * SCALE,
        );
        ctx.line_to(cx + side * 35.0 * SCALE, bronchi_y + 25.0 * SCALE);
        ctx.quadratic_curve_to(
            cx + side * 20.0 * SCALE,
            bronchi_y + 20.0 * SCALE,
            cx - side * 5.0,
            bronchi_y + 8.0,
        );
        ctx.close_path();
        ctx.fill();
    }

    let base_y = LUNG_Y as f64 + 5.0;

    // Lung bodies, left (side = -1) then right (side = 1)
    for side in [-1.0f64, 1.0] {
        // Drop shadow, right lung offsets it slightly more
        let off = if side > 0.0 { 3.0 } else { 2.0 };
        ctx.set_fill_style_str("rgba(0,0,0,0.15)");
        lung_body_path(ctx, cx, base_y, side, off);
        ctx.fill();

        let focus_x = cx + side * 55.0 * SCALE - side * 10.0;
        let grad = ctx.create_radial_gradient(
            focus_x,
            base_y + 5.0,
            5.0,
            cx + side * 55.0 * SCALE,
            base_y + 15.0,
            70.0 * SCALE,
        )?;
        grad.add_color_stop(0.0, &highlight)?;
        grad.add_color_stop(0.4, &lung)?;
        grad.add_color_stop(1.0, &darker)?;
        ctx.set_fill_style_canvas_gradient(&grad);
        lung_body_path(ctx, cx, base_y, side, 0.0);
        ctx.fill();

        // Fissures between lobes
        ctx.set_stroke_style_str(&darker);
        ctx.set_line_width(2.0);
        if side < 0.0 {
            // Oblique fissure only
            ctx.begin_path();
            ctx.move_to(cx - 45.0 * SCALE, base_y - 25.0 * SCALE);
            ctx.quadratic_curve_to(
                cx - 70.0 * SCALE,
                base_y + 15.0 * SCALE,
                cx - 35.0 * SCALE,
                base_y + 45.0 * SCALE,
            );
            ctx.stroke();
        } else {
            // Horizontal and oblique fissures
            ctx.begin_path();
            ctx.move_to(cx + 25.0 * SCALE, base_y - 5.0 * SCALE);
            ctx.quadratic_curve_to(
                cx + 60.0 * SCALE,
                base_y - 8.0 * SCALE,
                cx + 90.0 * SCALE,
                base_y - 12.0 * SCALE,
            );
            ctx.stroke();

            ctx.begin_path();
            ctx.move_to(cx + 50.0 * SCALE, base_y - 28.0 * SCALE);
            ctx.quadratic_curve_to(
                cx + 75.0 * SCALE,
                base_y + 15.0 * SCALE,
                cx + 38.0 * SCALE,
                base_y + 48.0 * SCALE,
            );
            ctx.stroke();
        }

        // Surface highlight
        ctx.set_fill_style_str("rgba(255,255,255,0.25)");
        ctx.begin_path();
        ctx.ellipse(
            cx + side * 60.0 * SCALE,
            base_y - 15.0 * SCALE,
            18.0 * SCALE,
            12.0 * SCALE,
            side * 0.4,
            0.0,
            std::f64::consts::TAU,
        )?;
        ctx.fill();

        ctx.set_stroke_style_str(&outline);
        ctx.set_line_width(2.0);
        lung_body_path(ctx, cx, base_y, side, 0.0);
        ctx.stroke();
    }

    // Bronchial tree inside the lungs
    ctx.set_stroke_style_str(&darker);
    ctx.set_line_cap("round");
    for side in [-1.0f64, 1.0] {
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(cx + side * 35.0 * SCALE, bronchi_y + 22.0 * SCALE);
        ctx.quadratic_curve_to(
            cx + side * 50.0 * SCALE,
            base_y + 5.0 * SCALE,
            cx + side * 60.0 * SCALE,
            base_y + 15.0 * SCALE,
        );
        ctx.stroke();

        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(cx + side * 45.0 * SCALE, base_y);
        ctx.quadratic_curve_to(
            cx + side * 55.0 * SCALE,
            base_y - 15.0 * SCALE,
            cx + side * 70.0 * SCALE,
            base_y - 20.0 * SCALE,
        );
        ctx.stroke();

        if side > 0.0 {
            // Middle-lobe branch on the right
            ctx.begin_path();
            ctx.move_to(cx + 50.0 * SCALE, base_y + 8.0 * SCALE);
            ctx.quadratic_curve_to(
                cx + 65.0 * SCALE,
                base_y + 5.0 * SCALE,
                cx + 80.0 * SCALE,
                base_y,
            );
            ctx.stroke();
        }

        ctx.begin_path();
        ctx.move_to(cx + side * 55.0 * SCALE, base_y + 12.0 * SCALE);
        ctx.quadratic_curve_to(
            cx + side * 65.0 * SCALE,
            base_y + 26.0 * SCALE,
            cx + side * 75.0 * SCALE,
            base_y + 36.0 * SCALE,
        );
        ctx.stroke();
    }

    // Tar spots and darkened vessels
    if tar > 15.0 {
        let spot_count = (tar / 8.0).floor() as i32;
        for i in 0..spot_count {
            let side = if i % 2 == 0 { -1.0 } else { 1.0 };
            let spot_x = cx + side * (25.0 + js_sys::Math::random() * 55.0) * SCALE;
            let spot_y = base_y + (-15.0 + js_sys::Math::random() * 50.0) * SCALE;
            let spot_size = (2.0 + js_sys::Math::random() * 4.0) * SCALE;

            let grad = ctx.create_radial_gradient(spot_x, spot_y, 0.0, spot_x, spot_y, spot_size)?;
            grad.add_color_stop(
                0.0,
                &format!("rgba(20, 15, 10, {})", 0.6 + tar_factor * 0.4),
            )?;
            grad.add_color_stop(
                0.7,
                &format!("rgba(30, 20, 15, {})", 0.4 + tar_factor * 0.3),
            )?;
            grad.add_color_stop(1.0, "rgba(40, 30, 20, 0)")?;
            ctx.set_fill_style_canvas_gradient(&grad);
            ctx.begin_path();
            ctx.arc(spot_x, spot_y, spot_size * 1.5, 0.0, std::f64::consts::TAU)?;
            ctx.fill();
        }

        if tar > 50.0 {
            ctx.set_stroke_style_str(&format!("rgba(30, 20, 15, {})", tar_factor * 0.5));
            ctx.set_line_width(1.5);
            for side in [-1.0f64, 1.0] {
                ctx.begin_path();
                ctx.move_to(cx + side * 50.0 * SCALE, base_y + 5.0 * SCALE);
                ctx.quadratic_curve_to(
                    cx + side * 60.0 * SCALE,
                    base_y + 20.0 * SCALE,
                    cx + side * 55.0 * SCALE,
                    base_y + 35.0 * SCALE,
                );
                ctx.stroke();
            }
        }
    }

    // Breathing glow while still healthy
    if health > 60.0 && tar < 40.0 {
        let breath_phase = (game_time as f64 % 3.0) / 3.0;
        let glow = (breath_phase * std::f64::consts::TAU).sin() * 0.1 + 0.1;
        ctx.set_fill_style_str(&format!("rgba(255, 200, 200, {})", glow * health_factor));
        for side in [-1.0f64, 1.0] {
            ctx.begin_path();
            ctx.ellipse(
                cx + side * 55.0 * SCALE,
                base_y + 10.0 * SCALE,
                25.0 * SCALE,
                30.0 * SCALE,
                0.0,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.fill();
        }
    }

    ctx.restore();
    Ok(())
}

/// Closed bezier path for one lung body; `side` is -1 (left) or 1 (right),
/// `off` shifts the whole path for the drop shadow.
fn lung_body_path(ctx: &CanvasRenderingContext2d, cx: f64, base_y: f64, side: f64, off: f64) {
    let s = SCALE;
    ctx.begin_path();
    ctx.move_to(cx + side * 20.0 * s + off, base_y - 18.0 * s + off);
    // Upper lobe top curve
    ctx.bezier_curve_to(
        cx + side * 32.0 * s + off,
        base_y - 38.0 * s + off,
        cx + side * 68.0 * s + off,
        base_y - 42.0 * s + off,
        cx + side * 88.0 * s + off,
        base_y - 28.0 * s + off,
    );
    // Outer edge bulge
    ctx.bezier_curve_to(
        cx + side * 102.0 * s + off,
        base_y - 8.0 * s + off,
        cx + side * 107.0 * s + off,
        base_y + 22.0 * s + off,
        cx + side * 97.0 * s + off,
        base_y + 42.0 * s + off,
    );
    // Rounded base
    ctx.bezier_curve_to(
        cx + side * 82.0 * s + off,
        base_y + 58.0 * s + off,
        cx + side * 48.0 * s + off,
        base_y + 55.0 * s + off,
        cx + side * 28.0 * s + off,
        base_y + 42.0 * s + off,
    );
    // Mediastinal curve (cardiac notch)
    ctx.bezier_curve_to(
        cx + side * 18.0 * s + off,
        base_y + 28.0 * s + off,
        cx + side * 15.0 * s + off,
        base_y + 8.0 * s + off,
        cx + side * 20.0 * s + off,
        base_y - 18.0 * s + off,
    );
    ctx.close_path();
}

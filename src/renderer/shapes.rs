//! Entity draw routines
//!
//! Each routine saves and restores the context, so callers can compose them
//! in any order.

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::state::{Bullet, Enemy, Explosion, FloatingText, Player, PowerUp, PowerUpKind};

pub const PARTICLES_PER_EXPLOSION: usize = 8;

pub fn draw_player(ctx: &CanvasRenderingContext2d, player: &Player, phase_ms: f32) {
    // Invincibility blink: visible on alternating 100 ms slices
    if player.invincible && (phase_ms / 100.0) as i64 % 2 == 1 {
        return;
    }

    let x = player.pos.x as f64;
    let y = player.pos.y as f64;
    let half_w = (PLAYER_W / 2.0) as f64;
    let half_h = (PLAYER_H / 2.0) as f64;

    ctx.save();

    // Engine flame, pulsing with the animation phase
    let flame = 8.0 + ((phase_ms * 0.02).sin() * 4.0) as f64;
    ctx.set_fill_style_str("#ff6b35");
    ctx.begin_path();
    ctx.move_to(x - 6.0, y + half_h);
    ctx.line_to(x, y + half_h + flame);
    ctx.line_to(x + 6.0, y + half_h);
    ctx.close_path();
    ctx.fill();

    // Hull
    ctx.set_fill_style_str("#00d9ff");
    ctx.begin_path();
    ctx.move_to(x, y - half_h);
    ctx.line_to(x - half_w, y + half_h);
    ctx.line_to(x + half_w, y + half_h);
    ctx.close_path();
    ctx.fill();

    // Cockpit
    ctx.set_fill_style_str("#ffffff");
    ctx.begin_path();
    let _ = ctx.arc(x, y, 6.0, 0.0, std::f64::consts::TAU);
    ctx.fill();

    // Shield ring while any invincibility window is open
    if player.invincible {
        ctx.set_stroke_style_str("#00ff88");
        ctx.set_line_width(2.0);
        ctx.set_global_alpha(0.7);
        ctx.begin_path();
        let _ = ctx.arc(x, y, half_h + 8.0, 0.0, std::f64::consts::TAU);
        ctx.stroke();
    }

    ctx.restore();
}

pub fn draw_enemy(ctx: &CanvasRenderingContext2d, enemy: &Enemy) {
    let x = enemy.pos.x as f64;
    let y = enemy.pos.y as f64;
    let half = (enemy.size / 2.0) as f64;

    ctx.save();

    // Soft glow
    ctx.set_global_alpha(0.3);
    ctx.set_fill_style_str(enemy.color);
    ctx.begin_path();
    let _ = ctx.arc(x, y, half * 1.3, 0.0, std::f64::consts::TAU);
    ctx.fill();

    // Body
    ctx.set_global_alpha(1.0);
    ctx.begin_path();
    let _ = ctx.arc(x, y, half, 0.0, std::f64::consts::TAU);
    ctx.fill();

    // Eye
    ctx.set_fill_style_str("#1a1a2e");
    ctx.begin_path();
    let _ = ctx.arc(x, y, half * 0.4, 0.0, std::f64::consts::TAU);
    ctx.fill();

    // Health pips on damaged multi-hit enemies
    if enemy.max_health > 1 && enemy.health < enemy.max_health {
        let bar_w = enemy.size as f64;
        let frac = enemy.health as f64 / enemy.max_health as f64;
        ctx.set_fill_style_str("#333333");
        ctx.fill_rect(x - bar_w / 2.0, y - half - 10.0, bar_w, 4.0);
        ctx.set_fill_style_str("#00ff00");
        ctx.fill_rect(x - bar_w / 2.0, y - half - 10.0, bar_w * frac, 4.0);
    }

    ctx.restore();
}

pub fn draw_bullet(ctx: &CanvasRenderingContext2d, bullet: &Bullet) {
    let x = bullet.pos.x as f64;
    let y = bullet.pos.y as f64;
    let w = BULLET_W as f64;
    let h = BULLET_H as f64;

    ctx.save();

    // Fading trail behind the bullet
    ctx.set_global_alpha(0.3);
    ctx.set_fill_style_str(bullet.color);
    ctx.fill_rect(x - w / 2.0, y + h / 2.0, w, h);

    ctx.set_global_alpha(1.0);
    ctx.fill_rect(x - w / 2.0, y - h / 2.0, w, h);

    ctx.restore();
}

pub fn draw_power_up(ctx: &CanvasRenderingContext2d, power_up: &PowerUp) {
    let half = (POWERUP_SIZE / 2.0) as f64;

    ctx.save();
    let _ = ctx.translate(power_up.pos.x as f64, power_up.pos.y as f64);
    let _ = ctx.rotate(power_up.rotation as f64);

    // Rotating diamond with a glyph for the kind
    ctx.set_fill_style_str(power_up.kind.color());
    ctx.set_global_alpha(0.9);
    ctx.begin_path();
    ctx.move_to(0.0, -half);
    ctx.line_to(half, 0.0);
    ctx.line_to(0.0, half);
    ctx.line_to(-half, 0.0);
    ctx.close_path();
    ctx.fill();

    let glyph = match power_up.kind {
        PowerUpKind::Health => "+",
        PowerUpKind::Power => "P",
        PowerUpKind::Shield => "S",
    };
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("bold 14px monospace");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(glyph, 0.0, 0.0);

    ctx.restore();
}

pub fn draw_explosion(ctx: &CanvasRenderingContext2d, explosion: &Explosion) {
    let x = explosion.pos.x as f64;
    let y = explosion.pos.y as f64;
    let frac = (explosion.life_ms / explosion.max_life_ms).clamp(0.0, 1.0) as f64;
    // Particles fly outward as life drains
    let spread = explosion.radius as f64 * (2.0 - frac);

    ctx.save();
    ctx.set_global_alpha(frac);
    ctx.set_fill_style_str(explosion.color);

    for i in 0..PARTICLES_PER_EXPLOSION {
        let angle = std::f64::consts::TAU * i as f64 / PARTICLES_PER_EXPLOSION as f64;
        let px = x + angle.cos() * spread;
        let py = y + angle.sin() * spread;
        ctx.begin_path();
        let _ = ctx.arc(px, py, 3.0 * frac + 1.0, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }

    // Bright core
    ctx.set_fill_style_str("#ffffff");
    ctx.begin_path();
    let _ = ctx.arc(x, y, explosion.radius as f64 * frac * 0.5, 0.0, std::f64::consts::TAU);
    ctx.fill();

    ctx.restore();
}

pub fn draw_floating_text(ctx: &CanvasRenderingContext2d, text: &FloatingText) {
    let frac = (text.life_ms / text.max_life_ms).clamp(0.0, 1.0) as f64;

    ctx.save();
    ctx.set_global_alpha(frac);
    ctx.set_fill_style_str(text.color);
    ctx.set_font("bold 18px monospace");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(&text.text, text.pos.x as f64, text.pos.y as f64);
    ctx.restore();
}

//! Canvas-2d rendering
//!
//! Pure sink: reads final entity state once per tick and paints it. No
//! return value here ever feeds back into the simulation.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::confetti::CONFETTI_COLORS;
use crate::sim::dinosaur::{DINO_COLORS, DINO_SPRITES};
use crate::sim::{GameState, Rect, Side};

const BACKGROUND: &str = "#0a0a0a";
const PLAYER_COLOR: &str = "#4ecca3";
const AI_COLOR: &str = "#e94560";
const BALL_COLOR: &str = "#fff";
const CENTER_LINE: &str = "#222";
const CALC_SHADOW: &str = "rgba(22, 33, 62, 0.3)";

/// Dinosaur sprite cell size in pixels
const CELL_W: f64 = 6.0;
const CELL_H: f64 = 10.0;

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Paint one frame from the post-tick state
    pub fn draw(&self, state: &GameState, calc: &Rect) {
        self.clear();
        self.draw_center_line();

        for paddle in [&state.player, &state.ai] {
            let color = match paddle.side {
                Side::Player => PLAYER_COLOR,
                Side::Ai => AI_COLOR,
            };
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                paddle.x as f64,
                paddle.y as f64,
                paddle.width as f64,
                paddle.height as f64,
            );
        }

        for dino in &state.dinosaurs {
            self.draw_dinosaur(dino);
        }

        for c in &state.confetti {
            self.draw_confetti(c);
        }

        self.draw_ball(state);

        // Calculator shadow so the obstacle reads as part of the field
        self.ctx.set_fill_style_str(CALC_SHADOW);
        self.ctx.fill_rect(
            calc.x as f64,
            calc.y as f64,
            calc.width as f64,
            calc.height as f64,
        );
    }

    fn clear(&self) {
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx
            .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
    }

    fn draw_center_line(&self) {
        let dash = js_sys::Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(10.0));
        let _ = self.ctx.set_line_dash(&dash);
        self.ctx.set_stroke_style_str(CENTER_LINE);
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx.move_to(FIELD_WIDTH as f64 / 2.0, 0.0);
        self.ctx
            .line_to(FIELD_WIDTH as f64 / 2.0, FIELD_HEIGHT as f64);
        self.ctx.stroke();
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
    }

    fn draw_ball(&self, state: &GameState) {
        let ball = &state.ball;
        self.ctx.set_fill_style_str(BALL_COLOR);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            ball.pos.x as f64,
            ball.pos.y as f64,
            ball.radius() as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();

        // Seam line showing the cosmetic rotation so spin is visible
        self.ctx.save();
        let _ = self.ctx.translate(ball.pos.x as f64, ball.pos.y as f64);
        let _ = self.ctx.rotate(ball.rotation as f64);
        self.ctx.set_stroke_style_str(CENTER_LINE);
        self.ctx.set_line_width(1.5);
        self.ctx.begin_path();
        self.ctx.move_to(-(ball.radius() as f64), 0.0);
        self.ctx.line_to(ball.radius() as f64, 0.0);
        self.ctx.stroke();
        self.ctx.restore();
    }

    fn draw_dinosaur(&self, dino: &crate::sim::Dinosaur) {
        self.ctx.set_fill_style_str(DINO_COLORS[dino.color]);
        let flipped = dino.vx < 0.0;
        let rows = DINO_SPRITES[dino.sprite];

        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            for (col, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let draw_x = if flipped {
                    dino.pos.x as f64 + (len - 1 - col) as f64 * CELL_W
                } else {
                    dino.pos.x as f64 + col as f64 * CELL_W
                };
                self.ctx.fill_rect(
                    draw_x,
                    dino.pos.y as f64 + row as f64 * CELL_H,
                    CELL_W,
                    CELL_H,
                );
            }
        }
    }

    fn draw_confetti(&self, c: &crate::sim::Confetti) {
        self.ctx.save();
        let _ = self.ctx.translate(c.pos.x as f64, c.pos.y as f64);
        let _ = self.ctx.rotate((c.rotation as f64).to_radians());
        self.ctx.set_fill_style_str(CONFETTI_COLORS[c.color]);
        self.ctx.set_font(&format!("bold {}px monospace", c.size));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(&c.glyph.to_string(), 0.0, 0.0);
        self.ctx.restore();
    }
}

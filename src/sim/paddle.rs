//! Paddles: one shared record, two control strategies
//!
//! The player paddle is positioned externally (pointer tracking); the AI
//! paddle runs a dead-zone proportional tracker with a per-tick random
//! reaction factor, which is what keeps it jittery and beatable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// Which side of the field a paddle defends (also its team color tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

/// How a paddle's vertical position is driven each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaddleControl {
    /// Position comes from outside via `set_y`
    Player,
    /// Reactive tracker chasing the ball's y at up to `speed` px/tick
    Reactive { speed: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub side: Side,
    pub control: PaddleControl,
}

impl Paddle {
    /// Player paddle, inset from the left edge
    pub fn player() -> Self {
        Self {
            x: PADDLE_INSET,
            y: FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            side: Side::Player,
            control: PaddleControl::Player,
        }
    }

    /// AI paddle, inset from the right edge
    pub fn ai() -> Self {
        Self {
            x: FIELD_WIDTH - PADDLE_INSET - PADDLE_WIDTH,
            y: FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            side: Side::Ai,
            control: PaddleControl::Reactive { speed: AI_SPEED },
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Request a vertical position; clamped so the paddle stays in field
    pub fn set_y(&mut self, y: f32) {
        self.y = y.clamp(0.0, FIELD_HEIGHT - self.height);
    }

    /// Advance one tick. Player-controlled paddles do nothing here; the
    /// reactive controller moves toward the ball with a dead zone, a speed
    /// cap, and a fresh random reaction factor every tick.
    pub fn update(&mut self, ball_y: f32, rng: &mut impl Rng) {
        if let PaddleControl::Reactive { speed } = self.control {
            let center = self.y + self.height / 2.0;
            let diff = ball_y - center;
            let reaction = speed * rng.random_range(0.7..1.0);

            if diff.abs() > AI_DEAD_ZONE {
                self.y += diff.signum() * reaction.min(diff.abs());
            }
            self.y = self.y.clamp(0.0, FIELD_HEIGHT - self.height);
        }
    }
}

//! Dinosaur obstacles
//!
//! Decorative sprites that wander across the field and elastically punt
//! the ball when it runs into them. Collision uses the sprite's bounding
//! box only; a hit cooldown stops one pass from deflecting the ball twice.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geom::Rect;
use crate::consts::*;

/// ASCII-block sprites; rows render as 6x10 px cells
pub const DINO_SPRITES: [&[&str]; 3] = [
    // T-Rex
    &[
        "        ██████",
        "       ██▄▄▄██",
        "       ██████",
        "█      ███",
        "██    ████████",
        "███  ██████",
        "████████████",
        " █████████",
        "  ████  ███",
        "  ██     ██",
    ],
    // Stegosaurus
    &[
        "      █   █   █",
        "     ██  ██  ██",
        "    ███████████",
        "█▄▄████████████",
        "██████████████",
        " █████████████",
        "  ███      ███",
        "  ██        ██",
    ],
    // Raptor
    &[
        "    ████",
        "   ██▄▄██",
        "   █████",
        "    ███",
        "█  ████",
        "██████████",
        " ████████",
        "  ██  ███",
        "  █    ██",
    ],
];

pub const DINO_COLORS: [&str; 6] = [
    "#ff6b6b", "#feca57", "#48dbfb", "#ff9ff3", "#54a0ff", "#5f27cd",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dinosaur {
    /// Index into `DINO_SPRITES`
    pub sprite: usize,
    /// Index into `DINO_COLORS`
    pub color: usize,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity; the sign is the travel direction
    pub vx: f32,
    /// Ticks until this dinosaur may deflect the ball again
    pub hit_cooldown: u32,
}

impl Dinosaur {
    /// Spawn flush against a random field edge, heading across
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let sprite = rng.random_range(0..DINO_SPRITES.len());
        let color = rng.random_range(0..DINO_COLORS.len());

        let rows = DINO_SPRITES[sprite];
        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0) as f32
            * 6.0;
        let height = rows.len() as f32 * 10.0;

        let going_right = rng.random_bool(0.5);
        let x = if going_right { -width } else { FIELD_WIDTH };
        let y = 30.0 + rng.random_range(0.0..(FIELD_HEIGHT - 100.0));
        let speed = rng.random_range(2.0..5.0);

        Self {
            sprite,
            color,
            pos: Vec2::new(x, y),
            width,
            height,
            vx: if going_right { speed } else { -speed },
            hit_cooldown: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn update(&mut self) {
        self.pos.x += self.vx;
        if self.hit_cooldown > 0 {
            self.hit_cooldown -= 1;
        }
    }

    /// Fully past the field edge in the travel direction, plus margin
    pub fn is_off_screen(&self) -> bool {
        (self.vx > 0.0 && self.pos.x > FIELD_WIDTH + DINO_DESPAWN_MARGIN)
            || (self.vx < 0.0 && self.pos.x < -self.width - DINO_DESPAWN_MARGIN)
    }

    /// Box-overlap test against the ball, gated by the hit cooldown
    pub fn check_ball_collision(&self, ball: &Ball) -> bool {
        if self.hit_cooldown > 0 {
            return false;
        }
        ball.rect().overlaps(&self.rect())
    }

    /// Punt the ball: keep its speed, randomize its direction, scale it up
    /// by the kick multiplier, and nudge it along the new velocity so it
    /// escapes the box immediately.
    pub fn kick_ball(&mut self, ball: &mut Ball, rng: &mut impl Rng) {
        let speed = ball.vel.length();
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        ball.vel = Vec2::from_angle(angle) * speed * DINO_KICK_MULTIPLIER;
        ball.pos += ball.vel * 2.0;
        self.hit_cooldown = DINO_HIT_COOLDOWN;
    }
}

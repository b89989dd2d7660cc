//! Confetti particles
//!
//! Ballistic glyph particles launched in an even radial spray. They fall
//! under gravity, bounce off walls and floor, get shoved around by
//! paddles, dinosaurs and the ball, and are culled once they have sat
//! still on the floor long enough.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::dinosaur::Dinosaur;
use super::geom::Rect;
use super::paddle::Paddle;
use crate::consts::*;

pub const CONFETTI_CHARS: [char; 12] =
    ['*', '#', '@', '&', '%', '+', '~', '^', '!', '$', 'o', 'x'];

pub const CONFETTI_COLORS: [&str; 7] = [
    "#ff6b6b", "#feca57", "#48dbfb", "#ff9ff3", "#54a0ff", "#4ecca3", "#e94560",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confetti {
    pub pos: Vec2,
    pub vel: Vec2,
    pub glyph: char,
    /// Index into `CONFETTI_COLORS`
    pub color: usize,
    /// Display rotation in degrees
    pub rotation: f32,
    pub rotation_speed: f32,
    pub size: f32,
    /// Consecutive ticks spent motionless on the floor. Only ever
    /// incremented; a particle that bounces away and re-settles keeps its
    /// prior count.
    pub settled: u32,
}

impl Confetti {
    /// One particle of a burst. `index`/`total` spread the burst evenly
    /// around a full circle; jitter keeps it from looking mechanical.
    pub fn burst(center: Vec2, index: usize, total: usize, rng: &mut impl Rng) -> Self {
        let angle =
            std::f32::consts::TAU * index as f32 / total as f32 + rng.random_range(0.0..0.3);
        let speed = rng.random_range(4.0..10.0);

        Self {
            pos: center,
            vel: Vec2::from_angle(angle) * speed,
            glyph: CONFETTI_CHARS[rng.random_range(0..CONFETTI_CHARS.len())],
            color: rng.random_range(0..CONFETTI_COLORS.len()),
            rotation: rng.random_range(0.0..360.0),
            rotation_speed: rng.random_range(-10.0..10.0),
            size: rng.random_range(12.0..20.0),
            settled: 0,
        }
    }

    /// Advance one tick: gravity, integration, drag, wall and floor
    /// bounces (position clamped exactly to the boundary), then the
    /// settle-counter check.
    pub fn update(&mut self) {
        self.vel.y += CONFETTI_GRAVITY;

        self.pos += self.vel;
        self.rotation += self.rotation_speed;

        self.vel.x *= CONFETTI_FRICTION;

        // Side and top walls
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x *= -CONFETTI_BOUNCE;
        }
        if self.pos.x > FIELD_WIDTH {
            self.pos.x = FIELD_WIDTH;
            self.vel.x *= -CONFETTI_BOUNCE;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y *= -CONFETTI_BOUNCE;
        }

        // Floor: lossier bounce, extra horizontal friction, and a snap to
        // rest once the residual vertical speed is negligible
        let floor = FIELD_HEIGHT - CONFETTI_FLOOR_MARGIN;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel.y *= -CONFETTI_FLOOR_BOUNCE;
            self.vel.x *= CONFETTI_FLOOR_FRICTION;
            if self.vel.y.abs() < CONFETTI_SETTLE_THRESHOLD {
                self.vel.y = 0.0;
            }
        }

        // Settling: at floor level with both components near zero
        if self.pos.y >= FIELD_HEIGHT - CONFETTI_FLOOR_MARGIN - 2.0
            && self.vel.x.abs() < 0.1
            && self.vel.y.abs() < 0.1
        {
            self.settled += 1;
        }
    }

    /// Shove the particle horizontally away from a paddle it overlaps,
    /// with a speed boost. Which half of the field the paddle sits in
    /// decides the shove direction.
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle) {
        if !paddle.rect().contains(self.pos) {
            return;
        }
        if paddle.x < FIELD_WIDTH / 2.0 {
            self.pos.x = paddle.x + paddle.width;
            self.vel.x = self.vel.x.abs() * 1.2;
        } else {
            self.pos.x = paddle.x - 5.0;
            self.vel.x = -self.vel.x.abs() * 1.2;
        }
    }

    /// Push out of a solid rectangle along the nearest face
    pub fn bounce_off_rect(&mut self, rect: &Rect) {
        if !rect.contains(self.pos) {
            return;
        }
        let from_left = self.pos.x - rect.x;
        let from_right = rect.right() - self.pos.x;
        let from_top = self.pos.y - rect.y;
        let from_bottom = rect.bottom() - self.pos.y;
        let min = from_left.min(from_right).min(from_top).min(from_bottom);

        if min == from_left {
            self.pos.x = rect.x;
            self.vel.x = -self.vel.x.abs();
        } else if min == from_right {
            self.pos.x = rect.right();
            self.vel.x = self.vel.x.abs();
        } else if min == from_top {
            self.pos.y = rect.y;
            self.vel.y = -self.vel.y.abs();
        } else {
            self.pos.y = rect.bottom();
            self.vel.y = self.vel.y.abs();
        }
    }

    /// A dinosaur underfoot launches the particle at a random angle and
    /// speed, biased upward
    pub fn kick_by_dinosaur(&mut self, dino: &Dinosaur, rng: &mut impl Rng) {
        if !dino.rect().contains(self.pos) {
            return;
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(8.0..13.0);
        self.vel = Vec2::from_angle(angle) * speed - Vec2::new(0.0, 3.0);
    }

    /// Proximity to the ball repels the particle radially and gives the
    /// ball a small reactive nudge the other way. This is the only path
    /// by which a particle feeds back into the ball.
    pub fn collide_with_ball(&mut self, ball: &mut Ball) {
        let delta = self.pos - ball.pos;
        let dist = delta.length();

        if dist < ball.radius() + 8.0 {
            let dir = if dist > 1e-4 {
                delta / dist
            } else {
                Vec2::new(1.0, 0.0)
            };
            self.vel = dir * 5.0;
            ball.vel -= dir * 0.5;
        }
    }

    /// Settled long enough to sweep away
    pub fn should_remove(&self) -> bool {
        self.settled > CONFETTI_SETTLE_TICKS
    }
}

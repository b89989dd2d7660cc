//! Ball motion and bounce resolution
//!
//! The ball carries a signed spin scalar that curves its flight through a
//! Magnus-style vertical perturbation. Spin is clamped after every
//! operation that modifies it, so no bounce sequence can run it away.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Side length of the collision box; size / 2 doubles as the radius
    pub size: f32,
    /// Signed angular-velocity proxy; curves the trajectory
    pub spin: f32,
    /// Visual rotation in radians; never feeds back into physics
    pub rotation: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            vel: Vec2::new(BALL_START_SPEED, 0.0),
            size: BALL_SIZE,
            spin: 0.0,
            rotation: 0.0,
        }
    }
}

impl Ball {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Axis-aligned bounding box (square of side `size`)
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius(),
            self.pos.y - self.radius(),
            self.size,
            self.size,
        )
    }

    /// Re-center for a serve. `direction` picks the horizontal sign of the
    /// initial velocity; the vertical start offset and velocity are random.
    pub fn reset(&mut self, direction: f32, rng: &mut impl Rng) {
        let offset = if rng.random_bool(0.5) {
            SERVE_Y_OFFSET
        } else {
            -SERVE_Y_OFFSET
        };
        self.pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0 + offset);
        self.vel = Vec2::new(
            BALL_START_SPEED * direction.signum(),
            rng.random_range(-SERVE_VY_RANGE..SERVE_VY_RANGE),
        );
        self.spin = 0.0;
        self.rotation = 0.0;
    }

    /// Advance one tick: curve, integrate, decay spin, spin the sprite,
    /// then resolve top/bottom wall contact.
    ///
    /// The Magnus term is applied before integration so this tick's
    /// displacement already curves.
    pub fn update(&mut self) {
        self.vel.y += self.spin * MAGNUS_STRENGTH;

        self.pos += self.vel;

        self.spin *= SPIN_FRICTION;
        self.rotation +=
            (self.vel.length() * 0.05 + self.spin.abs() * 0.2) * self.vel.x.signum();

        // Wall bounce (top/bottom); wall scrub bleeds off some spin
        let r = self.radius();
        if self.pos.y - r <= 0.0 || self.pos.y + r >= FIELD_HEIGHT {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(r, FIELD_HEIGHT - r);
            self.spin *= WALL_SPIN_REDUCTION;
        }
    }

    pub fn check_paddle_collision(&self, paddle: &Rect) -> bool {
        self.rect().overlaps(paddle)
    }

    /// Resolve a paddle hit. The contact offset (normalized distance from
    /// the paddle's vertical center, unclamped) drives both the imparted
    /// spin and the outgoing vertical velocity; edge contact deflects
    /// sharply. Horizontal velocity reverses and gains energy.
    pub fn bounce_off_paddle(&mut self, paddle: &Rect, paddle_height: f32) {
        let half = paddle_height / 2.0;
        let offset = (self.pos.y - (paddle.y + half)) / half;

        self.spin += offset * PADDLE_SPIN_FACTOR * self.vel.x.abs();
        self.spin = self.spin.clamp(-MAX_SPIN, MAX_SPIN);

        self.vel.x *= -PADDLE_BOUNCE_FACTOR;
        self.vel.y = offset * 6.0;

        // Reposition flush against the outgoing face so the overlap test
        // cannot re-trigger next tick
        if self.vel.x > 0.0 {
            self.pos.x = paddle.right() + self.radius();
        } else {
            self.pos.x = paddle.x - self.radius();
        }
    }

    pub fn check_rect_collision(&self, rect: &Rect) -> bool {
        self.rect().overlaps(rect)
    }

    /// Resolve contact with an arbitrary solid rectangle along the axis of
    /// minimum penetration. Horizontal resolution picks up a little spin
    /// from the vertical scrape; vertical resolution bleeds spin off like
    /// a wall contact.
    pub fn bounce_off_rect(&mut self, rect: &Rect) {
        let b = self.rect();

        let overlap_left = b.right() - rect.x;
        let overlap_right = rect.right() - b.x;
        let overlap_top = b.bottom() - rect.y;
        let overlap_bottom = rect.bottom() - b.y;

        let min_overlap = overlap_left
            .min(overlap_right)
            .min(overlap_top)
            .min(overlap_bottom);

        if min_overlap == overlap_left || min_overlap == overlap_right {
            self.vel.x *= -RECT_BOUNCE_FACTOR;
            self.pos.x += if min_overlap == overlap_left {
                -overlap_left
            } else {
                overlap_right
            };
            self.spin += self.vel.y * RECT_SPIN_FACTOR;
        } else {
            self.vel.y *= -RECT_BOUNCE_FACTOR;
            self.pos.y += if min_overlap == overlap_top {
                -overlap_top
            } else {
                overlap_bottom
            };
            self.spin *= WALL_SPIN_REDUCTION;
        }
        self.spin = self.spin.clamp(-MAX_SPIN, MAX_SPIN);
    }

    /// Ball exited past the left edge (a point for the AI)
    pub fn is_out_left(&self) -> bool {
        self.pos.x < 0.0
    }

    /// Ball exited past the right edge (a point for the player)
    pub fn is_out_right(&self) -> bool {
        self.pos.x > FIELD_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_reset_structure() {
        let mut ball = Ball::default();
        ball.spin = 0.5;
        ball.rotation = 2.0;

        ball.reset(-1.0, &mut rng());
        assert_eq!(ball.pos.x, FIELD_WIDTH / 2.0);
        assert!(ball.vel.x < 0.0);
        assert!((ball.vel.x.abs() - BALL_START_SPEED).abs() < 1e-6);
        assert!(ball.vel.y.abs() <= SERVE_VY_RANGE);
        assert_eq!(ball.spin, 0.0);
        assert_eq!(ball.rotation, 0.0);
        // Vertical start is offset from center by the fixed magnitude
        assert!((ball.pos.y - FIELD_HEIGHT / 2.0).abs() == SERVE_Y_OFFSET);
    }

    #[test]
    fn test_update_stays_in_vertical_bounds() {
        let mut ball = Ball::default();
        ball.pos.y = 5.0;
        ball.vel = Vec2::new(0.0, -10.0);
        ball.update();
        assert!(ball.pos.y >= ball.radius());
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_wall_bounce_reduces_spin() {
        let mut ball = Ball::default();
        ball.pos.y = FIELD_HEIGHT - 5.0;
        ball.vel = Vec2::new(2.0, 8.0);
        ball.spin = 1.0;
        ball.update();
        assert!(ball.spin.abs() < 1.0);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_magnus_curves_before_integration() {
        let mut a = Ball::default();
        let mut b = Ball::default();
        a.vel = Vec2::new(3.0, 0.0);
        b.vel = Vec2::new(3.0, 0.0);
        b.spin = MAX_SPIN;
        a.update();
        b.update();
        // The spinning ball displaces further down on the very same tick
        assert!(b.pos.y > a.pos.y);
    }

    #[test]
    fn test_paddle_bounce_reverses_and_scales() {
        let mut ball = Ball::default();
        let paddle = Rect::new(PADDLE_INSET, 250.0, PADDLE_WIDTH, PADDLE_HEIGHT);
        ball.pos = Vec2::new(paddle.right() + 2.0, 300.0);
        ball.vel = Vec2::new(-6.0, 0.0);

        ball.bounce_off_paddle(&paddle, PADDLE_HEIGHT);
        assert!(ball.vel.x > 0.0);
        assert!((ball.vel.x - 6.0 * PADDLE_BOUNCE_FACTOR).abs() < 1e-5);
        // Flush against the outgoing face
        assert!((ball.pos.x - (paddle.right() + ball.radius())).abs() < 1e-5);
        assert!(!ball.check_paddle_collision(&paddle));
    }

    #[test]
    fn test_paddle_edge_contact_deflects_sharply() {
        let mut ball = Ball::default();
        let paddle = Rect::new(PADDLE_INSET, 250.0, PADDLE_WIDTH, PADDLE_HEIGHT);
        // Contact at the very top edge: offset = -1
        ball.pos = Vec2::new(paddle.right(), 250.0);
        ball.vel = Vec2::new(-6.0, 1.0);

        ball.bounce_off_paddle(&paddle, PADDLE_HEIGHT);
        assert!((ball.vel.y - (-6.0)).abs() < 1e-5);
        assert!(ball.spin < 0.0);
    }

    #[test]
    fn test_rect_bounce_min_penetration_axis() {
        let rect = Rect::new(400.0, 200.0, 120.0, 180.0);
        let mut ball = Ball::default();
        // Overlapping 2px past the left face, centered vertically: the
        // left overlap is smallest by far
        ball.pos = Vec2::new(rect.x - ball.radius() + 2.0, 290.0);
        ball.vel = Vec2::new(4.0, 1.0);

        let vy_before = ball.vel.y;
        ball.bounce_off_rect(&rect);
        assert!(ball.vel.x < 0.0);
        assert!((ball.vel.x.abs() - 4.0 * RECT_BOUNCE_FACTOR).abs() < 1e-5);
        assert_eq!(ball.vel.y, vy_before);
        // Pushed back out on the left side
        assert!(ball.rect().right() <= rect.x + 1e-4);
    }

    #[test]
    fn test_rect_bounce_vertical_reduces_spin() {
        let rect = Rect::new(400.0, 200.0, 120.0, 180.0);
        let mut ball = Ball::default();
        ball.pos = Vec2::new(460.0, rect.y + 2.0);
        ball.vel = Vec2::new(0.5, 5.0);
        ball.spin = 0.8;

        ball.bounce_off_rect(&rect);
        assert!(ball.vel.y < 0.0);
        assert!((ball.spin - 0.8 * WALL_SPIN_REDUCTION).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut ball = Ball::default();
        ball.pos.x = -1.0;
        assert!(ball.is_out_left());
        assert!(!ball.is_out_right());
        ball.pos.x = FIELD_WIDTH + 1.0;
        assert!(ball.is_out_right());
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Spin magnitude never exceeds the configured maximum after a
        /// paddle bounce, for any contact offset and approach speed.
        #[test]
        fn paddle_bounce_clamps_spin(
            y in 0.0f32..FIELD_HEIGHT,
            vx in -20.0f32..-0.1,
            spin in -MAX_SPIN..MAX_SPIN,
        ) {
            let paddle = Rect::new(PADDLE_INSET, 250.0, PADDLE_WIDTH, PADDLE_HEIGHT);
            let mut ball = Ball::default();
            ball.pos = Vec2::new(paddle.right(), y);
            ball.vel = Vec2::new(vx, 0.0);
            ball.spin = spin;

            ball.bounce_off_paddle(&paddle, PADDLE_HEIGHT);
            prop_assert!(ball.spin.abs() <= MAX_SPIN);
        }

        /// Update keeps the ball inside the vertical field bounds and the
        /// spin clamp invariant, from any in-field starting state.
        #[test]
        fn update_preserves_invariants(
            y in 6.0f32..(FIELD_HEIGHT - 6.0),
            vx in -15.0f32..15.0,
            vy in -15.0f32..15.0,
            spin in -MAX_SPIN..MAX_SPIN,
        ) {
            let mut ball = Ball::default();
            ball.pos.y = y;
            ball.vel = Vec2::new(vx, vy);
            ball.spin = spin;

            ball.update();
            prop_assert!(ball.pos.y >= ball.radius() - 1e-4);
            prop_assert!(ball.pos.y <= FIELD_HEIGHT - ball.radius() + 1e-4);
            prop_assert!(ball.spin.abs() <= MAX_SPIN);
        }

        /// Rect bounce keeps spin clamped for any overlapping contact.
        #[test]
        fn rect_bounce_clamps_spin(
            dx in -5.0f32..5.0,
            dy in -5.0f32..5.0,
            vy in -12.0f32..12.0,
            spin in -MAX_SPIN..MAX_SPIN,
        ) {
            let rect = Rect::new(400.0, 200.0, 120.0, 180.0);
            let mut ball = Ball::default();
            ball.pos = rect.center() + Vec2::new(dx + 60.0, dy);
            ball.vel = Vec2::new(3.0, vy);
            ball.spin = spin;

            if ball.check_rect_collision(&rect) {
                ball.bounce_off_rect(&rect);
            }
            prop_assert!(ball.spin.abs() <= MAX_SPIN);
        }
    }
}

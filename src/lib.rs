//! Dino Pong - a Pong variant with curving shots and uninvited guests
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `history`: Bounded match history with win/loss stats
//! - `renderer`: Canvas-2d rendering (wasm only)

pub mod history;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;

pub use history::MatchHistory;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// First side to reach this score wins the match
    pub const WINNING_SCORE: u32 = 5;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Horizontal inset of each paddle from its field edge
    pub const PADDLE_INSET: f32 = 30.0;
    /// Velocity gain on every paddle bounce (deliberate rally escalation)
    pub const PADDLE_BOUNCE_FACTOR: f32 = 1.05;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 12.0;
    pub const BALL_START_SPEED: f32 = 6.0;
    /// Vertical offset magnitude from center on serve (sign is random)
    pub const SERVE_Y_OFFSET: f32 = 150.0;
    /// Serve vertical velocity is uniform in [-SERVE_VY_RANGE, SERVE_VY_RANGE]
    pub const SERVE_VY_RANGE: f32 = 2.0;

    /// Spin / Magnus curve tuning
    pub const MAX_SPIN: f32 = 1.0;
    /// Vertical velocity gained per tick per unit of spin
    pub const MAGNUS_STRENGTH: f32 = 0.06;
    /// Multiplicative spin decay per tick
    pub const SPIN_FRICTION: f32 = 0.98;
    /// Spin imparted per unit contact offset per unit of horizontal speed
    pub const PADDLE_SPIN_FACTOR: f32 = 0.12;
    /// Spin retained after a top/bottom wall contact
    pub const WALL_SPIN_REDUCTION: f32 = 0.7;
    /// Spin picked up from vertical velocity when scraping a rect edge
    pub const RECT_SPIN_FACTOR: f32 = 0.05;
    /// Velocity gain when bouncing off the obstacle-field rect
    pub const RECT_BOUNCE_FACTOR: f32 = 1.02;

    /// AI paddle tuning
    pub const AI_SPEED: f32 = 4.5;
    /// Tracking dead zone; the AI ignores errors smaller than this
    pub const AI_DEAD_ZONE: f32 = 10.0;

    /// Dinosaur obstacles
    pub const DINO_SPAWN_CHANCE: f64 = 0.006;
    pub const MAX_DINOSAURS: usize = 3;
    /// Speed magnitude at hit is multiplied by this before redirecting
    pub const DINO_KICK_MULTIPLIER: f32 = 1.3;
    /// Ticks before the same dinosaur can deflect the ball again
    pub const DINO_HIT_COOLDOWN: u32 = 30;
    /// Distance past the field edge before a dinosaur despawns
    pub const DINO_DESPAWN_MARGIN: f32 = 50.0;

    /// Confetti particles
    pub const MAX_CONFETTI: usize = 50;
    pub const CONFETTI_PER_LAUNCH: usize = 12;
    pub const CONFETTI_GRAVITY: f32 = 0.15;
    /// Horizontal air drag per tick
    pub const CONFETTI_FRICTION: f32 = 0.995;
    /// Velocity retained on a side/top wall bounce
    pub const CONFETTI_BOUNCE: f32 = 0.7;
    /// Velocity retained on a floor bounce (more lossy than walls)
    pub const CONFETTI_FLOOR_BOUNCE: f32 = 0.6;
    pub const CONFETTI_FLOOR_FRICTION: f32 = 0.8;
    /// Vertical speed below which a floor bounce snaps to rest
    pub const CONFETTI_SETTLE_THRESHOLD: f32 = 0.5;
    /// Consecutive at-rest ticks before a particle is removed (~3 s)
    pub const CONFETTI_SETTLE_TICKS: u32 = 180;
    /// Particles rest this far above the bottom edge
    pub const CONFETTI_FLOOR_MARGIN: f32 = 10.0;
}

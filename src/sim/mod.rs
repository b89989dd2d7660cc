//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one discrete step per rendered frame)
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod ball;
pub mod confetti;
pub mod dinosaur;
pub mod geom;
pub mod paddle;
pub mod tick;

pub use ball::Ball;
pub use confetti::Confetti;
pub use dinosaur::Dinosaur;
pub use geom::Rect;
pub use paddle::{Paddle, PaddleControl, Side};
pub use tick::{GameEvent, GamePhase, GameState, TickInput, tick};

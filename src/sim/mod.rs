//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one step)
//! - Seeded RNG only
//! - No rendering, input or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::{compute_ai_velocity, predict_intercept_y};
pub use collision::{
    ScoreEvent, bounce_off_paddle, check_scoring, detect_paddle_contact, reflect_off_walls,
    serve_velocity,
};
pub use state::{
    Ball, BallView, GameEvent, GamePhase, GameState, Paddle, PaddleView, Score, Side, Snapshot,
};
pub use tick::{TickInput, reset_ball, start, tick};

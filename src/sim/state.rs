//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; the renderer only
//! ever sees a [`Snapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::clamp_paddle_y;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for any key; also entered after every point
    NotStarted,
    /// Active gameplay
    Running,
}

/// Which side of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human, left paddle
    Player,
    /// Computer, right paddle
    Ai,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    WallBounce,
    PaddleHit(Side),
    Scored(Side),
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at court center, at rest
    pub fn new() -> Self {
        Self {
            pos: court_center(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }

    /// Speed magnitude (units/tick)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// A paddle. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (units/tick)
    pub dy: f32,
}

impl Paddle {
    /// Paddle vertically centered at its fixed x for `side`
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Player => PADDLE_OFFSET,
            Side::Ai => COURT_WIDTH - PADDLE_OFFSET - PADDLE_WIDTH,
        };
        Self {
            pos: Vec2::new(x, COURT_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            dy: 0.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Move by the current velocity, then clamp to the court
    pub fn advance(&mut self, court_height: f32) {
        self.pos.y = clamp_paddle_y(self.pos.y + self.dy, self.size.y, court_height);
    }
}

/// Points per side. Only ever counts up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Ai => self.ai += 1,
        }
    }
}

/// Complete game state, owned by the session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    pub player: Paddle,
    pub ai: Paddle,
    pub score: Score,
    /// Ticks spent Running
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            ball: Ball::new(),
            player: Paddle::new(Side::Player),
            ai: Paddle::new(Side::Ai),
            score: Score::default(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: BallView {
                x: self.ball.pos.x,
                y: self.ball.pos.y,
                radius: self.ball.radius,
            },
            player: PaddleView::from(&self.player),
            ai: PaddleView::from(&self.ai),
            score: self.score,
            phase: self.phase,
        }
    }
}

/// Center of the court
#[inline]
pub fn court_center() -> Vec2 {
    Vec2::new(COURT_WIDTH / 2.0, COURT_HEIGHT / 2.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            x: paddle.pos.x,
            y: paddle.pos.y,
            width: paddle.width(),
            height: paddle.height(),
        }
    }
}

/// What a renderer gets each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball: BallView,
    pub player: PaddleView,
    pub ai: PaddleView,
    pub score: Score,
    pub phase: GamePhase,
}

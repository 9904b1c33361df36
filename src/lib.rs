//! Calc Pong - the Pong game hidden inside a calculator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, AI, tick)
//! - `session`: Game lifecycle around the simulation (input queue, start, close)
//! - `input`: Keyboard to paddle-intent translation
//! - `clock`: Fixed-rate tick scheduling
//! - `renderer`: Frame output (text for native, canvas 2D for web)
//! - `settings`: Key bindings and display preferences

pub mod clock;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, TickOutcome};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_HZ: u32 = 60;
    /// Tick period in milliseconds (~16.67ms)
    pub const TICK_INTERVAL_MS: f64 = 1000.0 / TICK_HZ as f64;

    /// Court dimensions
    pub const COURT_WIDTH: f32 = 800.0;
    pub const COURT_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 60.0;
    /// Distance from the side wall to the paddle's outer edge
    pub const PADDLE_OFFSET: f32 = 50.0;
    /// Player paddle speed (units/tick)
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Speed magnitude at the start of every rally (units/tick)
    pub const INITIAL_BALL_SPEED: f32 = 5.0;

    /// AI paddle speed cap (units/tick), a step slower than the player
    pub const AI_PADDLE_SPEED: f32 = 4.0;
    /// AI holds still when its center is this close to the target
    pub const AI_DEAD_ZONE: f32 = 10.0;

    /// Maximum paddle bounce angle (60°)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Serve angle range, measured from the horizontal axis
    pub const SERVE_ANGLE_MIN: f32 = std::f32::consts::PI / 8.0;
    pub const SERVE_ANGLE_MAX: f32 = 3.0 * std::f32::consts::PI / 8.0;

    /// Pending input events held between ticks
    pub const INPUT_QUEUE_CAPACITY: usize = 32;
}

/// Clamp a paddle's top edge so the whole paddle stays on the court
#[inline]
pub fn clamp_paddle_y(y: f32, height: f32, court_height: f32) -> f32 {
    y.clamp(0.0, (court_height - height).max(0.0))
}

//! Collision detection and response
//!
//! Three bodies, all axis-aligned: two horizontal walls, two paddles and a
//! ball. Every check is O(1) and pure; the tick decides what to do with the
//! results.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Paddle, Side};
use crate::consts::*;

/// A ball left the court
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    /// Side that gets the point
    pub scorer: Side,
}

/// Invert vertical velocity if the ball's leading edge reached the top or
/// bottom wall.
///
/// Runs on the already-moved position. Only a ball heading into a wall is
/// reflected, so one still overlapping it on the next tick keeps going.
pub fn reflect_off_walls(ball: Ball, court_height: f32) -> Ball {
    let mut out = ball;
    let hit_top = ball.pos.y - ball.radius <= 0.0 && ball.vel.y < 0.0;
    let hit_bottom = ball.pos.y + ball.radius >= court_height && ball.vel.y > 0.0;
    if hit_top || hit_bottom {
        out.vel.y = -ball.vel.y;
    }
    out
}

/// Predictive contact test against one paddle.
///
/// Uses the ball's *next* x so a fast ball can't skip over the paddle within
/// a tick. The ball must also be heading toward the paddle.
pub fn detect_paddle_contact(ball: &Ball, paddle: &Paddle) -> bool {
    let next_x = ball.pos.x + ball.vel.x;
    let paddle_left = paddle.pos.x;
    let paddle_right = paddle.pos.x + paddle.width();

    let overlaps_x = next_x - ball.radius < paddle_right && next_x + ball.radius > paddle_left;
    let overlaps_y = ball.pos.y >= paddle.pos.y && ball.pos.y <= paddle.pos.y + paddle.height();

    let paddle_center_x = paddle_left + paddle.width() / 2.0;
    let approaching = (paddle_center_x - ball.pos.x) * ball.vel.x > 0.0;

    overlaps_x && overlaps_y && approaching
}

/// Angle-based bounce.
///
/// Where the ball strikes the paddle picks the outgoing angle (center is
/// flat, edges up to ±60°). Speed magnitude is kept. The ball ends flush with
/// the paddle's outer face.
pub fn bounce_off_paddle(ball: Ball, paddle: &Paddle, side: Side) -> Ball {
    let half_height = paddle.height() / 2.0;
    let rel = ((paddle.center_y() - ball.pos.y) / half_height).clamp(-1.0, 1.0);
    let bounce_angle = rel * MAX_BOUNCE_ANGLE;
    let speed = ball.speed();

    let (direction, x) = match side {
        Side::Player => (1.0, paddle.pos.x + paddle.width() + ball.radius),
        Side::Ai => (-1.0, paddle.pos.x - ball.radius),
    };

    Ball {
        pos: Vec2::new(x, ball.pos.y),
        vel: Vec2::new(
            direction * speed * bounce_angle.cos(),
            -speed * bounce_angle.sin(),
        ),
        radius: ball.radius,
    }
}

/// Has the ball's leading edge crossed a side boundary?
pub fn check_scoring(ball: &Ball, court_width: f32) -> Option<ScoreEvent> {
    if ball.pos.x + ball.radius > court_width {
        Some(ScoreEvent {
            scorer: Side::Player,
        })
    } else if ball.pos.x - ball.radius < 0.0 {
        Some(ScoreEvent { scorer: Side::Ai })
    } else {
        None
    }
}

/// Fresh serve velocity: magnitude [`INITIAL_BALL_SPEED`], angle off the
/// horizontal drawn uniformly from [π/8, 3π/8], both signs random.
pub fn serve_velocity<R: Rng>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(SERVE_ANGLE_MIN..=SERVE_ANGLE_MAX);
    let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    Vec2::new(
        sx * INITIAL_BALL_SPEED * angle.cos(),
        sy * INITIAL_BALL_SPEED * angle.sin(),
    )
}

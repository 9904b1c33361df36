//! Computer opponent
//!
//! Linear lookahead with no wall-bounce prediction, so it can be beaten by
//! steep angles.

use super::state::{Ball, Paddle};
use crate::consts::*;

/// Where the ball will be vertically when it reaches `paddle_x`, assuming a
/// straight line. Not clamped to the court.
///
/// Horizontal speed is floored at 1 so a nearly vertical ball can't blow up
/// the division.
#[inline]
pub fn predict_intercept_y(ball: &Ball, paddle_x: f32) -> f32 {
    let dx = ball.vel.x.abs().max(1.0);
    ball.pos.y + ball.vel.y * (paddle_x - ball.pos.x) / dx
}

/// Vertical velocity for the AI paddle this tick
pub fn compute_ai_velocity(ball: &Ball, ai_paddle: &Paddle, court_height: f32) -> f32 {
    let (target, max_speed) = if ball.vel.x > 0.0 {
        (predict_intercept_y(ball, ai_paddle.pos.x), AI_PADDLE_SPEED)
    } else {
        (court_height / 2.0, AI_PADDLE_SPEED / 2.0)
    };

    let diff = target - ai_paddle.center_y();
    if diff.abs() <= AI_DEAD_ZONE {
        0.0
    } else {
        diff.clamp(-max_speed, max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use glam::Vec2;

    fn ball(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            radius: BALL_RADIUS,
        }
    }

    #[test]
    fn test_prediction_linear() {
        // AI paddle at x 740, ball at 400 moving (5, 3): 340 / 5 * 3 = 204
        let paddle = Paddle::new(Side::Ai);
        assert_eq!(paddle.pos.x, 740.0);
        let b = ball(400.0, 100.0, 5.0, 3.0);
        assert!((predict_intercept_y(&b, paddle.pos.x) - 304.0).abs() < 1e-4);

        // Not clamped to the court
        let b = ball(400.0, 300.0, 5.0, 3.0);
        assert!((predict_intercept_y(&b, paddle.pos.x) - 504.0).abs() < 1e-4);
    }

    #[test]
    fn test_prediction_guards_zero_dx() {
        let b = ball(400.0, 100.0, 0.0, 2.0);
        let y = predict_intercept_y(&b, 740.0);
        assert!(y.is_finite());
        assert_eq!(y, 100.0 + 2.0 * 340.0);
    }

    #[test]
    fn test_tracks_incoming_ball() {
        let paddle = Paddle::new(Side::Ai); // center 200
        let down = ball(400.0, 100.0, 5.0, 3.0); // heads to 304
        assert_eq!(compute_ai_velocity(&down, &paddle, COURT_HEIGHT), AI_PADDLE_SPEED);

        let up = ball(400.0, 150.0, 5.0, -1.0); // heads to 82
        assert_eq!(compute_ai_velocity(&up, &paddle, COURT_HEIGHT), -AI_PADDLE_SPEED);
    }

    #[test]
    fn test_dead_zone() {
        let paddle = Paddle::new(Side::Ai);
        let b = ball(400.0, 208.0, 5.0, 0.0);
        assert_eq!(compute_ai_velocity(&b, &paddle, COURT_HEIGHT), 0.0);

        // Just outside the zone, small correction only
        let b = ball(400.0, 212.0, 5.0, 0.0);
        assert_eq!(compute_ai_velocity(&b, &paddle, COURT_HEIGHT), AI_PADDLE_SPEED);
    }

    #[test]
    fn test_drifts_home_when_ball_recedes() {
        let mut paddle = Paddle::new(Side::Ai);
        paddle.pos.y = 0.0; // center 30
        let b = ball(400.0, 10.0, -5.0, 0.0);
        assert_eq!(
            compute_ai_velocity(&b, &paddle, COURT_HEIGHT),
            AI_PADDLE_SPEED / 2.0
        );

        paddle.pos.y = 170.0;
        assert_eq!(compute_ai_velocity(&b, &paddle, COURT_HEIGHT), 0.0);
    }
}

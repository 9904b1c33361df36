//! Fixed timestep simulation tick
//!
//! Core game loop step. One call advances the game by exactly one tick; the
//! caller decides when ticks happen.

use super::ai::compute_ai_velocity;
use super::collision::{
    bounce_off_paddle, check_scoring, detect_paddle_contact, reflect_off_walls, serve_velocity,
};
use super::state::{GameEvent, GamePhase, GameState, Side, court_center};
use crate::consts::*;

/// Input for a single tick, already resolved from raw key events
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A key was pressed while waiting to start
    pub start: bool,
    /// Player paddle velocity from held keys
    pub player_dy: f32,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::NotStarted {
        // The starting key press is consumed here and moves nothing
        if input.start {
            start(state);
        }
        return;
    }

    state.time_ticks += 1;
    state.player.dy = input.player_dy;

    // Ball
    state.ball.pos += state.ball.vel;

    let before = state.ball.vel.y;
    state.ball = reflect_off_walls(state.ball, COURT_HEIGHT);
    if state.ball.vel.y != before {
        state.events.push(GameEvent::WallBounce);
    }

    // At most one paddle can be in reach on a given tick
    if detect_paddle_contact(&state.ball, &state.player) {
        state.ball = bounce_off_paddle(state.ball, &state.player, Side::Player);
        state.events.push(GameEvent::PaddleHit(Side::Player));
        log::debug!("Player return at y={:.1}", state.ball.pos.y);
    } else if detect_paddle_contact(&state.ball, &state.ai) {
        state.ball = bounce_off_paddle(state.ball, &state.ai, Side::Ai);
        state.events.push(GameEvent::PaddleHit(Side::Ai));
        log::debug!("AI return at y={:.1}", state.ball.pos.y);
    }

    if let Some(event) = check_scoring(&state.ball, COURT_WIDTH) {
        award_point(state, event.scorer);
        return;
    }

    // Paddles
    state.player.advance(COURT_HEIGHT);

    state.ai.dy = compute_ai_velocity(&state.ball, &state.ai, COURT_HEIGHT);
    state.ai.advance(COURT_HEIGHT);
}

/// Serve a fresh ball and begin play
pub fn start(state: &mut GameState) {
    reset_ball(state);
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::Started);
    log::info!("Rally started ({} - {})", state.score.player, state.score.ai);
}

/// Recenter the ball with a new random serve
pub fn reset_ball(state: &mut GameState) {
    state.ball.pos = court_center();
    state.ball.radius = BALL_RADIUS;
    state.ball.vel = serve_velocity(&mut state.rng);
}

fn award_point(state: &mut GameState, scorer: Side) {
    state.score.award(scorer);
    state.events.push(GameEvent::Scored(scorer));
    state.phase = GamePhase::NotStarted;
    state.player.dy = 0.0;
    state.ai.dy = 0.0;
    reset_ball(state);
    log::info!(
        "{:?} scores: {} - {}",
        scorer,
        state.score.player,
        state.score.ai
    );
}

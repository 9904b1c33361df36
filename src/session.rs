//! Game session: the simulation plus its lifecycle
//!
//! A session owns the game state exclusively. Input handlers only push
//! events; the queue is drained at the start of each tick so input is never
//! observed mid-step.

use crate::consts::INPUT_QUEUE_CAPACITY;
use crate::input::{InputEvent, InputQueue, PaddleControls};
use crate::renderer::Renderer;
use crate::sim::{GamePhase, GameState, Snapshot, TickInput, tick};

/// What happened on a call to [`Session::run_tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Simulation advanced and a frame was drawn
    Stepped,
    /// No surface to draw on; nothing changed
    Skipped,
    /// Session is torn down
    Closed,
}

/// One mounted game
#[derive(Debug)]
pub struct Session {
    state: GameState,
    queue: InputQueue,
    controls: PaddleControls,
    closed: bool,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        log::info!("Game session created with seed: {}", seed);
        Self {
            state: GameState::new(seed),
            queue: InputQueue::with_capacity(INPUT_QUEUE_CAPACITY),
            controls: PaddleControls::new(),
            closed: false,
        }
    }

    /// Queue an input event for the next tick
    pub fn push(&mut self, event: InputEvent) {
        if self.closed {
            return;
        }
        self.queue.push(event);
    }

    /// Run one tick: apply queued input, step, draw.
    ///
    /// Without a surface (view mid-teardown) the tick is skipped entirely and
    /// queued input waits for the next one.
    pub fn run_tick(&mut self, surface: Option<&mut dyn Renderer>) -> TickOutcome {
        if self.closed {
            return TickOutcome::Closed;
        }
        let Some(surface) = surface else {
            return TickOutcome::Skipped;
        };

        let waiting = self.state.phase == GamePhase::NotStarted;
        let mut start = false;
        let mut close = false;
        for event in self.queue.drain() {
            if event == InputEvent::Close {
                close = true;
                break;
            }
            if waiting && event.is_press() {
                // Starts the game; a held paddle key takes effect next tick
                start = true;
            }
            self.controls.apply(event);
        }
        if close {
            self.close();
            return TickOutcome::Closed;
        }

        let input = TickInput {
            start,
            player_dy: self.controls.dy(),
        };
        tick(&mut self.state, &input);

        surface.draw(&self.state.snapshot());
        TickOutcome::Stepped
    }

    /// Tear down. No tick runs after this.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.queue.clear();
        self.controls.release_all();
        log::info!(
            "Game closed at {} - {} after {} ticks ({} input events dropped)",
            self.state.score.player,
            self.state.score.ai,
            self.state.time_ticks,
            self.queue.dropped()
        );
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current frame for a renderer
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Side;
    use glam::Vec2;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Snapshot>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &Snapshot) {
            self.frames.push(*frame);
        }
    }

    fn started(seed: u64, r: &mut Recorder) -> Session {
        let mut session = Session::new(seed);
        session.push(InputEvent::StartOrResume);
        assert_eq!(session.run_tick(Some(r)), TickOutcome::Stepped);
        assert_eq!(session.state().phase, GamePhase::Running);
        session
    }

    #[test]
    fn test_idle_ticks_change_nothing() {
        let mut r = Recorder::default();
        let mut session = Session::new(1);
        let before = session.snapshot();
        for _ in 0..30 {
            session.run_tick(Some(&mut r));
        }
        assert_eq!(r.frames.len(), 30);
        assert!(r.frames.iter().all(|f| *f == before));
        assert_eq!(before.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_start_key_is_swallowed() {
        let mut r = Recorder::default();
        let mut session = Session::new(2);
        let y = session.state().player.pos.y;

        session.push(InputEvent::PaddleUp(true));
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().phase, GamePhase::Running);
        assert_eq!(session.state().player.pos.y, y);

        // Still held: moves from the next tick on
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().player.pos.y, y - PADDLE_SPEED);

        session.push(InputEvent::PaddleUp(false));
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().player.pos.y, y - PADDLE_SPEED);
    }

    #[test]
    fn test_held_start_key_keeps_moving_paddle() {
        let mut r = Recorder::default();
        let mut session = Session::new(8);
        let y = session.state().player.pos.y;

        session.push(InputEvent::PaddleDown(true));
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().player.pos.y, y);

        for _ in 0..10 {
            session.run_tick(Some(&mut r));
        }
        assert_eq!(session.state().player.pos.y, y + 10.0 * PADDLE_SPEED);
    }

    #[test]
    fn test_release_while_waiting_is_applied() {
        let mut r = Recorder::default();
        let mut session = started(3, &mut r);
        session.push(InputEvent::PaddleDown(true));
        session.run_tick(Some(&mut r));

        // Force a point, then release during the pause
        session.state_mut().ball.pos = Vec2::new(795.0, 200.0);
        session.state_mut().ball.vel = Vec2::new(5.0, 0.0);
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().phase, GamePhase::NotStarted);

        session.push(InputEvent::PaddleDown(false));
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().phase, GamePhase::NotStarted);

        session.push(InputEvent::StartOrResume);
        session.run_tick(Some(&mut r));
        let y = session.state().player.pos.y;
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().player.pos.y, y);
    }

    #[test]
    fn test_player_point_end_to_end() {
        let mut r = Recorder::default();
        let mut session = started(4, &mut r);
        session.state_mut().ball.pos = Vec2::new(795.0, 200.0);
        session.state_mut().ball.vel = Vec2::new(5.0, 0.0);

        assert_eq!(session.run_tick(Some(&mut r)), TickOutcome::Stepped);

        let frame = r.frames.last().copied().unwrap();
        assert_eq!(frame.score.player, 1);
        assert_eq!(frame.score.ai, 0);
        assert_eq!(frame.phase, GamePhase::NotStarted);
        assert_eq!((frame.ball.x, frame.ball.y), (400.0, 200.0));
        assert_eq!(
            session.state().events,
            vec![crate::sim::GameEvent::Scored(Side::Player)]
        );
    }

    #[test]
    fn test_missing_surface_skips() {
        let mut r = Recorder::default();
        let mut session = started(5, &mut r);
        let before = session.state().clone();
        let before_ball = before.ball;

        session.push(InputEvent::PaddleDown(true));
        assert_eq!(session.run_tick(None), TickOutcome::Skipped);
        assert_eq!(session.state().ball, before_ball);
        assert_eq!(session.state().time_ticks, before.time_ticks);

        // Input is still there once the surface comes back
        let y = session.state().player.pos.y;
        session.run_tick(Some(&mut r));
        assert_eq!(session.state().player.pos.y, y + PADDLE_SPEED);
    }

    #[test]
    fn test_close_stops_ticks() {
        let mut r = Recorder::default();
        let mut session = started(6, &mut r);
        session.push(InputEvent::PaddleUp(true));
        session.push(InputEvent::Close);
        session.push(InputEvent::PaddleDown(true));

        let frames = r.frames.len();
        let ball = session.state().ball;
        assert_eq!(session.run_tick(Some(&mut r)), TickOutcome::Closed);
        assert!(session.is_closed());
        assert_eq!(session.run_tick(Some(&mut r)), TickOutcome::Closed);
        assert_eq!(r.frames.len(), frames);
        assert_eq!(session.state().ball, ball);

        // Pushing after close is ignored
        session.push(InputEvent::StartOrResume);
        assert_eq!(session.run_tick(Some(&mut r)), TickOutcome::Closed);
    }

    #[test]
    fn test_close_while_waiting() {
        let mut r = Recorder::default();
        let mut session = Session::new(7);
        session.push(InputEvent::Close);
        assert_eq!(session.run_tick(Some(&mut r)), TickOutcome::Closed);
        assert_eq!(session.state().phase, GamePhase::NotStarted);
        assert!(r.frames.is_empty());
    }

    proptest! {
        #[test]
        fn prop_snapshot_paddles_on_court(
            seed in any::<u64>(),
            keys in proptest::collection::vec((0u8..3, any::<bool>()), 1..300),
        ) {
            let mut r = Recorder::default();
            let mut session = Session::new(seed);
            for (key, pressed) in keys {
                let event = match key {
                    0 => InputEvent::PaddleUp(pressed),
                    1 => InputEvent::PaddleDown(pressed),
                    _ => InputEvent::StartOrResume,
                };
                session.push(event);
                session.run_tick(Some(&mut r));
            }
            for frame in &r.frames {
                for paddle in [frame.player, frame.ai] {
                    prop_assert!(paddle.y >= 0.0);
                    prop_assert!(paddle.y <= COURT_HEIGHT - PADDLE_HEIGHT);
                }
            }
        }
    }
}

//! Keyboard input handling
//!
//! Raw key names (as reported by `KeyboardEvent.key`) go in, paddle intents
//! and lifecycle signals come out. Nothing here touches the game state
//! directly; events are queued and the session applies them at tick start.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_SPEED;

/// A game-level input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PaddleUp(bool),
    PaddleDown(bool),
    /// Any other key press
    StartOrResume,
    /// Leave the game
    Close,
}

impl InputEvent {
    /// Key presses start the game; releases never do
    pub fn is_press(&self) -> bool {
        match self {
            InputEvent::PaddleUp(pressed) | InputEvent::PaddleDown(pressed) => *pressed,
            InputEvent::StartOrResume | InputEvent::Close => true,
        }
    }
}

/// Modifier keys on their own never count as "any key"
const MODIFIER_KEYS: [&str; 5] = ["Meta", "Control", "Alt", "Shift", "OS"];

/// Key names for each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub close: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: vec!["ArrowUp".into(), "w".into(), "W".into()],
            down: vec!["ArrowDown".into(), "s".into(), "S".into()],
            close: vec!["Escape".into()],
        }
    }
}

impl KeyBindings {
    /// Map a key press/release to a game event
    pub fn translate(&self, key: &str, pressed: bool) -> Option<InputEvent> {
        let bound = |keys: &[String]| keys.iter().any(|k| k == key);

        if bound(&self.up) {
            Some(InputEvent::PaddleUp(pressed))
        } else if bound(&self.down) {
            Some(InputEvent::PaddleDown(pressed))
        } else if !pressed || MODIFIER_KEYS.contains(&key) {
            None
        } else if bound(&self.close) {
            Some(InputEvent::Close)
        } else {
            Some(InputEvent::StartOrResume)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Held-key state for the player paddle
#[derive(Debug, Clone, Default)]
pub struct PaddleControls {
    up: bool,
    down: bool,
    /// Most recent press, wins while both are held
    last: Option<Direction>,
}

impl PaddleControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a paddle event. Other events are ignored.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PaddleUp(pressed) => {
                self.up = pressed;
                if pressed {
                    self.last = Some(Direction::Up);
                }
            }
            InputEvent::PaddleDown(pressed) => {
                self.down = pressed;
                if pressed {
                    self.last = Some(Direction::Down);
                }
            }
            InputEvent::StartOrResume | InputEvent::Close => {}
        }
    }

    /// Forget all held keys
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Player paddle velocity for the held keys
    pub fn dy(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -PADDLE_SPEED,
            (false, true) => PADDLE_SPEED,
            (true, true) => match self.last {
                Some(Direction::Down) => PADDLE_SPEED,
                _ => -PADDLE_SPEED,
            },
            (false, false) => 0.0,
        }
    }
}

/// Bounded FIFO of events waiting for the next tick
#[derive(Debug)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
    dropped: u64,
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    /// Enqueue an event, dropping the oldest if full
    pub fn push(&mut self, event: InputEvent) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
            self.dropped += 1;
            log::warn!("Input queue full, dropped oldest event ({} total)", self.dropped);
        }
        self.events.push_back(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events lost to overflow since creation
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Detects the Meta+1 shortcut that shows and hides the game
#[derive(Debug, Clone, Default)]
pub struct SecretCombo {
    meta_held: bool,
}

impl SecretCombo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key event; true when the game view should toggle
    pub fn on_key(&mut self, key: &str, pressed: bool) -> bool {
        if key == "Meta" {
            self.meta_held = pressed;
            return false;
        }
        pressed && self.meta_held && key == "1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_defaults() {
        let keys = KeyBindings::default();
        assert_eq!(keys.translate("ArrowUp", true), Some(InputEvent::PaddleUp(true)));
        assert_eq!(keys.translate("ArrowUp", false), Some(InputEvent::PaddleUp(false)));
        assert_eq!(keys.translate("s", true), Some(InputEvent::PaddleDown(true)));
        assert_eq!(keys.translate("Escape", true), Some(InputEvent::Close));
        assert_eq!(keys.translate("Escape", false), None);
        assert_eq!(keys.translate("x", true), Some(InputEvent::StartOrResume));
        assert_eq!(keys.translate("x", false), None);
        assert_eq!(keys.translate("Meta", true), None);
        assert_eq!(keys.translate("Shift", true), None);
    }

    #[test]
    fn test_custom_bindings() {
        let keys = KeyBindings {
            up: vec!["i".into()],
            down: vec!["k".into()],
            close: vec!["q".into()],
        };
        assert_eq!(keys.translate("i", true), Some(InputEvent::PaddleUp(true)));
        assert_eq!(keys.translate("q", true), Some(InputEvent::Close));
        assert_eq!(keys.translate("ArrowUp", true), Some(InputEvent::StartOrResume));
    }

    #[test]
    fn test_controls_single_key() {
        let mut c = PaddleControls::new();
        assert_eq!(c.dy(), 0.0);
        c.apply(InputEvent::PaddleUp(true));
        assert_eq!(c.dy(), -PADDLE_SPEED);
        c.apply(InputEvent::PaddleUp(false));
        assert_eq!(c.dy(), 0.0);
        c.apply(InputEvent::PaddleDown(true));
        assert_eq!(c.dy(), PADDLE_SPEED);
    }

    #[test]
    fn test_controls_both_held() {
        let mut c = PaddleControls::new();
        c.apply(InputEvent::PaddleUp(true));
        c.apply(InputEvent::PaddleDown(true));
        assert_eq!(c.dy(), PADDLE_SPEED);

        // Releasing the newer key falls back to the one still held
        c.apply(InputEvent::PaddleDown(false));
        assert_eq!(c.dy(), -PADDLE_SPEED);

        c.release_all();
        assert_eq!(c.dy(), 0.0);
    }

    #[test]
    fn test_queue_drops_oldest() {
        let mut q = InputQueue::with_capacity(2);
        q.push(InputEvent::PaddleUp(true));
        q.push(InputEvent::PaddleUp(false));
        q.push(InputEvent::Close);
        assert_eq!(q.dropped(), 1);

        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained, vec![InputEvent::PaddleUp(false), InputEvent::Close]);
        assert_eq!(q.drain().count(), 0);
    }

    #[test]
    fn test_secret_combo() {
        let mut combo = SecretCombo::new();
        assert!(!combo.on_key("1", true));
        assert!(!combo.on_key("Meta", true));
        assert!(combo.on_key("1", true));
        assert!(!combo.on_key("1", false));
        assert!(!combo.on_key("Meta", false));
        assert!(!combo.on_key("1", true));
    }

    #[test]
    fn test_is_press() {
        assert!(InputEvent::PaddleDown(true).is_press());
        assert!(!InputEvent::PaddleDown(false).is_press());
        assert!(InputEvent::StartOrResume.is_press());
    }
}

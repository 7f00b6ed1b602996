// Input handling - per-key trigger policy
//
// Terminals differ in whether they deliver key release events, so raw press
// events can fire many times per physical press. Action keys (Enter, Tab,
// letters) must trigger once per press; navigation keys (arrows, paging)
// should repeat while held after a short delay.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Debounce window for action keys on terminals without release events
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// How a key behaves while held
#[derive(Debug, Clone, Copy)]
enum KeyBehavior {
    /// Trigger once per press
    Action,
    /// Trigger on press, then repeat after a delay
    Repeat {
        initial_delay: Duration,
        interval: Duration,
    },
}

/// Behavior assignment for every key the app reacts to
fn behavior_for(key: KeyCode) -> KeyBehavior {
    match key {
        // Viewport scrolling and selection movement repeat while held
        KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
            KeyBehavior::Repeat {
                initial_delay: Duration::from_millis(500),
                interval: Duration::from_millis(50),
            }
        }
        // Paging repeats faster
        KeyCode::PageUp | KeyCode::PageDown => KeyBehavior::Repeat {
            initial_delay: Duration::from_millis(300),
            interval: Duration::from_millis(30),
        },
        // Everything else is a discrete action
        _ => KeyBehavior::Action,
    }
}

#[derive(Debug)]
struct KeyState {
    is_pressed: bool,
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

impl KeyState {
    fn new() -> Self {
        Self {
            is_pressed: false,
            press_started: None,
            last_triggered: None,
        }
    }
}

/// Tracks key hold state and decides when a press should trigger its action
#[derive(Default)]
pub struct InputHandler {
    states: HashMap<KeyCode, KeyState>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a press event; returns true if the bound action should run
    pub fn key_pressed(&mut self, key: KeyCode) -> bool {
        let now = Instant::now();
        let state = self.states.entry(key).or_insert_with(KeyState::new);

        if !state.is_pressed {
            state.is_pressed = true;
            state.press_started = Some(now);
            state.last_triggered = Some(now);
            return true;
        }

        // Key is held (or the terminal never sent a release)
        match behavior_for(key) {
            KeyBehavior::Action => match state.last_triggered {
                Some(last) if now.duration_since(last) >= ACTION_DEBOUNCE => {
                    state.last_triggered = Some(now);
                    true
                }
                _ => false,
            },
            KeyBehavior::Repeat {
                initial_delay,
                interval,
            } => {
                let (Some(started), Some(last)) = (state.press_started, state.last_triggered)
                else {
                    return false;
                };
                if now.duration_since(started) >= initial_delay
                    && now.duration_since(last) >= interval
                {
                    state.last_triggered = Some(now);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Handle a release event
    pub fn key_released(&mut self, key: KeyCode) {
        if let Some(state) = self.states.get_mut(&key) {
            *state = KeyState::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn action_key_triggers_once_per_press() {
        let mut input = InputHandler::new();

        assert!(input.key_pressed(KeyCode::Enter));
        assert!(!input.key_pressed(KeyCode::Enter));
        assert!(!input.key_pressed(KeyCode::Enter));

        input.key_released(KeyCode::Enter);
        assert!(input.key_pressed(KeyCode::Enter));
    }

    #[test]
    fn repeat_key_waits_for_initial_delay() {
        let mut input = InputHandler::new();

        assert!(input.key_pressed(KeyCode::Down));
        assert!(!input.key_pressed(KeyCode::Down));

        thread::sleep(Duration::from_millis(510));
        assert!(input.key_pressed(KeyCode::Down));

        // Within the repeat interval: no trigger yet
        assert!(!input.key_pressed(KeyCode::Down));
        thread::sleep(Duration::from_millis(60));
        assert!(input.key_pressed(KeyCode::Down));
    }

    #[test]
    fn independent_keys_do_not_interfere() {
        let mut input = InputHandler::new();
        assert!(input.key_pressed(KeyCode::Char('e')));
        assert!(input.key_pressed(KeyCode::Char('t')));
        assert!(!input.key_pressed(KeyCode::Char('e')));
    }
}

//! Platform abstraction layer
//!
//! Maps host input to simulation signals and turns events into the short
//! notification text the toast layer shows.

use crate::sim::{GameEvent, Signal};

/// Keys that count as the activate signal (`KeyboardEvent.code`)
pub const ACTIVATE_KEYS: [&str; 2] = ["Space", "ArrowUp"];

/// Key that toggles the autopilot
pub const AUTOPILOT_KEY: &str = "KeyI";

pub fn is_activate_key(code: &str) -> bool {
    ACTIVATE_KEYS.contains(&code)
}

/// Translate a key press into a signal, if it maps to one
pub fn key_signal(code: &str) -> Option<Signal> {
    is_activate_key(code).then_some(Signal::Activate)
}

/// Toast title and body for an event. `None` for events with no toast.
pub fn notification(event: &GameEvent) -> Option<(&'static str, String)> {
    match event {
        GameEvent::SessionStarted => None,
        GameEvent::HighScoreReached { score } => Some((
            "New High Score!",
            format!("You've reached {} points!", score),
        )),
        GameEvent::GameOver { final_score } => {
            Some(("Game Over", format!("Your score: {}", final_score)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_keys() {
        assert!(is_activate_key("Space"));
        assert!(is_activate_key("ArrowUp"));
        assert!(!is_activate_key("KeyA"));
        assert_eq!(key_signal("Space"), Some(Signal::Activate));
        assert_eq!(key_signal(AUTOPILOT_KEY), None);
    }

    #[test]
    fn test_notification_text() {
        assert_eq!(notification(&GameEvent::SessionStarted), None);
        let (title, body) = notification(&GameEvent::GameOver { final_score: 12 }).unwrap();
        assert_eq!(title, "Game Over");
        assert_eq!(body, "Your score: 12");
        let (title, _) = notification(&GameEvent::HighScoreReached { score: 3 }).unwrap();
        assert_eq!(title, "New High Score!");
    }
}

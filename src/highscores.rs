//! Best score across sessions
//!
//! Kept in memory for the lifetime of the process; never written to storage.

/// Process-wide high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    /// Best score seen so far (monotone non-decreasing)
    pub best: u32,
    /// Sessions that have ended
    pub sessions_played: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the best score if `score` beats it. Returns true on a strict improvement.
    pub fn offer(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Record the end of a session with its final score
    pub fn finish_session(&mut self, final_score: u32) -> bool {
        self.sessions_played += 1;
        self.offer(final_score)
    }
}

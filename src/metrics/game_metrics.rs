use std::time::{Duration, Instant};

use crate::game::Phase;

/// Session statistics shown on the HUD, surviving across runs.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold the ending run into the session stats and start timing anew.
    ///
    /// The high score absorbs a final score only when the run actually
    /// ended; abandoning a run mid-play discards its score and does not
    /// count as a game played.
    pub fn on_restart(&mut self, ended_phase: Phase, final_score: u32) {
        if ended_phase == Phase::GameOver {
            self.games_played += 1;
            if final_score > self.high_score {
                self.high_score = final_score;
            }
        }
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

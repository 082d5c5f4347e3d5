use crate::messages::MessageLog;

/// Win/loss tally for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub wins: u32,
    pub losses: u32,
}

impl GameRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Percentage of battles won, 0 when none were fought.
    pub fn win_rate(&self) -> f64 {
        match self.total_games() {
            0 => 0.0,
            total => self.wins as f64 / total as f64 * 100.0,
        }
    }

    pub fn summary_messages(&self, log: &mut MessageLog) {
        log.info(format!("Total Wins: {}", self.wins));
        log.info(format!("Total Losses: {}", self.losses));
        log.info(format!("Total Games: {}", self.total_games()));
        log.info(format!("Win Rate: {:.2}%", self.win_rate()));
    }
}

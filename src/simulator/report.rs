//! Simulation report generation.

use std::collections::BTreeMap;

/// Outcome of one simulated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub survived: bool,
    pub encounters: u32,
    pub wins: u32,
    pub losses: u32,
    pub final_level: u32,
    pub final_gold: u32,
    pub final_potions: u32,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub survivors: u32,
    pub deaths: u32,

    pub total_wins: u64,
    pub total_losses: u64,

    pub avg_final_level: f64,
    pub avg_final_gold: f64,
    pub avg_encounters: f64,
    pub max_level: u32,

    pub level_distribution: BTreeMap<u32, u32>,

    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;

        let survivors = runs.iter().filter(|r| r.survived).count() as u32;
        let total_wins = runs.iter().map(|r| r.wins as u64).sum();
        let total_losses = runs.iter().map(|r| r.losses as u64).sum();

        let avg_final_level = runs.iter().map(|r| r.final_level as f64).sum::<f64>() / divisor;
        let avg_final_gold = runs.iter().map(|r| r.final_gold as f64).sum::<f64>() / divisor;
        let avg_encounters = runs.iter().map(|r| r.encounters as f64).sum::<f64>() / divisor;
        let max_level = runs.iter().map(|r| r.final_level).max().unwrap_or(0);

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            num_runs,
            survivors,
            deaths: num_runs - survivors,
            total_wins,
            total_losses,
            avg_final_level,
            avg_final_gold,
            avg_encounters,
            max_level,
            level_distribution,
            run_stats: runs,
        }
    }

    /// Percentage of all battles won across every run.
    pub fn battle_win_rate(&self) -> f64 {
        let total = self.total_wins + self.total_losses;
        if total == 0 {
            0.0
        } else {
            self.total_wins as f64 / total as f64 * 100.0
        }
    }

    pub fn survival_rate(&self) -> f64 {
        if self.num_runs == 0 {
            0.0
        } else {
            self.survivors as f64 / self.num_runs as f64 * 100.0
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} survived, {} died\n\n",
            self.num_runs, self.survivors, self.deaths
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Max Level:           {}\n", self.max_level));
        report.push_str(&format!("  Avg Final Gold:      {:.1}\n", self.avg_final_gold));
        report.push_str(&format!("  Avg Encounters:      {:.1}\n\n", self.avg_encounters));

        report.push_str("── BATTLES ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Wins:                {}\n", self.total_wins));
        report.push_str(&format!("  Losses:              {}\n", self.total_losses));
        report.push_str(&format!("  Win Rate:            {:.2}%\n", self.battle_win_rate()));
        report.push_str(&format!("  Survival Rate:       {:.1}%\n\n", self.survival_rate()));

        report.push_str("── LEVEL DISTRIBUTION ───────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = *count as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:2}: {:>5.1}% {}\n", level, pct, bar));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(survived: bool, wins: u32, losses: u32, level: u32) -> RunStats {
        RunStats {
            survived,
            encounters: wins + losses,
            wins,
            losses,
            final_level: level,
            final_gold: 10 * level,
            final_potions: 0,
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(vec![run(true, 3, 0, 2), run(false, 1, 1, 1)]);
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.survivors, 1);
        assert_eq!(report.deaths, 1);
        assert_eq!(report.total_wins, 4);
        assert_eq!(report.total_losses, 1);
        assert_eq!(report.max_level, 2);
        assert!((report.avg_final_level - 1.5).abs() < f64::EPSILON);
        assert!((report.battle_win_rate() - 80.0).abs() < 1e-9);
        assert_eq!(report.level_distribution[&1], 1);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.battle_win_rate(), 0.0);
        assert_eq!(report.survival_rate(), 0.0);
        assert!(report.to_text().contains("SIMULATION REPORT"));
    }
}

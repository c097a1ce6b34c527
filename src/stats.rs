//! Statistics tracking for the simulation.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Counter snapshot taken after a tick
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Simulation time
    pub chronon: u64,
    /// Live prey
    pub prey: usize,
    /// Live predators
    pub predators: usize,
    /// Prey ever placed or born
    pub total_prey: u64,
    /// Predators ever placed or born
    pub total_predators: u64,
    /// Prey eaten so far
    pub kills: u64,
    /// Ticks that began with predators alive
    pub score: u64,
}

impl Stats {
    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Prey:{:6} | Pred:{:6} | Kills:{:8} | Born prey:{:8} pred:{:8}",
            self.chronon,
            self.prey,
            self.predators,
            self.kills,
            self.total_prey,
            self.total_predators
        )
    }
}

/// Sliding window of periodic snapshots
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsHistory {
    /// Recorded snapshots, oldest first
    pub snapshots: VecDeque<Stats>,
    /// Recording interval in chronons
    pub interval: u64,
    /// Maximum snapshots kept; older ones are dropped
    pub window: usize,
}

impl StatsHistory {
    /// Create new history with recording interval and window size
    pub fn new(interval: u64, window: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(window.min(1024)),
            interval: interval.max(1),
            window: window.max(1),
        }
    }

    /// Whether a snapshot is due at this chronon
    #[inline]
    pub fn is_due(&self, chronon: u64) -> bool {
        chronon % self.interval == 0
    }

    /// Record a stats snapshot, evicting the oldest once the window is full
    pub fn record(&mut self, stats: Stats) {
        if self.snapshots.len() == self.window {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(stats);
    }

    /// Record only if a snapshot is due. Returns true if recorded.
    pub fn observe(&mut self, stats: Stats) -> bool {
        if self.is_due(stats.chronon) {
            self.record(stats);
            true
        } else {
            false
        }
    }

    pub fn latest(&self) -> Option<&Stats> {
        self.snapshots.back()
    }

    /// Prey population over time
    pub fn prey_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.chronon, s.prey)).collect()
    }

    /// Predator population over time
    pub fn predator_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.chronon, s.predators)).collect()
    }

    /// Save history to file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(chronon: u64, prey: usize, predators: usize) -> Stats {
        Stats {
            chronon,
            prey,
            predators,
            ..Stats::default()
        }
    }

    #[test]
    fn test_stats_history() {
        let mut history = StatsHistory::new(10, 100);

        for i in 0..5 {
            history.record(snapshot(i * 10, (i + 1) as usize * 100, 7));
        }

        let series = history.prey_series();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], (0, 100));
        assert_eq!(series[4], (40, 500));
        assert_eq!(history.predator_series()[2], (20, 7));
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut history = StatsHistory::new(1, 3);
        for i in 0..5 {
            history.record(snapshot(i, 0, 0));
        }

        assert_eq!(history.snapshots.len(), 3);
        assert_eq!(history.snapshots.front().map(|s| s.chronon), Some(2));
        assert_eq!(history.latest().map(|s| s.chronon), Some(4));
    }

    #[test]
    fn test_observe_respects_interval() {
        let mut history = StatsHistory::new(5, 10);
        let recorded = (1..=20).filter(|&t| history.observe(snapshot(t, 0, 0))).count();
        assert_eq!(recorded, 4);
    }

    #[test]
    fn test_summary_mentions_counts() {
        let line = snapshot(12, 345, 67).summary();
        assert!(line.contains("345"));
        assert!(line.contains("67"));
    }

    #[test]
    fn test_history_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = StatsHistory::new(2, 10);
        history.record(snapshot(2, 10, 3));
        history.save(&path).unwrap();

        let loaded = StatsHistory::load(&path).unwrap();
        assert_eq!(loaded.prey_series(), vec![(2, 10)]);
        assert_eq!(loaded.window, 10);
    }
}

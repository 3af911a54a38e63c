//! Strategy leaderboard
//!
//! Ranks comparison runs: strategies that found the source come first, fewest
//! ticks first; runs that hit the cap follow in the order they were added.

use serde::{Deserialize, Serialize};

use crate::sim::{Comparison, RunOutcome, StrategyKind};

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub kind: StrategyKind,
    pub outcome: RunOutcome,
    /// Fraction of tiles visited
    pub coverage: f64,
}

impl RankingEntry {
    /// Sort key: found runs by ticks, then every capped run
    fn key(&self) -> (bool, u64) {
        match self.outcome {
            RunOutcome::Found { ticks } => (false, ticks),
            RunOutcome::CapReached { .. } => (true, 0),
        }
    }
}

/// Sorted leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Ranking {
    pub entries: Vec<RankingEntry>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_comparison(comparison: &Comparison) -> Self {
        let mut ranking = Self::new();
        for result in &comparison.results {
            ranking.add(result.kind, result.outcome, result.coverage);
        }
        ranking
    }

    /// Insert a result keeping the order. Returns its rank (1-indexed).
    pub fn add(&mut self, kind: StrategyKind, outcome: RunOutcome, coverage: f64) -> usize {
        let entry = RankingEntry {
            kind,
            outcome,
            coverage,
        };
        // Ties keep insertion order
        let key = entry.key();
        let pos = self
            .entries
            .iter()
            .position(|e| key < e.key())
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        pos + 1
    }

    /// Rank of a strategy (1-indexed)
    pub fn rank_of(&self, kind: StrategyKind) -> Option<usize> {
        self.entries.iter().position(|e| e.kind == kind).map(|i| i + 1)
    }

    /// Fastest strategy to find the source, if any did
    pub fn winner(&self) -> Option<&RankingEntry> {
        self.entries.first().filter(|e| e.outcome.found())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per entry, best first
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{:>2}. {:<24} {} ({:.1}% covered)",
                    i + 1,
                    e.kind.as_str(),
                    e.outcome,
                    e.coverage * 100.0
                )
            })
            .collect()
    }
}

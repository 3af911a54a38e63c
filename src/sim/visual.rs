//! Snapshot consumers
//!
//! The runner hands the tank and boats to a `Visualizer` once before the first
//! tick and once after every tick. Visualizers only observe; a run with or
//! without one steps identically.

use super::boat::Boat;
use super::position::Position;
use super::tank::Tank;

pub trait Visualizer {
    /// Called with the state after each tick (and once before the first)
    fn update(&mut self, tank: &Tank, boats: &[Boat]);

    /// Called once when the run ends
    fn done(&mut self) {}
}

/// Records every boat's path, one position per snapshot
#[derive(Debug, Clone, Default)]
pub struct TrajectoryRecorder {
    paths: Vec<Vec<Position>>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths indexed by boat
    pub fn trajectories(&self) -> &[Vec<Position>] {
        &self.paths
    }

    pub fn into_trajectories(self) -> Vec<Vec<Position>> {
        self.paths
    }

    /// Snapshots recorded so far
    pub fn frames(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }
}

impl Visualizer for TrajectoryRecorder {
    fn update(&mut self, _tank: &Tank, boats: &[Boat]) {
        if self.paths.len() < boats.len() {
            self.paths.resize_with(boats.len(), Vec::new);
        }
        for (path, boat) in self.paths.iter_mut().zip(boats) {
            path.push(boat.position());
        }
    }
}

/// Writes snapshots to the log
#[derive(Debug, Clone, Default)]
pub struct LogVisualizer {
    frame: u64,
}

impl LogVisualizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visualizer for LogVisualizer {
    fn update(&mut self, tank: &Tank, boats: &[Boat]) {
        for boat in boats {
            log::debug!(
                "Frame {}: boat {} at {} heading {:.1}",
                self.frame,
                boat.id(),
                boat.position(),
                boat.heading()
            );
        }
        log::debug!(
            "Frame {}: {}/{} tiles visited",
            self.frame,
            tank.visited_count(),
            tank.tile_count()
        );
        self.frame += 1;
    }

    fn done(&mut self) {
        log::info!("Run finished after {} frames", self.frame);
    }
}

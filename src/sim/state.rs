//! Run state and core simulation types
//!
//! A `Simulation` owns the tank and every boat. All randomness flows from the
//! run seed, so two simulations built from the same inputs step identically.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boat::{Boat, BoatSnapshot};
use super::error::SimError;
use super::position::Position;
use super::strategy::StrategyKind;
use super::tank::Tank;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Boats placed, nothing rendered yet
    Init,
    /// Ticking
    Stepping,
    /// A source was found (or the operator ended the run)
    Done,
}

/// Seed wrapper; each boat gets its own generator derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator for the boat at `index`
    pub fn boat_rng(&self, index: usize) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed.wrapping_add(index as u64))
    }
}

/// How every boat in a run is configured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    pub kind: StrategyKind,
    pub speed: f64,
    /// Points on the heuristic sampling circle
    pub heuristic_samples: usize,
    /// Log turn geometry for every move
    pub trace_turns: bool,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            kind: StrategyKind::GradientAscent,
            speed: DEFAULT_BOAT_SPEED,
            heuristic_samples: HEURISTIC_SAMPLES,
            trace_turns: false,
        }
    }
}

/// Complete run state
#[derive(Debug)]
pub struct Simulation {
    pub tank: Tank,
    /// Stepped in order, every tick
    pub boats: Vec<Boat>,
    pub phase: RunPhase,
    /// Completed ticks
    pub ticks: u64,
    pub rng_state: RngState,
}

impl Simulation {
    /// Place one boat per start location; every start tile is marked visited.
    ///
    /// Fails when the field has sources but none of their tiles is a start
    /// tile or lies where a boat can go, since such a run could never end.
    pub fn new(
        mut tank: Tank,
        starts: &[Position],
        fleet: &FleetConfig,
        seed: u64,
    ) -> Result<Self, SimError> {
        if starts.is_empty() {
            return Err(SimError::NoBoats);
        }
        if fleet.heuristic_samples == 0 {
            return Err(SimError::InvalidHeuristicSamples);
        }
        let margin = SENSOR_DISTANCE;
        if tank.width() as f64 <= 2.0 * margin || tank.height() as f64 <= 2.0 * margin {
            return Err(SimError::TankTooSmall {
                width: tank.width(),
                height: tank.height(),
                margin,
            });
        }

        let rng_state = RngState::new(seed);
        let boats = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                Boat::new(
                    i,
                    start,
                    fleet.speed,
                    fleet.kind.build(fleet.heuristic_samples),
                    rng_state.boat_rng(i),
                    &mut tank,
                )
                .map(|boat| boat.with_trace_turns(fleet.trace_turns))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sources = tank.source_locations();
        let reachable = sources.iter().any(|s| {
            let (m, n) = (s.x.floor() as i64, s.y.floor() as i64);
            tank.has_visited(m, n) || tank.is_tile_reachable(m, n, margin)
        });
        if let Some(source) = sources.first().filter(|_| !reachable) {
            return Err(SimError::UnreachableSource {
                x: source.x,
                y: source.y,
                margin,
            });
        }

        Ok(Self {
            tank,
            boats,
            phase: RunPhase::Init,
            ticks: 0,
            rng_state,
        })
    }

    pub fn is_done(&self) -> bool {
        self.phase == RunPhase::Done
    }

    pub fn snapshots(&self) -> Vec<BoatSnapshot> {
        self.boats.iter().map(Boat::snapshot).collect()
    }
}

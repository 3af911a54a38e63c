//! Deterministic simulation module
//!
//! All search logic lives here. This module must be pure and deterministic:
//! - One move per boat per tick, in boat-list order
//! - Seeded RNG only (one `Pcg32` per boat)
//! - No rendering or I/O dependencies; display goes through `Visualizer`

pub mod arc;
pub mod boat;
pub mod compare;
pub mod error;
pub mod field;
pub mod history;
pub mod interp;
pub mod position;
pub mod sensor;
pub mod state;
pub mod strategy;
pub mod tank;
pub mod tick;
pub mod visual;

pub use arc::{TurnArc, TurnGeometry, turn_geometry};
pub use boat::{Boat, BoatSnapshot};
pub use compare::{Comparison, StrategyResult, compare_strategies, compare_with};
pub use error::{FieldError, SimError};
pub use field::{
    DiffusionField, EmpiricalField, FieldReader, InteractiveField, OperatorConsole, sample_grid,
};
pub use history::SensorHistory;
pub use interp::{LinearInterpolant, Triangulation};
pub use position::Position;
pub use sensor::{SensorGeometry, SensorTriangle};
pub use state::{FleetConfig, RngState, RunPhase, Simulation};
pub use strategy::{DecisionContext, Maneuver, MovementStrategy, StrategyKind};
pub use tank::Tank;
pub use tick::{RunOutcome, run, tick};
pub use visual::{LogVisualizer, TrajectoryRecorder, Visualizer};

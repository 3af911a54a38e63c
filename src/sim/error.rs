//! Error types for field construction and simulation setup

use thiserror::Error;

/// Failure building a sensor field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("need at least {min} measurement points, got {actual}")]
    TooFewSamples { min: usize, actual: usize },
    #[error("measurement {index} is not finite")]
    NonFiniteSample { index: usize },
    #[error("measurements span no area along the {axis} axis")]
    DegenerateExtent { axis: char },
    #[error("measurements are collinear; no triangle to interpolate over")]
    DegenerateTriangulation,
}

/// Failure setting up or running a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("tank dimensions must be positive (got {width}x{height})")]
    InvalidTank { width: u32, height: u32 },
    #[error("a {width}x{height} tank leaves no room inside a sensor margin of {margin}")]
    TankTooSmall { width: u32, height: u32, margin: f64 },
    #[error("boat speed must be positive and finite (got {0})")]
    InvalidSpeed(f64),
    #[error("at least one boat start location is required")]
    NoBoats,
    #[error("boat start ({x}, {y}) lies outside the {width}x{height} tank")]
    StartOutsideTank { x: f64, y: f64, width: u32, height: u32 },
    #[error("no source tile is reachable; ({x}, {y}) lies off the grid or within the sensor margin of {margin}")]
    UnreachableSource { x: f64, y: f64, margin: f64 },
    #[error("heuristic sample count must be positive")]
    InvalidHeuristicSamples,
    #[error(transparent)]
    Field(#[from] FieldError),
}

//! Tank Search - autonomous boats hunting for a signal source
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fields, tank, boats, strategies, runner)
//! - `settings`: Run configuration loaded from JSON
//! - `ranking`: Strategy leaderboard built from comparison runs

pub mod ranking;
pub mod settings;
pub mod sim;

pub use ranking::Ranking;
pub use settings::{FieldSettings, SettingsError, SimSettings};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Sensor offset angle from the front bearing (degrees)
    pub const SENSOR_ANGLE_DEG: f64 = 30.0;
    /// Distance from the boat to each sensor probe (tank units)
    pub const SENSOR_DISTANCE: f64 = 1.25;
    /// Heading every boat starts with (degrees, pointing +y)
    pub const INITIAL_HEADING_DEG: f64 = 90.0;

    /// Tank defaults
    pub const DEFAULT_TANK_WIDTH: u32 = 20;
    pub const DEFAULT_TANK_HEIGHT: u32 = 20;
    pub const DEFAULT_BOAT_SPEED: f64 = 2.0;

    /// Sensor triangles kept by the gradient-ascent boat
    pub const GRADIENT_HISTORY: usize = 5;
    /// Sensor triangles kept by the pure-heuristic boat
    pub const HEURISTIC_HISTORY: usize = 3;
    /// Triangles inspected when looking for back-and-forth oscillation
    pub const STUCK_WINDOW: usize = 5;
    /// Points sampled around the heuristic circle
    pub const HEURISTIC_SAMPLES: usize = 1000;

    /// Hard tick cap for each run of the comparison harness
    pub const COMPARISON_TICK_CAP: u64 = 50;
    /// Grid resolution of the diagnostic field map
    pub const FIELD_MAP_RESOLUTION: usize = 75;

    /// Retry budget for wall recovery and random-walk rejection sampling
    pub const MAX_REHEADING_ATTEMPTS: u32 = 1000;
    /// Net direction vectors shorter than this count as zero
    pub const DIRECTION_EPSILON: f64 = 1e-9;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector pointing along a heading in degrees
#[inline]
pub fn heading_vector(angle_deg: f64) -> DVec2 {
    let rad = angle_deg.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

/// Angle in [0, 360) between `vector` and `reference`, measured counter-clockwise.
///
/// Uses the arccos of the unit dot product, then mirrors to `360 - angle` when
/// `vector` points below the x-axis, since arccos cannot tell θ from -θ.
///
/// `vector` must be non-zero; callers substitute a fallback direction first.
pub fn angle_of(vector: DVec2, reference: DVec2) -> f64 {
    debug_assert!(
        vector.length_squared() > 0.0,
        "angle_of called with a zero-length vector"
    );
    let cos = vector.normalize().dot(reference.normalize()).clamp(-1.0, 1.0);
    let mut angle = cos.acos().to_degrees();
    if vector.y < 0.0 {
        angle = 360.0 - angle;
    }
    normalize_degrees(angle)
}

/// Heading of a direction vector measured from the +x axis
#[inline]
pub fn heading_of(vector: DVec2) -> f64 {
    angle_of(vector, DVec2::X)
}

/// Round to a fixed number of decimals, ties to even
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

//! Turn geometry for diagnostics
//!
//! When a boat changes direction between ticks, the move can be read as an
//! arc that leaves `start` tangent to the previous direction and passes
//! through `end`. Its center sits on the normal at `start`:
//!
//! - center = start + t·n, with n = perp(prev_dir)
//! - t = |d|² / (2 n·d), with d = end - start
//! - swept angle = 2·asin(|d| / 2r)
//!
//! Only used for logging; movement itself is always a straight step.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::position::Position;

/// Direction changes smaller than this (radians) count as straight
const STRAIGHT_TOLERANCE: f64 = 1e-9;

/// Circular arc through a turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnArc {
    pub center: DVec2,
    pub radius: f64,
    /// Angle swept along the arc (degrees)
    pub sweep_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TurnGeometry {
    /// No change of direction
    Straight,
    Arc(TurnArc),
    /// The end point lies on the previous tangent line, or inputs are not finite
    Degenerate,
}

/// Describe the turn from `start` (moving along `prev_dir`) to `end` (leaving along `new_dir`)
pub fn turn_geometry(start: Position, end: Position, prev_dir: DVec2, new_dir: DVec2) -> TurnGeometry {
    let (Some(prev), Some(new)) = (prev_dir.try_normalize(), new_dir.try_normalize()) else {
        return TurnGeometry::Degenerate;
    };
    if prev.angle_to(new).abs() < STRAIGHT_TOLERANCE {
        return TurnGeometry::Straight;
    }

    let d = end.as_vec() - start.as_vec();
    let normal = prev.perp();
    let denom = 2.0 * normal.dot(d);
    if !denom.is_finite() || denom.abs() < STRAIGHT_TOLERANCE {
        return TurnGeometry::Degenerate;
    }

    let t = d.length_squared() / denom;
    let radius = t.abs();
    let chord = d.length();
    let sweep = 2.0 * (chord / (2.0 * radius)).clamp(-1.0, 1.0).asin();
    if !sweep.is_finite() {
        return TurnGeometry::Degenerate;
    }

    TurnGeometry::Arc(TurnArc {
        center: start.as_vec() + normal * t,
        radius,
        sweep_deg: sweep.to_degrees(),
    })
}

//! Sensor triangle: three probes around the boat
//!
//! Probes sit at fixed lab-frame bearings regardless of heading: front at 90°,
//! left at 180° + offset, right at -offset, each `distance` from the boat.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::position::Position;
use super::tank::Tank;
use crate::consts::{SENSOR_ANGLE_DEG, SENSOR_DISTANCE};
use crate::heading_vector;

/// Probe placement shared by every boat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorGeometry {
    /// Offset of the side probes from the horizontal (degrees)
    pub angle_deg: f64,
    /// Probe distance from the boat; also the wall margin
    pub distance: f64,
}

impl Default for SensorGeometry {
    fn default() -> Self {
        Self {
            angle_deg: SENSOR_ANGLE_DEG,
            distance: SENSOR_DISTANCE,
        }
    }
}

impl SensorGeometry {
    pub fn front_bearing(&self) -> f64 {
        90.0
    }

    pub fn left_bearing(&self) -> f64 {
        180.0 + self.angle_deg
    }

    pub fn right_bearing(&self) -> f64 {
        -self.angle_deg
    }

    /// Front, left and right offsets from the boat
    pub fn offsets(&self) -> [DVec2; 3] {
        [
            heading_vector(self.front_bearing()) * self.distance,
            heading_vector(self.left_bearing()) * self.distance,
            heading_vector(self.right_bearing()) * self.distance,
        ]
    }

    /// Radius of the heuristic sampling circle: the smaller component of the
    /// right probe offset (0.625 for the default geometry, the triangle's incircle)
    pub fn heuristic_radius(&self) -> f64 {
        let right = heading_vector(self.right_bearing()) * self.distance;
        right.x.abs().min(right.y.abs())
    }
}

/// One tick's readings: (x, y, value) for the front, left and right probes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorTriangle {
    pub front: DVec3,
    pub left: DVec3,
    pub right: DVec3,
}

impl SensorTriangle {
    /// Sample the tank's field at each probe around `pos`
    pub fn sample(pos: Position, geometry: &SensorGeometry, tank: &Tank) -> Self {
        let [front, left, right] = geometry.offsets().map(|offset| {
            let probe = pos.as_vec() + offset;
            probe.extend(tank.reading(probe))
        });
        Self { front, left, right }
    }

    pub fn points(&self) -> [DVec3; 3] {
        [self.front, self.left, self.right]
    }

    pub fn values(&self) -> [f64; 3] {
        [self.front.z, self.left.z, self.right.z]
    }

    /// Normal of the plane through the three probes, oriented so its
    /// horizontal part points up the local slope.
    pub fn uphill_normal(&self) -> DVec3 {
        let normal = (self.front - self.left).cross(self.right - self.left);
        // z = (d - a·x - b·y) / c rises along (a, b) exactly when c < 0
        if normal.z > 0.0 { -normal } else { normal }
    }
}

//! Continuous tank coordinates

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::heading_vector;

/// A location in the two-dimensional tank
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position after one tick along `angle_deg` at `speed`.
    ///
    /// Does not check whether the result is inside the tank.
    pub fn advance(self, angle_deg: f64, speed: f64) -> Self {
        self + heading_vector(angle_deg) * speed
    }

    /// Integer tile this position falls on
    #[inline]
    pub fn tile(self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }

    #[inline]
    pub fn as_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Vector from `self` to `other`
    #[inline]
    pub fn displacement_to(self, other: Position) -> DVec2 {
        other.as_vec() - self.as_vec()
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl std::ops::Add<DVec2> for Position {
    type Output = Position;

    fn add(self, rhs: DVec2) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

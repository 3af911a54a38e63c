//! Bounded memory of recent sensor triangles

use std::collections::VecDeque;

use glam::DVec3;

use super::sensor::SensorTriangle;
use crate::round_to;

/// Fixed-capacity queue of sensor triangles; the oldest is evicted when full
#[derive(Debug, Clone)]
pub struct SensorHistory {
    capacity: usize,
    triangles: VecDeque<SensorTriangle>,
}

impl SensorHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            triangles: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a triangle, dropping the oldest once at capacity
    pub fn push(&mut self, triangle: SensorTriangle) {
        if self.capacity == 0 {
            return;
        }
        if self.triangles.len() == self.capacity {
            self.triangles.pop_front();
        }
        self.triangles.push_back(triangle);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn last(&self) -> Option<&SensorTriangle> {
        self.triangles.back()
    }

    /// Triangles from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &SensorTriangle> {
        self.triangles.iter()
    }

    /// Every recorded probe point, oldest triangle first
    pub fn points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.triangles.iter().flat_map(|t| t.points())
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    /// Whether the boat keeps returning to the same spot.
    ///
    /// Looks at the front-probe location (a fixed offset from the boat) of the
    /// last `window` triangles, rounded to 2 decimals. The oldest one is
    /// compared with every second triangle after it; the boat is oscillating
    /// if each of those shares its x or its y coordinate. Needs a full window.
    pub fn is_oscillating(&self, window: usize) -> bool {
        if window == 0 || self.triangles.len() < window {
            return false;
        }
        let fronts: Vec<(f64, f64)> = self
            .triangles
            .iter()
            .skip(self.triangles.len() - window)
            .map(|t| (round_to(t.front.x, 2), round_to(t.front.y, 2)))
            .collect();

        let (x0, y0) = fronts[0];
        fronts
            .iter()
            .skip(2)
            .step_by(2)
            .all(|&(x, y)| x == x0 || y == y0)
    }
}

//! The tank: a grid of unit tiles over continuous space
//!
//! Tile (m, n) covers [m, m+1) x [n, n+1). Tiles only ever go from unvisited
//! to visited. How signal values are produced is delegated to the field.

use glam::DVec2;

use super::error::SimError;
use super::field::FieldReader;
use super::position::Position;

pub struct Tank {
    width: u32,
    height: u32,
    /// Column-major: index = x * height + y
    visited: Vec<bool>,
    field: Box<dyn FieldReader>,
}

impl Tank {
    /// Create a tank with every tile unvisited
    pub fn new(width: u32, height: u32, field: Box<dyn FieldReader>) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidTank { width, height });
        }
        Ok(Self {
            width,
            height,
            visited: vec![false; width as usize * height as usize],
            field,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn field(&self) -> &dyn FieldReader {
        self.field.as_ref()
    }

    fn index(&self, m: i64, n: i64) -> Option<usize> {
        let in_grid = (0..self.width as i64).contains(&m) && (0..self.height as i64).contains(&n);
        in_grid.then(|| m as usize * self.height as usize + n as usize)
    }

    /// Mark the tile under `pos` as visited. Returns true if it was new.
    pub fn mark_visited(&mut self, pos: Position) -> bool {
        let (m, n) = pos.tile();
        match self.index(m, n) {
            Some(i) => !std::mem::replace(&mut self.visited[i], true),
            None => {
                log::trace!("Ignoring visit outside the tile grid at {}", pos);
                false
            }
        }
    }

    /// Whether tile (m, n) has been visited; tiles outside the grid never are
    pub fn has_visited(&self, m: i64, n: i64) -> bool {
        self.index(m, n).is_some_and(|i| self.visited[i])
    }

    /// True if some in-bounds position (see `is_in_bounds`) lies in tile (m, n)
    pub fn is_tile_reachable(&self, m: i64, n: i64, margin: f64) -> bool {
        let (w, h) = (self.width as f64, self.height as f64);
        let (x, y) = (m as f64, n as f64);
        x + 1.0 > margin && x < w - margin && y + 1.0 > margin && y < h - margin
    }

    /// True iff `margin <= x < width - margin` and `margin <= y < height - margin`
    pub fn is_in_bounds(&self, pos: Position, margin: f64) -> bool {
        let (w, h) = (self.width as f64, self.height as f64);
        margin <= pos.x && pos.x < w - margin && margin <= pos.y && pos.y < h - margin
    }

    /// Whether `pos` falls on any tile of the grid
    pub fn contains(&self, pos: Position) -> bool {
        self.is_in_bounds(pos, 0.0)
    }

    /// Signal reading at `point`
    #[inline]
    pub fn reading(&self, point: DVec2) -> f64 {
        self.field.value_at(point)
    }

    pub fn source_locations(&self) -> &[DVec2] {
        self.field.source_locations()
    }

    /// True once any source's tile (its floored coordinates) is visited.
    ///
    /// A field with its own termination rule (operator input) decides instead.
    pub fn source_found(&self) -> bool {
        if let Some(done) = self.field.termination() {
            return done;
        }
        self.field
            .source_locations()
            .iter()
            .any(|s| self.has_visited(s.x.floor() as i64, s.y.floor() as i64))
    }

    pub fn tile_count(&self) -> usize {
        self.visited.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    /// Fraction of tiles visited (diagnostic)
    pub fn coverage(&self) -> f64 {
        self.visited_count() as f64 / self.tile_count() as f64
    }

    /// Visited tile coordinates in column-major order
    pub fn visited_tiles(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let height = self.height as usize;
        self.visited
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| ((i / height) as i64, (i % height) as i64))
    }
}

impl std::fmt::Debug for Tank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tank")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("visited", &self.visited_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::DiffusionField;

    fn tank_with_source(x: f64, y: f64) -> Tank {
        let field = DiffusionField::new(vec![DVec2::new(x, y)]);
        Tank::new(20, 20, Box::new(field)).unwrap()
    }

    #[test]
    fn test_rejects_empty_tank() {
        let field = DiffusionField::new(vec![]);
        let err = Tank::new(0, 5, Box::new(field)).unwrap_err();
        assert_eq!(err, SimError::InvalidTank { width: 0, height: 5 });
    }

    #[test]
    fn test_mark_visited_once() {
        let mut tank = tank_with_source(5.0, 6.0);
        assert_eq!(tank.visited_count(), 0);
        assert!(tank.mark_visited(Position::new(3.7, 2.1)));
        assert!(!tank.mark_visited(Position::new(3.2, 2.9)));
        assert!(tank.has_visited(3, 2));
        assert!(!tank.has_visited(2, 3));
        assert_eq!(tank.visited_count(), 1);
        assert_eq!(tank.visited_tiles().collect::<Vec<_>>(), vec![(3, 2)]);
    }

    #[test]
    fn test_visits_outside_grid_are_ignored() {
        let mut tank = tank_with_source(5.0, 6.0);
        assert!(!tank.mark_visited(Position::new(-0.5, 3.0)));
        assert!(!tank.mark_visited(Position::new(20.0, 3.0)));
        assert_eq!(tank.visited_count(), 0);
        assert!(!tank.has_visited(-1, 3));
    }

    #[test]
    fn test_bounds_respect_margin() {
        let tank = tank_with_source(5.0, 6.0);
        assert!(tank.is_in_bounds(Position::new(1.25, 1.25), 1.25));
        assert!(!tank.is_in_bounds(Position::new(1.2, 5.0), 1.25));
        assert!(!tank.is_in_bounds(Position::new(18.75, 5.0), 1.25));
        assert!(tank.is_in_bounds(Position::new(18.74, 18.74), 1.25));
        assert!(tank.contains(Position::new(0.0, 0.0)));
        assert!(!tank.contains(Position::new(20.0, 0.0)));
    }

    #[test]
    fn test_reachable_tiles_stop_at_margin() {
        let tank = tank_with_source(5.0, 6.0);
        assert!(tank.is_tile_reachable(1, 1, 1.25));
        assert!(tank.is_tile_reachable(18, 18, 1.25));
        assert!(!tank.is_tile_reachable(0, 5, 1.25));
        assert!(!tank.is_tile_reachable(19, 5, 1.25));
        assert!(!tank.is_tile_reachable(20, 0, 1.25));
        assert!(tank.is_tile_reachable(0, 0, 0.0));
        assert!(!tank.is_tile_reachable(-1, 0, 0.0));
    }

    #[test]
    fn test_source_found_uses_floored_source_tile() {
        // Continuous source coordinates must map onto the integer tile grid
        let mut tank = tank_with_source(5.6, 6.2);
        assert!(!tank.source_found());
        tank.mark_visited(Position::new(6.1, 6.5));
        assert!(!tank.source_found());
        tank.mark_visited(Position::new(5.01, 6.99));
        assert!(tank.source_found());
    }

    #[test]
    fn test_coverage() {
        let mut tank = tank_with_source(5.0, 6.0);
        for x in 0..20 {
            tank.mark_visited(Position::new(x as f64 + 0.5, 0.5));
        }
        assert_eq!(tank.tile_count(), 400);
        assert!((tank.coverage() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_reading_delegates_to_field() {
        let tank = tank_with_source(5.0, 6.0);
        assert!((tank.reading(DVec2::new(5.0, 6.0)) - 1.0).abs() < 1e-12);
        assert_eq!(tank.source_locations(), &[DVec2::new(5.0, 6.0)]);
    }
}

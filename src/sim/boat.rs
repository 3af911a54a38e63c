//! A single search boat
//!
//! Each tick the boat samples its sensor triangle (if its strategy senses),
//! remembers it, asks the strategy for a maneuver and resolves that maneuver
//! against the tank walls.

use glam::DVec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::arc::{TurnGeometry, turn_geometry};
use super::error::SimError;
use super::history::SensorHistory;
use super::position::Position;
use super::sensor::{SensorGeometry, SensorTriangle};
use super::strategy::{DecisionContext, Maneuver, MovementStrategy, StrategyKind, random_heading};
use super::tank::Tank;
use crate::consts::{INITIAL_HEADING_DEG, MAX_REHEADING_ATTEMPTS};
use crate::{heading_of, heading_vector, normalize_degrees};

/// Per-tick view of a boat for visualizers and reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoatSnapshot {
    pub id: usize,
    pub position: Position,
    pub heading: f64,
    pub direction: DVec2,
}

pub struct Boat {
    id: usize,
    position: Position,
    /// Degrees in [0, 360)
    heading: f64,
    /// Unit vector matching `heading`
    direction: DVec2,
    speed: f64,
    geometry: SensorGeometry,
    history: SensorHistory,
    strategy: Box<dyn MovementStrategy>,
    rng: Pcg32,
    trace_turns: bool,
}

impl Boat {
    /// Place a boat on the tank and mark its start tile visited.
    ///
    /// The start only has to lie on the tile grid; a start inside the sensor
    /// margin is pushed back in by the first move.
    pub fn new(
        id: usize,
        start: Position,
        speed: f64,
        strategy: Box<dyn MovementStrategy>,
        rng: Pcg32,
        tank: &mut Tank,
    ) -> Result<Self, SimError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SimError::InvalidSpeed(speed));
        }
        if !tank.contains(start) {
            return Err(SimError::StartOutsideTank {
                x: start.x,
                y: start.y,
                width: tank.width(),
                height: tank.height(),
            });
        }

        tank.mark_visited(start);
        let history = SensorHistory::new(strategy.history_capacity());
        Ok(Self {
            id,
            position: start,
            heading: INITIAL_HEADING_DEG,
            direction: heading_vector(INITIAL_HEADING_DEG),
            speed,
            geometry: SensorGeometry::default(),
            history,
            strategy,
            rng,
            trace_turns: false,
        })
    }

    /// Log the turning circle of every accepted move at debug level
    pub fn with_trace_turns(mut self, enabled: bool) -> Self {
        self.trace_turns = enabled;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn direction(&self) -> DVec2 {
        self.direction
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn geometry(&self) -> &SensorGeometry {
        &self.geometry
    }

    pub fn history(&self) -> &SensorHistory {
        &self.history
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn snapshot(&self) -> BoatSnapshot {
        BoatSnapshot {
            id: self.id,
            position: self.position,
            heading: self.heading,
            direction: self.direction,
        }
    }

    /// Advance the boat by one tick
    pub fn update_position(&mut self, tank: &mut Tank) {
        let readings = self
            .strategy
            .senses()
            .then(|| SensorTriangle::sample(self.position, &self.geometry, tank));
        if let Some(triangle) = readings {
            log::trace!("Boat {} sensors {:?}", self.id, triangle);
            self.history.push(triangle);
        }

        let maneuver = {
            let ctx = DecisionContext {
                position: self.position,
                heading: self.heading,
                direction: self.direction,
                speed: self.speed,
                geometry: &self.geometry,
                readings: readings.as_ref(),
                history: &self.history,
                tank: &*tank,
            };
            self.strategy.decide(&ctx, &mut self.rng)
        };

        match maneuver {
            Maneuver::Steer(direction) => self.update_heading(direction, tank),
            Maneuver::Head(angle) => self.steer_along(angle, heading_vector(angle), tank),
            Maneuver::TurnInPlace(angle) => {
                self.heading = normalize_degrees(angle);
                self.direction = heading_vector(self.heading);
            }
        }
    }

    /// Move one step along `direction`, recovering from walls.
    ///
    /// A zero or non-finite direction keeps the current one.
    pub fn update_heading(&mut self, direction: DVec2, tank: &mut Tank) {
        let direction = match direction.try_normalize() {
            Some(unit) => unit,
            None => {
                log::debug!("Boat {} got an unusable direction {:?}", self.id, direction);
                self.direction
            }
        };
        self.steer_along(heading_of(direction), direction, tank);
    }

    /// Step along `angle`, clamping to the inset tank or re-rolling the
    /// heading until the step lands in bounds
    fn steer_along(&mut self, angle: f64, direction: DVec2, tank: &mut Tank) {
        let margin = self.geometry.distance;
        let max_x = tank.width() as f64 - margin;
        let max_y = tank.height() as f64 - margin;

        let mut angle = normalize_degrees(angle);
        let mut direction = direction;
        let mut candidate = self.position.advance(angle, self.speed);
        let mut attempts = 0;
        while !tank.is_in_bounds(candidate, margin) {
            attempts += 1;
            if attempts > MAX_REHEADING_ATTEMPTS {
                log::warn!(
                    "Boat {} found no way off the wall at {} after {} attempts; holding position",
                    self.id,
                    self.position,
                    MAX_REHEADING_ATTEMPTS
                );
                return;
            }

            let clamped = Position::new(
                candidate.x.min(max_x).max(margin),
                candidate.y.min(max_y).max(margin),
            );
            if clamped == candidate || clamped == self.position || clamped == Position::ORIGIN {
                angle = random_heading(&mut self.rng);
                direction = heading_vector(angle);
                candidate = self.position.advance(angle, self.speed);
            } else {
                let step = self.position.displacement_to(clamped);
                angle = heading_of(step);
                direction = step.normalize();
                candidate = clamped;
            }
        }

        if self.trace_turns {
            self.log_turn(candidate, direction, angle);
        }
        self.heading = angle;
        self.position = candidate;
        self.direction = direction;
        tank.mark_visited(candidate);
    }

    fn log_turn(&self, to: Position, direction: DVec2, angle: f64) {
        let step = self.position.displacement_to(to);
        log::debug!(
            "Boat {} move {:?} distance {:.3} angle from (1,0) {:.2}",
            self.id,
            step,
            step.length(),
            angle
        );
        match turn_geometry(self.position, to, self.direction, direction) {
            TurnGeometry::Straight => log::debug!("Boat {} goes straight", self.id),
            TurnGeometry::Arc(arc) => log::debug!(
                "Boat {} turns about ({:.3}, {:.3}) radius {:.3} through {:.2} degrees",
                self.id,
                arc.center.x,
                arc.center.y,
                arc.radius,
                arc.sweep_deg
            ),
            TurnGeometry::Degenerate => log::debug!("Boat {} turn has no circle", self.id),
        }
    }
}

impl std::fmt::Debug for Boat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Boat")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("position", &self.position)
            .field("heading", &self.heading)
            .finish_non_exhaustive()
    }
}

//! Movement strategies
//!
//! A strategy looks at the boat's situation for the current tick (probe
//! readings, recent history, current heading) and returns a `Maneuver`. The
//! boat then resolves the maneuver against the tank walls.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::history::SensorHistory;
use super::interp::LinearInterpolant;
use super::position::Position;
use super::sensor::{SensorGeometry, SensorTriangle};
use super::tank::Tank;
use crate::consts::*;
use crate::{heading_vector, round_to};

/// What the boat should do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Maneuver {
    /// Move along a direction vector (non-zero), clamped to the tank if needed
    Steer(DVec2),
    /// Move along an exact heading in degrees, clamped to the tank if needed
    Head(f64),
    /// Face a new heading without moving
    TurnInPlace(f64),
}

/// Everything a strategy may look at when deciding
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub position: Position,
    /// Current heading (degrees, [0, 360))
    pub heading: f64,
    /// Current unit direction
    pub direction: DVec2,
    pub speed: f64,
    pub geometry: &'a SensorGeometry,
    /// This tick's probe readings, for strategies that sense
    pub readings: Option<&'a SensorTriangle>,
    /// Recent triangles, already including this tick's when recorded
    pub history: &'a SensorHistory,
    pub tank: &'a Tank,
}

pub trait MovementStrategy {
    fn kind(&self) -> StrategyKind;

    /// Whether the boat should sample its probes before deciding
    fn senses(&self) -> bool {
        true
    }

    /// Sensor triangles the boat should remember for this strategy
    fn history_capacity(&self) -> usize {
        0
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut Pcg32) -> Maneuver;
}

/// Selectable search strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Keep heading; re-roll the heading on wall contact
    Standard,
    /// Fresh random in-bounds heading every tick
    RandomWalk,
    /// Toward the strongest probe
    MaxDirection,
    /// Reading-weighted sum of probe offsets
    WeightedMaxDirection,
    /// Plane-fit gradient blended with the history heuristic
    GradientAscent,
    /// History heuristic alone
    PureHeuristic,
    /// Plane-fit gradient without the heuristic
    GradientDescent,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::Standard,
        StrategyKind::RandomWalk,
        StrategyKind::MaxDirection,
        StrategyKind::WeightedMaxDirection,
        StrategyKind::GradientAscent,
        StrategyKind::PureHeuristic,
        StrategyKind::GradientDescent,
    ];

    /// Strategies raced against each other by the comparison harness
    pub const COMPARED: [StrategyKind; 6] = [
        StrategyKind::GradientAscent,
        StrategyKind::GradientDescent,
        StrategyKind::PureHeuristic,
        StrategyKind::WeightedMaxDirection,
        StrategyKind::MaxDirection,
        StrategyKind::RandomWalk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Standard => "standard",
            StrategyKind::RandomWalk => "random-walk",
            StrategyKind::MaxDirection => "max-direction",
            StrategyKind::WeightedMaxDirection => "weighted-max-direction",
            StrategyKind::GradientAscent => "gradient-ascent",
            StrategyKind::PureHeuristic => "pure-heuristic",
            StrategyKind::GradientDescent => "gradient-descent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "standard" => Some(StrategyKind::Standard),
            "random-walk" | "random" => Some(StrategyKind::RandomWalk),
            "max-direction" | "max" => Some(StrategyKind::MaxDirection),
            "weighted-max-direction" | "weighted" => Some(StrategyKind::WeightedMaxDirection),
            "gradient-ascent" | "astar" | "a-star" => Some(StrategyKind::GradientAscent),
            "pure-heuristic" | "heuristic" => Some(StrategyKind::PureHeuristic),
            "gradient-descent" => Some(StrategyKind::GradientDescent),
            _ => None,
        }
    }

    /// Instantiate the strategy; `heuristic_samples` sets the circle resolution
    pub fn build(&self, heuristic_samples: usize) -> Box<dyn MovementStrategy> {
        match self {
            StrategyKind::Standard => Box::new(Standard),
            StrategyKind::RandomWalk => Box::new(RandomWalk),
            StrategyKind::MaxDirection => Box::new(MaxDirection),
            StrategyKind::WeightedMaxDirection => Box::new(WeightedMaxDirection),
            StrategyKind::GradientAscent => Box::new(GradientAscent::new(heuristic_samples)),
            StrategyKind::PureHeuristic => Box::new(PureHeuristic::new(heuristic_samples)),
            StrategyKind::GradientDescent => Box::new(GradientAscent::without_heuristic()),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform random heading in whole degrees
pub fn random_heading(rng: &mut Pcg32) -> f64 {
    rng.random_range(0..360) as f64
}

/// Sum of probe offsets weighted by their readings, normalized.
///
/// None when the net vector vanishes relative to its terms, e.g. when all
/// three probes read the same.
pub fn weighted_direction(position: Position, readings: &SensorTriangle) -> Option<DVec2> {
    let center = position.as_vec();
    let terms = readings.points().map(|p| (p.truncate() - center) * p.z);
    let net: DVec2 = terms.iter().copied().sum();
    let scale: f64 = terms.iter().map(|t| t.length()).sum();
    if !net.is_finite() || net.length() <= DIRECTION_EPSILON * scale {
        return None;
    }
    net.try_normalize()
}

/// Direction toward the best-looking point on a small circle around the boat.
///
/// The remembered probe points are linearly interpolated onto `samples + 1`
/// points of a circle of the heuristic radius. Points outside the remembered
/// area are skipped. If nothing usable remains or every value agrees to 5
/// decimals, the current direction is kept.
pub fn heuristic_guess(ctx: &DecisionContext<'_>, samples: usize) -> DVec2 {
    let fallback = ctx.direction;
    let interp = LinearInterpolant::new(ctx.history.points());
    if interp.is_empty() {
        return fallback;
    }

    let samples = samples.max(1);
    let radius = ctx.geometry.heuristic_radius();
    let center = ctx.position.as_vec();

    let mut first: Option<f64> = None;
    let mut varied = false;
    let mut best: Option<(f64, DVec2)> = None;
    for i in 0..=samples {
        let t = TAU * i as f64 / samples as f64;
        let point = center + DVec2::new(t.cos(), t.sin()) * radius;
        let value = interp.value(point);
        if value.is_nan() {
            continue;
        }
        let rounded = round_to(value, 5);
        match first {
            None => first = Some(rounded),
            Some(f) if f != rounded => varied = true,
            Some(_) => {}
        }
        if best.is_none_or(|(top, _)| value > top) {
            best = Some((value, point));
        }
    }

    match best {
        Some((_, point)) if varied => (point - center).try_normalize().unwrap_or(fallback),
        _ => fallback,
    }
}

/// Keep going straight; bounce to a random heading at the walls
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

impl MovementStrategy for Standard {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Standard
    }

    fn senses(&self) -> bool {
        false
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut Pcg32) -> Maneuver {
        let candidate = ctx.position.advance(ctx.heading, ctx.speed);
        if ctx.tank.is_in_bounds(candidate, ctx.geometry.distance) {
            Maneuver::Head(ctx.heading)
        } else {
            Maneuver::TurnInPlace(random_heading(rng))
        }
    }
}

/// A new random heading each tick, re-drawn until the step stays in the tank
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWalk;

impl MovementStrategy for RandomWalk {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RandomWalk
    }

    fn senses(&self) -> bool {
        false
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut Pcg32) -> Maneuver {
        let mut angle = random_heading(rng);
        for _ in 1..MAX_REHEADING_ATTEMPTS {
            if ctx.tank.is_in_bounds(ctx.position.advance(angle, ctx.speed), ctx.geometry.distance) {
                return Maneuver::Head(angle);
            }
            angle = random_heading(rng);
        }
        log::warn!(
            "Random walk found no in-bounds heading from {}; leaving it to wall recovery",
            ctx.position
        );
        Maneuver::Head(angle)
    }
}

/// Head for whichever probe reads highest
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDirection;

impl MovementStrategy for MaxDirection {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MaxDirection
    }

    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut Pcg32) -> Maneuver {
        let Some(readings) = ctx.readings else {
            return Maneuver::Steer(ctx.direction);
        };
        // NaN means no signal there
        let values = readings
            .values()
            .map(|v| if v.is_nan() { f64::NEG_INFINITY } else { round_to(v, 10) });
        let top = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bottom = values.iter().copied().fold(f64::INFINITY, f64::min);
        if top == bottom {
            return Maneuver::Steer(ctx.direction);
        }

        let strongest = values.iter().position(|v| *v == top).unwrap_or(0);
        let target = readings.points()[strongest].truncate();
        let direction = (target - ctx.position.as_vec())
            .try_normalize()
            .unwrap_or(ctx.direction);
        Maneuver::Steer(direction)
    }
}

/// Reading-weighted blend of the three probe directions
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMaxDirection;

impl MovementStrategy for WeightedMaxDirection {
    fn kind(&self) -> StrategyKind {
        StrategyKind::WeightedMaxDirection
    }

    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut Pcg32) -> Maneuver {
        let direction = ctx
            .readings
            .and_then(|r| weighted_direction(ctx.position, r))
            .unwrap_or(ctx.direction);
        Maneuver::Steer(direction)
    }
}

/// Steepest ascent of the plane through the three probes.
///
/// With the heuristic on, the plane direction is blended with the history
/// guess, flat planes fall back to the guess, and oscillation between two
/// spots is broken with a random heading. With it off, the boat keeps no
/// history and holds its heading on flat ground.
#[derive(Debug, Clone, Copy)]
pub struct GradientAscent {
    apply_heuristic: bool,
    samples: usize,
}

impl GradientAscent {
    pub fn new(samples: usize) -> Self {
        Self {
            apply_heuristic: true,
            samples,
        }
    }

    pub fn without_heuristic() -> Self {
        Self {
            apply_heuristic: false,
            samples: 0,
        }
    }
}

impl MovementStrategy for GradientAscent {
    fn kind(&self) -> StrategyKind {
        if self.apply_heuristic {
            StrategyKind::GradientAscent
        } else {
            StrategyKind::GradientDescent
        }
    }

    fn history_capacity(&self) -> usize {
        if self.apply_heuristic { GRADIENT_HISTORY } else { 0 }
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut Pcg32) -> Maneuver {
        let Some(readings) = ctx.readings else {
            return Maneuver::Steer(ctx.direction);
        };
        let guess = self
            .apply_heuristic
            .then(|| heuristic_guess(ctx, self.samples));

        let uphill = readings.uphill_normal().truncate().try_normalize();
        let mut direction = match (uphill, guess) {
            (Some(up), Some(guess)) => (up + guess).try_normalize().unwrap_or(up),
            (Some(up), None) => up,
            (None, Some(guess)) => {
                log::debug!("Flat gradient at {}; following the heuristic", ctx.position);
                guess
            }
            // A flat plane means equal readings, which cancel here as well
            (None, None) => weighted_direction(ctx.position, readings).unwrap_or(ctx.direction),
        };

        if self.apply_heuristic && ctx.history.is_oscillating(STUCK_WINDOW) {
            log::debug!("Boat oscillating around {}; picking a random heading", ctx.position);
            direction = heading_vector(random_heading(rng));
        }
        Maneuver::Steer(direction)
    }
}

/// Follow the history heuristic directly.
///
/// Only three triangles are kept, fewer than the oscillation window, so the
/// stuck check never overrides the guess.
#[derive(Debug, Clone, Copy)]
pub struct PureHeuristic {
    samples: usize,
}

impl PureHeuristic {
    pub fn new(samples: usize) -> Self {
        Self { samples }
    }
}

impl MovementStrategy for PureHeuristic {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PureHeuristic
    }

    fn history_capacity(&self) -> usize {
        HEURISTIC_HISTORY
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut Pcg32) -> Maneuver {
        let mut direction = heuristic_guess(ctx, self.samples);
        if ctx.history.is_oscillating(STUCK_WINDOW) {
            log::debug!("Boat oscillating around {}; picking a random heading", ctx.position);
            direction = heading_vector(random_heading(rng));
        }
        Maneuver::Steer(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::{DiffusionField, FieldReader};
    use rand::SeedableRng;

    struct Flat(f64);

    impl FieldReader for Flat {
        fn value_at(&self, _point: DVec2) -> f64 {
            self.0
        }

        fn source_locations(&self) -> &[DVec2] {
            &[]
        }
    }

    fn diffusion_tank(x: f64, y: f64) -> Tank {
        Tank::new(20, 20, Box::new(DiffusionField::new(vec![DVec2::new(x, y)]))).unwrap()
    }

    fn context<'a>(
        tank: &'a Tank,
        geometry: &'a SensorGeometry,
        readings: &'a SensorTriangle,
        history: &'a SensorHistory,
        position: Position,
        heading: f64,
    ) -> DecisionContext<'a> {
        DecisionContext {
            position,
            heading,
            direction: heading_vector(heading),
            speed: 2.0,
            geometry,
            readings: Some(readings),
            history,
            tank,
        }
    }

    fn steer(m: Maneuver) -> DVec2 {
        match m {
            Maneuver::Steer(d) => d,
            other => panic!("expected Steer, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(StrategyKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(kind.build(10).kind(), kind);
        }
        assert_eq!(StrategyKind::from_str("AStar"), Some(StrategyKind::GradientAscent));
        assert_eq!(StrategyKind::from_str("random_walk"), Some(StrategyKind::RandomWalk));
        assert_eq!(StrategyKind::from_str("zigzag"), None);
    }

    #[test]
    fn test_equal_readings_keep_current_heading() {
        let tank = Tank::new(20, 20, Box::new(Flat(0.7))).unwrap();
        let geometry = SensorGeometry::default();
        let pos = Position::new(10.0, 10.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let history = SensorHistory::new(0);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 200.0);
        let mut rng = Pcg32::seed_from_u64(1);

        let weighted = steer(WeightedMaxDirection.decide(&ctx, &mut rng));
        let max = steer(MaxDirection.decide(&ctx, &mut rng));
        assert!((weighted - heading_vector(200.0)).length() < 1e-12);
        assert!((max - heading_vector(200.0)).length() < 1e-12);
    }

    #[test]
    fn test_max_direction_picks_strongest_probe() {
        let tank = diffusion_tank(14.0, 7.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(10.0, 10.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let history = SensorHistory::new(0);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 90.0);
        let mut rng = Pcg32::seed_from_u64(1);

        let dir = steer(MaxDirection.decide(&ctx, &mut rng));
        assert!((dir - heading_vector(-30.0)).length() < 1e-9);
    }

    #[test]
    fn test_weighted_direction_leans_toward_signal() {
        let tank = diffusion_tank(4.0, 10.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(6.0, 10.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let history = SensorHistory::new(0);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 90.0);
        let mut rng = Pcg32::seed_from_u64(1);

        let dir = steer(WeightedMaxDirection.decide(&ctx, &mut rng));
        assert!(dir.x < 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_gradient_points_at_source() {
        let tank = diffusion_tank(5.0, 6.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(5.0, 3.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let history = SensorHistory::new(0);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 0.0);
        let mut rng = Pcg32::seed_from_u64(1);

        let dir = steer(GradientAscent::without_heuristic().decide(&ctx, &mut rng));
        assert!(dir.y > 0.999, "expected +y, got {dir:?}");
    }

    #[test]
    fn test_gradient_ascent_blends_heuristic() {
        let tank = diffusion_tank(8.0, 6.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(5.0, 3.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let mut history = SensorHistory::new(GRADIENT_HISTORY);
        history.push(readings);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 90.0);
        let mut rng = Pcg32::seed_from_u64(1);

        let dir = steer(GradientAscent::new(HEURISTIC_SAMPLES).decide(&ctx, &mut rng));
        // Source is up and to the right
        assert!(dir.x > 0.0 && dir.y > 0.0, "got {dir:?}");
        assert!((dir.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_field_gradient_keeps_heading() {
        let tank = Tank::new(20, 20, Box::new(Flat(0.0))).unwrap();
        let geometry = SensorGeometry::default();
        let pos = Position::new(10.0, 10.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let mut history = SensorHistory::new(GRADIENT_HISTORY);
        history.push(readings);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 45.0);
        let mut rng = Pcg32::seed_from_u64(3);

        let dir = steer(GradientAscent::new(HEURISTIC_SAMPLES).decide(&ctx, &mut rng));
        assert!((dir - heading_vector(45.0)).length() < 1e-12);

        // No heuristic: falls through the weighted sum to the current heading
        let dir = steer(GradientAscent::without_heuristic().decide(&ctx, &mut rng));
        assert!((dir - heading_vector(45.0)).length() < 1e-12);
        assert_eq!(weighted_direction(pos, &readings), None);
    }

    #[test]
    fn test_stuck_boat_gets_random_heading() {
        let tank = diffusion_tank(5.0, 6.0);
        let geometry = SensorGeometry::default();
        let a = Position::new(4.0, 4.0);
        let b = Position::new(6.0, 5.0);

        // Five ticks bouncing a -> b -> a -> b -> a
        let mut history = SensorHistory::new(GRADIENT_HISTORY);
        for i in 0..5 {
            let at = if i % 2 == 0 { a } else { b };
            history.push(SensorTriangle::sample(at, &geometry, &tank));
        }
        assert!(history.is_oscillating(STUCK_WINDOW));

        let readings = *history.last().unwrap();
        let ctx = context(&tank, &geometry, &readings, &history, a, 90.0);

        let mut rng = Pcg32::seed_from_u64(77);
        let mut replay = rng.clone();
        let expected = heading_vector(random_heading(&mut replay));

        let dir = steer(GradientAscent::new(HEURISTIC_SAMPLES).decide(&ctx, &mut rng));
        assert!((dir - expected).length() < 1e-12);

        // Same readings without the back-and-forth follow the slope
        let mut fresh = SensorHistory::new(GRADIENT_HISTORY);
        fresh.push(readings);
        let calm = DecisionContext {
            history: &fresh,
            ..ctx
        };
        let uphill = readings.uphill_normal().truncate().normalize();
        let unstuck = steer(
            GradientAscent::new(HEURISTIC_SAMPLES).decide(&calm, &mut Pcg32::seed_from_u64(77)),
        );
        assert!(unstuck.dot(uphill) > 0.99, "got {unstuck:?}");
    }

    #[test]
    fn test_pure_heuristic_follows_history() {
        let tank = diffusion_tank(10.0, 13.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(10.0, 10.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let mut history = SensorHistory::new(HEURISTIC_HISTORY);
        history.push(readings);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 0.0);
        let mut rng = Pcg32::seed_from_u64(5);

        let dir = steer(PureHeuristic::new(HEURISTIC_SAMPLES).decide(&ctx, &mut rng));
        assert!(dir.y > 0.99, "got {dir:?}");
    }

    #[test]
    fn test_pure_heuristic_never_overrides_on_bounce() {
        let tank = diffusion_tank(5.0, 6.0);
        let geometry = SensorGeometry::default();
        let a = Position::new(4.0, 4.0);
        let b = Position::new(6.0, 5.0);

        // Full history bouncing a -> b -> a, shorter than the stuck window
        let mut history = SensorHistory::new(HEURISTIC_HISTORY);
        for at in [a, b, a] {
            history.push(SensorTriangle::sample(at, &geometry, &tank));
        }
        assert!(history.is_oscillating(HEURISTIC_HISTORY));
        assert!(!history.is_oscillating(STUCK_WINDOW));

        let readings = *history.last().unwrap();
        let ctx = context(&tank, &geometry, &readings, &history, a, 90.0);
        let expected = heuristic_guess(&ctx, HEURISTIC_SAMPLES);
        for seed in 0..4 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let dir = steer(PureHeuristic::new(HEURISTIC_SAMPLES).decide(&ctx, &mut rng));
            assert_eq!(dir, expected);
        }
    }

    #[test]
    fn test_heuristic_without_history_keeps_heading() {
        let tank = diffusion_tank(10.0, 16.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(10.0, 10.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let history = SensorHistory::new(HEURISTIC_HISTORY);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 300.0);
        assert_eq!(heuristic_guess(&ctx, 100), heading_vector(300.0));
    }

    #[test]
    fn test_standard_turns_in_place_at_wall() {
        let tank = diffusion_tank(5.0, 6.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(18.0, 10.0);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let history = SensorHistory::new(0);
        let mut rng = Pcg32::seed_from_u64(9);

        let open = context(&tank, &geometry, &readings, &history, pos, 180.0);
        assert_eq!(Standard.decide(&open, &mut rng), Maneuver::Head(180.0));

        let blocked = context(&tank, &geometry, &readings, &history, pos, 0.0);
        assert!(matches!(Standard.decide(&blocked, &mut rng), Maneuver::TurnInPlace(_)));
    }

    #[test]
    fn test_random_walk_stays_in_bounds() {
        let tank = diffusion_tank(5.0, 6.0);
        let geometry = SensorGeometry::default();
        let pos = Position::new(1.5, 1.5);
        let readings = SensorTriangle::sample(pos, &geometry, &tank);
        let history = SensorHistory::new(0);
        let ctx = context(&tank, &geometry, &readings, &history, pos, 90.0);
        let mut rng = Pcg32::seed_from_u64(11);

        for _ in 0..50 {
            match RandomWalk.decide(&ctx, &mut rng) {
                Maneuver::Head(angle) => {
                    assert!(tank.is_in_bounds(pos.advance(angle, 2.0), geometry.distance));
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}

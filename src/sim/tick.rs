//! Fixed-step run loop
//!
//! Every tick each boat moves once, in list order; then the tank is checked
//! for a found source.

use serde::{Deserialize, Serialize};

use super::state::{RunPhase, Simulation};
use super::visual::Visualizer;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RunOutcome {
    /// A source tile was visited (or the operator ended the run) after `ticks`
    Found { ticks: u64 },
    /// The tick cap ran out first
    CapReached { ticks: u64 },
}

impl RunOutcome {
    pub fn ticks(&self) -> u64 {
        match self {
            RunOutcome::Found { ticks } | RunOutcome::CapReached { ticks } => *ticks,
        }
    }

    pub fn found(&self) -> bool {
        matches!(self, RunOutcome::Found { .. })
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Found { ticks } => write!(f, "found in {ticks} ticks"),
            RunOutcome::CapReached { ticks } => write!(f, "not found within {ticks} ticks"),
        }
    }
}

/// Advance every boat by one step. Returns true once a source is found.
pub fn tick(sim: &mut Simulation) -> bool {
    if sim.phase == RunPhase::Done {
        return true;
    }
    sim.phase = RunPhase::Stepping;

    let Simulation { tank, boats, .. } = sim;
    for boat in boats.iter_mut() {
        boat.update_position(tank);
    }
    sim.ticks += 1;
    log::debug!(
        "Tick {}: {} of {} tiles visited",
        sim.ticks,
        sim.tank.visited_count(),
        sim.tank.tile_count()
    );

    let found = sim.tank.source_found();
    if found {
        sim.phase = RunPhase::Done;
    }
    found
}

/// Step until a source is found or `cap` ticks have elapsed.
///
/// The visualizer sees the starting state and the state after every tick.
/// A source already covered by a start tile ends the run at tick 0.
pub fn run(
    sim: &mut Simulation,
    mut visualizer: Option<&mut dyn Visualizer>,
    cap: Option<u64>,
) -> RunOutcome {
    log::info!(
        "Starting run: {} boat(s), {:?}, seed {}",
        sim.boats.len(),
        sim.boats.first().map(|b| b.kind()),
        sim.rng_state.seed
    );
    if let Some(v) = visualizer.as_deref_mut() {
        v.update(&sim.tank, &sim.boats);
    }

    let outcome = if sim.tank.source_found() {
        sim.phase = RunPhase::Done;
        RunOutcome::Found { ticks: sim.ticks }
    } else {
        sim.phase = RunPhase::Stepping;
        loop {
            if cap.is_some_and(|cap| sim.ticks >= cap) {
                break RunOutcome::CapReached { ticks: sim.ticks };
            }
            let found = tick(sim);
            if let Some(v) = visualizer.as_deref_mut() {
                v.update(&sim.tank, &sim.boats);
            }
            if found {
                break RunOutcome::Found { ticks: sim.ticks };
            }
        }
    };

    if let Some(v) = visualizer.as_deref_mut() {
        v.done();
    }
    log::info!(
        "Run {} ({:.1}% of tank covered)",
        outcome,
        sim.tank.coverage() * 100.0
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::DiffusionField;
    use crate::sim::position::Position;
    use crate::sim::state::FleetConfig;
    use crate::sim::strategy::StrategyKind;
    use crate::sim::tank::Tank;
    use crate::sim::visual::TrajectoryRecorder;
    use glam::DVec2;
    use proptest::prelude::*;

    fn simulation(kind: StrategyKind, starts: &[Position], seed: u64) -> Simulation {
        let field = DiffusionField::new(vec![DVec2::new(5.0, 6.0)]);
        let tank = Tank::new(20, 20, Box::new(field)).unwrap();
        let fleet = FleetConfig {
            kind,
            ..FleetConfig::default()
        };
        Simulation::new(tank, starts, &fleet, seed).unwrap()
    }

    #[test]
    fn test_gradient_ascent_finds_source() {
        for seed in 0..5 {
            let mut sim = simulation(StrategyKind::GradientAscent, &[Position::ORIGIN], seed);
            let outcome = run(&mut sim, None, Some(500));
            assert!(outcome.found(), "seed {seed}: {outcome}");
            assert!(outcome.ticks() > 0);
            assert_eq!(sim.phase, RunPhase::Done);
            assert!(sim.tank.has_visited(5, 6));
        }
    }

    #[test]
    fn test_start_on_source_finishes_immediately() {
        let mut sim = simulation(StrategyKind::Standard, &[Position::new(5.5, 6.5)], 1);
        let mut recorder = TrajectoryRecorder::new();
        let outcome = run(&mut sim, Some(&mut recorder), None);
        assert_eq!(outcome, RunOutcome::Found { ticks: 0 });
        assert_eq!(recorder.frames(), 1);
    }

    #[test]
    fn test_cap_is_reported_distinctly() {
        let mut sim = simulation(StrategyKind::GradientDescent, &[Position::new(15.0, 15.0)], 3);
        let outcome = run(&mut sim, None, Some(1));
        assert_eq!(outcome, RunOutcome::CapReached { ticks: 1 });
        assert_eq!(sim.phase, RunPhase::Stepping);
    }

    #[test]
    fn test_same_seed_same_run() {
        let starts = [Position::ORIGIN, Position::new(15.0, 12.0)];
        let kinds = [
            StrategyKind::Standard,
            StrategyKind::RandomWalk,
            StrategyKind::GradientAscent,
        ];
        for kind in kinds {
            let mut a = simulation(kind, &starts, 7);
            let mut b = simulation(kind, &starts, 7);
            for step in 0..100 {
                assert_eq!(tick(&mut a), tick(&mut b), "{kind} tick {step}");
                assert_eq!(a.snapshots(), b.snapshots(), "{kind} tick {step}");
            }
            assert_eq!(a.ticks, b.ticks);
        }
    }

    #[test]
    fn test_visualizer_does_not_change_run() {
        let mut watched = simulation(StrategyKind::PureHeuristic, &[Position::ORIGIN], 5);
        let mut plain = simulation(StrategyKind::PureHeuristic, &[Position::ORIGIN], 5);
        let mut recorder = TrajectoryRecorder::new();

        let a = run(&mut watched, Some(&mut recorder), Some(60));
        let b = run(&mut plain, None, Some(60));
        assert_eq!(a, b);
        assert_eq!(watched.snapshots(), plain.snapshots());
        assert_eq!(recorder.frames() as u64, a.ticks() + 1);
        assert_eq!(recorder.trajectories()[0][0], Position::ORIGIN);
    }

    #[test]
    fn test_tick_after_done_is_noop() {
        let mut sim = simulation(StrategyKind::GradientAscent, &[Position::ORIGIN], 0);
        let outcome = run(&mut sim, None, Some(500));
        let before = sim.snapshots();
        assert!(tick(&mut sim));
        assert_eq!(sim.ticks, outcome.ticks());
        assert_eq!(sim.snapshots(), before);
    }

    fn any_kind() -> impl Strategy<Value = StrategyKind> {
        prop::sample::select(StrategyKind::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_visited_tiles_only_grow(kind in any_kind(), seed in any::<u64>()) {
            let mut sim = simulation(kind, &[Position::ORIGIN, Position::new(17.0, 3.0)], seed);
            let mut seen: Vec<(i64, i64)> = sim.tank.visited_tiles().collect();
            for _ in 0..25 {
                tick(&mut sim);
                let now: Vec<(i64, i64)> = sim.tank.visited_tiles().collect();
                for tile in &seen {
                    prop_assert!(now.contains(tile));
                }
                for boat in &sim.boats {
                    let (m, n) = boat.position().tile();
                    prop_assert!(sim.tank.has_visited(m, n));
                }
                seen = now;
            }
        }
    }
}

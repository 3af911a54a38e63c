//! Strategy comparison harness
//!
//! Runs the same setup once per strategy. Every run gets a freshly built field
//! and tank, the same boat starts and the same seed, and is capped at the
//! configured comparison tick limit.

use glam::{DVec2, DVec3};
use serde::Serialize;

use super::error::{FieldError, SimError};
use super::field::{FieldReader, sample_grid};
use super::position::Position;
use super::state::Simulation;
use super::strategy::StrategyKind;
use super::tank::Tank;
use super::tick::{RunOutcome, run};
use super::visual::TrajectoryRecorder;
use crate::consts::FIELD_MAP_RESOLUTION;
use crate::settings::SimSettings;

/// One strategy's run
#[derive(Debug, Clone, Serialize)]
pub struct StrategyResult {
    pub kind: StrategyKind,
    pub outcome: RunOutcome,
    /// Fraction of tiles visited when the run ended
    pub coverage: f64,
    /// Per-boat paths, starting positions first
    pub trajectories: Vec<Vec<Position>>,
}

/// Results of every strategy plus a map of the field they searched
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub results: Vec<StrategyResult>,
    pub source_locations: Vec<DVec2>,
    /// (x, y, value) over a regular grid of the tank
    pub field_map: Vec<DVec3>,
}

impl Comparison {
    pub fn result(&self, kind: StrategyKind) -> Option<&StrategyResult> {
        self.results.iter().find(|r| r.kind == kind)
    }
}

/// Compare `kinds` on the field described by `settings`
pub fn compare_strategies(
    settings: &SimSettings,
    kinds: &[StrategyKind],
) -> Result<Comparison, SimError> {
    compare_with(settings, kinds, || settings.build_field())
}

/// Compare `kinds`, calling `make_field` for a fresh field before each run
pub fn compare_with<F>(
    settings: &SimSettings,
    kinds: &[StrategyKind],
    mut make_field: F,
) -> Result<Comparison, SimError>
where
    F: FnMut() -> Result<Box<dyn FieldReader>, FieldError>,
{
    settings.validate()?;
    let starts = settings.starts();

    let map_field = make_field()?;
    let field_map = sample_grid(
        map_field.as_ref(),
        settings.width,
        settings.height,
        FIELD_MAP_RESOLUTION,
    );
    let source_locations = map_field.source_locations().to_vec();

    let mut results = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let tank = Tank::new(settings.width, settings.height, make_field()?)?;
        let mut sim = Simulation::new(tank, &starts, &settings.fleet(kind), settings.seed)?;
        let mut recorder = TrajectoryRecorder::new();
        let outcome = run(&mut sim, Some(&mut recorder), Some(settings.comparison_cap));
        log::info!("{}: {}", kind, outcome);

        results.push(StrategyResult {
            kind,
            outcome,
            coverage: sim.tank.coverage(),
            trajectories: recorder.into_trajectories(),
        });
    }

    Ok(Comparison {
        results,
        source_locations,
        field_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::DiffusionField;

    #[test]
    fn test_compare_runs_every_strategy() {
        let settings = SimSettings::default();
        let comparison = compare_strategies(&settings, &StrategyKind::COMPARED).unwrap();

        assert_eq!(comparison.results.len(), StrategyKind::COMPARED.len());
        for (result, kind) in comparison.results.iter().zip(StrategyKind::COMPARED) {
            assert_eq!(result.kind, kind);
            assert!(result.outcome.ticks() <= 50);
            if !result.outcome.found() {
                assert_eq!(result.outcome, RunOutcome::CapReached { ticks: 50 });
            }
            assert_eq!(
                result.trajectories[0].len() as u64,
                result.outcome.ticks() + 1
            );
            assert_eq!(result.trajectories[0][0], Position::ORIGIN);
        }
        let astar = comparison.result(StrategyKind::GradientAscent).unwrap();
        assert!(astar.outcome.found());
        assert_eq!(comparison.field_map.len(), 75 * 75);
        assert_eq!(comparison.source_locations, vec![DVec2::new(5.0, 6.0)]);
    }

    #[test]
    fn test_each_run_gets_a_fresh_field() {
        let settings = SimSettings::default();
        let mut built = 0;
        let comparison = compare_with(
            &settings,
            &[StrategyKind::RandomWalk, StrategyKind::MaxDirection],
            || {
                built += 1;
                let field: Box<dyn FieldReader> =
                    Box::new(DiffusionField::new(vec![DVec2::new(5.0, 6.0)]));
                Ok(field)
            },
        )
        .unwrap();
        assert_eq!(comparison.results.len(), 2);
        // One for the field map, one per run
        assert_eq!(built, 3);
    }

    #[test]
    fn test_comparison_is_reproducible() {
        let settings = SimSettings {
            seed: 1234,
            ..SimSettings::default()
        };
        let kinds = [StrategyKind::RandomWalk, StrategyKind::PureHeuristic];
        let a = compare_strategies(&settings, &kinds).unwrap();
        let b = compare_strategies(&settings, &kinds).unwrap();
        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.outcome, y.outcome);
            assert_eq!(x.trajectories, y.trajectories);
        }
    }

    #[test]
    fn test_field_errors_surface() {
        let settings = SimSettings::default();
        let err = compare_with(&settings, &[StrategyKind::Standard], || {
            Err(FieldError::DegenerateTriangulation)
        })
        .unwrap_err();
        assert_eq!(err, SimError::Field(FieldError::DegenerateTriangulation));
    }
}

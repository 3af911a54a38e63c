//! Sensor fields: the scalar signal a boat samples at any point of the tank
//!
//! Three sources are supported:
//! - `EmpiricalField`: measured (x, y, z) points, normalized to the tank and
//!   linearly interpolated
//! - `DiffusionField`: unit-variance Gaussian plume summed over fixed sources
//! - `InteractiveField`: an operator supplies each reading and ends the run

use std::cell::RefCell;

use glam::{DVec2, DVec3};

use super::error::FieldError;
use super::interp::LinearInterpolant;
use crate::round_to;

/// Decimals kept when snapping empirical coordinates onto the tank
const EMPIRICAL_DECIMALS: i32 = 5;

/// A scalar signal over tank space
pub trait FieldReader {
    /// Signal strength at `point`. Non-negative for the built-in fields; may
    /// be NaN where the field has no data, which callers treat as no signal.
    fn value_at(&self, point: DVec2) -> f64;

    /// Locations of the signal sources
    fn source_locations(&self) -> &[DVec2];

    /// Externally decided termination, overriding the visited-tile check
    fn termination(&self) -> Option<bool> {
        None
    }
}

/// Analytic diffusion model: `Σ exp(-(Δx² + Δy²) / 2)` over every source
#[derive(Debug, Clone)]
pub struct DiffusionField {
    sources: Vec<DVec2>,
}

impl DiffusionField {
    pub fn new(sources: Vec<DVec2>) -> Self {
        Self { sources }
    }

    /// Kernel contribution of one source at offset (dx, dy)
    #[inline]
    fn kernel(delta: DVec2) -> f64 {
        (-delta.length_squared() / 2.0).exp()
    }
}

impl FieldReader for DiffusionField {
    fn value_at(&self, point: DVec2) -> f64 {
        self.sources.iter().map(|s| Self::kernel(point - *s)).sum()
    }

    fn source_locations(&self) -> &[DVec2] {
        &self.sources
    }
}

/// Measured point cloud rescaled onto the tank and linearly interpolated
#[derive(Debug, Clone)]
pub struct EmpiricalField {
    interpolant: LinearInterpolant,
    sources: Vec<DVec2>,
}

impl EmpiricalField {
    /// Normalize raw measurements onto a `width` x `height` tank.
    ///
    /// x and y are shifted to start at zero and stretched so their maxima hit
    /// the tank edges, then snapped to 5 decimals; z is taken by magnitude.
    /// The single source sits at the strongest reading, rounded to a tile.
    pub fn from_samples(samples: &[DVec3], width: u32, height: u32) -> Result<Self, FieldError> {
        if samples.len() < 3 {
            return Err(FieldError::TooFewSamples {
                min: 3,
                actual: samples.len(),
            });
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(FieldError::NonFiniteSample { index });
        }

        let min = samples
            .iter()
            .fold(DVec2::splat(f64::INFINITY), |acc, s| acc.min(s.truncate()));
        let max_shifted = samples
            .iter()
            .fold(DVec2::ZERO, |acc, s| acc.max(s.truncate() - min));
        if max_shifted.x <= 0.0 {
            return Err(FieldError::DegenerateExtent { axis: 'x' });
        }
        if max_shifted.y <= 0.0 {
            return Err(FieldError::DegenerateExtent { axis: 'y' });
        }

        let scale = DVec2::new(width as f64, height as f64) / max_shifted;
        let normalized: Vec<DVec3> = samples
            .iter()
            .map(|s| {
                let p = (s.truncate() - min) * scale;
                DVec3::new(
                    round_to(p.x, EMPIRICAL_DECIMALS),
                    round_to(p.y, EMPIRICAL_DECIMALS),
                    s.z.abs(),
                )
            })
            .collect();

        // First maximum wins on ties
        let strongest = normalized
            .iter()
            .fold(normalized[0], |best, s| if s.z > best.z { *s } else { best });
        let source = DVec2::new(strongest.x.round_ties_even(), strongest.y.round_ties_even());

        let interpolant = LinearInterpolant::new(normalized);
        if interpolant.is_empty() {
            return Err(FieldError::DegenerateTriangulation);
        }

        log::info!(
            "Empirical field: {} samples, source at ({}, {})",
            samples.len(),
            source.x,
            source.y
        );

        Ok(Self {
            interpolant,
            sources: vec![source],
        })
    }
}

impl FieldReader for EmpiricalField {
    /// Interpolated reading clamped to >= 0; outside the data hull this is 0
    fn value_at(&self, point: DVec2) -> f64 {
        let v = self.interpolant.value(point);
        if v.is_nan() { 0.0 } else { v.max(0.0) }
    }

    fn source_locations(&self) -> &[DVec2] {
        &self.sources
    }
}

/// Stand-in for physical sensors: someone (or something) answers each query
pub trait OperatorConsole {
    /// Reading for a probe at `point`
    fn reading(&mut self, point: DVec2) -> f64;

    /// Whether the operator wants the run to stop
    fn end_requested(&mut self) -> bool;
}

/// Field whose readings and termination come from an `OperatorConsole`
pub struct InteractiveField<C: OperatorConsole> {
    console: RefCell<C>,
    sources: Vec<DVec2>,
}

impl<C: OperatorConsole> InteractiveField<C> {
    pub fn new(console: C, sources: Vec<DVec2>) -> Self {
        Self {
            console: RefCell::new(console),
            sources,
        }
    }

    pub fn into_console(self) -> C {
        self.console.into_inner()
    }
}

impl<C: OperatorConsole> FieldReader for InteractiveField<C> {
    fn value_at(&self, point: DVec2) -> f64 {
        let value = self.console.borrow_mut().reading(point);
        if value.is_finite() {
            value
        } else {
            log::warn!("Operator reading at ({:.2}, {:.2}) is not a number", point.x, point.y);
            f64::NAN
        }
    }

    fn source_locations(&self) -> &[DVec2] {
        &self.sources
    }

    fn termination(&self) -> Option<bool> {
        Some(self.console.borrow_mut().end_requested())
    }
}

/// Evaluate `field` on a `resolution` x `resolution` grid spanning
/// [0, width] x [0, height], returning (x, y, value) triples column by column.
pub fn sample_grid(field: &dyn FieldReader, width: u32, height: u32, resolution: usize) -> Vec<DVec3> {
    let steps = |extent: f64| -> Vec<f64> {
        match resolution {
            0 => Vec::new(),
            1 => vec![0.0],
            n => (0..n).map(|i| extent * i as f64 / (n - 1) as f64).collect(),
        }
    };
    let xs = steps(width as f64);
    let ys = steps(height as f64);

    let mut grid = Vec::with_capacity(xs.len() * ys.len());
    for &x in &xs {
        for &y in &ys {
            let p = DVec2::new(x, y);
            grid.push(DVec3::new(x, y, field.value_at(p)));
        }
    }
    grid
}

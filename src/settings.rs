//! Run settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! default experiment (20x20 tank, one boat in the corner, source at (5, 6)).

use std::path::{Path, PathBuf};

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{
    DiffusionField, EmpiricalField, FieldError, FieldReader, FleetConfig, Position, SimError,
    Simulation, StrategyKind, Tank,
};

/// Failure loading or checking settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings")]
    Invalid(#[from] SimError),
}

/// Where the signal comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldSettings {
    /// Gaussian plume around each source
    Diffusion { sources: Vec<[f64; 2]> },
    /// Measured (x, y, value) points, rescaled onto the tank
    Empirical { samples: Vec<[f64; 3]> },
}

impl Default for FieldSettings {
    fn default() -> Self {
        FieldSettings::Diffusion {
            sources: vec![[5.0, 6.0]],
        }
    }
}

impl FieldSettings {
    /// Build a fresh field for a `width` x `height` tank
    pub fn build(&self, width: u32, height: u32) -> Result<Box<dyn FieldReader>, FieldError> {
        match self {
            FieldSettings::Diffusion { sources } => {
                let sources = sources.iter().map(|&[x, y]| DVec2::new(x, y)).collect();
                Ok(Box::new(DiffusionField::new(sources)))
            }
            FieldSettings::Empirical { samples } => {
                let samples: Vec<DVec3> = samples.iter().map(|&s| DVec3::from_array(s)).collect();
                Ok(Box::new(EmpiricalField::from_samples(&samples, width, height)?))
            }
        }
    }
}

/// Everything needed to set up a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub width: u32,
    pub height: u32,
    /// One boat per start location
    pub starts: Vec<[f64; 2]>,
    pub speed: f64,
    pub strategy: StrategyKind,
    pub seed: u64,
    pub field: FieldSettings,
    /// Points on the heuristic sampling circle
    pub heuristic_samples: usize,
    /// Tick cap for each comparison run
    pub comparison_cap: u64,
    /// Optional tick cap for a single run
    pub max_ticks: Option<u64>,
    /// Log turn geometry for every move
    pub trace_turns: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_TANK_WIDTH,
            height: DEFAULT_TANK_HEIGHT,
            starts: vec![[0.0, 0.0]],
            speed: DEFAULT_BOAT_SPEED,
            strategy: StrategyKind::GradientAscent,
            seed: 42,
            field: FieldSettings::default(),
            heuristic_samples: HEURISTIC_SAMPLES,
            comparison_cap: COMPARISON_TICK_CAP,
            max_ticks: None,
            trace_turns: false,
        }
    }
}

impl SimSettings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check tank size, speed and boat starts
    pub fn validate(&self) -> Result<(), SimError> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidTank {
                width: self.width,
                height: self.height,
            });
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(SimError::InvalidSpeed(self.speed));
        }
        if self.starts.is_empty() {
            return Err(SimError::NoBoats);
        }
        let (w, h) = (self.width as f64, self.height as f64);
        if let Some(&[x, y]) = self
            .starts
            .iter()
            .find(|[x, y]| !(0.0..w).contains(x) || !(0.0..h).contains(y))
        {
            return Err(SimError::StartOutsideTank {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if self.heuristic_samples == 0 {
            return Err(SimError::InvalidHeuristicSamples);
        }
        if matches!(&self.field, FieldSettings::Diffusion { sources } if sources.is_empty()) {
            log::warn!("Diffusion field has no sources; runs only end at a tick cap");
        }
        Ok(())
    }

    pub fn starts(&self) -> Vec<Position> {
        self.starts.iter().map(|&[x, y]| Position::new(x, y)).collect()
    }

    pub fn fleet(&self, kind: StrategyKind) -> FleetConfig {
        FleetConfig {
            kind,
            speed: self.speed,
            heuristic_samples: self.heuristic_samples,
            trace_turns: self.trace_turns,
        }
    }

    pub fn build_field(&self) -> Result<Box<dyn FieldReader>, FieldError> {
        self.field.build(self.width, self.height)
    }

    /// Fresh tank with a fresh field
    pub fn build_tank(&self) -> Result<Tank, SimError> {
        Tank::new(self.width, self.height, self.build_field()?)
    }

    /// Fresh simulation of `kind` on a fresh tank
    pub fn build_simulation(&self, kind: StrategyKind) -> Result<Simulation, SimError> {
        Simulation::new(self.build_tank()?, &self.starts(), &self.fleet(kind), self.seed)
    }
}

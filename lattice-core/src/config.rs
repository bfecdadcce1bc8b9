//! # Configuration Module
//!
//! Settings that shape a lattice: which scheme places ratios, the grid
//! spacing, the radial reference radius and the ratio every reset starts
//! from. Stored as JSON; every field is optional and falls back to its
//! default.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LatticeError, Result};
use crate::ratio::Ratio;
use crate::scheme::SchemeKind;

pub const DEFAULT_GRID_SPACING: f64 = 2.0;
pub const DEFAULT_RADIAL_RADIUS: f64 = 2.0;
pub const DEFAULT_SEED_RATIO: &str = "1/1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub scheme: SchemeKind,
    /// Distance between neighbouring grid points.
    pub grid_spacing: f64,
    /// Radius of the radial reference circle.
    pub radial_radius: f64,
    /// Ratio placed after every reset.
    pub seed_ratio: String,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::default(),
            grid_spacing: DEFAULT_GRID_SPACING,
            radial_radius: DEFAULT_RADIAL_RADIUS,
            seed_ratio: DEFAULT_SEED_RATIO.to_string(),
        }
    }
}

impl LatticeConfig {
    /// Checks that the lengths are usable and the seed parses.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("grid_spacing", self.grid_spacing), ("radial_radius", self.radial_radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LatticeError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        self.seed_ratio
            .parse::<Ratio>()
            .map_err(|e| LatticeError::Config(format!("seed_ratio: {}", e)))?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LatticeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Arguments
    /// * `path` - JSON file to read (e.g., "lattice_config.json")
    ///
    /// # Returns
    /// * `Ok(LatticeConfig)` - Successfully loaded configuration
    /// * `Err(LatticeError)` - File I/O, JSON or validation error
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let config = Self::from_json_str(&data)?;
        info!(target: "config", "loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(json_string.as_bytes())?;
        info!(target: "config", "saved configuration to {}", path.as_ref().display());
        Ok(())
    }
}

use crate::core::catalog::CatalogSet;
use crate::core::model::SectionSpec;
use crate::core::ranges::{RangeError, SkipKey, SkipTable, StepRange};
use crate::engine::evaluator::DesignLimits;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a sweep configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error(transparent)]
    InvalidRange(#[from] RangeError),

    #[error("invalid sweep config: {0}")]
    Invalid(String),
}

/// One `{min, max, step}` triple from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RangeSpec {
    pub(crate) fn to_range(self, name: &str) -> Result<StepRange, RangeError> {
        StepRange::new(name, self.min, self.max, self.step)
    }
}

/// Custom lamination geometry ranges; absent means catalog shapes only.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CustomGeometrySpec {
    pub stack_mm: RangeSpec,
    pub tongue_mm: RangeSpec,
}

/// Current density band applied to every section, in A/mm².
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DensityBand {
    pub min_a_per_mm2: f64,
    pub max_a_per_mm2: f64,
}

/// One value of a skip rule: a number is quantized, a string matched as a
/// label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkipValueSpec {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkipKeySpec {
    pub dimension: String,
    pub value: SkipValueSpec,
}

impl SkipKeySpec {
    fn to_key(&self) -> SkipKey {
        match &self.value {
            SkipValueSpec::Number(n) => SkipKey::numeric(&self.dimension, *n),
            SkipValueSpec::Label(s) => SkipKey::label(&self.dimension, s),
        }
    }
}

/// A suppressed combination: any candidate carrying both values is dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkipRuleSpec {
    pub first: SkipKeySpec,
    pub second: SkipKeySpec,
}

/// Pass thresholds as written in the config file. Missing fields fall back
/// to [`DesignLimits::default`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LimitsSpec {
    pub max_window_fill: f64,
    pub max_total_loss_w: f64,
    pub max_mass_kg: f64,
}

impl Default for LimitsSpec {
    fn default() -> Self {
        let limits = DesignLimits::default();
        Self {
            max_window_fill: limits.max_window_fill,
            max_total_loss_w: limits.max_total_loss_w,
            max_mass_kg: limits.max_mass_kg,
        }
    }
}

impl LimitsSpec {
    pub fn to_limits(self) -> DesignLimits {
        DesignLimits {
            max_window_fill: self.max_window_fill,
            max_total_loss_w: self.max_total_loss_w,
            max_mass_kg: self.max_mass_kg,
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// The complete sweep description, usually loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SweepConfig {
    /// Core material; must have a loss curve in the catalog.
    pub material: String,
    pub flux_density_t: RangeSpec,
    #[serde(default)]
    pub custom_geometry: Option<CustomGeometrySpec>,
    pub sections: Vec<SectionSpec>,
    pub current_density: DensityBand,
    /// Emit every winding-order permutation of each wire combination.
    #[serde(default)]
    pub permute_windings: bool,
    #[serde(default)]
    pub skip: Vec<SkipRuleSpec>,
    #[serde(default)]
    pub limits: LimitsSpec,
    /// Evaluation worker count; zero is clamped to one by the scheduler.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl SweepConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Checks everything that can be checked before a run starts, so range
    /// and section mistakes surface at configure time rather than mid-sweep.
    pub fn validate(&self, catalogs: &CatalogSet) -> Result<(), ConfigError> {
        self.flux_density_t.to_range("flux_density")?;
        if let Some(geometry) = &self.custom_geometry {
            geometry.stack_mm.to_range("stack_mm")?;
            geometry.tongue_mm.to_range("tongue_mm")?;
        }

        if self.sections.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one winding section is required".to_string(),
            ));
        }
        let mut names = HashSet::new();
        for section in &self.sections {
            if section.name.is_empty() {
                return Err(ConfigError::Invalid("empty section name".to_string()));
            }
            if !names.insert(section.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate section name '{}'",
                    section.name
                )));
            }
            if !(section.current_a > 0.0) || !section.current_a.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "section '{}': non-positive current {}",
                    section.name, section.current_a
                )));
            }
            if section.turns == 0 {
                return Err(ConfigError::Invalid(format!(
                    "section '{}': zero turns",
                    section.name
                )));
            }
        }

        let band = self.current_density;
        if !(band.min_a_per_mm2 > 0.0) || band.max_a_per_mm2 < band.min_a_per_mm2 {
            return Err(ConfigError::Invalid(format!(
                "current density band {}..{} A/mm\u{b2} is not a positive interval",
                band.min_a_per_mm2, band.max_a_per_mm2
            )));
        }

        if !catalogs.losses.contains_material(&self.material) {
            return Err(ConfigError::Invalid(format!(
                "no loss curve for core material '{}'",
                self.material
            )));
        }
        Ok(())
    }

    pub fn skip_table(&self) -> SkipTable {
        let mut table = SkipTable::new();
        for rule in &self.skip {
            table.insert(rule.first.to_key(), rule.second.to_key());
        }
        table
    }
}

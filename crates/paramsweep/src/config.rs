//! YAML sweep descriptions.

use std::fs;
use std::path::Path;

use paramsweep_core::{DEFAULT_SEED, Design, Order};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A complete sweep: how to combine the factors, and the factors themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFile {
    #[serde(default)]
    pub design: Design,

    #[serde(default)]
    pub order: Order,

    #[serde(default = "default_replicants")]
    pub replicants: usize,

    /// Visit the rows in a deterministic shuffled order
    #[serde(default)]
    pub shuffle: bool,

    pub factors: Vec<FactorSpec>,
}

fn default_replicants() -> usize {
    1
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// One factor of the sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactorSpec {
    /// `levels` stepped values from `min`
    Range {
        min: f64,
        max: f64,
        levels: usize,
        #[serde(default)]
        step: StepKind,
        /// Step through whole numbers and report them as reals
        #[serde(default)]
        integer: bool,
    },
    /// Whole standard deviations around a mean
    Normal {
        mean: f64,
        stddev: f64,
        levels: usize,
    },
    /// `levels` draws from a seeded distribution
    Random {
        distribution: DistributionSpec,
        levels: usize,
        #[serde(default = "default_seed")]
        seed: u64,
    },
    /// Explicit values
    Values { values: Vec<f64> },
    /// Several factors played one after another
    Concat { factors: Vec<FactorSpec> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    #[default]
    Arithmetic,
    Geometric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistributionSpec {
    Uniform { low: f64, high: f64 },
    Normal { mean: f64, std_dev: f64 },
    LogNormal { mu: f64, sigma: f64 },
    Exponential { lambda: f64 },
}

impl SweepFile {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file = Self::from_yaml(&content).map_err(|e| {
            ConfigError::Parse(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(
            path = %path.display(),
            factors = file.factors.len(),
            "sweep file loaded"
        );
        Ok(file)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = self
            .to_yaml()
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize sweep: {}", e)))?;
        fs::write(path, yaml)
            .map_err(|e| ConfigError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

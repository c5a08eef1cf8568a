//! Command-line front end for paramsweep_core
//!
//! Loads a YAML sweep description, builds the matching core structures and
//! writes the enumerated rows as tab-separated text.

pub mod config;
pub mod logging;
pub mod sweep;

pub use config::{ConfigError, DistributionSpec, FactorSpec, StepKind, SweepFile};
pub use logging::init_logging;
pub use sweep::{Level, Sweep, build_factor};

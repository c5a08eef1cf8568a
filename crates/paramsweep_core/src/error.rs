use std::fmt;

/// Errors raised while constructing or configuring sweep structures.
///
/// The `new` constructors of the primitives treat these as precondition
/// violations and panic; the `try_new` variants hand them back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    /// `min` was not strictly below `max`
    InvalidRange { min: f64, max: f64 },
    /// A geometric range cannot start at or below zero
    NonPositiveMin { min: f64, max: f64 },
    /// The computed step does not make progress for the given policy
    InvalidStep { policy: &'static str, step: f64 },
    /// Level count cannot produce a sequence
    InvalidLevels { levels: usize, reason: &'static str },
    /// A level or step does not fit in the value type
    Overflow { what: &'static str },
    /// Standard deviation must be strictly positive
    InvalidStdDev { stddev: f64 },
    /// Sequence size shares a factor with one of the permutation constants
    NotCoprime { size: usize, a: usize, b: usize },
    /// The number of rows does not fit in `usize`
    TooManyRows { replicants: usize, factors: usize },
    /// A distribution rejected its parameters
    InvalidDistribution { name: &'static str, reason: String },
    /// Combination mode name not recognized
    UnknownDesign(String),
    /// Ordering name not recognized
    UnknownOrder(String),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::InvalidRange { min, max } => {
                write!(f, "the max should be greater than the min (min={min}, max={max})")
            }
            SweepError::NonPositiveMin { min, max } => {
                write!(f, "a geometric range needs a positive min (min={min}, max={max})")
            }
            SweepError::InvalidStep { policy, step } => {
                write!(f, "invalid {policy} step size {step}")
            }
            SweepError::InvalidLevels { levels, reason } => {
                write!(f, "invalid level count {levels}: {reason}")
            }
            SweepError::Overflow { what } => {
                write!(f, "{what} overflows the value type")
            }
            SweepError::InvalidStdDev { stddev } => {
                write!(
                    f,
                    "the standard deviation must be greater than 0 (stddev={stddev})"
                )
            }
            SweepError::NotCoprime { size, a, b } => {
                write!(
                    f,
                    "sequence size {size} must be co-prime with both {a} and {b}"
                )
            }
            SweepError::TooManyRows {
                replicants,
                factors,
            } => write!(
                f,
                "{factors} factors with {replicants} replicants have more rows than can be counted"
            ),
            SweepError::InvalidDistribution { name, reason } => {
                write!(f, "invalid {name} distribution parameters: {reason}")
            }
            SweepError::UnknownDesign(name) => write!(f, "invalid design: {name}"),
            SweepError::UnknownOrder(name) => write!(f, "invalid order: {name}"),
        }
    }
}

impl std::error::Error for SweepError {}

pub type Result<T> = std::result::Result<T, SweepError>;

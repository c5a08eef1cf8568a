//! Parameter sweep generation library
//!
//! This crate enumerates the combinations needed to drive an experiment or a
//! test matrix without materializing them. It provides:
//! - Closed-form factors (stepped ranges, standard-deviation levels, pre-drawn
//!   random values)
//! - Concatenation of factors ([`Factor`]) and value mapping ([`TransformFactor`])
//! - Full factorial and one-at-a-time combination with replication ([`Builder`])
//! - A deterministic shuffled traversal ([`RandomOrder`])
//!
//! Every structure supports forward traversal, random access by linear offset
//! and recovery of the per-factor indices behind any value.
//!
//! ```
//! use paramsweep_core::{Builder, Design, RangeFactor};
//!
//! let sweep = Builder::new((RangeFactor::<i32>::new(1, 3, 3), vec!['x', 'y']))
//!     .with_design(Design::FullFactorial)
//!     .with_replicants(2);
//!
//! assert_eq!(sweep.size(), 12);
//! assert_eq!(sweep.value_at(2), Some((2, 'x')));
//! assert_eq!(sweep.get_parameters(2), Some(vec![1, 0]));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod builder;
pub mod distributions;
pub mod error;
pub mod factor;
pub mod factors;
pub mod primitives;
pub mod random_order;
pub mod sequence;
pub mod transform;

mod position;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use builder::{Builder, BuilderIter, Design, Order, Position};
pub use distributions::{
    DEFAULT_SEED, Distribution, FromParams, RandomNumberGenerator, make_dist,
    make_dist_from_params,
};
pub use error::{Result, SweepError};
pub use factor::{Factor, FactorIter};
pub use factors::Factors;
pub use primitives::{
    Arithmetic, Geometric, NormalFactor, Numeric, RandomFactor, RangeFactor, StepPolicy, Steps,
};
pub use random_order::{RandomOrder, RandomOrderA, RandomOrderIter};
pub use sequence::Sequence;
pub use transform::TransformFactor;

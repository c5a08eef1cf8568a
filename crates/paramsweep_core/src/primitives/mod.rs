//! Closed-form sequence primitives: stepped ranges, standard-deviation
//! levels and pre-drawn random values.

mod normal;
mod numeric;
mod random;
mod range;

pub use normal::NormalFactor;
pub use numeric::Numeric;
pub use random::RandomFactor;
pub use range::{Arithmetic, Geometric, RangeFactor, StepPolicy, Steps};

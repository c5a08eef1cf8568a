use std::cmp::Ordering;

use crate::error::{Result, SweepError};
use crate::sequence::Sequence;

use super::numeric::Numeric;
use super::range::{Arithmetic, Steps};

/// Values at whole standard deviations around a mean:
/// `mean - levels*stddev, ..., mean, ..., mean + levels*stddev`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalFactor<T> {
    mean: T,
    stddev: T,
    levels: usize,
}

impl<T: Numeric> NormalFactor<T> {
    /// Build the factor, panicking if `stddev` is not positive or a level
    /// does not fit in `T`.
    pub fn new(mean: T, stddev: T, levels: usize) -> Self {
        Self::try_new(mean, stddev, levels).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(mean: T, stddev: T, levels: usize) -> Result<Self> {
        if stddev.partial_cmp(&T::zero()) != Some(Ordering::Greater) {
            return Err(SweepError::InvalidStdDev {
                stddev: stddev.to_f64(),
            });
        }
        if levels > (usize::MAX - 1) / 2 {
            return Err(SweepError::InvalidLevels {
                levels,
                reason: "too many levels to count",
            });
        }
        let spread = T::from_usize(levels)
            .and_then(|count| count.checked_mul(stddev))
            .ok_or(SweepError::Overflow {
                what: "the spread around the mean",
            })?;
        if mean.checked_sub(spread).is_none() || mean.checked_add(spread).is_none() {
            return Err(SweepError::Overflow {
                what: "the outermost level",
            });
        }
        tracing::trace!(?mean, ?stddev, levels, "normal factor");
        Ok(Self {
            mean,
            stddev,
            levels,
        })
    }

    pub fn mean(&self) -> T {
        self.mean
    }

    pub fn stddev(&self) -> T {
        self.stddev
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    // both bounds were checked in `try_new`
    fn spread(&self) -> T {
        T::from_usize(self.levels).map_or(T::zero(), |count| count * self.stddev)
    }

    fn start_point(&self) -> T {
        self.mean - self.spread()
    }

    fn end_point(&self) -> T {
        self.spread() + self.mean
    }

    pub fn iter(&self) -> Steps<T, Arithmetic> {
        Steps::new(self.start_point(), self.end_point(), self.stddev)
    }
}

impl<T: Numeric> Sequence for NormalFactor<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.levels * 2 + 1
    }

    fn at(&self, index: usize) -> Option<T> {
        if index >= self.size() {
            return None;
        }
        (0..index).try_fold(self.start_point(), |value, _| value.checked_add(self.stddev))
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter())
    }
}

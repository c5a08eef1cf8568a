use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::error::{Result, SweepError};
use crate::sequence::Sequence;

use super::numeric::Numeric;

/// How a [`RangeFactor`] moves from one level to the next.
pub trait StepPolicy<T: Numeric> {
    const NAME: &'static str;

    fn step_size(min: T, max: T, levels: usize) -> Result<T>;

    /// The value after `current`, or `None` once it leaves the range of `T`.
    fn increment(current: T, step: T) -> Option<T>;

    /// The value `n` steps after `start`, without visiting the ones between.
    fn advance(start: T, step: T, n: usize) -> Option<T>;

    /// Whether `step` makes forward progress.
    fn is_valid(step: T) -> bool;

    fn check_levels(min: T, max: T, levels: usize) -> Result<()> {
        let _ = (min, max);
        if levels == 0 {
            return Err(SweepError::InvalidLevels {
                levels,
                reason: "at least one level is required",
            });
        }
        Ok(())
    }
}

/// Evenly spaced levels: `step = (max - min + 1) / levels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arithmetic;

impl<T: Numeric> StepPolicy<T> for Arithmetic {
    const NAME: &'static str = "arithmetic";

    fn step_size(min: T, max: T, levels: usize) -> Result<T> {
        let count = T::from_usize(levels).ok_or(SweepError::InvalidLevels {
            levels,
            reason: "the level count does not fit in the value type",
        })?;
        let span = max
            .checked_sub(min)
            .and_then(|span| span.checked_add(T::one()))
            .ok_or(SweepError::Overflow {
                what: "the range span",
            })?;
        Ok(span / count)
    }

    fn increment(current: T, step: T) -> Option<T> {
        current.checked_add(step)
    }

    fn advance(start: T, step: T, n: usize) -> Option<T> {
        start.checked_add(step.checked_mul(T::from_usize(n)?)?)
    }

    fn is_valid(step: T) -> bool {
        step > T::zero()
    }
}

/// Levels with a constant ratio: `step = exp(ln(max / min) / (levels - 1))`,
/// rounded for integral types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometric;

impl<T: Numeric> StepPolicy<T> for Geometric {
    const NAME: &'static str = "geometric";

    fn step_size(min: T, max: T, levels: usize) -> Result<T> {
        let ratio = (1.0 / (levels - 1) as f64 * (max.to_f64().ln() - min.to_f64().ln())).exp();
        Ok(T::from_f64(ratio))
    }

    fn increment(current: T, step: T) -> Option<T> {
        current.checked_mul(step)
    }

    fn advance(start: T, step: T, n: usize) -> Option<T> {
        // square and multiply; a square is only taken when a later bit needs it
        let mut value = start;
        let mut base = step;
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                value = value.checked_mul(base)?;
            }
            n >>= 1;
            if n > 0 {
                base = base.checked_mul(base)?;
            }
        }
        Some(value)
    }

    fn is_valid(step: T) -> bool {
        step > T::one() && step.to_f64().is_finite()
    }

    fn check_levels(min: T, max: T, levels: usize) -> Result<()> {
        if levels < 2 {
            return Err(SweepError::InvalidLevels {
                levels,
                reason: "a geometric range needs at least two levels",
            });
        }
        if min <= T::zero() {
            return Err(SweepError::NonPositiveMin {
                min: min.to_f64(),
                max: max.to_f64(),
            });
        }
        Ok(())
    }
}

/// A sequence of `levels` values starting at `min`, each one a policy step
/// away from the previous one.
///
/// Forward traversal stops as soon as a value exceeds `max`, not after
/// `levels` values. With floating point steps the accumulated value can
/// overshoot or undershoot `max`, so the number of values produced by
/// [`RangeFactor::iter`] may differ from [`Sequence::size`] by one. Values are
/// always built by successive increments so the outcome is the same on every
/// run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFactor<T, S = Arithmetic> {
    min: T,
    max: T,
    step: T,
    levels: usize,
    policy: PhantomData<S>,
}

impl<T: Numeric, S: StepPolicy<T>> RangeFactor<T, S> {
    /// Build a range, panicking on invalid parameters.
    pub fn new(min: T, max: T, levels: usize) -> Self {
        Self::try_new(min, max, levels).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(min: T, max: T, levels: usize) -> Result<Self> {
        if min.partial_cmp(&max) != Some(Ordering::Less) {
            return Err(SweepError::InvalidRange {
                min: min.to_f64(),
                max: max.to_f64(),
            });
        }
        S::check_levels(min, max, levels)?;

        let step = S::step_size(min, max, levels)?;
        if !S::is_valid(step) {
            return Err(SweepError::InvalidStep {
                policy: S::NAME,
                step: step.to_f64(),
            });
        }
        if S::advance(min, step, levels - 1).is_none() {
            return Err(SweepError::Overflow {
                what: "the last level",
            });
        }

        tracing::trace!(policy = S::NAME, ?min, ?max, ?step, levels, "range factor");
        Ok(Self {
            min,
            max,
            step,
            levels,
            policy: PhantomData,
        })
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn step_size(&self) -> T {
        self.step
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn iter(&self) -> Steps<T, S> {
        Steps::new(self.min, self.max, self.step)
    }
}

impl<T: Numeric, S: StepPolicy<T>> Sequence for RangeFactor<T, S> {
    type Item = T;

    fn size(&self) -> usize {
        self.levels
    }

    fn at(&self, index: usize) -> Option<T> {
        if index >= self.levels {
            return None;
        }
        (0..index).try_fold(self.min, |value, _| S::increment(value, self.step))
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter())
    }
}

/// Forward traversal of a stepped sequence, ending once a value passes the
/// upper bound or the next value would leave the range of `T`.
#[derive(Debug, Clone)]
pub struct Steps<T, S> {
    current: Option<T>,
    bound: T,
    step: T,
    policy: PhantomData<S>,
}

impl<T: Numeric, S: StepPolicy<T>> Steps<T, S> {
    pub(crate) fn new(start: T, bound: T, step: T) -> Self {
        Self {
            current: Some(start),
            bound,
            step,
            policy: PhantomData,
        }
    }
}

impl<T: Numeric, S: StepPolicy<T>> Iterator for Steps<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.current?;
        if current > self.bound {
            self.current = None;
            return None;
        }
        self.current = S::increment(current, self.step);
        Some(current)
    }
}

impl<T: Numeric, S: StepPolicy<T>> FusedIterator for Steps<T, S> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_integer_range() {
        let range = RangeFactor::<i32>::new(-2, 4, 7);
        assert_eq!(range.step_size(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![-2, -1, 0, 1, 2, 3, 4]);
        assert_eq!(range.at(6), Some(4));
        assert_eq!(range.at(7), None);
    }

    #[test]
    fn test_geometric_integer_range() {
        let range = RangeFactor::<i32, Geometric>::new(2, 16, 4);
        assert_eq!(range.step_size(), 2);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![2, 4, 8, 16]);
        assert_eq!(range.at(3), Some(16));
    }

    #[test]
    fn test_float_range_terminates_on_value() {
        // step = (1 - 0 + 1) / 4 = 0.5, so only three values fit below max
        let range = RangeFactor::<f64>::new(0.0, 1.0, 4);
        assert_eq!(range.size(), 4);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
        // positional access still honours the declared size
        assert_eq!(range.at(3), Some(1.5));
    }

    #[test]
    fn test_positional_access_matches_traversal() {
        let range = RangeFactor::<f64>::new(0.1, 0.9, 9);
        for (i, value) in range.iter().enumerate() {
            assert_eq!(range.at(i).map(f64::to_bits), Some(value.to_bits()));
        }
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(matches!(
            RangeFactor::<i32>::try_new(4, 4, 2),
            Err(SweepError::InvalidRange { .. })
        ));
        assert!(matches!(
            RangeFactor::<i32>::try_new(0, 3, 10),
            Err(SweepError::InvalidStep { policy: "arithmetic", .. })
        ));
        assert!(matches!(
            RangeFactor::<i32>::try_new(0, 3, 0),
            Err(SweepError::InvalidLevels { .. })
        ));
        assert!(matches!(
            RangeFactor::<i32, Geometric>::try_new(2, 3, 4),
            Err(SweepError::InvalidStep { policy: "geometric", .. })
        ));
        assert!(matches!(
            RangeFactor::<f64, Geometric>::try_new(0.0, 3.0, 4),
            Err(SweepError::NonPositiveMin { .. })
        ));
    }

    #[test]
    fn test_traversal_stops_at_the_type_limit() {
        let range = RangeFactor::<u8>::new(0, 250, 5);
        assert_eq!(range.step_size(), 50);
        assert_eq!(
            range.iter().take(20).collect::<Vec<_>>(),
            vec![0, 50, 100, 150, 200, 250]
        );

        let range = RangeFactor::<i8, Geometric>::new(2, 100, 3);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![2, 14, 98]);
    }

    #[test]
    fn test_full_width_range_is_rejected() {
        assert_eq!(
            RangeFactor::<u8>::try_new(0, 255, 2),
            Err(SweepError::Overflow {
                what: "the range span"
            })
        );
        assert!(RangeFactor::<u8>::try_new(0, 254, 2).is_ok());
    }

    #[test]
    fn test_level_count_must_fit_the_value_type() {
        // 300 would truncate to 44 and give a step of 4
        assert!(matches!(
            RangeFactor::<u8>::try_new(0, 200, 300),
            Err(SweepError::InvalidLevels { levels: 300, .. })
        ));
    }

    #[test]
    fn test_last_level_must_fit_the_value_type() {
        // the ratio 15.97 rounds to 16, putting the third level at 256
        assert_eq!(
            RangeFactor::<u8, Geometric>::try_new(1, 255, 3),
            Err(SweepError::Overflow {
                what: "the last level"
            })
        );
    }

    #[test]
    fn test_geometric_advance_matches_increments() {
        let range = RangeFactor::<u64, Geometric>::new(3, 3 * 2u64.pow(20), 21);
        assert_eq!(range.step_size(), 2);
        for n in 0..21 {
            assert_eq!(Geometric::advance(3u64, 2, n), range.at(n));
        }
    }

    #[test]
    #[should_panic(expected = "the max should be greater than the min")]
    fn test_new_panics_on_inverted_bounds() {
        let _ = RangeFactor::<i32>::new(5, 1, 3);
    }
}

//! Deterministic pseudo-random traversal of a sequence.
//!
//! Position `i` of a [`RandomOrder`] reads element `(A + B*i) mod n` of its
//! source. The map is a bijection on `0..n` exactly when `B` is coprime with
//! `n`; requiring `A` coprime with `n` as well keeps the first element away
//! from a fixed offset. No random engine is involved, so two traversals of
//! the same source always agree.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, Sub};

use crate::error::{Result, SweepError};
use crate::sequence::Sequence;

const fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn is_coprime(n: usize, k: usize) -> bool {
    n == 0 || gcd(n, k) == 1
}

/// Source order permuted by `i -> (A + B*i) mod n`.
#[derive(Debug, Clone)]
pub struct RandomOrder<S, const A: usize, const B: usize> {
    source: S,
    size: usize,
}

/// The permutation constants used unless a caller picks its own.
pub type RandomOrderA<S> = RandomOrder<S, 223, 227>;

impl<S: Sequence, const A: usize, const B: usize> RandomOrder<S, A, B> {
    const COPRIME: () = assert!(gcd(A, B) == 1, "A and B must be co-prime");

    /// Wrap `source`, panicking if its size shares a factor with `A` or `B`.
    pub fn new(source: S) -> Self {
        Self::try_new(source).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(source: S) -> Result<Self> {
        let () = Self::COPRIME;
        let size = source.size();
        if !is_coprime(size, A) || !is_coprime(size, B) {
            return Err(SweepError::NotCoprime { size, a: A, b: B });
        }
        tracing::debug!(size, a = A, b = B, "random order validated");
        Ok(Self { source, size })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Source offset read at traversal position `i`.
    pub fn source_index(&self, i: usize) -> Option<usize> {
        if i >= self.size {
            return None;
        }
        let mapped = (A as u128 + B as u128 * i as u128) % self.size as u128;
        Some(mapped as usize)
    }

    pub fn value_at(&self, i: usize) -> Option<S::Item> {
        self.source.at(self.source_index(i)?)
    }

    /// Parameter path of position `i`: the source's own path for the mapped
    /// offset, or the mapped offset itself for a plain source.
    pub fn get_parameters(&self, i: usize) -> Option<Vec<usize>> {
        let mapped = self.source_index(i)?;
        Some(
            self.source
                .parameters(mapped)
                .unwrap_or_else(|| vec![mapped]),
        )
    }

    pub fn begin(&self) -> RandomOrderIter<'_, S, A, B> {
        self.cursor_at(0)
    }

    pub fn end(&self) -> RandomOrderIter<'_, S, A, B> {
        self.cursor_at(self.size)
    }

    pub fn iter(&self) -> RandomOrderIter<'_, S, A, B> {
        self.begin()
    }

    pub fn cursor_at(&self, i: usize) -> RandomOrderIter<'_, S, A, B> {
        RandomOrderIter {
            order: Some(self),
            id: i.min(self.size),
        }
    }
}

impl<S: Sequence, const A: usize, const B: usize> Sequence for RandomOrder<S, A, B> {
    type Item = S::Item;

    fn size(&self) -> usize {
        self.size
    }

    fn at(&self, index: usize) -> Option<S::Item> {
        self.value_at(index)
    }

    fn values(&self) -> Box<dyn Iterator<Item = S::Item> + '_> {
        Box::new(self.iter())
    }

    fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        self.get_parameters(index)
    }
}

impl<'a, S: Sequence, const A: usize, const B: usize> IntoIterator for &'a RandomOrder<S, A, B> {
    type Item = S::Item;
    type IntoIter = RandomOrderIter<'a, S, A, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Random-access cursor over a [`RandomOrder`].
///
/// Cursors are also iterators, so `a.partial_cmp(&b)` resolves to
/// [`Iterator::partial_cmp`]. Use the comparison operators or
/// `PartialOrd::partial_cmp(&a, &b)` to compare positions.
pub struct RandomOrderIter<'a, S, const A: usize, const B: usize> {
    order: Option<&'a RandomOrder<S, A, B>>,
    id: usize,
}

impl<S: Sequence, const A: usize, const B: usize> RandomOrderIter<'_, S, A, B> {
    pub fn is_end(&self) -> bool {
        self.order.is_none_or(|order| self.id >= order.size)
    }

    /// Traversal position, not the source offset.
    pub fn get_id(&self) -> usize {
        self.id
    }

    pub fn value(&self) -> Option<S::Item> {
        self.order?.value_at(self.id)
    }

    pub fn get_parameters(&self) -> Option<Vec<usize>> {
        self.order?.get_parameters(self.id)
    }

    fn same_order(&self, other: &Self) -> bool {
        match (self.order, other.order) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<S, const A: usize, const B: usize> Default for RandomOrderIter<'_, S, A, B> {
    fn default() -> Self {
        Self { order: None, id: 0 }
    }
}

impl<S, const A: usize, const B: usize> Clone for RandomOrderIter<'_, S, A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, const A: usize, const B: usize> Copy for RandomOrderIter<'_, S, A, B> {}

impl<S: Sequence, const A: usize, const B: usize> Iterator for RandomOrderIter<'_, S, A, B> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.is_end() {
            return None;
        }
        let value = self.value();
        self.id += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.order {
            Some(order) => order.size.saturating_sub(self.id),
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<S: Sequence, const A: usize, const B: usize> ExactSizeIterator
    for RandomOrderIter<'_, S, A, B>
{
}

impl<S: Sequence, const A: usize, const B: usize> FusedIterator for RandomOrderIter<'_, S, A, B> {}

impl<S: Sequence, const A: usize, const B: usize> PartialEq for RandomOrderIter<'_, S, A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_end() || other.is_end() {
            return self.is_end() == other.is_end();
        }
        self.same_order(other) && self.id == other.id
    }
}

impl<S: Sequence, const A: usize, const B: usize> PartialOrd for RandomOrderIter<'_, S, A, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_end(), other.is_end()) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (false, false) => self.same_order(other).then(|| self.id.cmp(&other.id)),
        }
    }
}

impl<S: Sequence, const A: usize, const B: usize> Add<usize> for RandomOrderIter<'_, S, A, B> {
    type Output = Self;

    fn add(self, n: usize) -> Self {
        match self.order {
            Some(order) => order.cursor_at(self.id + n),
            None => {
                debug_assert!(n == 0, "cannot move a cursor with no order");
                self
            }
        }
    }
}

impl<S: Sequence, const A: usize, const B: usize> Sub<usize> for RandomOrderIter<'_, S, A, B> {
    type Output = Self;

    fn sub(self, n: usize) -> Self {
        debug_assert!(n <= self.id, "cursor moved before the first element");
        Self {
            order: self.order,
            id: self.id.saturating_sub(n),
        }
    }
}

impl<S: Sequence, const A: usize, const B: usize> Sub for RandomOrderIter<'_, S, A, B> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        self.id as isize - other.id as isize
    }
}

impl<S: Sequence, const A: usize, const B: usize> fmt::Display for RandomOrderIter<'_, S, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = if self.order.is_some() { "set" } else { "null" };
        if self.is_end() {
            write!(f, "Iterator < random_order=({owner}) END>")
        } else {
            write!(f, "Iterator < random_order=({owner}) id={}>", self.id)
        }
    }
}

//! The sequence contract shared by every factor and combinator.
//!
//! A [`Sequence`] is an ordered, fixed-length run of values. Plain containers
//! (`Vec`, arrays, `BTreeSet`, ...) implement it directly so they can be fed to
//! [`Factor`](crate::Factor) and [`Builder`](crate::Builder) without wrapping.
//! Combinators additionally answer [`Sequence::parameters`], which is how a
//! nested sweep reports the path of indices that produced a value.

use std::collections::{BTreeSet, VecDeque};

pub trait Sequence {
    type Item;

    /// Logical number of elements.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Value at a 0-based offset, `None` past the end.
    fn at(&self, index: usize) -> Option<Self::Item>;

    /// Forward traversal.
    ///
    /// The default walks `at(0..size())`. Primitives whose termination is
    /// value-based override this.
    fn values(&self) -> Box<dyn Iterator<Item = Self::Item> + '_> {
        Box::new((0..self.size()).map_while(move |i| self.at(i)))
    }

    /// Originating indices of the element at `index`.
    ///
    /// `None` means this is a plain sequence with no nested structure; callers
    /// then report `index` itself.
    fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        let _ = index;
        None
    }
}

/// Append the parameter slot for `index` within `seq`: its nested path when it
/// is a combinator, otherwise the index itself.
pub(crate) fn push_parameters<S>(seq: &S, index: usize, out: &mut Vec<usize>)
where
    S: Sequence + ?Sized,
{
    match seq.parameters(index) {
        Some(nested) => out.extend(nested),
        None => out.push(index),
    }
}

/// Number of slots `seq` contributes to a flattened parameter path.
pub(crate) fn parameter_width<S>(seq: &S) -> usize
where
    S: Sequence + ?Sized,
{
    seq.parameters(0).map_or(1, |p| p.len())
}

impl<T: Clone> Sequence for [T] {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<T> {
        <[T]>::get(self, index).cloned()
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<T: Clone> Sequence for Vec<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).cloned()
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<T: Clone, const N: usize> Sequence for [T; N] {
    type Item = T;

    fn size(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).cloned()
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<T: Clone> Sequence for VecDeque<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<T> {
        VecDeque::get(self, index).cloned()
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter().cloned())
    }
}

// Sets only offer forward iteration, so random access is linear.
impl<T: Clone + Ord> Sequence for BTreeSet<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<T> {
        self.iter().nth(index).cloned()
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn at(&self, index: usize) -> Option<Self::Item> {
        (**self).at(index)
    }

    fn values(&self) -> Box<dyn Iterator<Item = Self::Item> + '_> {
        (**self).values()
    }

    fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        (**self).parameters(index)
    }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn at(&self, index: usize) -> Option<Self::Item> {
        (**self).at(index)
    }

    fn values(&self) -> Box<dyn Iterator<Item = Self::Item> + '_> {
        (**self).values()
    }

    fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        (**self).parameters(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containers_report_size_and_values() {
        let v = vec![1, 2, 3];
        assert_eq!(v.size(), 3);
        assert_eq!(Sequence::at(&v, 2), Some(3));
        assert_eq!(Sequence::at(&v, 3), None);

        let set: BTreeSet<i32> = [5, 1, 2].into_iter().collect();
        assert_eq!(set.values().collect::<Vec<_>>(), vec![1, 2, 5]);
        assert_eq!(set.at(2), Some(5));

        let arr = [1.5f32, 2.5];
        assert_eq!(arr.size(), 2);
        assert!(arr.parameters(0).is_none());
    }

    #[test]
    fn test_parameter_slot_for_plain_sequence() {
        let v = vec!['a', 'b'];
        let mut out = Vec::new();
        push_parameters(&v, 1, &mut out);
        assert_eq!(out, vec![1]);
        assert_eq!(parameter_width(&v), 1);
    }

    #[test]
    fn test_boxed_and_borrowed_delegate() {
        let v = vec![10, 20];
        let boxed: Box<dyn Sequence<Item = i32>> = Box::new(v.clone());
        assert_eq!(boxed.size(), 2);
        assert_eq!(boxed.at(1), Some(20));

        let borrowed = &v;
        assert_eq!(Sequence::values(&borrowed).collect::<Vec<_>>(), vec![10, 20]);
    }
}

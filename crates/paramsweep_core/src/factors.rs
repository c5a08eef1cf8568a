//! Per-child operations over the factor collection of a [`Builder`](crate::Builder).
//!
//! Tuples give a typed, heterogeneous row (`(i32, f64, char)`); a `Vec` of
//! sequences gives a runtime number of children sharing one value type.

use crate::sequence::{Sequence, push_parameters};

pub trait Factors {
    /// One combination: a value from every child.
    type Item;

    /// Number of children.
    fn count(&self) -> usize;

    fn sizes(&self) -> Vec<usize>;

    /// The row selected by one index per child, `None` if any index is out
    /// of range.
    fn item_at(&self, indices: &[usize]) -> Option<Self::Item>;

    /// Append each child's parameter slot for `indices`, in child order.
    fn parameters_at(&self, indices: &[usize], out: &mut Vec<usize>);
}

impl Factors for () {
    type Item = ();

    fn count(&self) -> usize {
        0
    }

    fn sizes(&self) -> Vec<usize> {
        Vec::new()
    }

    fn item_at(&self, _indices: &[usize]) -> Option<()> {
        Some(())
    }

    fn parameters_at(&self, _indices: &[usize], _out: &mut Vec<usize>) {}
}

macro_rules! impl_factors_tuple {
    ($count:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: Sequence),+> Factors for ($($name,)+) {
            type Item = ($(<$name as Sequence>::Item,)+);

            fn count(&self) -> usize {
                $count
            }

            fn sizes(&self) -> Vec<usize> {
                vec![$(self.$idx.size()),+]
            }

            fn item_at(&self, indices: &[usize]) -> Option<Self::Item> {
                Some(($(self.$idx.at(*indices.get($idx)?)?,)+))
            }

            fn parameters_at(&self, indices: &[usize], out: &mut Vec<usize>) {
                $(push_parameters(&self.$idx, indices[$idx], out);)+
            }
        }
    };
}

impl_factors_tuple!(1; A 0);
impl_factors_tuple!(2; A 0, B 1);
impl_factors_tuple!(3; A 0, B 1, C 2);
impl_factors_tuple!(4; A 0, B 1, C 2, D 3);
impl_factors_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_factors_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_factors_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_factors_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

impl<S: Sequence> Factors for Vec<S> {
    type Item = Vec<S::Item>;

    fn count(&self) -> usize {
        self.len()
    }

    fn sizes(&self) -> Vec<usize> {
        self.iter().map(Sequence::size).collect()
    }

    fn item_at(&self, indices: &[usize]) -> Option<Self::Item> {
        if indices.len() != self.len() {
            return None;
        }
        self.iter()
            .zip(indices)
            .map(|(child, &index)| child.at(index))
            .collect()
    }

    fn parameters_at(&self, indices: &[usize], out: &mut Vec<usize>) {
        for (child, &index) in self.iter().zip(indices) {
            push_parameters(child, index, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Factor;

    #[test]
    fn test_tuple_sizes_and_items() {
        let factors = (vec![1, 2, 3], vec!['a', 'b'], [0.5f64]);
        assert_eq!(factors.count(), 3);
        assert_eq!(factors.sizes(), vec![3, 2, 1]);
        assert_eq!(factors.item_at(&[2, 1, 0]), Some((3, 'b', 0.5)));
        assert_eq!(factors.item_at(&[3, 0, 0]), None);
    }

    #[test]
    fn test_vec_of_boxed_sequences() {
        let factors: Vec<Box<dyn Sequence<Item = i64>>> =
            vec![Box::new(vec![1, 2]), Box::new([7, 8, 9])];
        assert_eq!(factors.sizes(), vec![2, 3]);
        assert_eq!(factors.item_at(&[1, 2]), Some(vec![2, 9]));
        assert_eq!(factors.item_at(&[1]), None);
    }

    #[test]
    fn test_parameters_flatten_nested_children() {
        let nested = crate::factor![vec![1, 2], vec![3]];
        let factors = (vec![10, 20], nested);
        let mut out = Vec::new();
        factors.parameters_at(&[1, 2], &mut out);
        // plain index, then the nested factor's [child, slot, slot]
        assert_eq!(out, vec![1, 1, 0, 0]);

        let empty: Factor<i32> = Factor::new();
        assert_eq!(empty.size(), 0);
    }

    #[test]
    fn test_unit_has_no_children() {
        assert_eq!(().count(), 0);
        assert!(().sizes().is_empty());
    }
}

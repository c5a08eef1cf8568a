//! Tests for cursor behavior
//!
//! These tests verify that:
//! - Cursor distance equals the difference of offsets
//! - Advancing `size()` steps from the start reaches the end
//! - Every end cursor compares equal, including default cursors
//! - Cursors print their owner and position

use std::cmp::Ordering;

use crate::builder::{Builder, BuilderIter, Design};
use crate::factor;
use crate::factor::FactorIter;
use crate::random_order::RandomOrderA;

/// Test `(begin + i) - (begin + j) == i - j` over a replicated sweep
#[test]
fn test_builder_cursor_distance() {
    for design in [Design::FullFactorial, Design::OneAtATime] {
        let builder = Builder::new((vec![1, 2, 3], vec![4, 5, 6]))
            .with_replicants(2)
            .with_design(design);
        let n = builder.size();
        for i in 0..=n {
            for j in 0..=n {
                let distance = (builder.begin() + i) - (builder.begin() + j);
                assert_eq!(distance, i as isize - j as isize);
            }
        }
        assert!(builder.begin() + n == builder.end());
        assert!((builder.end() - n) == builder.begin());
    }
}

/// Test that stepping a cursor one row at a time agrees with jumping to the row
#[test]
fn test_stepping_agrees_with_jumping() {
    let builder = Builder::new((vec![1, 2], vec![3, 4, 5])).with_replicants(3);
    let mut cursor = builder.begin();
    for d in 0..builder.size() {
        let jumped = builder.begin() + d;
        assert!(cursor == jumped);
        assert_eq!(cursor.value(), jumped.value());
        cursor.next();
    }
    assert!(cursor.is_end());
}

/// Test that end cursors compare equal regardless of their owner
#[test]
fn test_end_cursors_are_all_equal() {
    let small = Builder::new((vec![1],));
    let large = Builder::new((vec![1, 2, 3],));
    assert!(small.end() == large.end());
    assert!(small.end() == BuilderIter::default());
    assert!(small.begin() != large.begin());
    assert!(small.begin() != small.end());

    let a = factor![vec![1]];
    let b = factor![vec![2]];
    assert!(a.end() == b.end());
    assert!(FactorIter::<i32>::default() == b.end());
}

/// Test that cursors are ordered by offset within one sweep
#[test]
fn test_cursor_ordering() {
    let builder = Builder::new((vec![1, 2, 3],));
    assert!(builder.begin() < builder.begin() + 1);
    assert!(builder.begin() + 2 < builder.end());
    assert!(builder.end() > builder.begin());

    let other = Builder::new((vec![1, 2, 3],));
    assert_eq!(PartialOrd::partial_cmp(&builder.begin(), &other.begin()), None);
    assert_eq!(
        PartialOrd::partial_cmp(&builder.end(), &other.begin()),
        Some(Ordering::Greater)
    );

    let a = factor![vec![1, 2]];
    let b = factor![vec![1, 2]];
    assert_eq!(PartialOrd::partial_cmp(&a.begin(), &b.begin()), None);
    assert!(a.begin() < a.begin() + 1);

    let shuffled = RandomOrderA::new(vec![1, 2, 3]);
    let again = RandomOrderA::new(vec![1, 2, 3]);
    assert_eq!(PartialOrd::partial_cmp(&shuffled.begin(), &again.begin()), None);
    assert!(shuffled.begin() + 1 < shuffled.end());
}

/// Test that a finished cursor stays finished
#[test]
fn test_end_is_absorbing() {
    let builder = Builder::new((vec![1, 2],));
    let mut cursor = builder.begin();
    assert_eq!(cursor.next(), Some((1,)));
    assert_eq!(cursor.next(), Some((2,)));
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.next(), None);
    assert!(cursor.is_end());
}

/// Test the printed form of builder cursors
#[test]
fn test_builder_cursor_display() {
    assert_eq!(
        BuilderIter::<(Vec<i32>,)>::default().to_string(),
        "Iterator < builder=(null) END>"
    );

    let builder = Builder::new((vec![1, 2, 3], vec![1, 2, 3])).with_replicants(2);
    assert_eq!(
        builder.begin().to_string(),
        "Iterator < builder=(set) replicant=0 indices=[0, 0]>"
    );
    assert_eq!(
        (builder.begin() + 7).to_string(),
        "Iterator < builder=(set) replicant=1 indices=[0, 1]>"
    );
    assert_eq!(builder.end().to_string(), "Iterator < builder=(set) END>");
}

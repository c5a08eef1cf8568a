//! Conversions between linear offsets and multi-dimensional positions.
//!
//! Two layouts are supported:
//!
//! - **Concatenation**: a position is `(child, element)`. Inclusive prefix
//!   sums of the child sizes form a sorted boundary table and the owning
//!   child of offset `d` is the first boundary strictly greater than `d`.
//! - **Product**: a position is a replicate counter plus one index per
//!   child. Full factorial positions are mixed-radix numbers with the
//!   replicate counter as the least-significant digit, then child 0, child 1,
//!   and so on. One-at-a-time positions number the configurations
//!   "all baseline", then each non-baseline level of child 0, then of child 1,
//!   and so on, again with the replicate counter fastest.
//!
//! The `advance_*` functions are the forward-only counterparts used by
//! cursors; they visit positions in the same order the linear mapping counts
//! them.

/// `(child, element)` owning linear offset `d`, or `None` past the end.
pub fn concat_from_linear(d: usize, boundaries: &[usize]) -> Option<(usize, usize)> {
    let child = boundaries.partition_point(|&boundary| boundary <= d);
    if child == boundaries.len() {
        return None;
    }
    let start = if child == 0 { 0 } else { boundaries[child - 1] };
    Some((child, d - start))
}

pub fn concat_to_linear(child: usize, element: usize, boundaries: &[usize]) -> usize {
    let start = if child == 0 { 0 } else { boundaries[child - 1] };
    start + element
}

/// Mixed-radix weights of each child index.
///
/// `boundary[0] = replicants`, `boundary[i] = sizes[i - 1] * boundary[i - 1]`.
pub fn radix_boundaries(replicants: usize, sizes: &[usize]) -> Vec<usize> {
    let mut boundaries = Vec::with_capacity(sizes.len());
    let mut weight = replicants;
    for &size in sizes {
        boundaries.push(weight);
        weight = weight.saturating_mul(size);
    }
    boundaries
}

/// Number of full factorial configurations, or `None` if it does not fit in
/// `usize`.
pub fn full_factorial_configurations(sizes: &[usize]) -> Option<usize> {
    if sizes.is_empty() || sizes.contains(&0) {
        return Some(0);
    }
    sizes
        .iter()
        .try_fold(1usize, |product, &size| product.checked_mul(size))
}

pub fn full_factorial_to_linear(replicant: usize, indices: &[usize], boundaries: &[usize]) -> usize {
    indices
        .iter()
        .zip(boundaries)
        .fold(replicant, |linear, (&index, &weight)| linear + index * weight)
}

/// Replicate counter and per-child indices of linear offset `d`.
///
/// `d` must be below `replicants * full_factorial_configurations(sizes)`.
pub fn full_factorial_from_linear(
    d: usize,
    replicants: usize,
    sizes: &[usize],
) -> (usize, Vec<usize>) {
    debug_assert!(replicants > 0, "no positions exist without replicants");
    let replicant = d % replicants;
    let mut remaining = d / replicants;
    let indices = sizes
        .iter()
        .map(|&size| {
            let index = remaining % size;
            remaining /= size;
            index
        })
        .collect();
    (replicant, indices)
}

/// Number of one-at-a-time configurations: the shared baseline plus every
/// non-baseline level of every child.
///
/// An empty child has no baseline, so any empty child leaves nothing to
/// enumerate.
pub fn one_at_a_time_configurations(sizes: &[usize]) -> Option<usize> {
    if sizes.is_empty() || sizes.contains(&0) {
        return Some(0);
    }
    sizes
        .iter()
        .try_fold(1usize, |total, &size| total.checked_add(size - 1))
}

/// Configuration number of a one-at-a-time index vector.
pub fn one_at_a_time_to_configuration(indices: &[usize], sizes: &[usize]) -> usize {
    let Some(varied) = indices.iter().position(|&index| index != 0) else {
        return 0;
    };
    let preceding: usize = sizes[..varied].iter().map(|&size| size - 1).sum();
    1 + preceding + (indices[varied] - 1)
}

pub fn one_at_a_time_from_configuration(configuration: usize, sizes: &[usize]) -> Vec<usize> {
    let mut indices = vec![0; sizes.len()];
    if configuration == 0 {
        return indices;
    }
    let mut remaining = configuration - 1;
    for (slot, &size) in indices.iter_mut().zip(sizes) {
        let span = size.saturating_sub(1);
        if remaining < span {
            *slot = remaining + 1;
            break;
        }
        remaining -= span;
    }
    indices
}

/// Odometer step: increment child 0 and carry on overflow.
///
/// Returns `true` once the carry propagates past the last child; the indices
/// are then all zero again.
pub fn advance_full_factorial(indices: &mut [usize], sizes: &[usize]) -> bool {
    let mut i = 0;
    while i < sizes.len() {
        indices[i] += 1;
        if indices[i] < sizes[i] {
            return false;
        }
        indices[i] = 0;
        i += 1;
    }
    true
}

/// Move to the next one-at-a-time configuration.
///
/// The varied child is the first one with a nonzero index. When it runs out
/// of levels it returns to baseline and the next child with more than one
/// level starts varying. Returns `true` when no child is left to vary.
pub fn advance_one_at_a_time(indices: &mut [usize], sizes: &[usize]) -> bool {
    let varied = indices.iter().position(|&index| index != 0);
    let next_from = match varied {
        None => 0,
        Some(i) => {
            indices[i] += 1;
            if indices[i] < sizes[i] {
                return false;
            }
            indices[i] = 0;
            i + 1
        }
    };
    match (next_from..sizes.len()).find(|&j| sizes[j] > 1) {
        Some(j) => {
            indices[j] = 1;
            false
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_boundary_lookup() {
        let boundaries = [4, 7];
        assert_eq!(concat_from_linear(0, &boundaries), Some((0, 0)));
        assert_eq!(concat_from_linear(3, &boundaries), Some((0, 3)));
        assert_eq!(concat_from_linear(4, &boundaries), Some((1, 0)));
        assert_eq!(concat_from_linear(6, &boundaries), Some((1, 2)));
        assert_eq!(concat_from_linear(7, &boundaries), None);
        assert_eq!(concat_to_linear(1, 2, &boundaries), 6);
    }

    #[test]
    fn test_concat_skips_empty_children() {
        let boundaries = [0, 2, 2, 3];
        assert_eq!(concat_from_linear(0, &boundaries), Some((1, 0)));
        assert_eq!(concat_from_linear(2, &boundaries), Some((3, 0)));
        for d in 0..3 {
            let (child, element) = concat_from_linear(d, &boundaries).unwrap();
            assert_eq!(concat_to_linear(child, element, &boundaries), d);
        }
    }

    #[test]
    fn test_radix_boundaries() {
        assert_eq!(radix_boundaries(30, &[3, 3]), vec![30, 90]);
        assert_eq!(radix_boundaries(1, &[7, 5, 13]), vec![1, 7, 35]);
        assert!(radix_boundaries(2, &[]).is_empty());
    }

    #[test]
    fn test_full_factorial_round_trip() {
        let sizes = [7, 5, 13];
        let replicants = 3;
        let boundaries = radix_boundaries(replicants, &sizes);
        let total = replicants * full_factorial_configurations(&sizes).unwrap();
        for d in 0..total {
            let (replicant, indices) = full_factorial_from_linear(d, replicants, &sizes);
            assert_eq!(full_factorial_to_linear(replicant, &indices, &boundaries), d);
        }
    }

    #[test]
    fn test_full_factorial_odometer_matches_linear_order() {
        let sizes = [2, 3, 2];
        let boundaries = radix_boundaries(1, &sizes);
        let mut indices = vec![0; 3];
        let mut visited = vec![full_factorial_to_linear(0, &indices, &boundaries)];
        while !advance_full_factorial(&mut indices, &sizes) {
            visited.push(full_factorial_to_linear(0, &indices, &boundaries));
        }
        assert_eq!(visited, (0..12).collect::<Vec<_>>());
        assert_eq!(indices, vec![0, 0, 0]);
    }

    #[test]
    fn test_one_at_a_time_order() {
        let sizes = [3, 3];
        let mut indices = vec![0, 0];
        let mut visited = vec![indices.clone()];
        while !advance_one_at_a_time(&mut indices, &sizes) {
            visited.push(indices.clone());
        }
        assert_eq!(
            visited,
            vec![vec![0, 0], vec![1, 0], vec![2, 0], vec![0, 1], vec![0, 2]]
        );
        assert_eq!(Some(visited.len()), one_at_a_time_configurations(&sizes));
    }

    #[test]
    fn test_one_at_a_time_skips_single_level_children() {
        let sizes = [1, 3, 1, 2];
        let mut indices = vec![0; 4];
        let mut count = 1;
        while !advance_one_at_a_time(&mut indices, &sizes) {
            assert!(indices.iter().zip(&sizes).all(|(i, s)| i < s));
            count += 1;
        }
        assert_eq!(Some(count), one_at_a_time_configurations(&sizes));
        assert_eq!(count, 4);
    }

    #[test]
    fn test_one_at_a_time_round_trip() {
        let sizes = [4, 1, 3, 2];
        let mut indices = vec![0; 4];
        let mut configuration = 0;
        loop {
            assert_eq!(one_at_a_time_to_configuration(&indices, &sizes), configuration);
            assert_eq!(one_at_a_time_from_configuration(configuration, &sizes), indices);
            if advance_one_at_a_time(&mut indices, &sizes) {
                break;
            }
            configuration += 1;
        }
        assert_eq!(Some(configuration + 1), one_at_a_time_configurations(&sizes));
    }

    #[test]
    fn test_configuration_counts() {
        assert_eq!(full_factorial_configurations(&[3, 3]), Some(9));
        assert_eq!(full_factorial_configurations(&[]), Some(0));
        assert_eq!(full_factorial_configurations(&[3, 0]), Some(0));
        assert_eq!(one_at_a_time_configurations(&[3, 3]), Some(5));
        assert_eq!(one_at_a_time_configurations(&[]), Some(0));
        assert_eq!(one_at_a_time_configurations(&[3, 0]), Some(0));
    }

    #[test]
    fn test_configuration_counts_past_usize() {
        let sizes = [usize::MAX / 2, 3];
        assert_eq!(full_factorial_configurations(&sizes), None);
        assert_eq!(one_at_a_time_configurations(&sizes), Some(usize::MAX / 2 + 2));
        assert_eq!(one_at_a_time_configurations(&[usize::MAX, 3]), None);
        // an empty child wins over an overflowing product
        assert_eq!(
            full_factorial_configurations(&[usize::MAX, usize::MAX, 0]),
            Some(0)
        );
        assert_eq!(radix_boundaries(2, &[usize::MAX, 3]), vec![2, usize::MAX]);
    }
}

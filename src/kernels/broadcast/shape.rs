// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Shape Algebra
//!
//! Pure functions over shape vectors. Shapes are right-aligned against each
//! other, with missing leading dimensions treated as `1`.

use crate::enums::error::{NdError, Result};

/// Dimension of `shape` at `offset` positions from the right, or `1` once
/// the shape has run out.
#[inline]
fn aligned_dim(shape: &[usize], offset: usize) -> usize {
    if offset < shape.len() {
        shape[shape.len() - 1 - offset]
    } else {
        1
    }
}

/// Returns true if every right-aligned dimension pair is equal, or one of
/// the pair is `1`.
pub fn is_broadcast_compatible(lhs: &[usize], rhs: &[usize]) -> bool {
    let rank = lhs.len().max(rhs.len());
    (0..rank).all(|i| {
        let (l, r) = (aligned_dim(lhs, i), aligned_dim(rhs, i));
        l == r || l == 1 || r == 1
    })
}

/// Computes the broadcast result shape of `lhs` and `rhs`.
///
/// The result has rank `max(rank(lhs), rank(rhs))` and per aligned position
/// the non-1 dimension of the pair, so `0` against `1` stays `0`. Fails with `IncompatibleShape` carrying
/// both inputs when no such shape exists.
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let rank = lhs.len().max(rhs.len());
    let mut out = vec![1usize; rank];

    for i in 0..rank {
        let (l, r) = (aligned_dim(lhs, i), aligned_dim(rhs, i));
        if l != r && l != 1 && r != 1 {
            return Err(NdError::IncompatibleShape {
                lhs: lhs.to_vec(),
                rhs: rhs.to_vec(),
            });
        }
        out[rank - 1 - i] = if l == 1 { r } else { l };
    }

    Ok(out)
}

/// Product of all dimensions. The empty shape describes a scalar and has
/// size `1`; any zero dimension gives size `0`.
#[inline]
pub fn total_size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Product of all dimensions, or `None` when it overflows `usize`.
#[inline]
pub fn checked_total_size(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Exact shape equality, rank included.
#[inline]
pub fn shapes_equal(lhs: &[usize], rhs: &[usize]) -> bool {
    lhs == rhs
}

/// Row-major strides of `shape`, in elements.
pub fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    let mut acc = 1usize;
    for (i, dim) in shape.iter().enumerate().rev() {
        strides[i] = acc;
        acc *= *dim;
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_shape_table() {
        let cases: &[(&[usize], &[usize], &[usize])] = &[
            (&[2, 3], &[3], &[2, 3]),
            (&[1, 3], &[3], &[1, 3]),
            (&[4, 1, 3], &[1, 3], &[4, 1, 3]),
            (&[3, 4, 5], &[4, 5], &[3, 4, 5]),
            (&[3, 4, 5], &[5], &[3, 4, 5]),
            (&[4, 1], &[1, 6], &[4, 6]),
            (&[], &[2, 2], &[2, 2]),
            (&[0], &[1], &[0]),
            (&[0, 3], &[1, 3], &[0, 3]),
            (&[2, 1], &[0], &[2, 0]),
            (&[1], &[4, 0], &[4, 0]),
        ];
        for (l, r, expected) in cases {
            assert_eq!(broadcast_shape(l, r).unwrap(), expected.to_vec(), "{:?} vs {:?}", l, r);
        }
    }

    #[test]
    fn test_broadcast_shape_incompatible() {
        let err = broadcast_shape(&[2, 3], &[4, 3]).unwrap_err();
        assert_eq!(
            err,
            NdError::IncompatibleShape { lhs: vec![2, 3], rhs: vec![4, 3] }
        );
        assert!(!is_broadcast_compatible(&[2, 3], &[4, 3]));
        assert!(broadcast_shape(&[0], &[3]).is_err());
    }

    #[test]
    fn test_broadcast_shape_symmetric() {
        let shapes: &[&[usize]] = &[&[2, 3], &[3], &[1], &[4, 1, 3], &[1, 1], &[], &[2, 1]];
        for a in shapes {
            for b in shapes {
                assert_eq!(is_broadcast_compatible(a, b), is_broadcast_compatible(b, a));
                if is_broadcast_compatible(a, b) {
                    assert_eq!(broadcast_shape(a, b).unwrap(), broadcast_shape(b, a).unwrap());
                } else {
                    assert!(broadcast_shape(a, b).is_err());
                }
            }
        }
    }

    #[test]
    fn test_total_size() {
        assert_eq!(total_size(&[]), 1);
        assert_eq!(total_size(&[2, 3, 4]), 24);
        assert_eq!(total_size(&[5, 0, 2]), 0);
    }

    #[test]
    fn test_checked_total_size() {
        assert_eq!(checked_total_size(&[]), Some(1));
        assert_eq!(checked_total_size(&[2, 3, 4]), Some(24));
        assert_eq!(checked_total_size(&[1usize << 63, 2]), None);
        assert_eq!(checked_total_size(&[usize::MAX, 0]), Some(0));
        assert_eq!(checked_total_size(&[0, usize::MAX, 2]), Some(0));
        assert_eq!(checked_total_size(&[1usize << 63, 2, 0]), Some(0));
    }

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(row_major_strides(&[7]), vec![1]);
        assert!(row_major_strides(&[]).is_empty());
    }
}

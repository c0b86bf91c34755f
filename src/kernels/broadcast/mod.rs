// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Broadcasting Module
//!
//! NumPy-style, right-aligned broadcasting:
//! - [`shape`] decides whether two shapes combine and what they combine into.
//! - [`index`] maps each result position back to an operand's own storage.
//! - [`broadcast_binary`] is the general path kernel that walks the result
//!   once and reads each operand through its index plan.
//!
//! Equal-shape and scalar fast paths are selected upstream by the routing
//! dispatchers and never reach this module's kernel.

pub mod index;
pub mod shape;

#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;
use vec64::Vec64;

use crate::enums::error::Result;
#[cfg(feature = "parallel_proc")]
use crate::kernels::vector::PARALLEL_THRESHOLD;

pub use index::{BroadcastIndexer, map_index};
pub use shape::{
    broadcast_shape, checked_total_size, is_broadcast_compatible, row_major_strides, shapes_equal,
    total_size,
};

/// Applies `f` across the broadcast of two operands.
///
/// `out_shape` must be the broadcast shape of `lhs_shape` and `rhs_shape`.
/// Result position `i` holds `f(lhs[map(i)], rhs[map(i)])`, with each operand
/// resolved through its own strides.
pub fn broadcast_binary<T, U, F>(
    lhs: &[T],
    lhs_shape: &[usize],
    rhs: &[T],
    rhs_shape: &[usize],
    out_shape: &[usize],
    f: F,
) -> Result<Vec64<U>>
where
    T: Copy + Send + Sync,
    U: Copy + Default + Send + Sync,
    F: Fn(T, T) -> U + Send + Sync,
{
    debug_assert_eq!(lhs.len(), total_size(lhs_shape));
    debug_assert_eq!(rhs.len(), total_size(rhs_shape));

    let lhs_plan = BroadcastIndexer::new(lhs_shape, out_shape)?;
    let rhs_plan = BroadcastIndexer::new(rhs_shape, out_shape)?;
    let n = total_size(out_shape);

    #[cfg(feature = "parallel_proc")]
    {
        if n >= PARALLEL_THRESHOLD {
            let chunk = PARALLEL_THRESHOLD;
            let mut out = vec![U::default(); n];
            out.par_chunks_mut(chunk).enumerate().for_each(|(c, dst)| {
                let start = c * chunk;
                let end = start + dst.len();
                let offsets = lhs_plan.offsets(start, end).zip(rhs_plan.offsets(start, end));
                for (d, (li, ri)) in dst.iter_mut().zip(offsets) {
                    *d = f(lhs[li], rhs[ri]);
                }
            });
            return Ok(Vec64::from(out));
        }
    }

    let out: Vec64<U> = lhs_plan
        .offsets(0, n)
        .zip(rhs_plan.offsets(0, n))
        .map(|(li, ri)| f(lhs[li], rhs[ri]))
        .collect();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_binary_row_vector() {
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [1.0f64, 2.0, 3.0];
        let out_shape = broadcast_shape(&[2, 3], &[3]).unwrap();
        let out = broadcast_binary(&a, &[2, 3], &b, &[3], &out_shape, |x, y| x + y).unwrap();
        assert_eq!(out.as_slice(), &[2.0, 4.0, 6.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_broadcast_binary_outer() {
        // [3, 1] against [1, 2] gives a [3, 2] outer product
        let a = [1.0f64, 2.0, 3.0];
        let b = [10.0f64, 100.0];
        let out_shape = broadcast_shape(&[3, 1], &[1, 2]).unwrap();
        assert_eq!(out_shape, vec![3, 2]);
        let out = broadcast_binary(&a, &[3, 1], &b, &[1, 2], &out_shape, |x, y| x * y).unwrap();
        assert_eq!(out.as_slice(), &[10.0, 100.0, 20.0, 200.0, 30.0, 300.0]);
    }

    #[test]
    fn test_broadcast_binary_zero_sized() {
        let a: [f64; 0] = [];
        let b = [1.0f64, 2.0];
        let out = broadcast_binary(&a, &[0, 2], &b, &[2], &[0, 2], |x, y| x + y).unwrap();
        assert!(out.is_empty());
    }
}

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Broadcast Index Mapper
//!
//! Maps a flat index in a broadcast result back to the flat index of an
//! operand stored in its own, smaller or degenerate, shape.
//!
//! The result index is decomposed into a coordinate vector against the
//! result shape. Each operand then re-derives its native offset from that
//! same coordinate vector using its own row-major strides, with broadcast
//! axes pinned to `0`. Strides are never materialised on the broadcast shape.

use crate::enums::error::{NdError, Result};

/// Fails with `RankMismatch` when `source` has more dimensions than `target`.
#[inline]
pub fn check_rank(source: &[usize], target: &[usize]) -> Result<()> {
    if source.len() > target.len() {
        return Err(NdError::RankMismatch {
            source: source.to_vec(),
            target: target.to_vec(),
        });
    }
    Ok(())
}

/// Maps `flat_index` in `result_shape` to the flat offset in an operand of
/// `source_shape`.
///
/// Requires `rank(source_shape) <= rank(result_shape)`. Missing leading
/// source dimensions are implicitly `1` and always collapse.
pub fn map_index(source_shape: &[usize], result_shape: &[usize], flat_index: usize) -> Result<usize> {
    check_rank(source_shape, result_shape)?;
    Ok(map_index_unchecked(source_shape, result_shape, flat_index))
}

/// `map_index` without the rank check. Callers must have run `check_rank`.
#[inline]
pub(crate) fn map_index_unchecked(source_shape: &[usize], result_shape: &[usize], mut flat_index: usize) -> usize {
    debug_assert!(source_shape.len() <= result_shape.len());

    let lead = result_shape.len() - source_shape.len();
    let mut offset = 0usize;
    let mut stride = 1usize;

    // Fastest-varying dimension first
    for i in (0..result_shape.len()).rev() {
        let result_dim = result_shape[i];
        let coord = if result_dim == 0 { 0 } else { flat_index % result_dim };
        if result_dim != 0 {
            flat_index /= result_dim;
        }

        if i < lead {
            continue;
        }
        let source_dim = source_shape[i - lead];
        let source_coord = if source_dim == 1 && result_dim > 1 { 0 } else { coord };

        offset += source_coord * stride;
        stride *= source_dim;
    }

    offset
}

/// Precomputed index plan for one operand against a broadcast result shape.
///
/// Yields the same offsets as `map_index` for `0..total_size(result)`, in
/// order. Used by the general broadcast kernels to avoid a division per
/// dimension per element.
#[derive(Debug, Clone)]
pub struct BroadcastIndexer {
    /// Result dimensions, left-padded view of the operand included.
    dims: Vec<usize>,
    /// Operand stride per result axis, `0` on collapsed axes.
    strides: Vec<usize>,
}

impl BroadcastIndexer {
    /// Builds the plan, failing with `RankMismatch` like `map_index`.
    pub fn new(source_shape: &[usize], result_shape: &[usize]) -> Result<Self> {
        check_rank(source_shape, result_shape)?;
        let lead = result_shape.len() - source_shape.len();
        let mut strides = vec![0usize; result_shape.len()];
        let mut acc = 1usize;
        for i in (lead..result_shape.len()).rev() {
            let source_dim = source_shape[i - lead];
            strides[i] = if source_dim == 1 && result_shape[i] > 1 { 0 } else { acc };
            acc *= source_dim;
        }
        Ok(Self { dims: result_shape.to_vec(), strides })
    }

    /// Offset of result position `flat_index` in the operand buffer.
    #[inline]
    pub fn offset(&self, mut flat_index: usize) -> usize {
        let mut offset = 0usize;
        for i in (0..self.dims.len()).rev() {
            let dim = self.dims[i];
            if dim == 0 {
                return 0;
            }
            offset += (flat_index % dim) * self.strides[i];
            flat_index /= dim;
        }
        offset
    }

    /// Iterator over offsets for result positions `start..end`.
    pub fn offsets(&self, start: usize, end: usize) -> Offsets<'_> {
        let mut coords = vec![0usize; self.dims.len()];
        let mut rem = start;
        for i in (0..self.dims.len()).rev() {
            let dim = self.dims[i].max(1);
            coords[i] = rem % dim;
            rem /= dim;
        }
        Offsets {
            plan: self,
            coords,
            current: self.offset(start),
            pos: start,
            end,
        }
    }
}

/// Odometer over result coordinates, carrying the operand offset forward
/// incrementally.
pub struct Offsets<'a> {
    plan: &'a BroadcastIndexer,
    coords: Vec<usize>,
    current: usize,
    pos: usize,
    end: usize,
}

impl<'a> Iterator for Offsets<'a> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.pos >= self.end {
            return None;
        }
        let out = self.current;
        self.pos += 1;

        // Advance the odometer
        for i in (0..self.coords.len()).rev() {
            self.coords[i] += 1;
            self.current += self.plan.strides[i];
            if self.coords[i] < self.plan.dims[i] {
                break;
            }
            self.current -= self.plan.strides[i] * self.coords[i];
            self.coords[i] = 0;
        }

        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.pos);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for Offsets<'a> {}

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Aggregate Kernels
//!
//! Whole-array reductions and flat scans.
//!
//! Reductions treat the array as its flat buffer and return a single `f64`,
//! whatever the storage width. Scans run left to right in storage order and
//! keep the input's shape and dtype.
//!
//! ## Empty arrays
//! | op | result |
//! |---|---|
//! | `sum` | `0` |
//! | `prod` | `1` |
//! | `mean`, `min`, `max` | `NaN` |
//! | `any` | `false` |
//! | `all` | `true` |

use log::trace;
use vec64::Vec64;

use crate::NdArray;
use crate::enums::dtype::DType;
use crate::enums::error::{NdError, Result};
use crate::enums::operators::{ReductionOperator, ScanOperator};
use crate::kernels::routing::typed;
use crate::kernels::vector;
use crate::traits::type_unions::Float;

/// Reduces every element of a numeric array to one value.
pub fn reduce(op: ReductionOperator, arr: &NdArray) -> Result<f64> {
    DType::require_numeric(arr.dtype(), op.name())?;
    trace!("reduce {}: {} values ({})", op.name(), arr.len(), arr.dtype());
    match arr.dtype() {
        DType::Float32 => Ok(reduce_typed(op, typed::<f32>(arr)?).to_f64_lossless()),
        _ => Ok(reduce_typed(op, typed::<f64>(arr)?)),
    }
}

#[inline]
fn reduce_typed<T: Float>(op: ReductionOperator, src: &[T]) -> T {
    match op {
        ReductionOperator::Sum => vector::sum(src),
        ReductionOperator::Mean => vector::mean(src),
        ReductionOperator::Min => vector::min(src),
        ReductionOperator::Max => vector::max(src),
        ReductionOperator::Prod => vector::prod(src),
    }
}

/// Cumulative scan into a new array of the same shape and dtype.
pub fn scan(op: ScanOperator, arr: &NdArray) -> Result<NdArray> {
    DType::require_numeric(arr.dtype(), op.name())?;
    match arr.dtype() {
        DType::Float32 => {
            let buf = scan_typed(op, typed::<f32>(arr)?);
            Ok(NdArray::from_parts(arr.shape().to_vec(), f32::into_data(buf)))
        }
        _ => {
            let buf = scan_typed(op, typed::<f64>(arr)?);
            Ok(NdArray::from_parts(arr.shape().to_vec(), f64::into_data(buf)))
        }
    }
}

#[inline]
fn scan_typed<T: Float>(op: ScanOperator, src: &[T]) -> Vec64<T> {
    match op {
        ScanOperator::CumSum => vector::cumsum(src),
        ScanOperator::CumProd => vector::cumprod(src),
    }
}

#[inline]
fn bools<'a>(arr: &'a NdArray, op: &str) -> Result<&'a [bool]> {
    DType::require_bool(arr.dtype(), op)?;
    arr.data().as_bool().ok_or(NdError::TypeMismatch {
        lhs: arr.dtype(),
        rhs: DType::Bool,
        message: None,
    })
}

/// True if any element of a `Bool` array is set.
pub fn any(arr: &NdArray) -> Result<bool> {
    Ok(vector::any(bools(arr, "any")?))
}

/// True if every element of a `Bool` array is set.
pub fn all(arr: &NdArray) -> Result<bool> {
    Ok(vector::all(bools(arr, "all")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reductions_over_flat_buffer() {
        let a = NdArray::from_f64([2, 2], vec![1.0, -2.0, 3.0, -4.0]).unwrap();
        assert_eq!(reduce(ReductionOperator::Sum, &a).unwrap(), -2.0);
        assert_eq!(reduce(ReductionOperator::Prod, &a).unwrap(), 24.0);
        assert_eq!(reduce(ReductionOperator::Mean, &a).unwrap(), -0.5);
        assert_eq!(reduce(ReductionOperator::Min, &a).unwrap(), -4.0);
        assert_eq!(reduce(ReductionOperator::Max, &a).unwrap(), 3.0);
    }

    #[test]
    fn test_float32_reduction_widens_result() {
        let a = NdArray::from_f32([3], vec![0.5, 0.25, 0.25]).unwrap();
        assert_eq!(reduce(ReductionOperator::Sum, &a).unwrap(), 1.0);
    }

    #[test]
    fn test_empty_policy() {
        let e = NdArray::from_f64([0], vec![]).unwrap();
        assert_eq!(reduce(ReductionOperator::Sum, &e).unwrap(), 0.0);
        assert_eq!(reduce(ReductionOperator::Prod, &e).unwrap(), 1.0);
        assert!(reduce(ReductionOperator::Mean, &e).unwrap().is_nan());
        assert!(reduce(ReductionOperator::Max, &e).unwrap().is_nan());
        let p = NdArray::from_bool([0], vec![]).unwrap();
        assert!(!any(&p).unwrap());
        assert!(all(&p).unwrap());
    }

    #[test]
    fn test_scan_keeps_shape() {
        let a = NdArray::from_f32([2, 2], vec![1.0, -2.0, 3.0, -4.0]).unwrap();
        let out = scan(ScanOperator::CumProd, &a).unwrap();
        assert_eq!(out.shape(), &[2, 2]);
        assert_eq!(out.dtype(), DType::Float32);
        assert_eq!(out.as_f32_slice().unwrap(), &[1.0, -2.0, -6.0, 24.0]);
        // input untouched
        assert_eq!(a.as_f32_slice().unwrap(), &[1.0, -2.0, 3.0, -4.0]);
    }

    #[test]
    fn test_kind_checks() {
        let p = NdArray::from_bool([2], vec![true, false]).unwrap();
        let x = NdArray::from_f64([2], vec![1.0, 0.0]).unwrap();
        assert!(matches!(
            reduce(ReductionOperator::Sum, &p),
            Err(NdError::TypeMismatch { .. })
        ));
        assert!(scan(ScanOperator::CumSum, &p).is_err());
        assert!(any(&x).is_err());
        assert!(all(&x).is_err());
        assert!(any(&p).unwrap());
        assert!(!all(&p).unwrap());
    }
}

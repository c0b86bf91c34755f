// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Comparison and Logical Dispatch
//!
//! Comparisons take two numeric arrays and produce a `Bool` array;
//! logical operators take two `Bool` arrays.
//!
//! Unlike arithmetic, both families require identical shapes and fail with
//! `BroadcastUnsupported` otherwise.

use log::trace;
use vec64::Vec64;

use crate::NdArray;
use crate::enums::array_data::ArrayData;
use crate::enums::dtype::DType;
use crate::enums::error::{NdError, Result};
use crate::enums::operators::{ComparisonOperator, LogicalOperator};
use crate::kernels::broadcast::shapes_equal;
use crate::kernels::routing::{typed, widened};
use crate::kernels::vector;

#[inline]
fn require_equal_shapes(op: &'static str, lhs: &NdArray, rhs: &NdArray) -> Result<()> {
    if shapes_equal(lhs.shape(), rhs.shape()) {
        Ok(())
    } else {
        Err(NdError::BroadcastUnsupported {
            op,
            lhs: lhs.shape().to_vec(),
            rhs: rhs.shape().to_vec(),
        })
    }
}

/// Public entry-point for elementwise comparisons.
///
/// - `Float32` with `Float32` compares natively.
/// - Mixed numeric kinds compare in `Float64`.
/// - `Eq` and `Neq` also accept two `Bool` arrays.
pub fn resolve_comparison(op: ComparisonOperator, lhs: &NdArray, rhs: &NdArray) -> Result<NdArray> {
    require_equal_shapes(op.name(), lhs, rhs)?;
    trace!(
        "comparison {}: {:?} ({}) with ({})",
        op,
        lhs.shape(),
        lhs.dtype(),
        rhs.dtype()
    );

    let out = match (lhs.dtype(), rhs.dtype()) {
        (DType::Float32, DType::Float32) => compare_slices(op, typed::<f32>(lhs)?, typed::<f32>(rhs)?),
        (DType::Bool, DType::Bool) if op.accepts_bool() => {
            let (l, r) = (typed_bool(lhs)?, typed_bool(rhs)?);
            match op {
                ComparisonOperator::Eq => vector::eq(l, r),
                _ => vector::neq(l, r),
            }
        }
        (l, r) if l.is_numeric() && r.is_numeric() => {
            let (lw, rw) = (widened(lhs)?, widened(rhs)?);
            compare_slices(op, &lw, &rw)
        }
        (l, r) => {
            return Err(NdError::TypeMismatch {
                lhs: l,
                rhs: r,
                message: Some(format!("'{}' cannot compare these kinds", op)),
            });
        }
    };

    Ok(NdArray::from_parts(lhs.shape().to_vec(), ArrayData::Bool(out)))
}

#[inline]
fn compare_slices<T: PartialOrd + Copy + Send + Sync>(op: ComparisonOperator, l: &[T], r: &[T]) -> Vec64<bool> {
    match op {
        ComparisonOperator::Eq => vector::eq(l, r),
        ComparisonOperator::Neq => vector::neq(l, r),
        ComparisonOperator::Lt => vector::lt(l, r),
        ComparisonOperator::Lte => vector::lte(l, r),
        ComparisonOperator::Gt => vector::gt(l, r),
        ComparisonOperator::Gte => vector::gte(l, r),
    }
}

#[inline]
fn typed_bool(arr: &NdArray) -> Result<&[bool]> {
    arr.data().as_bool().ok_or_else(|| NdError::TypeMismatch {
        lhs: arr.dtype(),
        rhs: DType::Bool,
        message: Some("logical operations require Bool arrays".into()),
    })
}

/// Public entry-point for `And`, `Or` and `Xor`.
pub fn resolve_logical(op: LogicalOperator, lhs: &NdArray, rhs: &NdArray) -> Result<NdArray> {
    require_equal_shapes(op.name(), lhs, rhs)?;
    if lhs.dtype() != DType::Bool || rhs.dtype() != DType::Bool {
        return Err(NdError::TypeMismatch {
            lhs: lhs.dtype(),
            rhs: rhs.dtype(),
            message: Some("logical operations require Bool arrays".into()),
        });
    }
    let (l, r) = (typed_bool(lhs)?, typed_bool(rhs)?);
    let out = match op {
        LogicalOperator::And => vector::and(l, r),
        LogicalOperator::Or => vector::or(l, r),
        LogicalOperator::Xor => vector::xor(l, r),
    };
    Ok(NdArray::from_parts(lhs.shape().to_vec(), ArrayData::Bool(out)))
}

/// Elementwise logical negation of a `Bool` array.
pub fn logical_not(arr: &NdArray) -> Result<NdArray> {
    DType::require_bool(arr.dtype(), "not")?;
    let out = vector::not(typed_bool(arr)?);
    Ok(NdArray::from_parts(arr.shape().to_vec(), ArrayData::Bool(out)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lt_equal_shapes() {
        let a = NdArray::from_f64([4], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = NdArray::from_f64([4], vec![2.0, 2.0, 2.0, 2.0]).unwrap();
        let out = resolve_comparison(ComparisonOperator::Lt, &a, &b).unwrap();
        assert_eq!(out.dtype(), DType::Bool);
        assert_eq!(out.shape(), &[4]);
        assert_eq!(out.as_bool_slice().unwrap(), &[true, false, false, false]);
    }

    #[test]
    fn test_comparison_rejects_unequal_shapes() {
        let a = NdArray::from_f64([2, 2], vec![1.0; 4]).unwrap();
        let b = NdArray::from_f64([2], vec![1.0; 2]).unwrap();
        assert_eq!(
            resolve_comparison(ComparisonOperator::Eq, &a, &b).unwrap_err(),
            NdError::BroadcastUnsupported { op: "eq", lhs: vec![2, 2], rhs: vec![2] }
        );
    }

    #[test]
    fn test_mixed_precision_comparison() {
        let a = NdArray::from_f32([3], vec![0.5, 1.0, 1.5]).unwrap();
        let b = NdArray::from_f64([3], vec![0.5, 2.0, 1.0]).unwrap();
        let out = resolve_comparison(ComparisonOperator::Gte, &a, &b).unwrap();
        assert_eq!(out.as_bool_slice().unwrap(), &[true, false, true]);
    }

    #[test]
    fn test_bool_equality_only() {
        let p = NdArray::from_bool([3], vec![true, false, true]).unwrap();
        let q = NdArray::from_bool([3], vec![true, true, false]).unwrap();
        let eq = resolve_comparison(ComparisonOperator::Eq, &p, &q).unwrap();
        assert_eq!(eq.as_bool_slice().unwrap(), &[true, false, false]);
        assert!(matches!(
            resolve_comparison(ComparisonOperator::Lt, &p, &q),
            Err(NdError::TypeMismatch { .. })
        ));

        let x = NdArray::from_f64([3], vec![1.0, 0.0, 1.0]).unwrap();
        assert!(resolve_comparison(ComparisonOperator::Eq, &p, &x).is_err());
    }

    #[test]
    fn test_logical_ops() {
        let p = NdArray::from_bool([2, 2], vec![true, true, false, false]).unwrap();
        let q = NdArray::from_bool([2, 2], vec![true, false, true, false]).unwrap();
        let and = resolve_logical(LogicalOperator::And, &p, &q).unwrap();
        assert_eq!(and.shape(), &[2, 2]);
        assert_eq!(and.as_bool_slice().unwrap(), &[true, false, false, false]);
        let xor = resolve_logical(LogicalOperator::Xor, &p, &q).unwrap();
        assert_eq!(xor.as_bool_slice().unwrap(), &[false, true, true, false]);
        let not = logical_not(&p).unwrap();
        assert_eq!(not.as_bool_slice().unwrap(), &[false, false, true, true]);
    }

    #[test]
    fn test_logical_type_and_shape_checks() {
        let p = NdArray::from_bool([2], vec![true, false]).unwrap();
        let x = NdArray::from_f64([2], vec![1.0, 0.0]).unwrap();
        assert!(matches!(
            resolve_logical(LogicalOperator::Or, &p, &x),
            Err(NdError::TypeMismatch { .. })
        ));
        let r = NdArray::from_bool([1, 2], vec![true, false]).unwrap();
        assert!(matches!(
            resolve_logical(LogicalOperator::Or, &p, &r),
            Err(NdError::BroadcastUnsupported { .. })
        ));
        assert!(logical_not(&x).is_err());
    }
}

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Arithmetic Dispatch
//!
//! Binary arithmetic with broadcasting and dtype promotion.
//!
//! Path selection, in order:
//! 1. **Equal shape** - operands are combined element for element in storage order.
//! 2. **Scalar rhs** - `rhs` holds one element; it is applied across `lhs`,
//!    and the result takes `lhs`'s shape.
//! 3. **Scalar lhs** - as above with the roles swapped.
//! 4. **Broadcast** - the general path through the index mapper.
//!
//! The scalar-lhs path only has `x + s` and `x * s` kernels to hand, so the two
//! non-commutative operators are rewritten algebraically:
//! `s - x == -(x - s)` and `s / x == s * (1 / x)`.

use log::{debug, trace};
use vec64::Vec64;

use crate::NdArray;
use crate::enums::dtype::DType;
use crate::enums::error::{NdError, Result};
use crate::enums::operators::ArithmeticOperator;
use crate::kernels::broadcast::{broadcast_binary, broadcast_shape, shapes_equal, total_size};
use crate::kernels::routing::{typed, widened};
use crate::kernels::vector;
use crate::traits::type_unions::Float;

/// Kernel path chosen for a pair of operand shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPath {
    EqualShape,
    ScalarRhs,
    ScalarLhs,
    /// General broadcast into the carried result shape.
    Broadcast(Vec<usize>),
}

impl DispatchPath {
    /// Result shape for operands of `lhs` and `rhs` shape under this path.
    pub fn result_shape(&self, lhs: &[usize], rhs: &[usize]) -> Vec<usize> {
        match self {
            DispatchPath::EqualShape | DispatchPath::ScalarRhs => lhs.to_vec(),
            DispatchPath::ScalarLhs => rhs.to_vec(),
            DispatchPath::Broadcast(shape) => shape.clone(),
        }
    }
}

/// Picks the kernel path for two operand shapes.
///
/// Fails with `IncompatibleShape` only when the general path is needed and
/// no broadcast shape exists.
pub fn select_path(lhs: &[usize], rhs: &[usize]) -> Result<DispatchPath> {
    if shapes_equal(lhs, rhs) {
        return Ok(DispatchPath::EqualShape);
    }
    if total_size(rhs) == 1 {
        return Ok(DispatchPath::ScalarRhs);
    }
    if total_size(lhs) == 1 {
        return Ok(DispatchPath::ScalarLhs);
    }
    Ok(DispatchPath::Broadcast(broadcast_shape(lhs, rhs)?))
}

/// Public entry-point for `lhs <op> rhs`.
pub fn resolve_binary_arithmetic(
    op: ArithmeticOperator,
    lhs: &NdArray,
    rhs: &NdArray,
) -> Result<NdArray> {
    let dtype = DType::promote(lhs.dtype(), rhs.dtype())?;
    let path = select_path(lhs.shape(), rhs.shape())?;

    trace!(
        "arithmetic {}: {:?} ({}) with {:?} ({}) via {:?} -> {}",
        op,
        lhs.shape(),
        lhs.dtype(),
        rhs.shape(),
        rhs.dtype(),
        path,
        dtype
    );

    match dtype {
        DType::Float32 => arithmetic_typed::<f32>(
            op,
            typed(lhs)?,
            lhs.shape(),
            typed(rhs)?,
            rhs.shape(),
            path,
        ),
        DType::Float64 => {
            if lhs.dtype() != rhs.dtype() {
                debug!("arithmetic {}: widening Float32 operand to Float64", op);
            }
            let l = widened(lhs)?;
            let r = widened(rhs)?;
            arithmetic_typed::<f64>(op, &l, lhs.shape(), &r, rhs.shape(), path)
        }
        DType::Bool => Err(NdError::TypeMismatch {
            lhs: lhs.dtype(),
            rhs: rhs.dtype(),
            message: Some(format!("'{}' is not defined for Bool arrays", op)),
        }),
    }
}

/// `arr <op> scalar`, keeping `arr`'s dtype.
///
/// The scalar is narrowed to `f32` for `Float32` arrays.
pub fn resolve_scalar_arithmetic(op: ArithmeticOperator, arr: &NdArray, scalar: f64) -> Result<NdArray> {
    DType::require_numeric(arr.dtype(), op.name())?;
    match arr.dtype() {
        DType::Float32 => {
            let buf = scalar_rhs_kernel(op, typed::<f32>(arr)?, f32::cast_from_f64(scalar));
            Ok(NdArray::from_parts(arr.shape().to_vec(), f32::into_data(buf)))
        }
        _ => {
            let buf = scalar_rhs_kernel(op, typed::<f64>(arr)?, scalar);
            Ok(NdArray::from_parts(arr.shape().to_vec(), f64::into_data(buf)))
        }
    }
}

fn arithmetic_typed<T: Float>(
    op: ArithmeticOperator,
    lhs: &[T],
    lhs_shape: &[usize],
    rhs: &[T],
    rhs_shape: &[usize],
    path: DispatchPath,
) -> Result<NdArray> {
    let shape = path.result_shape(lhs_shape, rhs_shape);
    let buf = match path {
        DispatchPath::EqualShape => equal_shape_kernel(op, lhs, rhs),
        DispatchPath::ScalarRhs => scalar_rhs_kernel(op, lhs, rhs[0]),
        DispatchPath::ScalarLhs => scalar_lhs_kernel(op, lhs[0], rhs),
        DispatchPath::Broadcast(ref out_shape) => {
            broadcast_binary(lhs, lhs_shape, rhs, rhs_shape, out_shape, binary_fn::<T>(op))?
        }
    };
    Ok(NdArray::from_parts(shape, T::into_data(buf)))
}

#[inline]
fn binary_fn<T: Float>(op: ArithmeticOperator) -> fn(T, T) -> T {
    match op {
        ArithmeticOperator::Add => |a, b| a + b,
        ArithmeticOperator::Subtract => |a, b| a - b,
        ArithmeticOperator::Multiply => |a, b| a * b,
        ArithmeticOperator::Divide => |a, b| a / b,
    }
}

#[inline]
fn equal_shape_kernel<T: Float>(op: ArithmeticOperator, lhs: &[T], rhs: &[T]) -> Vec64<T> {
    match op {
        ArithmeticOperator::Add => vector::add(lhs, rhs),
        ArithmeticOperator::Subtract => vector::sub(lhs, rhs),
        ArithmeticOperator::Multiply => vector::mul(lhs, rhs),
        ArithmeticOperator::Divide => vector::div(lhs, rhs),
    }
}

#[inline]
fn scalar_rhs_kernel<T: Float>(op: ArithmeticOperator, lhs: &[T], s: T) -> Vec64<T> {
    match op {
        ArithmeticOperator::Add => vector::add_scalar(lhs, s),
        ArithmeticOperator::Subtract => vector::sub_scalar(lhs, s),
        ArithmeticOperator::Multiply => vector::mul_scalar(lhs, s),
        ArithmeticOperator::Divide => vector::div_scalar(lhs, s),
    }
}

#[inline]
fn scalar_lhs_kernel<T: Float>(op: ArithmeticOperator, s: T, rhs: &[T]) -> Vec64<T> {
    match op {
        ArithmeticOperator::Add => vector::add_scalar(rhs, s),
        ArithmeticOperator::Multiply => vector::mul_scalar(rhs, s),
        // s - x == -(x - s)
        ArithmeticOperator::Subtract => {
            let mut out = vector::sub_scalar(rhs, s);
            vector::mul_scalar_inplace(out.as_mut_slice(), -T::one());
            out
        }
        // s / x == s * (1 / x)
        ArithmeticOperator::Divide => {
            let mut out = vector::inv(rhs);
            vector::mul_scalar_inplace(out.as_mut_slice(), s);
            out
        }
    }
}

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # In-place Dispatch
//!
//! Mutates the receiver's existing buffer. Shape and dtype are never changed,
//! and every check runs before the first write so a failed call leaves the
//! receiver exactly as it was.
//!
//! In-place arithmetic does not broadcast: the operand must have the
//! receiver's exact shape and exact dtype.

use log::trace;

use crate::NdArray;
use crate::enums::dtype::DType;
use crate::enums::error::{NdError, Result};
use crate::enums::operators::{ArithmeticOperator, ScanOperator, UnaryOperator};
use crate::kernels::broadcast::shapes_equal;
use crate::kernels::routing::typed;
use crate::kernels::vector;
use crate::traits::type_unions::Float;

#[inline]
fn typed_mut<T: Float>(arr: &mut NdArray) -> Result<&mut [T]> {
    let dtype = arr.dtype();
    T::slice_mut(arr.data_mut()).ok_or(NdError::TypeMismatch {
        lhs: dtype,
        rhs: T::DTYPE,
        message: None,
    })
}

/// `dst <op>= src` for two arrays of identical shape and dtype.
pub fn resolve_inplace_arithmetic(op: ArithmeticOperator, dst: &mut NdArray, src: &NdArray) -> Result<()> {
    if !shapes_equal(dst.shape(), src.shape()) {
        return Err(NdError::ShapeMismatch {
            expected: dst.shape().to_vec(),
            found: src.shape().to_vec(),
            message: Some(format!("in-place '{}' requires identical shapes", op)),
        });
    }
    DType::require_inplace(dst.dtype(), src.dtype())?;
    trace!("in-place {}: {:?} ({})", op, dst.shape(), dst.dtype());

    match dst.dtype() {
        DType::Float32 => inplace_typed::<f32>(op, typed_mut(dst)?, typed(src)?),
        _ => inplace_typed::<f64>(op, typed_mut(dst)?, typed(src)?),
    }
    Ok(())
}

#[inline]
fn inplace_typed<T: Float>(op: ArithmeticOperator, dst: &mut [T], src: &[T]) {
    match op {
        ArithmeticOperator::Add => vector::add_inplace(dst, src),
        ArithmeticOperator::Subtract => vector::sub_inplace(dst, src),
        ArithmeticOperator::Multiply => vector::mul_inplace(dst, src),
        ArithmeticOperator::Divide => vector::div_inplace(dst, src),
    }
}

/// `dst <op>= scalar`, narrowing the scalar to `f32` for `Float32` receivers.
pub fn resolve_scalar_inplace(op: ArithmeticOperator, dst: &mut NdArray, scalar: f64) -> Result<()> {
    DType::require_numeric(dst.dtype(), op.name())?;
    match dst.dtype() {
        DType::Float32 => scalar_inplace_typed(op, typed_mut::<f32>(dst)?, f32::cast_from_f64(scalar)),
        _ => scalar_inplace_typed(op, typed_mut::<f64>(dst)?, scalar),
    }
    Ok(())
}

#[inline]
fn scalar_inplace_typed<T: Float>(op: ArithmeticOperator, dst: &mut [T], s: T) {
    match op {
        ArithmeticOperator::Add => vector::add_scalar_inplace(dst, s),
        ArithmeticOperator::Subtract => vector::sub_scalar_inplace(dst, s),
        ArithmeticOperator::Multiply => vector::mul_scalar_inplace(dst, s),
        ArithmeticOperator::Divide => vector::div_scalar_inplace(dst, s),
    }
}

/// Applies a unary operator over the receiver's buffer.
pub fn resolve_unary_inplace(op: UnaryOperator, dst: &mut NdArray) -> Result<()> {
    DType::require_numeric(dst.dtype(), op.name())?;
    match dst.dtype() {
        DType::Float32 => unary_inplace_typed(op, typed_mut::<f32>(dst)?),
        _ => unary_inplace_typed(op, typed_mut::<f64>(dst)?),
    }
    Ok(())
}

#[inline]
fn unary_inplace_typed<T: Float>(op: UnaryOperator, dst: &mut [T]) {
    match op {
        UnaryOperator::Abs => vector::abs_inplace(dst),
        UnaryOperator::Neg => vector::neg_inplace(dst),
        UnaryOperator::Sqrt => vector::sqrt_inplace(dst),
        UnaryOperator::Round => vector::round_inplace(dst),
        UnaryOperator::Floor => vector::floor_inplace(dst),
        UnaryOperator::Ceil => vector::ceil_inplace(dst),
        UnaryOperator::Inv => vector::inv_inplace(dst),
    }
}

/// Flat cumulative scan over the receiver's buffer in storage order.
pub fn resolve_scan_inplace(op: ScanOperator, dst: &mut NdArray) -> Result<()> {
    DType::require_numeric(dst.dtype(), op.name())?;
    match dst.dtype() {
        DType::Float32 => scan_inplace_typed(op, typed_mut::<f32>(dst)?),
        _ => scan_inplace_typed(op, typed_mut::<f64>(dst)?),
    }
    Ok(())
}

#[inline]
fn scan_inplace_typed<T: Float>(op: ScanOperator, dst: &mut [T]) {
    match op {
        ScanOperator::CumSum => vector::cumsum_inplace(dst),
        ScanOperator::CumProd => vector::cumprod_inplace(dst),
    }
}

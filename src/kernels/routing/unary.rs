// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Unary Dispatch
//!
//! Shape and dtype preserving elementwise operators, plus the custom
//! function hook.

use log::{debug, trace};
use vec64::Vec64;

use crate::NdArray;
use crate::enums::dtype::DType;
use crate::enums::error::Result;
use crate::enums::operators::UnaryOperator;
use crate::kernels::routing::typed;
use crate::kernels::vector;
use crate::traits::type_unions::Float;

/// Public entry-point for unary operators. The result keeps `arr`'s
/// shape and dtype.
pub fn resolve_unary(op: UnaryOperator, arr: &NdArray) -> Result<NdArray> {
    DType::require_numeric(arr.dtype(), op.name())?;
    trace!("unary {}: {:?} ({})", op, arr.shape(), arr.dtype());
    match arr.dtype() {
        DType::Float32 => {
            let buf = unary_typed(op, typed::<f32>(arr)?);
            Ok(NdArray::from_parts(arr.shape().to_vec(), f32::into_data(buf)))
        }
        _ => {
            let buf = unary_typed(op, typed::<f64>(arr)?);
            Ok(NdArray::from_parts(arr.shape().to_vec(), f64::into_data(buf)))
        }
    }
}

#[inline]
fn unary_typed<T: Float>(op: UnaryOperator, src: &[T]) -> Vec64<T> {
    match op {
        UnaryOperator::Abs => vector::abs(src),
        UnaryOperator::Neg => vector::neg(src),
        UnaryOperator::Sqrt => vector::sqrt(src),
        UnaryOperator::Round => vector::round(src),
        UnaryOperator::Floor => vector::floor(src),
        UnaryOperator::Ceil => vector::ceil(src),
        UnaryOperator::Inv => vector::inv(src),
    }
}

/// Replaces every element `x` with `f(x)`.
///
/// `f` works in `f64`, so a `Float32` receiver is first promoted to
/// `Float64`. This is the one in-place operation allowed to change dtype.
pub fn apply_custom<F>(arr: &mut NdArray, f: F) -> Result<()>
where
    F: Fn(f64) -> f64,
{
    DType::require_numeric(arr.dtype(), "apply")?;
    if arr.dtype() == DType::Float32 {
        debug!("apply: promoting Float32 array {:?} to Float64", arr.shape());
        arr.data_mut().promote_to_f64();
    }
    if let Some(buf) = arr.data_mut().as_f64_mut() {
        for x in buf.iter_mut() {
            *x = f(*x);
        }
    }
    Ok(())
}

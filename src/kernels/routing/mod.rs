// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Routing Module
//!
//! Operation dispatchers. Each resolves dtypes and shapes for one family of
//! operators, picks a kernel path, and wraps the kernel output in a new
//! `NdArray` (or writes it back for in-place operations).

pub mod arithmetic;
pub mod compare;
pub mod inplace;
pub mod unary;

use std::borrow::Cow;

use crate::NdArray;
use crate::enums::dtype::DType;
use crate::enums::error::{NdError, Result};
use crate::traits::type_unions::Float;

/// Borrows the native buffer of `arr` as `T`.
#[inline]
pub(crate) fn typed<T: Float>(arr: &NdArray) -> Result<&[T]> {
    T::slice(arr.data()).ok_or_else(|| NdError::TypeMismatch {
        lhs: arr.dtype(),
        rhs: T::DTYPE,
        message: None,
    })
}

/// Numeric buffer of `arr` widened to `f64`, borrowed when already `Float64`.
#[inline]
pub(crate) fn widened(arr: &NdArray) -> Result<Cow<'_, [f64]>> {
    arr.data().to_f64().ok_or_else(|| NdError::TypeMismatch {
        lhs: arr.dtype(),
        rhs: DType::Float64,
        message: Some("Bool arrays cannot be widened to Float64".into()),
    })
}

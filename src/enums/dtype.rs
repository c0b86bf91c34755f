//! # DType Module
//!
//! Closed set of element kinds an `NdArray` can carry, and the promotion
//! policy applied when two operands meet in a binary operation.

use std::fmt;

use crate::enums::error::{NdError, Result};

/// Element kind tag.
///
/// `Float64` and `Float32` are numeric and support arithmetic, comparison
/// and reduction. `Bool` only supports logical operators and the `any`/`all`
/// predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float64,
    Float32,
    Bool,
}

impl DType {
    /// Returns true for the kinds that support arithmetic.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Float64 | DType::Float32)
    }

    /// Returns the dtype name as a static string
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            DType::Float64 => "Float64",
            DType::Float32 => "Float32",
            DType::Bool => "Bool",
        }
    }

    /// Resolves the result kind of a binary numeric operation.
    ///
    /// - `Float32` with `Float32` stays `Float32`.
    /// - Any `Float64` operand widens the result to `Float64`.
    /// - `Bool` on either side is rejected.
    pub fn promote(lhs: DType, rhs: DType) -> Result<DType> {
        match (lhs, rhs) {
            (DType::Float32, DType::Float32) => Ok(DType::Float32),
            (DType::Float64, DType::Float64)
            | (DType::Float64, DType::Float32)
            | (DType::Float32, DType::Float64) => Ok(DType::Float64),
            _ => Err(NdError::TypeMismatch {
                lhs,
                rhs,
                message: Some("Bool arrays cannot take part in numeric operations".into()),
            }),
        }
    }

    /// In-place operations never change the receiver's storage width, so
    /// the operand must carry exactly the receiver's numeric kind.
    pub fn require_inplace(receiver: DType, operand: DType) -> Result<()> {
        if !receiver.is_numeric() || !operand.is_numeric() {
            return Err(NdError::TypeMismatch {
                lhs: receiver,
                rhs: operand,
                message: Some("in-place arithmetic requires numeric arrays".into()),
            });
        }
        if receiver != operand {
            return Err(NdError::TypeMismatch {
                lhs: receiver,
                rhs: operand,
                message: Some("in-place operations require identical dtypes".into()),
            });
        }
        Ok(())
    }

    /// Checks a single operand is numeric.
    pub fn require_numeric(dtype: DType, op: &str) -> Result<()> {
        if dtype.is_numeric() {
            Ok(())
        } else {
            Err(NdError::TypeMismatch {
                lhs: dtype,
                rhs: DType::Float64,
                message: Some(format!("'{}' requires a numeric array", op)),
            })
        }
    }

    /// Checks a single operand is boolean.
    pub fn require_bool(dtype: DType, op: &str) -> Result<()> {
        if dtype == DType::Bool {
            Ok(())
        } else {
            Err(NdError::TypeMismatch {
                lhs: dtype,
                rhs: DType::Bool,
                message: Some(format!("'{}' requires a Bool array", op)),
            })
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

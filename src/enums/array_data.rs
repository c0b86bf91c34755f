//! # ArrayData Module
//!
//! Tagged buffer union backing every `NdArray`.
//!
//! Each variant owns a 64-byte aligned `Vec64` of exactly one element kind.
//! Conversions between kinds are defined here once, so kernels and
//! dispatchers never re-implement widening at the call site.

use std::borrow::Cow;
use std::fmt;

use vec64::Vec64;

use crate::enums::dtype::DType;

/// Closed set of owned element buffers.
#[derive(Clone)]
pub enum ArrayData {
    Float64(Vec64<f64>),
    Float32(Vec64<f32>),
    Bool(Vec64<bool>),
}

impl ArrayData {
    /// Element kind of the buffer.
    #[inline]
    pub fn dtype(&self) -> DType {
        match self {
            ArrayData::Float64(_) => DType::Float64,
            ArrayData::Float32(_) => DType::Float32,
            ArrayData::Bool(_) => DType::Bool,
        }
    }

    /// Number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Float64(v) => v.len(),
            ArrayData::Float32(v) => v.len(),
            ArrayData::Bool(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            ArrayData::Float64(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            ArrayData::Float32(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<&[bool]> {
        match self {
            ArrayData::Bool(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64_mut(&mut self) -> Option<&mut [f64]> {
        match self {
            ArrayData::Float64(v) => Some(v.as_mut_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f32_mut(&mut self) -> Option<&mut [f32]> {
        match self {
            ArrayData::Float32(v) => Some(v.as_mut_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool_mut(&mut self) -> Option<&mut [bool]> {
        match self {
            ArrayData::Bool(v) => Some(v.as_mut_slice()),
            _ => None,
        }
    }

    /// Numeric view widened to `f64`.
    ///
    /// Borrows for `Float64`, allocates a widened copy for `Float32`,
    /// and returns `None` for `Bool`.
    pub fn to_f64(&self) -> Option<Cow<'_, [f64]>> {
        match self {
            ArrayData::Float64(v) => Some(Cow::Borrowed(v.as_slice())),
            ArrayData::Float32(v) => Some(Cow::Owned(widen_f32(v.as_slice()))),
            ArrayData::Bool(_) => None,
        }
    }

    /// Single numeric element as `f64`. `None` for `Bool` or out of range.
    #[inline]
    pub fn f64_at(&self, idx: usize) -> Option<f64> {
        match self {
            ArrayData::Float64(v) => v.as_slice().get(idx).copied(),
            ArrayData::Float32(v) => v.as_slice().get(idx).map(|x| *x as f64),
            ArrayData::Bool(_) => None,
        }
    }

    /// Promotes a `Float32` buffer to `Float64` in place of the variant.
    /// No-op for the other kinds.
    pub fn promote_to_f64(&mut self) {
        if let ArrayData::Float32(v) = self {
            let widened: Vec64<f64> = v.iter().map(|x| *x as f64).collect();
            *self = ArrayData::Float64(widened);
        }
    }
}

/// Lossless `f32` to `f64` widening of a whole buffer.
#[inline]
pub fn widen_f32(src: &[f32]) -> Vec<f64> {
    src.iter().map(|x| *x as f64).collect()
}

impl PartialEq for ArrayData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArrayData::Float64(a), ArrayData::Float64(b)) => a.as_slice() == b.as_slice(),
            (ArrayData::Float32(a), ArrayData::Float32(b)) => a.as_slice() == b.as_slice(),
            (ArrayData::Bool(a), ArrayData::Bool(b)) => a.as_slice() == b.as_slice(),
            _ => false,
        }
    }
}

impl fmt::Debug for ArrayData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayData::Float64(v) => f.debug_tuple("Float64").field(&v.as_slice()).finish(),
            ArrayData::Float32(v) => f.debug_tuple("Float32").field(&v.as_slice()).finish(),
            ArrayData::Bool(v) => f.debug_tuple("Bool").field(&v.as_slice()).finish(),
        }
    }
}

impl From<Vec64<f64>> for ArrayData {
    fn from(v: Vec64<f64>) -> Self {
        ArrayData::Float64(v)
    }
}

impl From<Vec64<f32>> for ArrayData {
    fn from(v: Vec64<f32>) -> Self {
        ArrayData::Float32(v)
    }
}

impl From<Vec64<bool>> for ArrayData {
    fn from(v: Vec64<bool>) -> Self {
        ArrayData::Bool(v)
    }
}

impl From<Vec<f64>> for ArrayData {
    fn from(v: Vec<f64>) -> Self {
        ArrayData::Float64(Vec64::from(v))
    }
}

impl From<Vec<f32>> for ArrayData {
    fn from(v: Vec<f32>) -> Self {
        ArrayData::Float32(Vec64::from(v))
    }
}

impl From<Vec<bool>> for ArrayData {
    fn from(v: Vec<bool>) -> Self {
        ArrayData::Bool(Vec64::from(v))
    }
}

impl From<&[f64]> for ArrayData {
    fn from(v: &[f64]) -> Self {
        ArrayData::Float64(Vec64::from(v))
    }
}

impl From<&[f32]> for ArrayData {
    fn from(v: &[f32]) -> Self {
        ArrayData::Float32(Vec64::from(v))
    }
}

impl From<&[bool]> for ArrayData {
    fn from(v: &[bool]) -> Self {
        ArrayData::Bool(Vec64::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_and_len() {
        let d = ArrayData::from(vec![1.0f32, 2.0, 3.0]);
        assert_eq!(d.dtype(), DType::Float32);
        assert_eq!(d.len(), 3);
        assert!(!d.is_empty());
        assert!(ArrayData::from(Vec::<bool>::new()).is_empty());
    }

    #[test]
    fn test_to_f64_borrows_or_widens() {
        let d64 = ArrayData::from(vec![1.5f64, 2.5]);
        assert!(matches!(d64.to_f64(), Some(Cow::Borrowed(_))));

        let d32 = ArrayData::from(vec![1.5f32, 2.5]);
        let widened = d32.to_f64().unwrap();
        assert_eq!(&*widened, &[1.5, 2.5]);

        let b = ArrayData::from(vec![true]);
        assert!(b.to_f64().is_none());
    }

    #[test]
    fn test_promote_to_f64() {
        let mut d = ArrayData::from(vec![0.25f32, -4.0]);
        d.promote_to_f64();
        assert_eq!(d.dtype(), DType::Float64);
        assert_eq!(d.as_f64().unwrap(), &[0.25, -4.0]);
    }

    #[test]
    fn test_eq_distinguishes_kinds() {
        let a = ArrayData::from(vec![1.0f64]);
        let b = ArrayData::from(vec![1.0f32]);
        assert_ne!(a, b);
        assert_eq!(a, ArrayData::from(vec![1.0f64]));
    }
}

use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, ToPrimitive};
use vec64::Vec64;

use crate::enums::array_data::ArrayData;
use crate::enums::dtype::DType;

/// Trait for types valid as float elements in an `NdArray`.
///
/// Useful when specifying `my_fn::<T: Float>() {}`.
///
/// Extends and constrains the *num-traits* `Float` implementation to fit the crate's type universe,
/// binding each element type to its `DType` tag and `ArrayData` variant.
pub trait Float:
    NumFloat + Copy + Default + ToPrimitive + PartialEq + Debug + Display + Send + Sync + 'static
{
    /// Tag stored alongside buffers of this element type.
    const DTYPE: DType;

    /// Narrowing cast from `f64`, used for scalars entering a `Float32` kernel.
    fn cast_from_f64(v: f64) -> Self;

    /// Lossless widening to `f64`.
    fn to_f64_lossless(self) -> f64;

    /// Wraps an owned buffer in its `ArrayData` variant.
    fn into_data(buf: Vec64<Self>) -> ArrayData;

    /// Borrows the buffer if `data` carries this element type.
    fn slice(data: &ArrayData) -> Option<&[Self]>;

    /// Mutably borrows the buffer if `data` carries this element type.
    fn slice_mut(data: &mut ArrayData) -> Option<&mut [Self]>;
}

impl Float for f32 {
    const DTYPE: DType = DType::Float32;

    #[inline]
    fn cast_from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64_lossless(self) -> f64 {
        self as f64
    }

    #[inline]
    fn into_data(buf: Vec64<Self>) -> ArrayData {
        ArrayData::Float32(buf)
    }

    #[inline]
    fn slice(data: &ArrayData) -> Option<&[Self]> {
        data.as_f32()
    }

    #[inline]
    fn slice_mut(data: &mut ArrayData) -> Option<&mut [Self]> {
        data.as_f32_mut()
    }
}

impl Float for f64 {
    const DTYPE: DType = DType::Float64;

    #[inline]
    fn cast_from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64_lossless(self) -> f64 {
        self
    }

    #[inline]
    fn into_data(buf: Vec64<Self>) -> ArrayData {
        ArrayData::Float64(buf)
    }

    #[inline]
    fn slice(data: &ArrayData) -> Option<&[Self]> {
        data.as_f64()
    }

    #[inline]
    fn slice_mut(data: &mut ArrayData) -> Option<&mut [Self]> {
        data.as_f64_mut()
    }
}

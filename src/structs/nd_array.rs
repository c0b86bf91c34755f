//! # NdArray Module - *Dense N-dimensional Arrays*
//!
//! Shape plus a single flat, row-major buffer.
//!
//! Every non-in-place operation allocates a fresh result; no result ever
//! shares storage with an operand. In-place methods (`*_inplace`, `apply`)
//! write into the receiver's existing buffer and never change its shape.

use std::ops::{Add, Div, Mul, Neg, Not, Sub};

use vec64::Vec64;

use crate::enums::array_data::ArrayData;
use crate::enums::dtype::DType;
use crate::enums::error::{NdError, Result};
use crate::enums::operators::{
    ArithmeticOperator, ComparisonOperator, LogicalOperator, ReductionOperator, ScanOperator,
    UnaryOperator,
};
use crate::kernels::aggregate;
use crate::kernels::broadcast::{checked_total_size, row_major_strides, total_size};
use crate::kernels::routing::arithmetic::{resolve_binary_arithmetic, resolve_scalar_arithmetic};
use crate::kernels::routing::compare::{logical_not, resolve_comparison, resolve_logical};
use crate::kernels::routing::inplace::{
    resolve_inplace_arithmetic, resolve_scalar_inplace, resolve_scan_inplace, resolve_unary_inplace,
};
use crate::kernels::routing::unary::{apply_custom, resolve_unary};

/// # NdArray
///
/// Dense, row-major N-dimensional array.
///
/// ### Description
/// The buffer holds exactly `product(shape)` elements of one [`DType`]. A rank-0
/// array (`shape == []`) holds a single element. Any zero dimension makes the
/// array empty.
///
/// ### Properties
/// - `shape`: extent of each dimension, outermost first.
/// - `data`: flat storage tagged with its element kind.
///
/// ### Example
/// ```rust
/// use ndvek::NdArray;
///
/// let a = NdArray::from_f64([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let b = NdArray::from_f64([3], vec![1.0, 2.0, 3.0]).unwrap();
/// let c = a.add(&b).unwrap();
/// assert_eq!(c.shape(), &[2, 3]);
/// assert_eq!(c.as_f64_slice().unwrap(), &[2.0, 4.0, 6.0, 5.0, 7.0, 9.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: ArrayData,
}

impl NdArray {
    /// Constructs an array from a shape and a flat row-major buffer.
    ///
    /// Fails with `ShapeMismatch` unless the buffer holds exactly
    /// `product(shape)` elements, including when that product overflows.
    pub fn new(shape: impl Into<Vec<usize>>, data: impl Into<ArrayData>) -> Result<Self> {
        let shape = shape.into();
        let data = data.into();
        let Some(expected) = checked_total_size(&shape) else {
            return Err(NdError::ShapeMismatch {
                expected: shape,
                found: vec![data.len()],
                message: Some("element count overflows usize".to_string()),
            });
        };
        if expected != data.len() {
            return Err(NdError::ShapeMismatch {
                expected: shape,
                found: vec![data.len()],
                message: Some(format!("shape holds {} elements", expected)),
            });
        }
        Ok(Self { shape, data })
    }

    #[inline]
    pub fn from_f64(shape: impl Into<Vec<usize>>, data: Vec<f64>) -> Result<Self> {
        Self::new(shape, data)
    }

    #[inline]
    pub fn from_f32(shape: impl Into<Vec<usize>>, data: Vec<f32>) -> Result<Self> {
        Self::new(shape, data)
    }

    #[inline]
    pub fn from_bool(shape: impl Into<Vec<usize>>, data: Vec<bool>) -> Result<Self> {
        Self::new(shape, data)
    }

    /// Assembles an array whose buffer length is already known to match.
    #[inline]
    pub(crate) fn from_parts(shape: Vec<usize>, data: ArrayData) -> Self {
        debug_assert_eq!(total_size(&shape), data.len(), "from_parts: buffer does not fill shape");
        Self { shape, data }
    }

    /// `Float64` array of zeros.
    pub fn zeros(shape: impl Into<Vec<usize>>) -> Self {
        Self::full(shape, 0.0)
    }

    /// `Float32` array of zeros.
    pub fn zeros_f32(shape: impl Into<Vec<usize>>) -> Self {
        let shape = shape.into();
        let data: Vec64<f32> = Vec64::from(vec![0.0f32; total_size(&shape)]);
        Self::from_parts(shape, ArrayData::Float32(data))
    }

    /// `Float64` array with every element set to `value`.
    pub fn full(shape: impl Into<Vec<usize>>, value: f64) -> Self {
        let shape = shape.into();
        let data: Vec64<f64> = Vec64::from(vec![value; total_size(&shape)]);
        Self::from_parts(shape, ArrayData::Float64(data))
    }

    /// `n` evenly spaced `Float64` values from `start` to `stop` inclusive.
    ///
    /// `n == 0` gives an empty `[0]` array and `n == 1` gives `[start]`.
    pub fn linspace(start: f64, stop: f64, n: usize) -> Self {
        let data: Vec64<f64> = match n {
            0 => Vec64::from(Vec::<f64>::new()),
            1 => Vec64::from(vec![start]),
            _ => {
                let step = (stop - start) / (n - 1) as f64;
                (0..n).map(|i| start + i as f64 * step).collect()
            }
        };
        Self::from_parts(vec![n], ArrayData::Float64(data))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    #[inline]
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut ArrayData {
        &mut self.data
    }

    #[inline]
    pub fn as_f64_slice(&self) -> Option<&[f64]> {
        self.data.as_f64()
    }

    #[inline]
    pub fn as_f32_slice(&self) -> Option<&[f32]> {
        self.data.as_f32()
    }

    #[inline]
    pub fn as_bool_slice(&self) -> Option<&[bool]> {
        self.data.as_bool()
    }

    /// Copy of the buffer widened to `f64`. `None` for `Bool` arrays.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        self.data.to_f64().map(|c| c.into_owned())
    }

    // ------------------------------------------------------------------
    // Element access and shape utilities
    // ------------------------------------------------------------------

    fn flat_offset(&self, index: &[usize]) -> Result<usize> {
        let out_of_bounds = || NdError::IndexOutOfBounds {
            index: index.iter().map(|i| *i as isize).collect(),
            shape: self.shape.clone(),
        };
        if index.len() != self.shape.len() {
            return Err(out_of_bounds());
        }
        if index.iter().zip(self.shape.iter()).any(|(coord, dim)| coord >= dim) {
            return Err(out_of_bounds());
        }
        let strides = row_major_strides(&self.shape);
        Ok(index.iter().zip(strides.iter()).map(|(c, s)| c * s).sum())
    }

    /// Numeric element at a row-major multi-index, widened to `f64`.
    ///
    /// The index must carry one coordinate per dimension.
    pub fn get(&self, index: &[usize]) -> Result<f64> {
        let offset = self.flat_offset(index)?;
        self.data.f64_at(offset).ok_or(NdError::TypeMismatch {
            lhs: self.dtype(),
            rhs: DType::Float64,
            message: Some("use get_bool for Bool arrays".into()),
        })
    }

    /// Element of a `Bool` array at a row-major multi-index.
    pub fn get_bool(&self, index: &[usize]) -> Result<bool> {
        let offset = self.flat_offset(index)?;
        match self.data.as_bool() {
            Some(b) => Ok(b[offset]),
            None => Err(NdError::TypeMismatch {
                lhs: self.dtype(),
                rhs: DType::Bool,
                message: Some("get_bool requires a Bool array".into()),
            }),
        }
    }

    /// New array with the same elements under a different shape.
    ///
    /// Fails with `InvalidReshape` when the element counts differ or the
    /// new shape's element count overflows.
    pub fn reshape(&self, shape: impl Into<Vec<usize>>) -> Result<NdArray> {
        let shape = shape.into();
        self.check_reshape(&shape)?;
        Ok(Self::from_parts(shape, self.data.clone()))
    }

    /// Consuming reshape. The buffer is moved, not copied.
    pub fn into_shape(self, shape: impl Into<Vec<usize>>) -> Result<NdArray> {
        let shape = shape.into();
        self.check_reshape(&shape)?;
        Ok(Self::from_parts(shape, self.data))
    }

    fn check_reshape(&self, shape: &[usize]) -> Result<()> {
        if checked_total_size(shape) != Some(self.len()) {
            return Err(NdError::InvalidReshape {
                from: self.shape.clone(),
                to: shape.to_vec(),
            });
        }
        Ok(())
    }

    /// Inserts a length-1 axis at `pos`.
    ///
    /// Valid positions are `0..=ndim`. Negative positions count from the
    /// end, so `-1` appends a trailing axis.
    pub fn insert_axis(&self, pos: isize) -> Result<NdArray> {
        let rank = self.ndim() as isize;
        let at = if pos < 0 { pos + rank + 1 } else { pos };
        if at < 0 || at > rank {
            return Err(NdError::IndexOutOfBounds {
                index: vec![pos],
                shape: self.shape.clone(),
            });
        }
        let mut shape = self.shape.clone();
        shape.insert(at as usize, 1);
        Ok(Self::from_parts(shape, self.data.clone()))
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    /// Elementwise `self + other` with broadcasting.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &NdArray) -> Result<NdArray> {
        resolve_binary_arithmetic(ArithmeticOperator::Add, self, other)
    }

    /// Elementwise `self - other` with broadcasting.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, other: &NdArray) -> Result<NdArray> {
        resolve_binary_arithmetic(ArithmeticOperator::Subtract, self, other)
    }

    /// Elementwise `self * other` with broadcasting.
    #[allow(clippy::should_implement_trait)]
    pub fn mul(&self, other: &NdArray) -> Result<NdArray> {
        resolve_binary_arithmetic(ArithmeticOperator::Multiply, self, other)
    }

    /// Elementwise `self / other` with broadcasting.
    #[allow(clippy::should_implement_trait)]
    pub fn div(&self, other: &NdArray) -> Result<NdArray> {
        resolve_binary_arithmetic(ArithmeticOperator::Divide, self, other)
    }

    pub fn add_scalar(&self, s: f64) -> Result<NdArray> {
        resolve_scalar_arithmetic(ArithmeticOperator::Add, self, s)
    }

    pub fn sub_scalar(&self, s: f64) -> Result<NdArray> {
        resolve_scalar_arithmetic(ArithmeticOperator::Subtract, self, s)
    }

    pub fn mul_scalar(&self, s: f64) -> Result<NdArray> {
        resolve_scalar_arithmetic(ArithmeticOperator::Multiply, self, s)
    }

    pub fn div_scalar(&self, s: f64) -> Result<NdArray> {
        resolve_scalar_arithmetic(ArithmeticOperator::Divide, self, s)
    }

    // ------------------------------------------------------------------
    // In-place
    // ------------------------------------------------------------------

    /// `self += other`. Shapes and dtypes must match exactly; on error the
    /// receiver is unchanged.
    pub fn add_inplace(&mut self, other: &NdArray) -> Result<()> {
        resolve_inplace_arithmetic(ArithmeticOperator::Add, self, other)
    }

    pub fn sub_inplace(&mut self, other: &NdArray) -> Result<()> {
        resolve_inplace_arithmetic(ArithmeticOperator::Subtract, self, other)
    }

    pub fn mul_inplace(&mut self, other: &NdArray) -> Result<()> {
        resolve_inplace_arithmetic(ArithmeticOperator::Multiply, self, other)
    }

    pub fn div_inplace(&mut self, other: &NdArray) -> Result<()> {
        resolve_inplace_arithmetic(ArithmeticOperator::Divide, self, other)
    }

    pub fn add_scalar_inplace(&mut self, s: f64) -> Result<()> {
        resolve_scalar_inplace(ArithmeticOperator::Add, self, s)
    }

    pub fn sub_scalar_inplace(&mut self, s: f64) -> Result<()> {
        resolve_scalar_inplace(ArithmeticOperator::Subtract, self, s)
    }

    pub fn mul_scalar_inplace(&mut self, s: f64) -> Result<()> {
        resolve_scalar_inplace(ArithmeticOperator::Multiply, self, s)
    }

    pub fn div_scalar_inplace(&mut self, s: f64) -> Result<()> {
        resolve_scalar_inplace(ArithmeticOperator::Divide, self, s)
    }

    pub fn abs_inplace(&mut self) -> Result<()> {
        resolve_unary_inplace(UnaryOperator::Abs, self)
    }

    pub fn neg_inplace(&mut self) -> Result<()> {
        resolve_unary_inplace(UnaryOperator::Neg, self)
    }

    pub fn sqrt_inplace(&mut self) -> Result<()> {
        resolve_unary_inplace(UnaryOperator::Sqrt, self)
    }

    pub fn round_inplace(&mut self) -> Result<()> {
        resolve_unary_inplace(UnaryOperator::Round, self)
    }

    pub fn floor_inplace(&mut self) -> Result<()> {
        resolve_unary_inplace(UnaryOperator::Floor, self)
    }

    pub fn ceil_inplace(&mut self) -> Result<()> {
        resolve_unary_inplace(UnaryOperator::Ceil, self)
    }

    pub fn inv_inplace(&mut self) -> Result<()> {
        resolve_unary_inplace(UnaryOperator::Inv, self)
    }

    pub fn cumsum_inplace(&mut self) -> Result<()> {
        resolve_scan_inplace(ScanOperator::CumSum, self)
    }

    pub fn cumprod_inplace(&mut self) -> Result<()> {
        resolve_scan_inplace(ScanOperator::CumProd, self)
    }

    /// Replaces every element `x` with `f(x)`.
    ///
    /// A `Float32` array becomes `Float64`.
    pub fn apply<F: Fn(f64) -> f64>(&mut self, f: F) -> Result<()> {
        apply_custom(self, f)
    }

    // ------------------------------------------------------------------
    // Unary
    // ------------------------------------------------------------------

    pub fn abs(&self) -> Result<NdArray> {
        resolve_unary(UnaryOperator::Abs, self)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn neg(&self) -> Result<NdArray> {
        resolve_unary(UnaryOperator::Neg, self)
    }

    pub fn sqrt(&self) -> Result<NdArray> {
        resolve_unary(UnaryOperator::Sqrt, self)
    }

    /// Rounds half away from zero.
    pub fn round(&self) -> Result<NdArray> {
        resolve_unary(UnaryOperator::Round, self)
    }

    pub fn floor(&self) -> Result<NdArray> {
        resolve_unary(UnaryOperator::Floor, self)
    }

    pub fn ceil(&self) -> Result<NdArray> {
        resolve_unary(UnaryOperator::Ceil, self)
    }

    /// Elementwise reciprocal.
    pub fn inv(&self) -> Result<NdArray> {
        resolve_unary(UnaryOperator::Inv, self)
    }

    /// Logical negation of a `Bool` array.
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Result<NdArray> {
        logical_not(self)
    }

    // ------------------------------------------------------------------
    // Comparison and logic (equal shapes only)
    // ------------------------------------------------------------------

    /// Elementwise `==` as a `Bool` mask. Whole-array equality is `PartialEq`.
    pub fn eq_elem(&self, other: &NdArray) -> Result<NdArray> {
        resolve_comparison(ComparisonOperator::Eq, self, other)
    }

    /// Elementwise `!=` as a `Bool` mask.
    pub fn neq_elem(&self, other: &NdArray) -> Result<NdArray> {
        resolve_comparison(ComparisonOperator::Neq, self, other)
    }

    pub fn lt(&self, other: &NdArray) -> Result<NdArray> {
        resolve_comparison(ComparisonOperator::Lt, self, other)
    }

    pub fn lte(&self, other: &NdArray) -> Result<NdArray> {
        resolve_comparison(ComparisonOperator::Lte, self, other)
    }

    pub fn gt(&self, other: &NdArray) -> Result<NdArray> {
        resolve_comparison(ComparisonOperator::Gt, self, other)
    }

    pub fn gte(&self, other: &NdArray) -> Result<NdArray> {
        resolve_comparison(ComparisonOperator::Gte, self, other)
    }

    pub fn and(&self, other: &NdArray) -> Result<NdArray> {
        resolve_logical(LogicalOperator::And, self, other)
    }

    pub fn or(&self, other: &NdArray) -> Result<NdArray> {
        resolve_logical(LogicalOperator::Or, self, other)
    }

    pub fn xor(&self, other: &NdArray) -> Result<NdArray> {
        resolve_logical(LogicalOperator::Xor, self, other)
    }

    // ------------------------------------------------------------------
    // Reductions and scans
    // ------------------------------------------------------------------

    /// Sum of all elements; `0` when empty.
    pub fn sum(&self) -> Result<f64> {
        aggregate::reduce(ReductionOperator::Sum, self)
    }

    /// Arithmetic mean; `NaN` when empty.
    pub fn mean(&self) -> Result<f64> {
        aggregate::reduce(ReductionOperator::Mean, self)
    }

    /// Smallest element ignoring `NaN`s; `NaN` when empty.
    pub fn min(&self) -> Result<f64> {
        aggregate::reduce(ReductionOperator::Min, self)
    }

    /// Largest element ignoring `NaN`s; `NaN` when empty.
    pub fn max(&self) -> Result<f64> {
        aggregate::reduce(ReductionOperator::Max, self)
    }

    /// Product of all elements; `1` when empty.
    pub fn prod(&self) -> Result<f64> {
        aggregate::reduce(ReductionOperator::Prod, self)
    }

    pub fn any(&self) -> Result<bool> {
        aggregate::any(self)
    }

    pub fn all(&self) -> Result<bool> {
        aggregate::all(self)
    }

    /// Flat cumulative sum in storage order; the shape is kept.
    pub fn cumsum(&self) -> Result<NdArray> {
        aggregate::scan(ScanOperator::CumSum, self)
    }

    /// Flat cumulative product in storage order; the shape is kept.
    pub fn cumprod(&self) -> Result<NdArray> {
        aggregate::scan(ScanOperator::CumProd, self)
    }
}

impl Add for &NdArray {
    type Output = Result<NdArray>;

    fn add(self, rhs: &NdArray) -> Self::Output {
        NdArray::add(self, rhs)
    }
}

impl Sub for &NdArray {
    type Output = Result<NdArray>;

    fn sub(self, rhs: &NdArray) -> Self::Output {
        NdArray::sub(self, rhs)
    }
}

impl Mul for &NdArray {
    type Output = Result<NdArray>;

    fn mul(self, rhs: &NdArray) -> Self::Output {
        NdArray::mul(self, rhs)
    }
}

impl Div for &NdArray {
    type Output = Result<NdArray>;

    fn div(self, rhs: &NdArray) -> Self::Output {
        NdArray::div(self, rhs)
    }
}

impl Neg for &NdArray {
    type Output = Result<NdArray>;

    fn neg(self) -> Self::Output {
        NdArray::neg(self)
    }
}

impl Not for &NdArray {
    type Output = Result<NdArray>;

    fn not(self) -> Self::Output {
        NdArray::not(self)
    }
}

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Vector Kernels
//!
//! Contiguous buffer primitives the dispatchers build on: elementwise
//! arithmetic between equal-length buffers, arithmetic against a scalar,
//! unary maps, whole-buffer reductions, flat scans, comparisons into a
//! boolean buffer, and boolean logic.
//!
//! Every function takes plain slices of equal length and knows nothing about
//! shapes or broadcasting. Allocating variants return a fresh `Vec64`;
//! `_inplace` variants write into the first argument.
//!
//! With the `parallel_proc` feature, elementwise maps over buffers of at least
//! [`PARALLEL_THRESHOLD`] elements are split into non-overlapping shards with
//! *Rayon*. Output ordering is unchanged.

#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;
use vec64::Vec64;

use crate::traits::type_unions::Float;

/// Minimum element count before the `parallel_proc` paths split work.
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

#[inline]
fn zip_map<T, U, F>(lhs: &[T], rhs: &[T], f: F) -> Vec64<U>
where
    T: Copy + Send + Sync,
    U: Send,
    F: Fn(T, T) -> U + Send + Sync,
{
    debug_assert_eq!(lhs.len(), rhs.len(), "zip_map: caller guarantees equal lengths");

    #[cfg(feature = "parallel_proc")]
    {
        if lhs.len() >= PARALLEL_THRESHOLD {
            let out: Vec<U> = lhs.par_iter().zip(rhs.par_iter()).map(|(a, b)| f(*a, *b)).collect();
            return Vec64::from(out);
        }
    }

    lhs.iter().zip(rhs.iter()).map(|(a, b)| f(*a, *b)).collect()
}

#[inline]
fn map<T, U, F>(src: &[T], f: F) -> Vec64<U>
where
    T: Copy + Send + Sync,
    U: Send,
    F: Fn(T) -> U + Send + Sync,
{
    #[cfg(feature = "parallel_proc")]
    {
        if src.len() >= PARALLEL_THRESHOLD {
            let out: Vec<U> = src.par_iter().map(|a| f(*a)).collect();
            return Vec64::from(out);
        }
    }

    src.iter().map(|a| f(*a)).collect()
}

#[inline]
fn zip_apply<T, F>(dst: &mut [T], src: &[T], f: F)
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Send + Sync,
{
    debug_assert_eq!(dst.len(), src.len(), "zip_apply: caller guarantees equal lengths");

    #[cfg(feature = "parallel_proc")]
    {
        if dst.len() >= PARALLEL_THRESHOLD {
            dst.par_iter_mut().zip(src.par_iter()).for_each(|(d, s)| *d = f(*d, *s));
            return;
        }
    }

    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = f(*d, *s);
    }
}

#[inline]
fn apply<T, F>(dst: &mut [T], f: F)
where
    T: Copy + Send + Sync,
    F: Fn(T) -> T + Send + Sync,
{
    #[cfg(feature = "parallel_proc")]
    {
        if dst.len() >= PARALLEL_THRESHOLD {
            dst.par_iter_mut().for_each(|d| *d = f(*d));
            return;
        }
    }

    for d in dst.iter_mut() {
        *d = f(*d);
    }
}

// ---------------------------------------------------------------------------
// Elementwise arithmetic
// ---------------------------------------------------------------------------

pub fn add<T: Float>(lhs: &[T], rhs: &[T]) -> Vec64<T> {
    zip_map(lhs, rhs, |a, b| a + b)
}

pub fn sub<T: Float>(lhs: &[T], rhs: &[T]) -> Vec64<T> {
    zip_map(lhs, rhs, |a, b| a - b)
}

pub fn mul<T: Float>(lhs: &[T], rhs: &[T]) -> Vec64<T> {
    zip_map(lhs, rhs, |a, b| a * b)
}

pub fn div<T: Float>(lhs: &[T], rhs: &[T]) -> Vec64<T> {
    zip_map(lhs, rhs, |a, b| a / b)
}

pub fn add_inplace<T: Float>(dst: &mut [T], src: &[T]) {
    zip_apply(dst, src, |a, b| a + b)
}

pub fn sub_inplace<T: Float>(dst: &mut [T], src: &[T]) {
    zip_apply(dst, src, |a, b| a - b)
}

pub fn mul_inplace<T: Float>(dst: &mut [T], src: &[T]) {
    zip_apply(dst, src, |a, b| a * b)
}

pub fn div_inplace<T: Float>(dst: &mut [T], src: &[T]) {
    zip_apply(dst, src, |a, b| a / b)
}

// ---------------------------------------------------------------------------
// Scalar arithmetic
// ---------------------------------------------------------------------------

pub fn add_scalar<T: Float>(src: &[T], s: T) -> Vec64<T> {
    map(src, |a| a + s)
}

pub fn sub_scalar<T: Float>(src: &[T], s: T) -> Vec64<T> {
    map(src, |a| a - s)
}

pub fn mul_scalar<T: Float>(src: &[T], s: T) -> Vec64<T> {
    map(src, |a| a * s)
}

pub fn div_scalar<T: Float>(src: &[T], s: T) -> Vec64<T> {
    map(src, |a| a / s)
}

pub fn add_scalar_inplace<T: Float>(dst: &mut [T], s: T) {
    apply(dst, |a| a + s)
}

pub fn sub_scalar_inplace<T: Float>(dst: &mut [T], s: T) {
    apply(dst, |a| a - s)
}

pub fn mul_scalar_inplace<T: Float>(dst: &mut [T], s: T) {
    apply(dst, |a| a * s)
}

pub fn div_scalar_inplace<T: Float>(dst: &mut [T], s: T) {
    apply(dst, |a| a / s)
}

// ---------------------------------------------------------------------------
// Unary maps
// ---------------------------------------------------------------------------

pub fn abs<T: Float>(src: &[T]) -> Vec64<T> {
    map(src, |a| a.abs())
}

pub fn neg<T: Float>(src: &[T]) -> Vec64<T> {
    map(src, |a| -a)
}

pub fn sqrt<T: Float>(src: &[T]) -> Vec64<T> {
    map(src, |a| a.sqrt())
}

/// Rounds half away from zero.
pub fn round<T: Float>(src: &[T]) -> Vec64<T> {
    map(src, |a| a.round())
}

pub fn floor<T: Float>(src: &[T]) -> Vec64<T> {
    map(src, |a| a.floor())
}

pub fn ceil<T: Float>(src: &[T]) -> Vec64<T> {
    map(src, |a| a.ceil())
}

/// Elementwise reciprocal `1 / x`.
pub fn inv<T: Float>(src: &[T]) -> Vec64<T> {
    map(src, |a| a.recip())
}

pub fn abs_inplace<T: Float>(dst: &mut [T]) {
    apply(dst, |a| a.abs())
}

pub fn neg_inplace<T: Float>(dst: &mut [T]) {
    apply(dst, |a| -a)
}

pub fn sqrt_inplace<T: Float>(dst: &mut [T]) {
    apply(dst, |a| a.sqrt())
}

pub fn round_inplace<T: Float>(dst: &mut [T]) {
    apply(dst, |a| a.round())
}

pub fn floor_inplace<T: Float>(dst: &mut [T]) {
    apply(dst, |a| a.floor())
}

pub fn ceil_inplace<T: Float>(dst: &mut [T]) {
    apply(dst, |a| a.ceil())
}

pub fn inv_inplace<T: Float>(dst: &mut [T]) {
    apply(dst, |a| a.recip())
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

/// Sum of all elements. `0` for an empty buffer.
pub fn sum<T: Float>(src: &[T]) -> T {
    src.iter().fold(T::zero(), |acc, x| acc + *x)
}

/// Product of all elements. `1` for an empty buffer.
pub fn prod<T: Float>(src: &[T]) -> T {
    src.iter().fold(T::one(), |acc, x| acc * *x)
}

/// Arithmetic mean. `NaN` for an empty buffer.
pub fn mean<T: Float>(src: &[T]) -> T {
    if src.is_empty() {
        return T::nan();
    }
    sum(src) / T::cast_from_f64(src.len() as f64)
}

/// Smallest element, skipping `NaN`s. `NaN` for an empty buffer.
pub fn min<T: Float>(src: &[T]) -> T {
    src.iter().fold(T::nan(), |acc, x| acc.min(*x))
}

/// Largest element, skipping `NaN`s. `NaN` for an empty buffer.
pub fn max<T: Float>(src: &[T]) -> T {
    src.iter().fold(T::nan(), |acc, x| acc.max(*x))
}

// ---------------------------------------------------------------------------
// Flat scans
// ---------------------------------------------------------------------------

pub fn cumsum<T: Float>(src: &[T]) -> Vec64<T> {
    let mut out: Vec64<T> = Vec64::from(src);
    cumsum_inplace(out.as_mut_slice());
    out
}

pub fn cumprod<T: Float>(src: &[T]) -> Vec64<T> {
    let mut out: Vec64<T> = Vec64::from(src);
    cumprod_inplace(out.as_mut_slice());
    out
}

pub fn cumsum_inplace<T: Float>(dst: &mut [T]) {
    let mut acc = T::zero();
    for x in dst.iter_mut() {
        acc = acc + *x;
        *x = acc;
    }
}

pub fn cumprod_inplace<T: Float>(dst: &mut [T]) {
    let mut acc = T::one();
    for x in dst.iter_mut() {
        acc = acc * *x;
        *x = acc;
    }
}

// ---------------------------------------------------------------------------
// Comparisons
// ---------------------------------------------------------------------------

pub fn eq<T: PartialEq + Copy + Send + Sync>(lhs: &[T], rhs: &[T]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a == b)
}

pub fn neq<T: PartialEq + Copy + Send + Sync>(lhs: &[T], rhs: &[T]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a != b)
}

pub fn lt<T: PartialOrd + Copy + Send + Sync>(lhs: &[T], rhs: &[T]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a < b)
}

pub fn lte<T: PartialOrd + Copy + Send + Sync>(lhs: &[T], rhs: &[T]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a <= b)
}

pub fn gt<T: PartialOrd + Copy + Send + Sync>(lhs: &[T], rhs: &[T]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a > b)
}

pub fn gte<T: PartialOrd + Copy + Send + Sync>(lhs: &[T], rhs: &[T]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a >= b)
}

// ---------------------------------------------------------------------------
// Boolean logic
// ---------------------------------------------------------------------------

pub fn and(lhs: &[bool], rhs: &[bool]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a && b)
}

pub fn or(lhs: &[bool], rhs: &[bool]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a || b)
}

pub fn xor(lhs: &[bool], rhs: &[bool]) -> Vec64<bool> {
    zip_map(lhs, rhs, |a, b| a ^ b)
}

pub fn not(src: &[bool]) -> Vec64<bool> {
    map(src, |a| !a)
}

/// True as soon as one element is set. `false` for an empty buffer.
pub fn any(src: &[bool]) -> bool {
    src.iter().any(|b| *b)
}

/// False as soon as one element is cleared. `true` for an empty buffer.
pub fn all(src: &[bool]) -> bool {
    src.iter().all(|b| *b)
}

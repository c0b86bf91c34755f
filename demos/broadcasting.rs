//! # Broadcasting Examples
//!
//! Walks through ndvek's binary arithmetic paths and the operations built
//! around them.
//!
//! ## Broadcasting Rules
//! - Shapes are aligned from the trailing dimension
//! - A dimension of 1 stretches to match the other operand
//! - A missing leading dimension counts as 1
//! - Float32 with Float32 stays Float32; any Float64 operand widens to Float64
//! - Comparisons and logical operators require equal shapes
//!
//! Run with: cargo run --example broadcasting

use ndvek::{NdArray, NdError, Print};

fn main() {
    println!("═══════════════════════════════════════════════════════════");
    println!("  ndvek Broadcasting Examples");
    println!("═══════════════════════════════════════════════════════════\n");

    test_row_broadcasting();
    test_outer_broadcasting();
    test_scalar_lhs();
    test_mixed_precision();
    test_incompatible_shapes();
    test_inplace_shape_mismatch();
    test_comparison_and_reduction();

    println!("\n═══════════════════════════════════════════════════════════");
    println!("  All broadcasting examples completed!");
    println!("═══════════════════════════════════════════════════════════");
}

fn report(result: Result<NdArray, NdError>) {
    match result {
        Ok(arr) => {
            println!("│  Result:    {:?} {:?}", arr.shape(), arr.to_f64_vec().unwrap_or_default());
            println!("└─ ✓ Passed\n");
        }
        Err(e) => println!("└─ ✗ Error: {}\n", e),
    }
}

/// [2, 3] + [3] stretches the row across both rows
fn test_row_broadcasting() {
    println!("┌─ Test 1: Row Broadcasting");
    println!("│  Operation: [[1, 2, 3], [4, 5, 6]] + [1, 2, 3]");
    println!("│  Expected:  [2, 3] [2, 4, 6, 5, 7, 9]");

    let a = NdArray::from_f64([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let b = NdArray::from_f64([3], vec![1.0, 2.0, 3.0]).unwrap();
    report(&a + &b);
}

/// [3, 1] * [1, 4] builds a multiplication table
fn test_outer_broadcasting() {
    println!("┌─ Test 2: Outer Broadcasting");
    println!("│  Operation: [3, 1] * [1, 4]");

    let col = NdArray::linspace(1.0, 3.0, 3).into_shape([3, 1]).unwrap();
    let row = NdArray::linspace(1.0, 4.0, 4).insert_axis(0).unwrap();
    match col.mul(&row) {
        Ok(table) => {
            table.print();
            println!("└─ ✓ Passed\n");
        }
        Err(e) => println!("└─ ✗ Error: {}\n", e),
    }
}

/// A single-element lhs goes through the scalar path
fn test_scalar_lhs() {
    println!("┌─ Test 3: Scalar Left Operand");
    println!("│  Operation: [10] - [1, 2, 4, 5] and [10] / [1, 2, 4, 5]");
    println!("│  Expected:  [9, 8, 6, 5] and [10, 5, 2.5, 2]");

    let s = NdArray::from_f64([1], vec![10.0]).unwrap();
    let x = NdArray::from_f64([4], vec![1.0, 2.0, 4.0, 5.0]).unwrap();
    report(&s - &x);
    report(&s / &x);
}

/// Float32 operands widen when paired with Float64
fn test_mixed_precision() {
    println!("┌─ Test 4: Mixed Precision");
    println!("│  Operation: Float32[2, 1] + Float64[3]");

    let a = NdArray::from_f32([2, 1], vec![1.5, 2.5]).unwrap();
    let b = NdArray::from_f64([3], vec![1.0, 2.0, 3.0]).unwrap();
    if let Ok(out) = &a + &b {
        println!("│  Result dtype: {}", out.dtype());
    }
    report(&a + &b);
}

fn test_incompatible_shapes() {
    println!("┌─ Test 5: Incompatible Shapes");
    println!("│  Operation: [2, 3] + [4, 3]");
    println!("│  Expected:  error");

    let a = NdArray::zeros([2, 3]);
    let b = NdArray::zeros([4, 3]);
    match &a + &b {
        Err(e @ NdError::IncompatibleShape { .. }) => {
            println!("│  Error:     {}", e);
            println!("└─ ✓ Passed\n");
        }
        other => println!("└─ ✗ Unexpected: {:?}\n", other),
    }
}

fn test_inplace_shape_mismatch() {
    println!("┌─ Test 6: In-place Shape Mismatch");
    println!("│  Operation: [2, 2] += [1, 2]");
    println!("│  Expected:  error, receiver unchanged");

    let mut a = NdArray::from_f64([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = NdArray::from_f64([1, 2], vec![1.0, 2.0]).unwrap();
    match a.add_inplace(&b) {
        Err(e) => {
            println!("│  Error:     {}", e);
            println!("│  Receiver:  {:?}", a.as_f64_slice().unwrap_or_default());
            println!("└─ ✓ Passed\n");
        }
        Ok(()) => println!("└─ ✗ Unexpected success\n"),
    }
}

fn test_comparison_and_reduction() {
    println!("┌─ Test 7: Comparison and Reduction");
    println!("│  Operation: any([1, 2, 3, 4] < [2, 2, 2, 2]), cumprod([1, -2, 3, -4])");
    println!("│  Expected:  true, [1, -2, -6, 24]");

    let a = NdArray::from_f64([4], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = NdArray::full([4], 2.0);
    match a.lt(&b).and_then(|mask| mask.any()) {
        Ok(any) => println!("│  any(lt):   {}", any),
        Err(e) => println!("│  Error:     {}", e),
    }
    let c = NdArray::from_f64([4], vec![1.0, -2.0, 3.0, -4.0]).unwrap();
    report(c.cumprod());
}

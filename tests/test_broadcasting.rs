//! Integration tests for broadcasting arithmetic, dispatch paths and the
//! failure modes of the public array API

use ndvek::kernels::broadcast::{broadcast_shape, map_index, total_size};
use ndvek::kernels::routing::arithmetic::{DispatchPath, select_path};
use ndvek::{DType, NdArray, NdError};

fn ramp(shape: &[usize], start: f64) -> NdArray {
    let n = total_size(shape);
    let data: Vec<f64> = (0..n).map(|i| start + i as f64).collect();
    NdArray::from_f64(shape, data).unwrap()
}

#[test]
fn test_row_broadcast_scenario() {
    let a = NdArray::from_f64([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let b = NdArray::from_f64([3], vec![1.0, 2.0, 3.0]).unwrap();
    let out = a.add(&b).unwrap();
    assert_eq!(out.shape(), &[2, 3]);
    assert_eq!(out.dtype(), DType::Float64);
    assert_eq!(out.as_f64_slice().unwrap(), &[2.0, 4.0, 6.0, 5.0, 7.0, 9.0]);
}

#[test]
fn test_inplace_mismatch_scenario() {
    let mut a = NdArray::from_f64([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = NdArray::from_f64([1, 2], vec![1.0, 2.0]).unwrap();
    let err = a.add_inplace(&b).unwrap_err();
    assert!(matches!(err, NdError::ShapeMismatch { .. }));
    assert_eq!(a.shape(), &[2, 2]);
    assert_eq!(a.as_f64_slice().unwrap(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_incompatible_shapes_scenario() {
    let a = NdArray::zeros([2, 3]);
    let b = NdArray::zeros([4, 3]);
    assert_eq!(
        a.add(&b).unwrap_err(),
        NdError::IncompatibleShape { lhs: vec![2, 3], rhs: vec![4, 3] }
    );
    assert_eq!(
        a.add(&b).unwrap_err().to_string(),
        "Incompatible shapes for broadcasting: [2, 3] and [4, 3]."
    );
}

#[test]
fn test_broadcast_matches_index_mapping() {
    let cases: Vec<(Vec<usize>, Vec<usize>)> = vec![
        (vec![2, 3], vec![3]),
        (vec![3, 1], vec![1, 4]),
        (vec![2, 1, 4], vec![3, 1]),
        (vec![1], vec![2, 2]),
        (vec![4, 1, 2], vec![4, 3, 1]),
    ];
    for (ls, rs) in &cases {
        let a = ramp(ls, 1.0);
        let b = ramp(rs, 100.0);
        let out = a.mul(&b).unwrap();
        let shape = broadcast_shape(ls, rs).unwrap();
        assert_eq!(out.shape(), shape.as_slice());
        let (av, bv, ov) = (a.as_f64_slice().unwrap(), b.as_f64_slice().unwrap(), out.as_f64_slice().unwrap());
        for i in 0..total_size(&shape) {
            let li = map_index(ls, &shape, i).unwrap();
            let ri = map_index(rs, &shape, i).unwrap();
            assert_eq!(ov[i], av[li] * bv[ri], "shapes {:?} and {:?} at {}", ls, rs, i);
        }
    }
}

#[test]
fn test_subtract_is_negated_reverse() {
    let a = ramp(&[3, 1], 0.5);
    let b = ramp(&[1, 4], -2.0);
    let ab = a.sub(&b).unwrap();
    let ba = b.sub(&a).unwrap().mul_scalar(-1.0).unwrap();
    assert_eq!(ab.shape(), ba.shape());
    assert_eq!(ab.as_f64_slice().unwrap(), ba.as_f64_slice().unwrap());

    // same identity through the scalar paths
    let s = NdArray::from_f64([1], vec![7.0]).unwrap();
    let x = ramp(&[2, 3], 1.0);
    let sx = s.sub(&x).unwrap();
    let xs = x.sub(&s).unwrap().mul_scalar(-1.0).unwrap();
    assert_eq!(sx.shape(), &[2, 3]);
    assert_eq!(sx.as_f64_slice().unwrap(), xs.as_f64_slice().unwrap());
}

#[test]
fn test_divide_matches_multiply_by_reciprocal() {
    let a = ramp(&[2, 3], 1.0);
    let b = ramp(&[3], 2.0);
    let q = a.div(&b).unwrap();
    let r = a.mul(&b.inv().unwrap()).unwrap();
    for (x, y) in q.as_f64_slice().unwrap().iter().zip(r.as_f64_slice().unwrap()) {
        assert!((x - y).abs() <= 1e-12 * x.abs().max(1.0));
    }

    let s = NdArray::from_f64([1, 1], vec![3.0]).unwrap();
    let sq = s.div(&b).unwrap();
    assert_eq!(sq.shape(), &[3]);
    for (got, d) in sq.as_f64_slice().unwrap().iter().zip(b.as_f64_slice().unwrap()) {
        assert!((got - 3.0 / d).abs() < 1e-12);
    }
}

#[test]
fn test_scalar_paths_agree_with_scalar_ops() {
    let x = ramp(&[2, 2], 1.0);
    let one = NdArray::from_f64([1], vec![2.0]).unwrap();
    assert_eq!(x.add(&one).unwrap(), x.add_scalar(2.0).unwrap());
    assert_eq!(x.mul(&one).unwrap(), x.mul_scalar(2.0).unwrap());
    assert_eq!(one.add(&x).unwrap(), x.add_scalar(2.0).unwrap());
}

#[test]
fn test_path_selection_order() {
    assert_eq!(select_path(&[1], &[1]).unwrap(), DispatchPath::EqualShape);
    assert_eq!(select_path(&[3, 3], &[]).unwrap(), DispatchPath::ScalarRhs);
    assert_eq!(select_path(&[1, 1], &[5]).unwrap(), DispatchPath::ScalarLhs);
    assert_eq!(select_path(&[3, 1], &[1, 4]).unwrap(), DispatchPath::Broadcast(vec![3, 4]));
}

#[test]
fn test_rank_zero_operand() {
    let s = NdArray::from_f64(Vec::<usize>::new(), vec![5.0]).unwrap();
    let x = ramp(&[2, 2], 0.0);
    let out = x.sub(&s).unwrap();
    assert_eq!(out.shape(), &[2, 2]);
    assert_eq!(out.as_f64_slice().unwrap(), &[-5.0, -4.0, -3.0, -2.0]);
}

#[test]
fn test_zero_sized_broadcast() {
    let e = NdArray::from_f64([0, 3], vec![]).unwrap();
    let row = ramp(&[3], 1.0);
    let out = e.add(&row).unwrap();
    assert_eq!(out.shape(), &[0, 3]);
    assert!(out.is_empty());

    let ones = ramp(&[1, 3], 1.0);
    let out = e.add(&ones).unwrap();
    assert_eq!(out.shape(), &[0, 3]);
    assert!(out.is_empty());
    let out = ones.mul(&e).unwrap();
    assert_eq!(out.shape(), &[0, 3]);

    let col = ramp(&[2, 1], 1.0);
    let none = NdArray::from_f64([0], vec![]).unwrap();
    let out = col.sub(&none).unwrap();
    assert_eq!(out.shape(), &[2, 0]);
    assert!(out.is_empty());
}

#[test]
fn test_float32_promotion_rules() {
    let a = NdArray::from_f32([2, 1], vec![1.0, 2.0]).unwrap();
    let b = NdArray::from_f32([2], vec![0.5, 0.25]).unwrap();
    let out = a.add(&b).unwrap();
    assert_eq!(out.dtype(), DType::Float32);
    assert_eq!(out.as_f32_slice().unwrap(), &[1.5, 1.25, 2.5, 2.25]);

    let c = NdArray::from_f64([2], vec![0.5, 0.25]).unwrap();
    let out = a.add(&c).unwrap();
    assert_eq!(out.dtype(), DType::Float64);
    assert_eq!(out.as_f64_slice().unwrap(), &[1.5, 1.25, 2.5, 2.25]);
}

#[test]
fn test_bool_rejected_for_arithmetic() {
    let p = NdArray::from_bool([2], vec![true, false]).unwrap();
    let x = NdArray::from_f64([2], vec![1.0, 2.0]).unwrap();
    assert!(matches!(p.add(&x), Err(NdError::TypeMismatch { .. })));
    assert!(matches!(x.mul(&p), Err(NdError::TypeMismatch { .. })));
    assert!(matches!(p.neg(), Err(NdError::TypeMismatch { .. })));
}

#[test]
fn test_operands_untouched() {
    let a = ramp(&[2, 3], 1.0);
    let b = ramp(&[3], 1.0);
    let before = (a.clone(), b.clone());
    let _ = (&a + &b).unwrap();
    let _ = (&a / &b).unwrap();
    assert_eq!((a, b), before);
}

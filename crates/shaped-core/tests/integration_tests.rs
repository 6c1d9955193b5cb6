//! Integration tests for shaped-core
//!
//! These tests verify end-to-end behavior through the public API and the
//! interactions between views, reductions, shape transforms and broadcasting.

use shaped_core::shape::{numel, strides_for_shape, unravel};
use shaped_core::{BinaryOp, PrintOptions, ScalarMath, ShapeError, ShapedArray, UnaryOp};

fn iota_f64(shape: &[usize]) -> ShapedArray<f64> {
    ShapedArray::new((0..numel(shape)).map(|x| x as f64).collect(), shape)
}

fn iota_i32(shape: &[usize]) -> ShapedArray<i32> {
    ShapedArray::new((0..numel(shape) as i32).collect(), shape)
}

#[test]
fn test_stride_and_unravel_reference_values() {
    assert_eq!(strides_for_shape(&[1, 2, 3, 4]).as_slice(), &[24, 12, 4, 1]);
    assert!(strides_for_shape(&[]).is_empty());
    assert_eq!(unravel(1621, &[6, 7, 8, 9]).unwrap(), vec![3, 1, 4, 1]);
    assert_eq!(
        unravel(2, &[1]),
        Err(ShapeError::Index {
            index: vec![2],
            shape: vec![1]
        })
    );
}

#[test]
fn test_reductions_on_3x2x3() {
    let array = iota_f64(&[3, 2, 3]);

    assert_eq!(array.sum(), 153.0);
    assert_eq!(array.mean().unwrap(), 8.5);

    let squeezed = array.sum_squeezing_axes(&[0]).unwrap();
    assert_eq!(squeezed.shape(), &[2, 3]);
    assert_eq!(squeezed.scalars(), &[18.0, 21.0, 24.0, 27.0, 30.0, 33.0]);

    let kept = array.sum_along_axes(&[0]).unwrap();
    assert_eq!(kept.shape(), &[1, 2, 3]);
    assert_eq!(kept.scalars(), squeezed.scalars());

    let means = array.mean_squeezing_axes(&[0]).unwrap();
    assert_eq!(means.shape(), &[2, 3]);
    assert_eq!(means.scalars(), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
}

#[test]
fn test_reduction_equals_manual_fold() {
    let array = iota_i32(&[2, 3, 4]);
    let reduced = array.sum_squeezing_axes(&[1]).unwrap();
    assert_eq!(reduced.shape(), &[2, 4]);
    for i in 0..2 {
        for k in 0..4 {
            let expected: i32 = (0..3).map(|j| array[&[i, j, k]]).sum();
            assert_eq!(reduced[&[i, k]], expected);
        }
    }
}

#[test]
fn test_stack_unstack_roundtrip_all_axes() {
    let array = iota_i32(&[3, 2, 3]);
    for axis in 0..3 {
        let parts = array.unstack(axis).unwrap();
        let restacked = ShapedArray::stack(&parts, axis).unwrap();
        assert_eq!(restacked, array, "axis {}", axis);
        assert_eq!(restacked.unstack(axis).unwrap(), parts);
    }
}

#[test]
fn test_reshape_laws() {
    let array = iota_i32(&[2, 3, 4]);
    let reshaped = array.reshape(&[3, -1, 2]).unwrap();
    assert_eq!(reshaped.shape(), &[3, 4, 2]);
    assert_eq!(reshaped.scalar_count(), array.scalar_count());

    assert_eq!(array.reshape(&[-1]).unwrap(), array.flatten());
    assert!(matches!(
        array.reshape(&[-1, -1]),
        Err(ShapeError::InvalidReshape { .. })
    ));
}

#[test]
fn test_broadcast_reference_cases() {
    let column = iota_i32(&[4, 1]);
    let row = iota_i32(&[3]).map(|x| x * 10);
    let outer = column.broadcast_add(&row).unwrap();
    assert_eq!(outer.shape(), &[4, 3]);
    for i in 0..4 {
        for j in 0..3 {
            assert_eq!(outer[&[i, j]], column[&[i, 0]] + row[&[j]]);
        }
    }

    let a = iota_i32(&[3, 1, 5]);
    let b = iota_i32(&[5, 5]);
    let sum = a.broadcast_add(&b).unwrap();
    assert_eq!(sum.shape(), &[3, 5, 5]);
    for i in 0..3 {
        for j in 0..5 {
            for k in 0..5 {
                assert_eq!(sum[&[i, j, k]], a[&[i, 0, k]] + b[&[j, k]]);
            }
        }
    }

    assert!(matches!(
        iota_i32(&[2, 3]).broadcast_add(&iota_i32(&[4])),
        Err(ShapeError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_views_on_3x4x5() {
    let array = iota_i32(&[3, 4, 5]);
    let plane = array.element(2).unwrap();
    assert_eq!(plane.shape(), &[4, 5]);
    assert_eq!(plane.scalars(), (40..60).collect::<Vec<_>>().as_slice());

    let scalar = array.element(2).unwrap().element(0).unwrap().element(3).unwrap();
    assert_eq!(scalar.shape(), &[] as &[usize]);
    assert_eq!(scalar.scalars(), &[43]);
    assert!(scalar.element(0).is_err());
}

#[test]
fn test_mutation_through_views_reaches_base() {
    let mut array = iota_i32(&[3, 4, 5]);
    {
        let mut middle = array.subarray_mut(1..3).unwrap();
        let mut plane = middle.element_mut(1).unwrap();
        plane
            .assign_element(0, &ShapedArray::repeating(-1, &[5]))
            .unwrap();
    }
    assert_eq!(array.element(2).unwrap().element(0).unwrap().scalars(), &[-1; 5]);
    assert_eq!(array.get(&[2, 1, 0]), Some(&45));
}

#[test]
fn test_view_copy_and_reductions() {
    let array = iota_f64(&[3, 2, 3]);
    let view = array.subarray(1..3).unwrap();
    let owned: ShapedArray<f64> = view.clone().into();
    assert_eq!(owned.shape(), &[2, 2, 3]);
    assert_eq!(view.sum(), owned.sum());
    assert_eq!(
        view.mean_axes(&[0], false).unwrap(),
        owned.mean_squeezing_axes(&[0]).unwrap()
    );
}

#[test]
fn test_equality_properties() {
    let a = iota_i32(&[2, 3]);
    let b = iota_i32(&[2, 3]);
    let c = iota_i32(&[3, 2]);
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, c);
    assert_ne!(c, a);
}

#[test]
fn test_split_then_stack_axis() {
    let array = iota_i32(&[4, 6]);
    let parts = array.split(3, 1).unwrap();
    assert!(parts.iter().all(|part| part.shape() == [4, 2]));
    assert_eq!(ShapedArray::concatenate(&parts, 1).unwrap(), array);
    assert_eq!(
        array.split(4, 1),
        Err(ShapeError::UnevenSplit {
            size: 6,
            count: 4,
            axis: 1
        })
    );
}

#[test]
fn test_vector_math_pipeline() {
    let angles = iota_f64(&[2, 4]).map(|x| x * 0.25);
    let identity = &angles.sin().square() + &angles.cos().square();
    assert!(identity.iter().all(|x| (x - 1.0).abs() < 1e-12));

    let via_backend = angles
        .map_unary_with(&ScalarMath, UnaryOp::Tanh)
        .unwrap();
    assert_eq!(via_backend, angles.tanh());

    let doubled = angles
        .binary_with(&ScalarMath, &ShapedArray::scalar(2.0), BinaryOp::Mul)
        .unwrap();
    assert_eq!(doubled, &angles * 2.0);
}

#[test]
fn test_display_and_options() {
    let array = iota_i32(&[2, 2, 2]);
    assert_eq!(
        array.to_string(),
        "[[[0, 1],\n  [2, 3]],\n\n [[4, 5],\n  [6, 7]]]"
    );
    let options = PrintOptions::new()
        .with_summarizing(true)
        .with_edge_element_count(1);
    assert_eq!(
        iota_i32(&[5]).description(&options),
        "[0, ..., 4]"
    );
}

#[test]
fn test_errors_are_reported_not_partial() {
    let mut array = iota_i32(&[2, 2]);
    let before = array.clone();
    assert!(array
        .assign_subarray(0..2, &ShapedArray::repeating(0, &[2]))
        .is_err());
    assert_eq!(array, before);
}

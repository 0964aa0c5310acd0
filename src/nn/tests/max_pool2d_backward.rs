/*
 * @Description  : MaxPool2dWithIndicesBackward 单元测试
 *
 * 梯度只流向被索引选中的位置，多个输出选中同一位置时累加
 */

use approx::assert_abs_diff_eq;

use super::arange;
use crate::assert_err;
use crate::errors::PoolError;
use crate::nn::pool::{Pool2dParams, max_pool2d_with_indices, max_pool2d_with_indices_backward};
use crate::tensor::{Tensor, TestUtils};

fn backward_params() -> Pool2dParams {
    Pool2dParams::new((2, 2)).with_stride((1, 1)).with_padding((1, 1))
}

#[test]
fn test_backward_routes_grad_to_max_positions() -> Result<(), PoolError> {
    // 输入: [C=1, H=4, W=4]，最大值位置为 5, 7, 13, 15
    let input = arange(&[1, 4, 4]);
    let params = Pool2dParams::new((2, 2));
    let (_, indices) = max_pool2d_with_indices(&input, &params)?;

    let upstream_grad = Tensor::ones(&[1, 2, 2]);
    let grad = max_pool2d_with_indices_backward(&upstream_grad, &input, &params, &indices)?;

    assert_eq!(grad.shape(), &[1, 4, 4]);
    #[rustfmt::skip]
    assert_eq!(grad.to_vec(), vec![
        0., 0., 0., 0.,
        0., 1., 0., 1.,
        0., 0., 0., 0.,
        0., 1., 0., 1.,
    ]);
    Ok(())
}

#[test]
fn test_backward_accumulates_shared_positions() -> Result<(), PoolError> {
    // 全1输入 [1, 1, 3, 3]，2x2 核步长1，输出 2x2；所有索引都指向中心 4
    let input = Tensor::ones(&[1, 1, 3, 3]);
    let params = Pool2dParams::new((2, 2)).with_stride((1, 1));
    let upstream_grad: Tensor = Tensor::new(&[1., 2., 3., 4.], &[1, 1, 2, 2]);
    let indices = Tensor::new(&[4i64, 4, 4, 4], &[1, 1, 2, 2]);

    let grad = max_pool2d_with_indices_backward(&upstream_grad, &input, &params, &indices)?;
    assert_abs_diff_eq!(grad[[0, 0, 1, 1]], 10.0, epsilon = 1e-6);
    let others: f32 = grad.to_vec().iter().sum::<f32>() - grad[[0, 0, 1, 1]];
    assert_abs_diff_eq!(others, 0.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_backward_random_indices_keep_input_shape() -> Result<(), PoolError> {
    // 与目录中反向用例相同的形状：输入 [2, 4, 6, 5]，输出 [2, 4, 7, 6]
    let mut tu = TestUtils::new(0);
    let upstream_grad = Tensor::ones(&[2, 4, 7, 6]);
    let input = tu.rand(&[2, 4, 6, 5]);
    let indices = tu.randint(16, &[2, 4, 7, 6]);

    let grad =
        max_pool2d_with_indices_backward(&upstream_grad, &input, &backward_params(), &indices)?;
    assert_eq!(grad.shape(), input.shape());

    // 每个平面的梯度总和等于该平面上游梯度的总和（7 * 6 = 42）
    for plane in grad.to_vec().chunks(30) {
        assert_abs_diff_eq!(plane.iter().sum::<f32>(), 42.0, epsilon = 1e-4);
        // 索引都小于 16，之后的位置永远不会收到梯度
        assert!(plane[16..].iter().all(|&g| g == 0.0));
    }
    Ok(())
}

#[test]
fn test_backward_3d_input() -> Result<(), PoolError> {
    let mut tu = TestUtils::new(3);
    let upstream_grad = tu.rand(&[4, 7, 6]);
    let input = tu.rand(&[4, 6, 5]);
    let indices = tu.randint(16, &[4, 7, 6]);

    let grad =
        max_pool2d_with_indices_backward(&upstream_grad, &input, &backward_params(), &indices)?;
    assert_eq!(grad.shape(), &[4, 6, 5]);
    let total_in: f32 = upstream_grad.to_vec().iter().sum();
    let total_out: f32 = grad.to_vec().iter().sum();
    assert_abs_diff_eq!(total_in, total_out, epsilon = 1e-3);
    Ok(())
}

#[test]
fn test_backward_rejects_out_of_range_index() {
    let input = Tensor::ones(&[1, 6, 5]);
    let upstream_grad = Tensor::ones(&[1, 7, 6]);
    let mut indices = vec![0i64; 42];
    indices[41] = 30;
    let indices = Tensor::new(&indices, &[1, 7, 6]);

    assert_eq!(
        max_pool2d_with_indices_backward(&upstream_grad, &input, &backward_params(), &indices),
        Err(PoolError::IndexOutOfRange {
            index: 30,
            bound: 30
        })
    );

    let negative = Tensor::new(&[-1i64; 42], &[1, 7, 6]);
    assert_err!(
        max_pool2d_with_indices_backward(&upstream_grad, &input, &backward_params(), &negative),
        PoolError::IndexOutOfRange { index: -1, .. }
    );
}

#[test]
fn test_backward_rejects_mismatched_grad_shape() {
    let input = Tensor::ones(&[2, 4, 6, 5]);
    let upstream_grad = Tensor::ones(&[2, 4, 6, 6]);
    let indices = Tensor::<i64>::zeros(&[2, 4, 7, 6]);
    assert_err!(
        max_pool2d_with_indices_backward(&upstream_grad, &input, &backward_params(), &indices),
        PoolError::ShapeMismatch([2, 4, 7, 6], [2, 4, 6, 6])
    );
}

#[test]
fn test_backward_rejects_mismatched_indices_shape() {
    let input = Tensor::ones(&[2, 4, 6, 5]);
    let upstream_grad = Tensor::ones(&[2, 4, 7, 6]);
    let indices = Tensor::<i64>::zeros(&[2, 4, 7]);
    assert_err!(
        max_pool2d_with_indices_backward(&upstream_grad, &input, &backward_params(), &indices),
        PoolError::ShapeMismatch([2, 4, 7, 6], [2, 4, 7])
    );
}

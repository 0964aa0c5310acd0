/*
 * @Description  : AvgPool2d 单元测试
 *
 * 测试策略：
 * 1. 基础前向传播
 * 2. count_include_pad 开/关时的除数
 * 3. divisor_override
 * 4. 整数输入（截断除法）
 * 5. 非法参数
 */

use approx::assert_abs_diff_eq;

use super::arange;
use crate::assert_err;
use crate::errors::PoolError;
use crate::nn::pool::{AvgPool2dParams, Pool2dParams, avg_pool2d};
use crate::tensor::Tensor;

// ==================== 前向传播测试 ====================

#[test]
fn test_avg_pool2d_forward_simple() -> Result<(), PoolError> {
    // 输入: [C=1, H=4, W=4]，值为 1..=16
    let input = arange(&[1, 4, 4]);
    let output = avg_pool2d(&input, &AvgPool2dParams::new((2, 2)))?;

    // 窗口 [0:2, 0:2]: (1+2+5+6)/4 = 3.5
    // 窗口 [0:2, 2:4]: (3+4+7+8)/4 = 5.5
    // 窗口 [2:4, 0:2]: (9+10+13+14)/4 = 11.5
    // 窗口 [2:4, 2:4]: (11+12+15+16)/4 = 13.5
    assert_eq!(output.shape(), &[1, 2, 2]);
    assert_abs_diff_eq!(output[[0, 0, 0]], 3.5, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 0, 1]], 5.5, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 1, 0]], 11.5, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 1, 1]], 13.5, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_avg_pool2d_catalog_shape() -> Result<(), PoolError> {
    let params = AvgPool2dParams::new((6, 8))
        .with_stride((2, 2))
        .with_padding((3, 4));
    // H' = (20 + 6 - 5 - 1) / 2 + 1 = 11，W' = (20 + 8 - 7 - 1) / 2 + 1 = 11
    let output = avg_pool2d(&Tensor::ones(&[2, 4, 20, 20]), &params)?;
    assert_eq!(output.shape(), &[2, 4, 11, 11]);
    // H' = (10 + 6 - 5 - 1) / 2 + 1 = 6
    let output = avg_pool2d(&Tensor::ones(&[2, 2, 10, 20]), &params)?;
    assert_eq!(output.shape(), &[2, 2, 6, 11]);
    Ok(())
}

// ==================== 填充与除数测试 ====================

#[test]
fn test_avg_pool2d_count_include_pad() -> Result<(), PoolError> {
    // 全1输入 [1, 1, 2, 2]，2x2 核步长1填充1，输出 3x3
    let input = Tensor::ones(&[1, 1, 2, 2]);
    let params = AvgPool2dParams::new((2, 2))
        .with_stride((1, 1))
        .with_padding((1, 1));

    // 计入填充：角上的窗口只有1个真实元素，除以4
    let output = avg_pool2d(&input, &params)?;
    assert_eq!(output.shape(), &[1, 1, 3, 3]);
    assert_abs_diff_eq!(output[[0, 0, 0, 0]], 0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 0, 0, 1]], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 0, 1, 1]], 1.0, epsilon = 1e-6);

    // 不计入填充：除以真实元素个数，全部为1
    let output = avg_pool2d(&input, &params.with_count_include_pad(false))?;
    assert!(output.to_vec().iter().all(|&x| (x - 1.0).abs() < 1e-6));
    Ok(())
}

#[test]
fn test_avg_pool2d_divisor_override() -> Result<(), PoolError> {
    let input = Tensor::ones(&[1, 1, 4, 4]);
    let params = AvgPool2dParams::new((2, 2)).with_divisor_override(Some(22));
    let output = avg_pool2d(&input, &params)?;
    // 每个窗口和为4，除以22
    assert!(output.to_vec().iter().all(|&x| (x - 4.0 / 22.0).abs() < 1e-6));

    // 填充时也不改变除数
    let params = AvgPool2dParams::new((2, 2))
        .with_stride((1, 1))
        .with_padding((1, 1))
        .with_divisor_override(Some(22));
    let output = avg_pool2d(&input, &params)?;
    assert_abs_diff_eq!(output[[0, 0, 0, 0]], 1.0 / 22.0, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 0, 1, 1]], 4.0 / 22.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_avg_pool2d_ceil_mode_partial_window() -> Result<(), PoolError> {
    // 输入 [1, 1, 1, 3] = [1, 2, 3]，1x2 核步长2，ceil 模式下多出一个只覆盖末尾的窗口
    let input: Tensor = Tensor::new(&[1., 2., 3.], &[1, 1, 1, 3]);
    let params = AvgPool2dParams::new((1, 2)).with_ceil_mode(true);
    let output = avg_pool2d(&input, &params)?;
    assert_eq!(output.shape(), &[1, 1, 1, 2]);
    assert_abs_diff_eq!(output[[0, 0, 0, 0]], 1.5, epsilon = 1e-6);
    // 末尾窗口超出输入且不在填充内，按真实元素个数计
    assert_abs_diff_eq!(output[[0, 0, 0, 1]], 3.0, epsilon = 1e-6);
    Ok(())
}

// ==================== 整数输入测试 ====================

#[test]
fn test_avg_pool2d_int_truncates() -> Result<(), PoolError> {
    let input = Tensor::new(&[1i64, 2, 3, 4, -1, -2, -3, -4], &[2, 2, 2]);
    let output = avg_pool2d(&input, &AvgPool2dParams::new((2, 2)))?;
    // 10 / 4 = 2，-10 / 4 = -2（向零截断）
    assert_eq!(output.to_vec(), vec![2, -2]);
    Ok(())
}

// ==================== 错误测试 ====================

#[test]
fn test_avg_pool2d_rejects_non_positive_divisor() {
    let input = arange(&[1, 1, 4, 4]);
    let params = AvgPool2dParams::new((2, 2)).with_divisor_override(Some(0));
    assert_err!(
        avg_pool2d(&input, &params),
        PoolError::ValueMustSatisfyComparison { value_name, actual: 0, .. } if value_name == "divisor_override"
    );
}

#[test]
fn test_avg_pool2d_rejects_dilation() {
    let input = arange(&[1, 1, 4, 4]);
    let params = AvgPool2dParams {
        pool: Pool2dParams::new((2, 2)).with_dilation((2, 2)),
        ..AvgPool2dParams::new((2, 2))
    };
    assert_err!(avg_pool2d(&input, &params), PoolError::InvalidParameter(_));
}

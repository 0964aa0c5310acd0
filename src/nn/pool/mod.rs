/*
 * @Description  : 池化算子的参考实现
 *
 * 约定：
 * - 输入为3D `[C, H, W]`或4D `[N, C, H, W]`，前导维度展平后视为相互独立的平面（plane）
 * - 每个平面按行优先存放，平面之间用 Rayon 并行计算，结果按平面顺序拼接
 * - 所有参数/形状/类型问题都以 `PoolError` 返回
 */

mod adaptive_avg_pool2d;
mod avg_pool2d;
mod max_pool2d;
mod max_pool2d_backward;
mod params;

pub use adaptive_avg_pool2d::{AdaptiveAvgPool2d, adaptive_avg_pool2d};
pub use avg_pool2d::{AvgPool2d, AvgPool2dParams, avg_pool2d};
pub use max_pool2d::{MaxPool2d, MaxPool2dWithIndices, max_pool2d, max_pool2d_with_indices};
pub use max_pool2d_backward::{MaxPool2dWithIndicesBackward, max_pool2d_with_indices_backward};
pub use params::{Pool2dParams, pooling_output_size};

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::errors::PoolError;
use crate::tensor::{ElementType, Tensor, Value};

/// 池化算子的统一接口
#[enum_dispatch]
pub trait PoolOperator {
    /// 对应的 aten 算子名
    fn op_name(&self) -> &'static str;

    /// 前向计算需要的输入个数
    fn arity(&self) -> usize {
        1
    }

    /// 执行前向计算。输入个数、维数、类型不合法时返回错误
    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, PoolError>;
}

/// 目录中出现的全部池化算子
#[enum_dispatch(PoolOperator)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PoolOp {
    AdaptiveAvgPool2d(AdaptiveAvgPool2d),
    MaxPool2d(MaxPool2d),
    MaxPool2dWithIndices(MaxPool2dWithIndices),
    MaxPool2dWithIndicesBackward(MaxPool2dWithIndicesBackward),
    AvgPool2d(AvgPool2d),
}

/// 把输入形状拆成 (前导维, H, W)
pub(crate) fn split_planes<'a>(
    shape: &'a [usize],
    op_name: &str,
) -> Result<(&'a [usize], usize, usize), PoolError> {
    if shape.len() != 3 && shape.len() != 4 {
        return Err(PoolError::DimensionMismatch {
            expected: 4,
            got: shape.len(),
            message: format!("{op_name}的输入须为3D [C, H, W]或4D [N, C, H, W]"),
        });
    }
    let (lead, spatial) = shape.split_at(shape.len() - 2);
    let (in_h, in_w) = (spatial[0], spatial[1]);
    if in_h == 0 || in_w == 0 {
        return Err(PoolError::InvalidParameter(format!(
            "{op_name}的输入空间尺寸须为正，得到{shape:?}"
        )));
    }
    Ok((lead, in_h, in_w))
}

/// 前导维 + (H', W')
pub(crate) fn pooled_shape(lead: &[usize], out_h: usize, out_w: usize) -> Vec<usize> {
    let mut shape = lead.to_vec();
    shape.extend([out_h, out_w]);
    shape
}

pub(crate) fn check_arity(inputs: &[Value], expected: usize) -> Result<(), PoolError> {
    if inputs.len() != expected {
        return Err(PoolError::ArgCountMismatch {
            expected,
            got: inputs.len(),
        });
    }
    Ok(())
}

pub(crate) fn float_arg(inputs: &[Value], position: usize) -> Result<&Tensor<f32>, PoolError> {
    inputs[position].as_float().ok_or(PoolError::DtypeMismatch {
        arg: position,
        expected: ElementType::F32,
        got: inputs[position].dtype(),
    })
}

pub(crate) fn int_arg(inputs: &[Value], position: usize) -> Result<&Tensor<i64>, PoolError> {
    inputs[position].as_int().ok_or(PoolError::DtypeMismatch {
        arg: position,
        expected: ElementType::I64,
        got: inputs[position].dtype(),
    })
}

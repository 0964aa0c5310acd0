/*
 * @Description  : 2D 最大池化的反向传播（带索引版本）
 *
 * 梯度是稀疏的：
 * - 被某个输出位置选中的输入位置：累加该输出位置的上游梯度
 * - 从未被选中的位置：梯度为 0
 * 索引不要求来自真实的前向计算，只要落在平面范围内即可。
 */

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    Pool2dParams, PoolOperator, check_arity, float_arg, int_arg, pooled_shape, split_planes,
};
use crate::errors::PoolError;
use crate::tensor::{Element, IndexTensor, Tensor, Value};

/// `aten.max_pool2d_with_indices_backward`
///
/// 输入依次为：上游梯度、前向输入、前向输出的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxPool2dWithIndicesBackward {
    pub params: Pool2dParams,
}

impl MaxPool2dWithIndicesBackward {
    pub fn new(params: Pool2dParams) -> Self {
        Self { params }
    }
}

impl PoolOperator for MaxPool2dWithIndicesBackward {
    fn op_name(&self) -> &'static str {
        "aten.max_pool2d_with_indices_backward"
    }

    fn arity(&self) -> usize {
        3
    }

    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, PoolError> {
        check_arity(inputs, 3)?;
        let grad_output = float_arg(inputs, 0)?;
        let input = float_arg(inputs, 1)?;
        let indices = int_arg(inputs, 2)?;
        let grad_input =
            max_pool2d_with_indices_backward(grad_output, input, &self.params, indices)?;
        Ok(vec![grad_input.into()])
    }
}

/// 根据索引把上游梯度散射累加回输入位置，返回与`input`同形的梯度
pub fn max_pool2d_with_indices_backward<T: Element>(
    grad_output: &Tensor<T>,
    input: &Tensor<T>,
    params: &Pool2dParams,
    indices: &IndexTensor,
) -> Result<Tensor<T>, PoolError> {
    params.validate()?;
    let input_shape = input.shape();
    let (lead, in_h, in_w) = split_planes(input_shape, "MaxPool2dBackward")?;
    let (out_h, out_w) = params.output_size((in_h, in_w))?;
    let expected_shape = pooled_shape(lead, out_h, out_w);

    if grad_output.shape() != expected_shape.as_slice() {
        return Err(PoolError::ShapeMismatch {
            expected: expected_shape,
            got: grad_output.shape().to_vec(),
            message: "上游梯度须与池化输出同形".to_string(),
        });
    }
    if indices.shape() != expected_shape.as_slice() {
        return Err(PoolError::ShapeMismatch {
            expected: expected_shape,
            got: indices.shape().to_vec(),
            message: "索引须与池化输出同形".to_string(),
        });
    }

    let plane_in = in_h * in_w;
    let plane_out = out_h * out_w;
    let grads = grad_output.to_vec();
    let positions = indices.to_vec();

    // Rayon 并行处理每个平面
    let plane_grads = grads
        .par_chunks(plane_out)
        .zip(positions.par_chunks(plane_out))
        .map(|(grad_plane, index_plane)| {
            let mut sample_grad = vec![T::zero(); plane_in];
            for (&grad_val, &max_pos) in grad_plane.iter().zip(index_plane) {
                if max_pos < 0 || max_pos as usize >= plane_in {
                    return Err(PoolError::IndexOutOfRange {
                        index: max_pos,
                        bound: plane_in,
                    });
                }
                let slot = &mut sample_grad[max_pos as usize];
                *slot = *slot + grad_val;
            }
            Ok(sample_grad)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let all_data: Vec<T> = plane_grads.into_iter().flatten().collect();
    Tensor::try_new(all_data, input_shape)
}

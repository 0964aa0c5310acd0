/*
 * @Description  : 2D 最大池化（PyTorch 风格），可同时输出最大值索引
 *
 * 设计决策：
 * - 填充位置视为负无穷，永远不会被选中
 * - NaN 视为比任何值都大；窗口内有多个 NaN 时取最后一个
 * - 窗口内按行优先扫描，并列最大值取第一个遇到的
 * - 索引为最大值在所属输入平面内的展平偏移：ih * W + iw
 */

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Pool2dParams, PoolOperator, check_arity, pooled_shape, split_planes};
use crate::errors::PoolError;
use crate::tensor::{Element, IndexTensor, Tensor, Value};

/// `torch.nn.MaxPool2d`：只输出池化结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxPool2d {
    pub params: Pool2dParams,
}

/// `aten.max_pool2d_with_indices`：输出池化结果和索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxPool2dWithIndices {
    pub params: Pool2dParams,
}

impl MaxPool2d {
    pub fn new(params: Pool2dParams) -> Self {
        Self { params }
    }
}

impl MaxPool2dWithIndices {
    pub fn new(params: Pool2dParams) -> Self {
        Self { params }
    }
}

impl PoolOperator for MaxPool2d {
    fn op_name(&self) -> &'static str {
        "aten.max_pool2d"
    }

    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, PoolError> {
        check_arity(inputs, 1)?;
        let output: Value = match &inputs[0] {
            Value::Float(input) => max_pool2d(input, &self.params)?.into(),
            Value::Int(input) => max_pool2d(input, &self.params)?.into(),
        };
        Ok(vec![output])
    }
}

impl PoolOperator for MaxPool2dWithIndices {
    fn op_name(&self) -> &'static str {
        "aten.max_pool2d_with_indices"
    }

    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, PoolError> {
        check_arity(inputs, 1)?;
        let (output, indices): (Value, IndexTensor) = match &inputs[0] {
            Value::Float(input) => {
                let (output, indices) = max_pool2d_with_indices(input, &self.params)?;
                (output.into(), indices)
            }
            Value::Int(input) => {
                let (output, indices) = max_pool2d_with_indices(input, &self.params)?;
                (output.into(), indices)
            }
        };
        Ok(vec![output, indices.into()])
    }
}

/// 最大池化，丢弃索引
pub fn max_pool2d<T: Element>(
    input: &Tensor<T>,
    params: &Pool2dParams,
) -> Result<Tensor<T>, PoolError> {
    max_pool2d_with_indices(input, params).map(|(output, _)| output)
}

/// 最大池化，同时返回每个输出位置所选元素的平面内展平索引
pub fn max_pool2d_with_indices<T: Element>(
    input: &Tensor<T>,
    params: &Pool2dParams,
) -> Result<(Tensor<T>, IndexTensor), PoolError> {
    params.validate()?;
    let (lead, in_h, in_w) = split_planes(input.shape(), "MaxPool2d")?;
    let (out_h, out_w) = params.output_size((in_h, in_w))?;
    let output_shape = pooled_shape(lead, out_h, out_w);

    let data = input.to_vec();
    // Rayon 并行处理每个平面
    let plane_results = data
        .par_chunks(in_h * in_w)
        .map(|plane| max_pool_plane(plane, (in_h, in_w), (out_h, out_w), params))
        .collect::<Result<Vec<_>, _>>()?;

    let plane_size = out_h * out_w;
    let mut all_output = Vec::with_capacity(plane_results.len() * plane_size);
    let mut all_indices = Vec::with_capacity(plane_results.len() * plane_size);
    for (output, indices) in plane_results {
        all_output.extend(output);
        all_indices.extend(indices);
    }

    Ok((
        Tensor::try_new(all_output, &output_shape)?,
        Tensor::try_new(all_indices, &output_shape)?,
    ))
}

fn max_pool_plane<T: Element>(
    plane: &[T],
    (in_h, in_w): (usize, usize),
    (out_h, out_w): (usize, usize),
    params: &Pool2dParams,
) -> Result<(Vec<T>, Vec<i64>), PoolError> {
    let (k_h, k_w) = params.kernel_size;
    let (s_h, s_w) = params.stride;
    let (p_h, p_w) = params.padding;
    let (d_h, d_w) = params.dilation;

    let mut output = Vec::with_capacity(out_h * out_w);
    let mut indices = Vec::with_capacity(out_h * out_w);

    for oh in 0..out_h {
        for ow in 0..out_w {
            let h_start = (oh * s_h) as i64 - p_h as i64;
            let w_start = (ow * s_w) as i64 - p_w as i64;

            let mut best: Option<(T, usize)> = None;
            for kh in 0..k_h {
                let ih = h_start + (kh * d_h) as i64;
                if ih < 0 || ih >= in_h as i64 {
                    continue;
                }
                for kw in 0..k_w {
                    let iw = w_start + (kw * d_w) as i64;
                    if iw < 0 || iw >= in_w as i64 {
                        continue;
                    }
                    let pos = ih as usize * in_w + iw as usize;
                    let val = plane[pos];
                    let replace = match best {
                        None => true,
                        Some((max_val, _)) => val > max_val || val.is_nan(),
                    };
                    if replace {
                        best = Some((val, pos));
                    }
                }
            }

            let (max_val, max_pos) = best.ok_or_else(|| {
                PoolError::InvalidParameter(format!(
                    "MaxPool2d 输出位置({oh}, {ow})的窗口完全落在填充区域内"
                ))
            })?;
            output.push(max_val);
            indices.push(max_pos as i64);
        }
    }
    Ok((output, indices))
}

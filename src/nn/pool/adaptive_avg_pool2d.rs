/*
 * @Description  : 2D 自适应平均池化
 *
 * 输出位置 o 在长度为 in 的轴上覆盖区间：
 *   [floor(o * in / out), ceil((o + 1) * in / out))
 */

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{PoolOperator, check_arity, pooled_shape, split_planes};
use crate::errors::{ComparisonOperator, PoolError};
use crate::tensor::{Element, Tensor, Value};

/// `torch.nn.AdaptiveAvgPool2d`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveAvgPool2d {
    pub output_size: (usize, usize),
}

impl AdaptiveAvgPool2d {
    pub fn new(output_size: (usize, usize)) -> Self {
        Self { output_size }
    }
}

impl PoolOperator for AdaptiveAvgPool2d {
    fn op_name(&self) -> &'static str {
        "aten.adaptive_avg_pool2d"
    }

    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, PoolError> {
        check_arity(inputs, 1)?;
        let output: Value = match &inputs[0] {
            Value::Float(input) => adaptive_avg_pool2d(input, self.output_size)?.into(),
            Value::Int(input) => adaptive_avg_pool2d(input, self.output_size)?.into(),
        };
        Ok(vec![output])
    }
}

pub fn adaptive_avg_pool2d<T: Element>(
    input: &Tensor<T>,
    output_size: (usize, usize),
) -> Result<Tensor<T>, PoolError> {
    let (out_h, out_w) = output_size;
    for (value_name, value) in [("output_size(H)", out_h), ("output_size(W)", out_w)] {
        if value == 0 {
            return Err(PoolError::ValueMustSatisfyComparison {
                value_name: value_name.to_string(),
                operator: ComparisonOperator::GreaterThan,
                threshold: 0,
                actual: 0,
            });
        }
    }
    let (lead, in_h, in_w) = split_planes(input.shape(), "AdaptiveAvgPool2d")?;
    let output_shape = pooled_shape(lead, out_h, out_w);

    let data = input.to_vec();
    let plane_outputs: Vec<Vec<T>> = data
        .par_chunks(in_h * in_w)
        .map(|plane| {
            let mut output = Vec::with_capacity(out_h * out_w);
            for oh in 0..out_h {
                let (h_start, h_end) = adaptive_range(oh, in_h, out_h);
                for ow in 0..out_w {
                    let (w_start, w_end) = adaptive_range(ow, in_w, out_w);
                    let mut sum = T::zero();
                    for ih in h_start..h_end {
                        for iw in w_start..w_end {
                            sum = sum + plane[ih * in_w + iw];
                        }
                    }
                    let count = ((h_end - h_start) * (w_end - w_start)) as i64;
                    output.push(sum.div_count(count));
                }
            }
            output
        })
        .collect();

    Tensor::try_new(plane_outputs.into_iter().flatten().collect(), &output_shape)
}

/// 第`index`个输出在长度为`input`的轴上覆盖的输入区间 [start, end)
fn adaptive_range(index: usize, input: usize, output: usize) -> (usize, usize) {
    let start = index * input / output;
    let end = ((index + 1) * input).div_ceil(output);
    (start, end)
}

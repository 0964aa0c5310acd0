/*
 * @Description  : 2D 平均池化（PyTorch 风格）
 *
 * 窗口 [h_start, h_end) 的计算：
 *   h_start = oh * sH - pH
 *   h_end   = min(h_start + kH, H + pH)
 *   pool_size 在裁剪到输入范围之前统计（包含填充）
 * 除数：
 *   divisor_override 存在时为其值；否则 count_include_pad 时为 pool_size，
 *   否则为窗口内真实元素个数。整数输入使用截断除法。
 */

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Pool2dParams, PoolOperator, check_arity, pooled_shape, split_planes};
use crate::errors::{ComparisonOperator, PoolError};
use crate::tensor::{Element, Tensor, Value};

/// 平均池化参数（平均池化没有膨胀，`pool.dilation`恒为 (1, 1)）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvgPool2dParams {
    pub pool: Pool2dParams,
    pub count_include_pad: bool,
    pub divisor_override: Option<i64>,
}

impl AvgPool2dParams {
    /// 默认 stride = kernel_size，padding = 0，计入填充，无除数覆盖
    pub fn new(kernel_size: (usize, usize)) -> Self {
        Self {
            pool: Pool2dParams::new(kernel_size),
            count_include_pad: true,
            divisor_override: None,
        }
    }

    pub fn with_stride(mut self, stride: (usize, usize)) -> Self {
        self.pool = self.pool.with_stride(stride);
        self
    }

    pub fn with_padding(mut self, padding: (usize, usize)) -> Self {
        self.pool = self.pool.with_padding(padding);
        self
    }

    pub fn with_ceil_mode(mut self, ceil_mode: bool) -> Self {
        self.pool = self.pool.with_ceil_mode(ceil_mode);
        self
    }

    pub fn with_count_include_pad(mut self, count_include_pad: bool) -> Self {
        self.count_include_pad = count_include_pad;
        self
    }

    pub fn with_divisor_override(mut self, divisor_override: Option<i64>) -> Self {
        self.divisor_override = divisor_override;
        self
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        self.pool.validate()?;
        if self.pool.dilation != (1, 1) {
            return Err(PoolError::InvalidParameter(format!(
                "AvgPool2d 不支持膨胀，得到dilation={:?}",
                self.pool.dilation
            )));
        }
        if let Some(divisor) = self.divisor_override {
            if divisor <= 0 {
                return Err(PoolError::ValueMustSatisfyComparison {
                    value_name: "divisor_override".to_string(),
                    operator: ComparisonOperator::GreaterThan,
                    threshold: 0,
                    actual: divisor,
                });
            }
        }
        Ok(())
    }
}

/// `torch.nn.AvgPool2d`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvgPool2d {
    pub params: AvgPool2dParams,
}

impl AvgPool2d {
    pub fn new(params: AvgPool2dParams) -> Self {
        Self { params }
    }
}

impl PoolOperator for AvgPool2d {
    fn op_name(&self) -> &'static str {
        "aten.avg_pool2d"
    }

    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, PoolError> {
        check_arity(inputs, 1)?;
        let output: Value = match &inputs[0] {
            Value::Float(input) => avg_pool2d(input, &self.params)?.into(),
            Value::Int(input) => avg_pool2d(input, &self.params)?.into(),
        };
        Ok(vec![output])
    }
}

pub fn avg_pool2d<T: Element>(
    input: &Tensor<T>,
    params: &AvgPool2dParams,
) -> Result<Tensor<T>, PoolError> {
    params.validate()?;
    let (lead, in_h, in_w) = split_planes(input.shape(), "AvgPool2d")?;
    let (out_h, out_w) = params.pool.output_size((in_h, in_w))?;
    let output_shape = pooled_shape(lead, out_h, out_w);

    let data = input.to_vec();
    let plane_outputs: Vec<Vec<T>> = data
        .par_chunks(in_h * in_w)
        .map(|plane| avg_pool_plane(plane, (in_h, in_w), (out_h, out_w), params))
        .collect();

    Tensor::try_new(plane_outputs.into_iter().flatten().collect(), &output_shape)
}

fn avg_pool_plane<T: Element>(
    plane: &[T],
    (in_h, in_w): (usize, usize),
    (out_h, out_w): (usize, usize),
    params: &AvgPool2dParams,
) -> Vec<T> {
    let (k_h, k_w) = params.pool.kernel_size;
    let (s_h, s_w) = params.pool.stride;
    let (p_h, p_w) = (params.pool.padding.0 as i64, params.pool.padding.1 as i64);
    let (in_h, in_w) = (in_h as i64, in_w as i64);

    let mut output = Vec::with_capacity(out_h * out_w);
    for oh in 0..out_h {
        for ow in 0..out_w {
            let h_start = (oh * s_h) as i64 - p_h;
            let w_start = (ow * s_w) as i64 - p_w;
            let h_end = (h_start + k_h as i64).min(in_h + p_h);
            let w_end = (w_start + k_w as i64).min(in_w + p_w);
            let pool_size = (h_end - h_start) * (w_end - w_start);

            let (h_start, w_start) = (h_start.max(0), w_start.max(0));
            let (h_end, w_end) = (h_end.min(in_h), w_end.min(in_w));
            if h_start >= h_end || w_start >= w_end {
                output.push(T::zero());
                continue;
            }

            let mut sum = T::zero();
            for ih in h_start..h_end {
                for iw in w_start..w_end {
                    sum = sum + plane[(ih * in_w + iw) as usize];
                }
            }

            let divisor = match params.divisor_override {
                Some(divisor) => divisor,
                None if params.count_include_pad => pool_size,
                None => (h_end - h_start) * (w_end - w_start),
            };
            output.push(sum.div_count(divisor));
        }
    }
    output
}

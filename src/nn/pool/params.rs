/*
 * @Description  : 池化参数与输出尺寸公式
 *
 * 输出尺寸：
 *   out = floor_or_ceil((in + 2*pad - dil*(k-1) - 1) / stride) + 1
 * ceil 模式下，若最后一个窗口的起点已落在 `in + pad` 之外，则输出尺寸减一。
 */

use serde::{Deserialize, Serialize};

use crate::errors::{ComparisonOperator, PoolError};

/// 2D 池化（最大池化及其反向）的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool2dParams {
    pub kernel_size: (usize, usize), // (kH, kW)
    pub stride: (usize, usize),      // (sH, sW)
    pub padding: (usize, usize),     // (pH, pW)
    pub dilation: (usize, usize),    // (dH, dW)
    pub ceil_mode: bool,
}

impl Pool2dParams {
    /// 默认 stride = kernel_size，padding = 0，dilation = 1，不使用 ceil 模式
    pub fn new(kernel_size: (usize, usize)) -> Self {
        Self {
            kernel_size,
            stride: kernel_size,
            padding: (0, 0),
            dilation: (1, 1),
            ceil_mode: false,
        }
    }

    pub fn with_stride(mut self, stride: (usize, usize)) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_padding(mut self, padding: (usize, usize)) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_dilation(mut self, dilation: (usize, usize)) -> Self {
        self.dilation = dilation;
        self
    }

    pub fn with_ceil_mode(mut self, ceil_mode: bool) -> Self {
        self.ceil_mode = ceil_mode;
        self
    }

    /// 校验参数：核、步长、膨胀须为正，padding 不超过核的一半
    pub fn validate(&self) -> Result<(), PoolError> {
        let axes = [
            ("H", self.kernel_size.0, self.stride.0, self.padding.0, self.dilation.0),
            ("W", self.kernel_size.1, self.stride.1, self.padding.1, self.dilation.1),
        ];
        for (axis, k, s, p, d) in axes {
            must_be_positive(&format!("kernel_size({axis})"), k)?;
            must_be_positive(&format!("stride({axis})"), s)?;
            must_be_positive(&format!("dilation({axis})"), d)?;
            if p > k / 2 {
                return Err(PoolError::ValueMustSatisfyComparison {
                    value_name: format!("padding({axis})"),
                    operator: ComparisonOperator::LessOrEqual,
                    threshold: (k / 2) as i64,
                    actual: p as i64,
                });
            }
        }
        Ok(())
    }

    /// 计算输出的 (H', W')
    pub fn output_size(&self, input: (usize, usize)) -> Result<(usize, usize), PoolError> {
        let out_h = pooling_output_size(
            input.0,
            self.kernel_size.0,
            self.stride.0,
            self.padding.0,
            self.dilation.0,
            self.ceil_mode,
        )?;
        let out_w = pooling_output_size(
            input.1,
            self.kernel_size.1,
            self.stride.1,
            self.padding.1,
            self.dilation.1,
            self.ceil_mode,
        )?;
        Ok((out_h, out_w))
    }
}

/// 单个空间维度上的池化输出尺寸
pub fn pooling_output_size(
    input: usize,
    kernel: usize,
    stride: usize,
    padding: usize,
    dilation: usize,
    ceil_mode: bool,
) -> Result<usize, PoolError> {
    must_be_positive("stride", stride)?;
    must_be_positive("kernel_size", kernel)?;
    must_be_positive("dilation", dilation)?;

    let (input, kernel, stride, padding, dilation) = (
        input as i64,
        kernel as i64,
        stride as i64,
        padding as i64,
        dilation as i64,
    );
    let span = input + 2 * padding - dilation * (kernel - 1) - 1;
    if span < 0 {
        return Err(PoolError::InvalidParameter(format!(
            "池化输出尺寸无效：输入{input}，核{kernel}，步长{stride}，填充{padding}，膨胀{dilation}"
        )));
    }

    let mut output = if ceil_mode {
        (span + stride - 1) / stride + 1
    } else {
        span / stride + 1
    };
    // 最后一个窗口须从输入或左侧填充内开始
    if ceil_mode && (output - 1) * stride >= input + padding {
        output -= 1;
    }
    Ok(output as usize)
}

fn must_be_positive(value_name: &str, value: usize) -> Result<(), PoolError> {
    if value == 0 {
        return Err(PoolError::ValueMustSatisfyComparison {
            value_name: value_name.to_string(),
            operator: ComparisonOperator::GreaterThan,
            threshold: 0,
            actual: 0,
        });
    }
    Ok(())
}

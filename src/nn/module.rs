/*
 * @Description  : 模块描述（Module Descriptor）
 *
 * 一个模块 = 名称 + 一个池化算子配置 + 输入约束（导出/标注接口）。
 * 参数本身在构造时不做校验，非法配置在 forward 时由算子报错。
 */

use serde::{Deserialize, Serialize};

use super::pool::{PoolOp, PoolOperator};
use super::shape::ShapePattern;
use crate::errors::PoolError;
use crate::tensor::{ElementType, Value};

/// 单个参数的约束：形状模式、元素类型、是否需要梯度
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgAnnotation {
    pub shape: ShapePattern,
    pub dtype: ElementType,
    pub requires_grad: bool,
}

impl ArgAnnotation {
    pub fn new(shape: ShapePattern, dtype: ElementType, requires_grad: bool) -> Self {
        Self {
            shape,
            dtype,
            requires_grad,
        }
    }

    /// 校验第`position`个实参是否满足约束
    pub fn check(&self, position: usize, value: &Value) -> Result<(), PoolError> {
        let actual = value.shape();
        if actual.len() != self.shape.ndim() {
            return Err(PoolError::DimensionMismatch {
                expected: self.shape.ndim(),
                got: actual.len(),
                message: format!("第{position}个参数须满足形状{}", self.shape),
            });
        }
        if !self.shape.is_compatible_with_tensor(actual) {
            return Err(PoolError::ShapeMismatch {
                expected: self.shape.bind(actual).unwrap_or_default(),
                got: actual.to_vec(),
                message: format!("第{position}个参数须满足形状{}", self.shape),
            });
        }
        if value.dtype() != self.dtype {
            return Err(PoolError::DtypeMismatch {
                arg: position,
                expected: self.dtype,
                got: value.dtype(),
            });
        }
        Ok(())
    }
}

/// 一个待测模块：包装一个池化配置，并声明输入约束
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    name: String,
    op: PoolOp,
    args: Vec<ArgAnnotation>,
}

impl ModuleDescriptor {
    pub fn new(name: &str, op: impl Into<PoolOp>) -> Self {
        Self {
            name: name.to_string(),
            op: op.into(),
            args: Vec::new(),
        }
    }

    /// 追加一个参数约束（按 forward 参数顺序）
    pub fn arg(
        mut self,
        shape: impl Into<ShapePattern>,
        dtype: ElementType,
        requires_grad: bool,
    ) -> Self {
        self.args.push(ArgAnnotation::new(shape.into(), dtype, requires_grad));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn op(&self) -> &PoolOp {
        &self.op
    }

    pub fn annotations(&self) -> &[ArgAnnotation] {
        &self.args
    }

    /// 按声明的约束校验输入：个数、维数、固定维度、元素类型
    pub fn check_inputs(&self, inputs: &[Value]) -> Result<(), PoolError> {
        if inputs.len() != self.args.len() {
            return Err(PoolError::ArgCountMismatch {
                expected: self.args.len(),
                got: inputs.len(),
            });
        }
        self.args
            .iter()
            .zip(inputs)
            .enumerate()
            .try_for_each(|(position, (annotation, value))| annotation.check(position, value))
    }

    /// 先校验输入约束，再执行算子
    pub fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, PoolError> {
        self.check_inputs(inputs)?;
        self.op.forward(inputs)
    }
}

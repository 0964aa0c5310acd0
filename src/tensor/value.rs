use super::{ElementType, Tensor};

/// 带元素类型标签的张量，模块的输入输出都以它传递
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(Tensor<f32>),
    Int(Tensor<i64>),
}

impl Value {
    pub fn dtype(&self) -> ElementType {
        match self {
            Value::Float(_) => ElementType::F32,
            Value::Int(_) => ElementType::I64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Value::Float(t) => t.shape(),
            Value::Int(t) => t.shape(),
        }
    }

    pub fn as_float(&self) -> Option<&Tensor<f32>> {
        match self {
            Value::Float(t) => Some(t),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<&Tensor<i64>> {
        match self {
            Value::Int(t) => Some(t),
            Value::Float(_) => None,
        }
    }
}

impl From<Tensor<f32>> for Value {
    fn from(tensor: Tensor<f32>) -> Self {
        Value::Float(tensor)
    }
}

impl From<Tensor<i64>> for Value {
    fn from(tensor: Tensor<i64>) -> Self {
        Value::Int(tensor)
    }
}

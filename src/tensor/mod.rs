/*
 * @Description  : 张量。数据存放在`ndarray`的动态维数组中，元素类型为`f32`或`i64`
 */

use ndarray::{Array, ArrayD, IxDyn};

use crate::errors::PoolError;

mod dtype;
mod ops;
mod property;
mod random;
mod value;

pub use dtype::{Element, ElementType};
pub use random::TestUtils;
pub use value::Value;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 池化相关的张量通常是3D `[C, H, W]`或4D `[N, C, H, W]`。
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T = f32> {
    data: ArrayD<T>,
}

/// 最大池化输出的索引张量
pub type IndexTensor = Tensor<i64>;

impl<T: Element> Tensor<T> {
    /// 创建一个张量，`data`按行优先（row-major）排列。
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则会panic。
    pub fn new(data: &[T], shape: &[usize]) -> Self {
        match Self::try_new(data.to_vec(), shape) {
            Ok(tensor) => tensor,
            Err(e) => panic!("{}", e),
        }
    }

    /// `new`的可失败版本，长度不一致时返回错误而非panic
    pub fn try_new(data: Vec<T>, shape: &[usize]) -> Result<Self, PoolError> {
        let len = data.len();
        let data = Array::from_shape_vec(IxDyn(shape), data).map_err(|_| {
            PoolError::DataLengthMismatch {
                len,
                shape: shape.to_vec(),
            }
        })?;
        Ok(Self { data })
    }

    /// 创建一个所有元素都为`value`的张量
    pub fn full(value: T, shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(T::zero(), shape)
    }

    pub fn into_array(self) -> ArrayD<T> {
        self.data
    }
}

impl Tensor<f32> {
    /// 创建一个全1张量
    pub fn ones(shape: &[usize]) -> Self {
        Self::full(1.0, shape)
    }
}

use std::ops::Sub;

use super::{Element, Tensor};

impl Sub<f32> for Tensor<f32> {
    type Output = Self;

    fn sub(self, scalar: f32) -> Self {
        Self {
            data: self.data - scalar,
        }
    }
}

impl<T: Element> Tensor<T> {
    /// 逐元素映射，形状不变
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Self {
            data: self.data.mapv(f),
        }
    }
}

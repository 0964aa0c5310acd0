/*
 * @Description  : 本文件仅包含一些属性方法，不包含任何运算方法
 */

use std::ops::Index;

use super::{Element, ElementType, Tensor};

impl<T: Element> Tensor<T> {
    /// 若为向量，`shape`可以是[n]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]。
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 张量的维（dim）数、阶（rank）数，即`shape()`的元素个数
    pub fn dimension(&self) -> usize {
        self.data.ndim()
    }

    /// 计算张量中所有元素的数量
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn dtype(&self) -> ElementType {
        T::DTYPE
    }

    /// 按行优先顺序取出全部元素
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().copied().collect()
    }

    /// 取出某个位置的元素，越界时返回None
    pub fn get(&self, index: &[usize]) -> Option<T> {
        self.data.get(index).copied()
    }
}

impl<T, const N: usize> Index<[usize; N]> for Tensor<T> {
    type Output = T;

    fn index(&self, index: [usize; N]) -> &T {
        &self.data[&index[..]]
    }
}

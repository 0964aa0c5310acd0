/*
 * ShapePattern: 支持动态维度的形状模式
 *
 * 模块在声明输入约束时，每一维要么是固定值，要么是动态（调用时才确定）。
 * 例如 `[?, ?, ?, ?]` 表示任意大小的4D输入，`[1, 64, 112, 112]` 表示静态形状。
 *
 * # 示例
 * ```
 * use pool_suite::nn::{Dim, ShapePattern};
 *
 * // 固定形状
 * let fixed = ShapePattern::fixed(&[2, 4, 16, 16]);
 * assert_eq!(fixed.to_string(), "[2, 4, 16, 16]");
 *
 * // 全部动态
 * let dynamic = ShapePattern::dynamic(3);
 * assert_eq!(dynamic.to_string(), "[?, ?, ?]");
 *
 * // 完全自定义
 * let custom = ShapePattern::new(&[Dim::Dynamic, Dim::Fixed(10)]);
 * assert_eq!(custom.to_string(), "[?, 10]");
 * ```
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// 单个维度：固定值或动态
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dim {
    Fixed(usize),
    Dynamic,
}

impl Dim {
    /// 该维度能否接受实际大小`actual`：动态维度接受任意正数，固定维度须严格相等
    pub fn accepts(&self, actual: usize) -> bool {
        match self {
            Dim::Fixed(n) => *n == actual,
            Dim::Dynamic => actual > 0,
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Fixed(n) => write!(f, "{}", n),
            Dim::Dynamic => write!(f, "?"),
        }
    }
}

/// 形状模式
///
/// 与 `Vec<usize>` 的区别：
/// - `Vec<usize>`: 所有维度必须是确定的数值
/// - `ShapePattern`: 某些维度可以是 `Dim::Dynamic`，表示"任意正数"
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapePattern {
    dims: Vec<Dim>,
}

impl ShapePattern {
    pub fn new(dims: &[Dim]) -> Self {
        Self {
            dims: dims.to_vec(),
        }
    }

    /// 从固定形状创建（所有维度都是确定的）
    pub fn fixed(dims: &[usize]) -> Self {
        Self {
            dims: dims.iter().map(|&d| Dim::Fixed(d)).collect(),
        }
    }

    /// 创建`rank`维、每一维都动态的形状
    pub fn dynamic(rank: usize) -> Self {
        Self {
            dims: vec![Dim::Dynamic; rank],
        }
    }

    /// 获取维度数量
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// 获取指定维度，越界返回None
    pub fn dim(&self, index: usize) -> Option<Dim> {
        self.dims.get(index).copied()
    }

    /// 检查指定维度是否是动态的
    pub fn is_dynamic(&self, index: usize) -> bool {
        matches!(self.dims.get(index), Some(Dim::Dynamic))
    }

    /// 检查是否有任何动态维度
    pub fn has_dynamic_dims(&self) -> bool {
        self.dims.iter().any(|d| *d == Dim::Dynamic)
    }

    /// 检查此模式是否与实际张量形状兼容
    ///
    /// # 示例
    /// ```
    /// use pool_suite::nn::ShapePattern;
    ///
    /// let shape = ShapePattern::dynamic(4);
    /// assert!(shape.is_compatible_with_tensor(&[10, 3, 8, 9]));
    /// assert!(!shape.is_compatible_with_tensor(&[10, 3, 0, 9])); // 动态维度须为正
    /// assert!(!shape.is_compatible_with_tensor(&[3, 8, 9]));     // 维度数不匹配
    /// ```
    pub fn is_compatible_with_tensor(&self, tensor_shape: &[usize]) -> bool {
        self.dims.len() == tensor_shape.len()
            && self
                .dims
                .iter()
                .zip(tensor_shape.iter())
                .all(|(expected, &actual)| expected.accepts(actual))
    }

    /// 用实际张量形状填充动态维度，固定维度保持原值
    ///
    /// 维度数不一致时返回None。用于报错时给出"期望形状"。
    pub fn bind(&self, tensor_shape: &[usize]) -> Option<Vec<usize>> {
        if self.dims.len() != tensor_shape.len() {
            return None;
        }
        Some(
            self.dims
                .iter()
                .zip(tensor_shape.iter())
                .map(|(expected, &actual)| match expected {
                    Dim::Fixed(n) => *n,
                    Dim::Dynamic => actual,
                })
                .collect(),
        )
    }

    /// 转换为固定形状向量（如果所有维度都是固定的）
    pub fn to_vec_fixed(&self) -> Option<Vec<usize>> {
        self.dims
            .iter()
            .map(|d| match d {
                Dim::Fixed(n) => Some(*n),
                Dim::Dynamic => None,
            })
            .collect()
    }
}

impl fmt::Display for ShapePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.dims.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

impl From<&[usize]> for ShapePattern {
    fn from(shape: &[usize]) -> Self {
        ShapePattern::fixed(shape)
    }
}

impl<const N: usize> From<[usize; N]> for ShapePattern {
    fn from(shape: [usize; N]) -> Self {
        ShapePattern::fixed(&shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_pattern_creation() {
        let fixed = ShapePattern::fixed(&[1, 64, 112, 112]);
        assert_eq!(fixed.ndim(), 4);
        assert!(!fixed.has_dynamic_dims());
        assert_eq!(fixed.dim(0), Some(Dim::Fixed(1)));
        assert_eq!(fixed.dim(4), None);

        let dynamic = ShapePattern::dynamic(3);
        assert_eq!(dynamic.ndim(), 3);
        assert!(dynamic.has_dynamic_dims());
        assert!(dynamic.is_dynamic(0));
        assert!(!dynamic.is_dynamic(3));

        let custom = ShapePattern::new(&[Dim::Dynamic, Dim::Fixed(10), Dim::Dynamic]);
        assert!(custom.is_dynamic(0));
        assert!(!custom.is_dynamic(1));
        assert!(custom.is_dynamic(2));
    }

    #[test]
    fn test_shape_pattern_display() {
        assert_eq!(ShapePattern::fixed(&[4, 7, 6]).to_string(), "[4, 7, 6]");
        assert_eq!(ShapePattern::dynamic(2).to_string(), "[?, ?]");
        assert_eq!(ShapePattern::dynamic(0).to_string(), "[]");
    }

    #[test]
    fn test_shape_pattern_compatibility() {
        let dynamic = ShapePattern::dynamic(4);
        assert!(dynamic.is_compatible_with_tensor(&[1, 1, 20, 20]));
        assert!(!dynamic.is_compatible_with_tensor(&[1, 20, 20]));
        assert!(!dynamic.is_compatible_with_tensor(&[0, 1, 20, 20]));

        let fixed = ShapePattern::from([2, 4, 16, 16]);
        assert!(fixed.is_compatible_with_tensor(&[2, 4, 16, 16]));
        assert!(!fixed.is_compatible_with_tensor(&[2, 4, 16, 15]));

        let custom = ShapePattern::new(&[Dim::Dynamic, Dim::Fixed(3)]);
        assert!(custom.is_compatible_with_tensor(&[7, 3]));
        assert!(!custom.is_compatible_with_tensor(&[7, 4]));
    }

    #[test]
    fn test_bind() {
        let custom = ShapePattern::new(&[Dim::Dynamic, Dim::Fixed(3)]);
        assert_eq!(custom.bind(&[7, 4]), Some(vec![7, 3]));
        assert_eq!(custom.bind(&[7]), None);
    }

    #[test]
    fn test_to_vec_fixed() {
        assert_eq!(ShapePattern::fixed(&[2, 2]).to_vec_fixed(), Some(vec![2, 2]));
        assert_eq!(ShapePattern::dynamic(2).to_vec_fixed(), None);
    }
}

use std::fmt::{self, Debug, Display};

use num_traits::{NumCast, Zero};
use serde::{Deserialize, Serialize};

/// 张量的元素类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    F32,
    I64,
}

impl Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::F32 => "float32",
            ElementType::I64 => "int64",
        };
        write!(f, "{}", name)
    }
}

/// 可作为张量元素的数值类型
///
/// 池化核对`f32`和`i64`共用同一份实现，差异只在于：
/// - NaN 的判定（整数永远不是 NaN）
/// - 求平均时的除法（整数截断）
pub trait Element:
    Copy + Send + Sync + PartialOrd + Zero + NumCast + Debug + 'static
{
    const DTYPE: ElementType;

    fn is_nan(self) -> bool {
        false
    }

    /// 除以窗口计数（或除数覆盖值）
    fn div_count(self, count: i64) -> Self;
}

impl Element for f32 {
    const DTYPE: ElementType = ElementType::F32;

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    fn div_count(self, count: i64) -> Self {
        self / count as f32
    }
}

impl Element for i64 {
    const DTYPE: ElementType = ElementType::I64;

    fn div_count(self, count: i64) -> Self {
        self / count
    }
}

/*
 * @Description  : 全库统一的错误类型
 *
 * 参数、形状、数据类型不合法等问题都在执行（forward）时以 `PoolError` 返回，
 * 构造模块描述时不做校验。
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

use crate::tensor::ElementType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    // 数字比较用
    #[error("{value_name}须{operator}{threshold}，实际为{actual}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: i64,
        actual: i64,
    },
    #[error("形状不匹配：期望{expected:?}，实际为{got:?}。{message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("维数不匹配：期望{expected}维，实际为{got}维。{message}")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        message: String,
    },
    #[error("第{arg}个参数的数据类型不匹配：期望{expected}，实际为{got}")]
    DtypeMismatch {
        arg: usize,
        expected: ElementType,
        got: ElementType,
    },
    #[error("参数个数不匹配：期望{expected}个，实际为{got}个")]
    ArgCountMismatch { expected: usize, got: usize },
    #[error("索引{index}越界：有效范围为[0, {bound})")]
    IndexOutOfRange { index: i64, bound: usize },
    #[error("数据长度{len}与形状{shape:?}不一致")]
    DataLengthMismatch { len: usize, shape: Vec<usize> },
    #[error("{0}")]
    InvalidParameter(String),

    // 用例目录
    #[error("用例`{0}`已注册")]
    DuplicateCase(String),
    #[error("未找到用例`{0}`")]
    CaseNotFound(String),
    #[error("用例`{0}`两次运行的结果不一致")]
    NonDeterministic(String),

    #[error("配置错误：{0}")]
    Config(String),
    #[error("日志初始化失败：{0}")]
    Logging(String),
}

use std::fmt::{self, Display};

/// 比较运算符（用于参数校验的报错信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    LessOrEqual,
    GreaterThan,
    LessThan,
}
impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator_name = match self {
            ComparisonOperator::GreaterOrEqual => "≥",
            ComparisonOperator::LessOrEqual => "≤",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThan => "<",
        };
        write!(f, "{}", operator_name)
    }
}

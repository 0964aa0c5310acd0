//! # Pool Suite
//!
//! 池化算子的测试用例目录：每个用例把一个小模块（包装一个池化配置并声明输入约束）
//! 和一段生成确定性输入的代码配成一对，供编译器的池化降级（lowering）验证使用。
//!
//! 为了让目录可以独立运行，本库同时提供：
//! - 池化算子的参考实现（自适应平均池化、最大池化及其带索引版本和反向、平均池化）
//! - 基于固定种子的测试数据工具
//! - 显式的用例注册表与运行器
//!

pub mod errors;
pub mod logging;
pub mod nn;
pub mod suite;
pub mod tensor;
pub mod utils;

//! # 神经网络模块
//!
//! 池化算子的参考实现、模块描述（含输入约束）以及可序列化的目录描述符

mod descriptor;
mod module;
pub mod pool;
mod shape;

pub use descriptor::{CaseDescriptor, CatalogDescriptor};
pub use module::{ArgAnnotation, ModuleDescriptor};
pub use pool::{PoolOp, PoolOperator};
pub use shape::{Dim, ShapePattern};

#[cfg(test)]
mod tests;

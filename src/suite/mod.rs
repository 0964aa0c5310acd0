/*
 * @Description  : 用例与注册表
 *
 * 注册表是一个显式的 (名称, 模块工厂, 输入生成器) 列表，按注册顺序遍历。
 * 用例在构建注册表时创建，运行时只读。
 */

mod catalog;
mod runner;

pub use catalog::pooling_cases;
pub use runner::{CaseReport, RunConfig, RunSummary, run_all, run_case};

use tracing::debug;

use crate::errors::PoolError;
use crate::nn::{CatalogDescriptor, ModuleDescriptor};
use crate::tensor::{TestUtils, Value};

#[cfg(test)]
mod tests;

/// 无参的模块工厂
pub type ModuleFactory = fn() -> ModuleDescriptor;
/// 输入生成器：从测试数据工具中取出模块需要的全部输入
pub type InputGenerator = fn(&mut TestUtils) -> Vec<Value>;

/// 一个用例：引用一个模块工厂和一个输入生成器
#[derive(Clone)]
pub struct InvocationCase {
    name: String,
    module_factory: ModuleFactory,
    inputs: InputGenerator,
}

/// 一次调用的完整记录
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub module: ModuleDescriptor,
    pub inputs: Vec<Value>,
    pub outputs: Vec<Value>,
}

impl InvocationCase {
    pub fn new(name: &str, module_factory: ModuleFactory, inputs: InputGenerator) -> Self {
        Self {
            name: name.to_string(),
            module_factory,
            inputs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 用工厂构造一个新的模块
    pub fn module(&self) -> ModuleDescriptor {
        (self.module_factory)()
    }

    pub fn generate_inputs(&self, tu: &mut TestUtils) -> Vec<Value> {
        (self.inputs)(tu)
    }

    /// 构造模块、生成输入并执行 forward
    pub fn invoke(&self, tu: &mut TestUtils) -> Result<Invocation, PoolError> {
        let module = self.module();
        let inputs = self.generate_inputs(tu);
        debug!(
            case = %self.name,
            input_shapes = ?inputs.iter().map(|v| v.shape().to_vec()).collect::<Vec<_>>(),
            "执行 forward"
        );
        let outputs = module.forward(&inputs)?;
        Ok(Invocation {
            module,
            inputs,
            outputs,
        })
    }
}

impl std::fmt::Debug for InvocationCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// 用例注册表
#[derive(Debug, Clone, Default)]
pub struct Registry {
    cases: Vec<InvocationCase>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个用例，返回其在注册表中的编号。名称重复时报错
    pub fn register(
        &mut self,
        name: &str,
        module_factory: ModuleFactory,
        inputs: InputGenerator,
    ) -> Result<usize, PoolError> {
        if self.cases.iter().any(|case| case.name == name) {
            return Err(PoolError::DuplicateCase(name.to_string()));
        }
        self.cases.push(InvocationCase::new(name, module_factory, inputs));
        debug!(case = name, "注册用例");
        Ok(self.cases.len() - 1)
    }

    pub fn get(&self, name: &str) -> Result<&InvocationCase, PoolError> {
        self.cases
            .iter()
            .find(|case| case.name == name)
            .ok_or_else(|| PoolError::CaseNotFound(name.to_string()))
    }

    pub fn get_by_id(&self, id: usize) -> Option<&InvocationCase> {
        self.cases.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InvocationCase> {
        self.cases.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|case| case.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// 导出全部用例的模块配置与输入约束
    pub fn describe(&self, name: &str) -> CatalogDescriptor {
        let mut descriptor = CatalogDescriptor::new(name);
        for case in &self.cases {
            descriptor.add_case(case.name(), case.module());
        }
        descriptor
    }
}

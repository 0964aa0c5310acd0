/*
 * @Description  : 用例目录描述符
 *                 可序列化为 JSON，便于下游编译器或外部工具读取全部模块的配置与输入约束
 */

use serde::{Deserialize, Serialize};

use super::module::ModuleDescriptor;

/// 用例目录的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDescriptor {
    /// 格式版本（用于向后兼容）
    pub version: String,
    /// 目录名称
    pub name: String,
    /// 所有用例描述
    pub cases: Vec<CaseDescriptor>,
}

/// 用例描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDescriptor {
    /// 用例名称
    pub name: String,
    /// 用例所用的模块
    pub module: ModuleDescriptor,
}

impl CatalogDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.to_string(),
            cases: Vec::new(),
        }
    }

    pub fn add_case(&mut self, name: &str, module: ModuleDescriptor) {
        self.cases.push(CaseDescriptor {
            name: name.to_string(),
            module,
        });
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

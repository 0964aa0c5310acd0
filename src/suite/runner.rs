/*
 * @Description  : 用例运行器
 *
 * 对每个用例检查：
 * - 生成的输入满足模块声明的约束（在 forward 中校验）
 * - 同一种子运行两次，输入输出完全一致
 * - 反向用例的输出梯度与前向输入同形
 * 与其它引擎的数值对比不在本库范围内。
 */

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{InvocationCase, Registry};
use crate::errors::PoolError;
use crate::nn::PoolOp;
use crate::tensor::{ElementType, TestUtils};

/// 运行配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// 每个用例生成输入时使用的随机种子
    pub seed: u64,
    /// 只运行名称包含该子串的用例
    pub filter: Option<String>,
}

impl RunConfig {
    pub const SEED_ENV: &'static str = "POOL_SUITE_SEED";
    pub const FILTER_ENV: &'static str = "POOL_SUITE_FILTER";

    /// 从环境变量读取配置，未设置的项取默认值
    pub fn from_env() -> Result<Self, PoolError> {
        let mut config = Self::default();
        match std::env::var(Self::SEED_ENV) {
            Ok(raw) if !raw.trim().is_empty() => {
                config.seed = raw.trim().parse().map_err(|_| {
                    PoolError::Config(format!("{}须为非负整数，得到`{raw}`", Self::SEED_ENV))
                })?;
            }
            Ok(_) | Err(std::env::VarError::NotPresent) => {}
            Err(e) => return Err(PoolError::Config(format!("{}：{e}", Self::SEED_ENV))),
        }
        match std::env::var(Self::FILTER_ENV) {
            Ok(raw) if !raw.trim().is_empty() => config.filter = Some(raw.trim().to_string()),
            Ok(_) | Err(std::env::VarError::NotPresent) => {}
            Err(e) => return Err(PoolError::Config(format!("{}：{e}", Self::FILTER_ENV))),
        }
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        serde_json::from_str(json).map_err(|e| PoolError::Config(e.to_string()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    /// 用例是否在本次运行范围内
    pub fn selects(&self, case_name: &str) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|filter| case_name.contains(filter))
    }
}

/// 单个用例的运行结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,
    pub output_shapes: Vec<Vec<usize>>,
    pub output_dtypes: Vec<ElementType>,
}

/// 一次运行的汇总
#[derive(Debug, Default)]
pub struct RunSummary {
    pub passed: Vec<CaseReport>,
    pub failed: Vec<(String, PoolError)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 运行单个用例并检查目录的一致性
pub fn run_case(case: &InvocationCase, config: &RunConfig) -> Result<CaseReport, PoolError> {
    let first = case.invoke(&mut TestUtils::new(config.seed))?;
    let second = case.invoke(&mut TestUtils::new(config.seed))?;
    if first != second {
        return Err(PoolError::NonDeterministic(case.name().to_string()));
    }

    if let PoolOp::MaxPool2dWithIndicesBackward(_) = first.module.op() {
        // 输入依次为：上游梯度、前向输入、索引
        let input_shape = first.inputs[1].shape();
        let grad_shape = first.outputs[0].shape();
        if grad_shape != input_shape {
            return Err(PoolError::ShapeMismatch {
                expected: input_shape.to_vec(),
                got: grad_shape.to_vec(),
                message: format!("用例`{}`的输入梯度须与前向输入同形", case.name()),
            });
        }
    }

    let report = CaseReport {
        name: case.name().to_string(),
        output_shapes: first.outputs.iter().map(|v| v.shape().to_vec()).collect(),
        output_dtypes: first.outputs.iter().map(|v| v.dtype()).collect(),
    };
    debug!(case = %report.name, output_shapes = ?report.output_shapes, "用例通过");
    Ok(report)
}

/// 按注册顺序运行注册表中被选中的用例
pub fn run_all(registry: &Registry, config: &RunConfig) -> RunSummary {
    let mut summary = RunSummary::default();
    for case in registry.iter().filter(|case| config.selects(case.name())) {
        match run_case(case, config) {
            Ok(report) => summary.passed.push(report),
            Err(e) => {
                warn!(case = case.name(), error = %e, "用例失败");
                summary.failed.push((case.name().to_string(), e));
            }
        }
    }
    info!(
        seed = config.seed,
        passed = summary.passed.len(),
        failed = summary.failed.len(),
        "运行结束"
    );
    summary
}

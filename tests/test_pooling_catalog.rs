/*
 * @Description  : 通过公开接口跑完整的池化用例目录
 */

use pool_suite::errors::PoolError;
use pool_suite::logging::init_tracing;
use pool_suite::nn::CatalogDescriptor;
use pool_suite::suite::{RunConfig, pooling_cases, run_all};

#[test]
fn test_pooling_catalog() -> Result<(), PoolError> {
    init_tracing()?;
    // 第二次初始化应当失败
    assert!(matches!(init_tracing(), Err(PoolError::Logging(_))));

    let registry = pooling_cases()?;
    for seed in [0, 42] {
        let summary = run_all(&registry, &RunConfig::default().with_seed(seed));
        assert!(summary.is_success(), "种子{seed}下的失败用例：{:?}", summary.failed);
        assert_eq!(summary.passed.len(), registry.len());
    }

    // 目录描述可以导出再读回
    let descriptor = registry.describe("pooling");
    let json = descriptor
        .to_json()
        .map_err(|e| PoolError::Config(e.to_string()))?;
    let parsed = CatalogDescriptor::from_json(&json).map_err(|e| PoolError::Config(e.to_string()))?;
    assert_eq!(parsed, descriptor);
    assert_eq!(parsed.cases[0].name, "AdaptiveAvgPool2dModule_basic");
    Ok(())
}

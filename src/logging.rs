/*
 * @Description  : 日志初始化
 *
 * 过滤规则取自环境变量 `RUST_LOG`，未设置时默认 `info`。
 */

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::PoolError;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// 配置全局 tracing subscriber，只能成功调用一次
pub fn init_tracing() -> Result<(), PoolError> {
    INITIALISED
        .set(())
        .map_err(|_| PoolError::Logging("tracing 已经初始化过".to_string()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stdout().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| PoolError::Logging(e.to_string()))
}

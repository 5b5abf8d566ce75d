//! 应用运行配置加载。

use std::env;
use std::path::PathBuf;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 模块注册表 JSON 文档。
    pub registry_path: PathBuf,
    /// 内存存储种子数据（可选）。
    pub seed_path: Option<PathBuf>,
    pub eligibility_cache_enabled: bool,
    pub eligibility_cache_capacity: usize,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None)
    }

    /// 从环境变量读取配置，注册表路径优先使用调用方给定的值（命令行参数）。
    pub fn from_env_with(registry_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let registry_path = registry_path
            .or_else(|| read_optional("NAVGATE_REGISTRY_PATH").map(PathBuf::from))
            .ok_or_else(|| ConfigError::Missing("NAVGATE_REGISTRY_PATH".to_string()))?;
        let seed_path = read_optional("NAVGATE_SEED_PATH").map(PathBuf::from);
        let eligibility_cache_enabled = read_bool_with_default("NAVGATE_ELIGIBILITY_CACHE", true);
        let eligibility_cache_capacity =
            read_usize_with_default("NAVGATE_CACHE_CAPACITY", 1024)?;

        Ok(Self {
            registry_path,
            seed_path,
            eligibility_cache_enabled,
            eligibility_cache_capacity,
        })
    }

    /// 实际生效的缓存容量；关闭缓存时为 0。
    pub fn cache_capacity(&self) -> usize {
        if self.eligibility_cache_enabled {
            self.eligibility_cache_capacity
        } else {
            0
        }
    }
}

fn read_usize_with_default(key: &str, default: usize) -> Result<usize, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}

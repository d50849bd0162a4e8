use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, RustPowError};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mining: MiningConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// 默认挖矿难度，越界值在构造Difficulty时钳制
    pub difficulty: i64,
    /// 连续挖矿时每个调度片内的尝试批量
    pub batch_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// 哈希率采样窗口，毫秒
    pub window_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mining: MiningConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        MiningConfig {
            difficulty: 2,
            batch_size: 50,
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig { window_ms: 1000 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("RUST_POW_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| RustPowError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        toml::from_str(&config_str)
            .map_err(|e| RustPowError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 配置文件缺失时回退到默认值
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                debug!("使用默认配置: {}", e);
                Config::default()
            }
        }
    }
}

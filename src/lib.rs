// 导出所有模块
pub mod config;
pub mod error;
pub mod hasher;
pub mod miner;
pub mod state;
pub mod target;

// 导出常用类型
pub use config::Config;
pub use error::{Result, RustPowError};
pub use hasher::{build_header, double_sha256, sha256_hex};
pub use miner::{Attempt, Miner};
pub use state::{MinerStatus, MiningState, StatsSnapshot};
pub use target::{meets_target, Difficulty};

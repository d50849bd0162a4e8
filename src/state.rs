use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::target::Difficulty;

/// 挖矿状态机的三种状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MinerStatus {
    Idle,
    Running,
    Found,
}

/// 挖矿会话状态，随会话创建，仅由显式重置清零，从不持久化
///
/// 单一状态值取代原型中的模块级可变变量，每次尝试原子地
/// 更新全部统计字段。
#[derive(Debug)]
pub struct MiningState {
    /// 当前nonce，可由调用方在两次尝试之间直接修改
    pub nonce: u64,
    /// 累计尝试次数，只在显式重置时清零
    pub attempt_count: u64,
    /// 本会话观测到的字典序最小哈希
    pub best_hash: Option<String>,
    /// 当前采样窗口内的尝试次数
    window_count: u64,
    /// 当前采样窗口的起始时刻
    window_start: Instant,
    /// 最近一次采样得到的哈希率 (H/s)
    hash_rate: u64,
    pub status: MinerStatus,
}

/// 供展示层渲染的统计快照
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub attempt_count: u64,
    pub best_hash: Option<String>,
    pub hash_rate: u64,
    pub progress: f64,
    pub status: MinerStatus,
}

impl MiningState {
    pub fn new() -> Self {
        MiningState {
            nonce: 0,
            attempt_count: 0,
            best_hash: None,
            window_count: 0,
            window_start: Instant::now(),
            hash_rate: 0,
            status: MinerStatus::Idle,
        }
    }

    /// 记录一次成功计算出哈希的尝试
    ///
    /// 计数与最优哈希一并更新；失败的尝试不得调用本方法。
    pub fn record(&mut self, hash: &str) {
        self.attempt_count += 1;
        self.window_count += 1;

        let is_better = match &self.best_hash {
            Some(best) => hash < best.as_str(),
            None => true,
        };
        if is_better {
            debug!("更新最优哈希: {}", hash);
            self.best_hash = Some(hash.to_string());
        }
    }

    /// 按实际流逝时间采样哈希率
    ///
    /// 距上次采样满一个窗口时，以窗口内计数作为速率并重置窗口，
    /// 得到约每秒更新一次的分段速率，而非真实瞬时速率。
    pub fn sample_hash_rate(&mut self, window: Duration) {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= window {
            self.hash_rate = self.window_count;
            self.window_count = 0;
            self.window_start = now;
        }
    }

    pub fn hash_rate(&self) -> u64 {
        self.hash_rate
    }

    /// nonce空间覆盖进度: (尝试次数 mod 16^难度) / 16^难度
    ///
    /// 粗略的界面信号，不是精确概率，始终落在 [0, 1) 区间。
    pub fn progress(&self, difficulty: Difficulty) -> f64 {
        let expected = difficulty.expected_attempts();
        (self.attempt_count % expected) as f64 / expected as f64
    }

    /// 完全重置：计数清零，nonce归零，回到Idle
    pub fn reset(&mut self) {
        self.nonce = 0;
        self.attempt_count = 0;
        self.best_hash = None;
        self.window_count = 0;
        self.window_start = Instant::now();
        self.hash_rate = 0;
        self.status = MinerStatus::Idle;
    }

    pub fn snapshot(&self, difficulty: Difficulty) -> StatsSnapshot {
        StatsSnapshot {
            attempt_count: self.attempt_count,
            best_hash: self.best_hash.clone(),
            hash_rate: self.hash_rate,
            progress: self.progress(difficulty),
            status: self.status,
        }
    }
}

impl Default for MiningState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_counts_and_best() {
        let mut state = MiningState::new();
        state.record("bb");
        state.record("aa");
        state.record("cc");

        assert_eq!(state.attempt_count, 3);
        assert_eq!(state.best_hash.as_deref(), Some("aa"));
    }

    #[test]
    fn test_best_hash_is_lexicographic_minimum() {
        let hashes = ["9f", "0a", "ff", "0b", "00"];
        let mut state = MiningState::new();
        for hash in &hashes {
            state.record(hash);
        }

        let expected = hashes.iter().min().unwrap();
        assert_eq!(state.best_hash.as_deref(), Some(*expected));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = MiningState::new();
        state.nonce = 42;
        state.record("abc");
        state.status = MinerStatus::Found;

        state.reset();
        let once = (
            state.nonce,
            state.attempt_count,
            state.best_hash.clone(),
            state.hash_rate(),
            state.status,
        );
        state.reset();
        let twice = (
            state.nonce,
            state.attempt_count,
            state.best_hash.clone(),
            state.hash_rate(),
            state.status,
        );

        assert_eq!(once, (0, 0, None, 0, MinerStatus::Idle));
        assert_eq!(once, twice, "Second reset must not change the zeroed state");
    }

    #[test]
    fn test_progress_fraction_bounds() {
        let mut state = MiningState::new();
        for d in 1..=6 {
            let difficulty = Difficulty::new(d);
            for _ in 0..100 {
                state.record("ff");
                let progress = state.progress(difficulty);
                assert!((0.0..1.0).contains(&progress));
            }
        }
    }

    #[test]
    fn test_progress_wraps_at_expected_attempts() {
        let mut state = MiningState::new();
        let difficulty = Difficulty::new(1);
        for _ in 0..16 {
            state.record("ff");
        }
        // 16 mod 16^1 == 0
        assert_eq!(state.progress(difficulty), 0.0);
    }

    #[test]
    fn test_sample_hash_rate_with_zero_window() {
        let mut state = MiningState::new();
        state.record("ab");
        state.record("cd");

        // 零窗口立即到期，发布窗口计数并重置
        state.sample_hash_rate(Duration::ZERO);
        assert_eq!(state.hash_rate(), 2);

        state.sample_hash_rate(Duration::ZERO);
        assert_eq!(state.hash_rate(), 0, "Window counter must reset after sampling");
    }

    #[test]
    fn test_sample_hash_rate_before_window_elapsed() {
        let mut state = MiningState::new();
        state.record("ab");
        state.sample_hash_rate(Duration::from_secs(3600));
        assert_eq!(state.hash_rate(), 0, "Rate unchanged until the window elapses");
    }
}

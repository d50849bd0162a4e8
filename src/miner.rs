use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::task;
use tracing::{debug, info};

use crate::hasher::{build_header, double_sha256};
use crate::state::{MinerStatus, MiningState, StatsSnapshot};
use crate::target::{meets_target, Difficulty};

/// 每个调度片内的尝试批量，批间让出控制权以便响应取消
pub const DEFAULT_BATCH_SIZE: usize = 50;
/// 哈希率采样窗口
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_millis(1000);

/// 单次挖矿尝试的结果，供展示层渲染
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    pub nonce: u64,
    pub header: String,
    pub hash: String,
    pub matched: bool,
}

/// 挖矿循环：持有任务输入与会话状态，驱动nonce递增
///
/// 同一状态上只有一个活动循环，尝试严格串行，无需加锁。
pub struct Miner {
    prev_hash: String,
    data: String,
    difficulty: Difficulty,
    batch_size: usize,
    rate_window: Duration,
    state: MiningState,
}

impl Miner {
    pub fn new(prev_hash: &str, data: &str, difficulty: Difficulty) -> Self {
        Miner {
            prev_hash: prev_hash.trim().to_string(),
            data: data.trim().to_string(),
            difficulty,
            batch_size: DEFAULT_BATCH_SIZE,
            rate_window: DEFAULT_RATE_WINDOW,
            state: MiningState::new(),
        }
    }

    pub fn with_tuning(mut self, batch_size: usize, rate_window: Duration) -> Self {
        self.batch_size = batch_size.max(1);
        self.rate_window = rate_window;
        self
    }

    /// 当前区块头预览
    pub fn header(&self) -> String {
        build_header(&self.prev_hash, &self.data, self.state.nonce)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// 重新钳制后更新难度
    pub fn set_difficulty(&mut self, value: i64) {
        self.difficulty = Difficulty::new(value);
    }

    /// nonce可在两次尝试之间由调用方直接修改
    pub fn set_nonce(&mut self, nonce: u64) {
        self.state.nonce = nonce;
    }

    /// 解析文本形式的nonce输入，非法值回退为0
    pub fn set_nonce_text(&mut self, text: &str) {
        self.state.nonce = text.trim().parse().unwrap_or(0);
    }

    pub fn state(&self) -> &MiningState {
        &self.state
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.state.snapshot(self.difficulty)
    }

    /// 执行一次原子尝试：拼头、哈希、记账、判定，不递增nonce
    fn step(&mut self) -> Attempt {
        let header = build_header(&self.prev_hash, &self.data, self.state.nonce);
        let hash = double_sha256(&header);
        self.state.record(&hash);
        self.state.sample_hash_rate(self.rate_window);

        let matched = meets_target(&hash, self.difficulty.value() as usize);
        Attempt {
            nonce: self.state.nonce,
            header,
            hash,
            matched,
        }
    }

    /// 手动单次尝试，任意状态下可用，不进入Running
    ///
    /// 无论是否命中目标，尝试后nonce都递增1。
    pub fn attempt_once(&mut self) -> Attempt {
        let attempt = self.step();
        self.state.nonce += 1;
        attempt
    }

    /// 连续挖矿直至命中目标或被取消
    ///
    /// 每批尝试之间让出调度权；取消标志在每次尝试前检查，
    /// 取消后不再发起新尝试，命中时nonce停留在命中值上。
    pub async fn run(&mut self, cancel: &AtomicBool) -> Option<Attempt> {
        self.state.status = MinerStatus::Running;
        info!(
            "开始连续挖矿，难度: {}, 起始nonce: {}",
            self.difficulty, self.state.nonce
        );

        loop {
            for _ in 0..self.batch_size {
                if cancel.load(Ordering::Relaxed) {
                    self.state.status = MinerStatus::Idle;
                    info!("挖矿已取消，当前nonce: {}", self.state.nonce);
                    return None;
                }

                let attempt = self.step();
                if attempt.matched {
                    self.state.status = MinerStatus::Found;
                    info!(
                        "挖矿成功！Nonce: {}, Hash: {}",
                        attempt.nonce, attempt.hash
                    );
                    return Some(attempt);
                }
                self.state.nonce += 1;

                if self.state.attempt_count % 100_000 == 0 {
                    debug!(
                        "挖矿尝试次数: {}, 当前nonce: {}",
                        self.state.attempt_count, self.state.nonce
                    );
                }
            }
            task::yield_now().await;
        }
    }

    /// 重置会话，任意状态下有效
    pub fn reset(&mut self) {
        info!("重置挖矿会话");
        self.state.reset();
    }
}

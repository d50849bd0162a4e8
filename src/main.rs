use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use rust_pow::{
    config::Config,
    error::{Result, RustPowError},
    miner::Miner,
    target::Difficulty,
};

fn demo_manual_attempts(config: &Config) -> Result<()> {
    info!("演示手动单次尝试...");

    let difficulty = Difficulty::new(config.mining.difficulty);
    let mut miner = Miner::new("genesis", "hello", difficulty);

    info!("难度: {}, 目标前缀: {}", difficulty, difficulty.target_prefix());
    info!("区块头预览: {}", miner.header());

    // 连续尝试几个nonce，无论成败nonce都递增
    for _ in 0..3 {
        let attempt = miner.attempt_once();
        info!(
            "Nonce: {}, Hash: {}, 命中: {}",
            attempt.nonce, attempt.hash, attempt.matched
        );
    }

    let snapshot = miner.snapshot();
    info!(
        "尝试次数: {}, 最优哈希: {}",
        snapshot.attempt_count,
        snapshot.best_hash.as_deref().unwrap_or("—")
    );

    // 重置后回到零状态
    miner.reset();
    info!("重置完成，尝试次数: {}", miner.state().attempt_count);

    Ok(())
}

async fn demo_auto_mining(config: &Config) -> Result<()> {
    info!("演示连续自动挖矿...");

    let difficulty = Difficulty::new(config.mining.difficulty);
    let mut miner = Miner::new("genesis", "hello", difficulty).with_tuning(
        config.mining.batch_size,
        Duration::from_millis(config.stats.window_ms),
    );

    let cancel = AtomicBool::new(false);
    let found = miner
        .run(&cancel)
        .await
        .ok_or_else(|| RustPowError::Other("挖矿在未取消的情况下返回空".to_string()))?;

    let snapshot = miner.snapshot();
    info!(
        "找到有效区块！Nonce: {}, Hash: {}",
        found.nonce, found.hash
    );
    info!(
        "总尝试次数: {}, 哈希率: {} H/s, 进度: {:.2}%",
        snapshot.attempt_count,
        snapshot.hash_rate,
        snapshot.progress * 100.0
    );

    Ok(())
}

async fn demo_cancellation() -> Result<()> {
    info!("演示协作式取消...");

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    // 难度6的搜索空间足够大，让取消先于命中发生
    let handle = tokio::spawn(async move {
        let mut miner = Miner::new("genesis", "hard problem", Difficulty::new(6));
        let result = miner.run(&flag).await;
        (result, miner.snapshot())
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.store(true, Ordering::Relaxed);

    let (result, snapshot) = handle
        .await
        .map_err(|e| RustPowError::Other(e.to_string()))?;

    match result {
        Some(found) => info!("取消前已命中，Nonce: {}", found.nonce),
        None => info!(
            "挖矿已取消，已尝试 {} 次，状态: {:?}",
            snapshot.attempt_count, snapshot.status
        ),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志记录器
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(false)
        .with_ansi(true)
        .pretty()
        .init();

    // 加载配置
    let config = Config::load_or_default();

    // 1. 手动单次尝试
    demo_manual_attempts(&config)?;

    // 2. 连续自动挖矿
    demo_auto_mining(&config).await?;

    // 3. 协作式取消
    demo_cancellation().await?;

    info!("演示完成!");
    Ok(())
}

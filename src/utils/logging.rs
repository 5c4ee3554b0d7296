//! 日志工具模块
//!
//! 初始化 tracing，并提供运行横幅 / 统计的输出函数

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::services::RunReport;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`；未设置时按 `verbose` 选择 debug / info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 目标站点: {}", config.target_url);
    info!("📋 请求文件: {}", config.requests_file);
    info!(
        "🔁 最大尝试次数: {} | 等待超时: {:?}",
        config.timing.max_retries, config.timing.wait_timeout
    );
    info!("{}", "=".repeat(60));
}

/// 记录运行开始
pub fn log_run_start(total: usize, target_url: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 共 {} 条预订请求，目标: {}", total, target_url);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &RunReport, elapsed: Duration) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {} (耗时 {:.1}s)",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        elapsed.as_secs_f64()
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 新预订: {} | 新候补: {} | 已存在: {}",
        report.summary.new_bookings, report.summary.new_waitlists, report.summary.already_processed
    );
    info!("❌ 未找到 / 错误: {}", failure_count(report));
    info!("{}", "=".repeat(60));
}

fn failure_count(report: &RunReport) -> usize {
    report
        .aggregated
        .all
        .iter()
        .filter(|r| r.status.is_failure())
        .count()
}

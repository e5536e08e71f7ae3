//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, Subscriber};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::models::Issue;

/// 初始化 tracing 输出
///
/// `RUST_LOG` 优先；否则默认 `info`，verbose 时为 `debug`。
/// 给出 `log_file` 时同样的日志追加写入该文件（不带颜色）。
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = log_file.map(file_layer).transpose()?;

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init();
    Ok(())
}

/// 追加写入日志文件的输出层
fn file_layer<S>(path: &Path) -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("无法打开日志文件: {}", path.display()))?;
    Ok(fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false))
}

/// 初始化日志文件
pub fn init_log_file(log_file_path: &Path) -> Result<()> {
    let log_header = format!(
        "{}\n商标审计日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(concurrency: usize, rps: f64, screenshots: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 商标符号审计");
    info!("📊 并发数: {}", concurrency);
    if rps > 0.0 {
        info!("⏱️ 每个 worker 限速: {} 次/秒", rps);
    } else {
        info!("⏱️ 限速已关闭");
    }
    info!("📸 问题页面截图: {}", if screenshots { "开启" } else { "关闭" });
    info!("{}", "=".repeat(60));
}

/// 记录输入加载信息
pub fn log_inputs_loaded(urls: usize, terms: usize, workers: usize) {
    info!("✓ 找到 {} 个待审计的URL", urls);
    info!("✓ 载入 {} 个商标定义", terms);
    info!("📋 将使用 {} 个 worker 并发处理\n", workers);
}

/// 进度：每 5 个或最后一个时输出
pub fn log_progress(completed: usize, total: usize) {
    if completed % 5 == 0 || completed == total {
        info!("[audit] {}/{} URLs processed", completed, total);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(
    completed: usize,
    total: usize,
    counts: &BTreeMap<Issue, usize>,
    elapsed: Duration,
    out_dir: &Path,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 审计完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("耗时: {:.1} 秒", elapsed.as_secs_f64());
    info!("{}", "=".repeat(60));
    info!("✅ 已处理: {}/{}", completed, total);
    if completed < total {
        info!("⏭️ 未处理（已停止）: {}", total - completed);
    }
    for (issue, count) in counts {
        info!("  {}: {}", issue, count);
    }
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", out_dir.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

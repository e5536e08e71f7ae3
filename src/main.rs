use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing::warn;

use tm_audit::cli::Cli;
use tm_audit::utils::logging;
use tm_audit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 环境变量打底，命令行覆盖
    let config = cli.apply(Config::from_env());

    config.validate()?;

    // 先写日志文件头，之后的 tracing 输出追加在后面
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("无法创建输出目录: {}", config.out_dir.display()))?;
    let log_path = config.log_file_path();
    logging::init_log_file(&log_path)?;
    logging::init(config.verbose_logging, Some(&log_path))?;

    let app = App::initialize(config).await?;

    // Ctrl-C：做完手上的 URL 后停止
    let shutdown = app.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⏹️ 收到中断信号，处理完当前页面后停止...");
            shutdown.request();
        }
    });

    app.run().await?;

    Ok(())
}

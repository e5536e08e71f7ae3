use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AuditError, AuditResult};
use crate::infrastructure::WaitUntil;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// URL 列表（CSV 含 url 列，或 .txt 每行一个）
    pub urls_file: PathBuf,
    /// 商标定义文件（JSON / TOML）
    pub marks_file: PathBuf,
    /// 输出目录（报告、截图、日志）
    pub out_dir: PathBuf,
    /// 并发 worker 数
    pub concurrency: usize,
    /// 每个 worker 的请求速率，<= 0 关闭限速
    pub rps: f64,
    /// 单页导航超时
    pub nav_timeout_ms: u64,
    pub wait_until: WaitUntil,
    /// 指定时连接已有浏览器，否则启动无头浏览器
    pub browser_debug_port: Option<u16>,
    pub chrome_executable: Option<PathBuf>,
    pub save_flagged_screenshots: bool,
    pub verbose_logging: bool,
    /// 日志文件名（位于输出目录下）
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls_file: PathBuf::from("urls.csv"),
            marks_file: PathBuf::from("marks.json"),
            out_dir: PathBuf::from("runs/out"),
            concurrency: 4,
            rps: 2.0,
            nav_timeout_ms: 15_000,
            wait_until: WaitUntil::DomContentLoaded,
            browser_debug_port: None,
            chrome_executable: None,
            save_flagged_screenshots: false,
            verbose_logging: false,
            output_log_file: "audit_log.txt".to_string(),
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            urls_file: env_parse("AUDIT_URLS_FILE").unwrap_or(default.urls_file),
            marks_file: env_parse("AUDIT_MARKS_FILE").unwrap_or(default.marks_file),
            out_dir: env_parse("AUDIT_OUT_DIR").unwrap_or(default.out_dir),
            concurrency: env_parse("AUDIT_CONCURRENCY").unwrap_or(default.concurrency),
            rps: env_parse("AUDIT_RPS").unwrap_or(default.rps),
            nav_timeout_ms: env_parse("AUDIT_NAV_TIMEOUT_MS").unwrap_or(default.nav_timeout_ms),
            wait_until: env_parse("AUDIT_WAIT_UNTIL").unwrap_or(default.wait_until),
            browser_debug_port: env_parse("AUDIT_BROWSER_PORT").or(default.browser_debug_port),
            chrome_executable: env_parse("AUDIT_CHROME_PATH").or(default.chrome_executable),
            save_flagged_screenshots: env_parse("AUDIT_SCREENSHOTS")
                .unwrap_or(default.save_flagged_screenshots),
            verbose_logging: env_parse("AUDIT_VERBOSE").unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("AUDIT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 运行日志路径（输出目录下）
    pub fn log_file_path(&self) -> PathBuf {
        self.out_dir.join(&self.output_log_file)
    }

    /// 启动前校验
    pub fn validate(&self) -> AuditResult<()> {
        if !self.rps.is_finite() {
            return Err(AuditError::Config(format!("rps 必须是有限数值: {}", self.rps)));
        }
        if self.nav_timeout_ms == 0 {
            return Err(AuditError::Config("导航超时必须大于 0".to_string()));
        }
        if self.output_log_file.trim().is_empty() {
            return Err(AuditError::Config("日志文件名不能为空".to_string()));
        }
        Ok(())
    }
}

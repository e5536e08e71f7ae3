use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::infrastructure::WaitUntil;

/// 命令行参数；未给出的选项沿用环境变量 / 默认配置
#[derive(Parser, Debug)]
#[command(
    name = "tm-audit",
    version,
    about = "Audit web pages for trademark symbol usage (text marks only)"
)]
pub struct Cli {
    #[arg(long, help = "CSV file containing URLs to audit (column name: url), or a .txt list")]
    pub urls_file: PathBuf,

    #[arg(long, help = "JSON or TOML file containing trademark definitions")]
    pub marks_file: PathBuf,

    #[arg(long, help = "Output directory for reports and screenshots")]
    pub out: PathBuf,

    #[arg(long, help = "Number of concurrent pages to use")]
    pub concurrency: Option<usize>,

    #[arg(long, help = "Per-worker requests per second (0 disables throttling)")]
    pub rps: Option<f64>,

    #[arg(long, help = "Navigation timeout in milliseconds")]
    pub nav_timeout_ms: Option<u64>,

    #[arg(long, help = "Load condition: load | domcontentloaded")]
    pub wait_until: Option<WaitUntil>,

    #[arg(long, help = "Connect to a running browser on this DevTools port instead of launching one")]
    pub browser_port: Option<u16>,

    #[arg(long, help = "Path to the Chrome/Chromium executable")]
    pub chrome_path: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Save screenshots for pages with findings")]
    pub save_flagged_screenshots: bool,

    #[arg(long, short, default_value_t = false, help = "Verbose logging")]
    pub verbose: bool,
}

impl Cli {
    /// 用命令行参数覆盖配置
    pub fn apply(self, mut config: Config) -> Config {
        config.urls_file = self.urls_file;
        config.marks_file = self.marks_file;
        config.out_dir = self.out;
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(rps) = self.rps {
            config.rps = rps;
        }
        if let Some(ms) = self.nav_timeout_ms {
            config.nav_timeout_ms = ms;
        }
        if let Some(wait_until) = self.wait_until {
            config.wait_until = wait_until;
        }
        if self.browser_port.is_some() {
            config.browser_debug_port = self.browser_port;
        }
        if self.chrome_path.is_some() {
            config.chrome_executable = self.chrome_path;
        }
        config.save_flagged_screenshots |= self.save_flagged_screenshots;
        config.verbose_logging |= self.verbose;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "tm-audit",
            "--urls-file",
            "top.csv",
            "--marks-file",
            "marks.json",
            "--out",
            "runs/x",
            "--concurrency",
            "8",
            "--rps",
            "0",
            "--wait-until",
            "load",
            "--save-flagged-screenshots",
        ])
        .unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.urls_file, PathBuf::from("top.csv"));
        assert_eq!(config.out_dir, PathBuf::from("runs/x"));
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.rps, 0.0);
        assert_eq!(config.wait_until, WaitUntil::Load);
        assert!(config.save_flagged_screenshots);
        assert_eq!(config.nav_timeout_ms, 15_000);
    }

    #[test]
    fn test_cli_requires_inputs() {
        assert!(Cli::try_parse_from(["tm-audit", "--out", "x"]).is_err());
    }
}

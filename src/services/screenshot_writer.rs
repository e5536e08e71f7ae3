//! 截图写入服务 - 业务能力层
//!
//! 只负责"把有问题的页面截图存盘"，失败由调用方决定如何处理

use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::AuditResult;
use crate::infrastructure::RenderPage;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

/// 截图写入服务
pub struct ScreenshotWriter {
    out_dir: PathBuf,
}

impl ScreenshotWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// 截图保存路径：`{safe_url}_{YYYYmmddTHHMMSSZ}.png`
    pub fn path_for(&self, url: &str, at: DateTime<Utc>) -> PathBuf {
        let name = format!(
            "{}_{}.png",
            safe_file_stem(url),
            at.format("%Y%m%dT%H%M%SZ")
        );
        self.out_dir.join(name)
    }

    /// 整页截图并写入输出目录
    pub async fn capture(&self, page: &dyn RenderPage, url: &str) -> AuditResult<PathBuf> {
        let path = self.path_for(url, Utc::now());
        debug!("保存截图: {}", path.display());
        page.screenshot(&path).await?;
        Ok(path)
    }
}

/// 把 URL 转成可用作文件名的字符串
pub fn safe_file_stem(url: &str) -> String {
    let replaced = url.replace("://", "__").replace('/', "_");
    UNSAFE_CHARS.replace_all(&replaced, "_").into_owned()
}

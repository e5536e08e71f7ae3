//! 页面审计流程 - 流程层
//!
//! 核心职责：定义"一个 URL"的完整处理流程
//!
//! 流程顺序：
//! 1. 导航（带超时）→ 失败则输出一条 `navigation_error` 并结束
//! 2. 提取显著文本 → 失败则输出一条 `evaluation_error` 并结束
//! 3. 每个商标定义匹配一次（正确的不输出）
//! 4. 有问题时可选截图（失败忽略）

use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::{AuditError, AuditResult};
use crate::infrastructure::{RenderPage, WaitUntil};
use crate::models::{Finding, Issue, TermDefinition, TextCandidate};
use crate::services::{ProminentTextExtractor, ScreenshotWriter, SymbolMatcher};
use crate::utils::logging::truncate_text;
use crate::workflow::page_ctx::PageCtx;

pub const DEFAULT_NAV_TIMEOUT: Duration = Duration::from_millis(15_000);

/// 页面审计流程
///
/// - 不持有页面，由 worker 传入自己独占的页面
/// - 页面级失败只转换为 Finding，永远不向上抛出
pub struct PageAudit {
    terms: Vec<TermDefinition>,
    extractor: ProminentTextExtractor,
    matcher: SymbolMatcher,
    screenshots: Option<ScreenshotWriter>,
    nav_timeout: Duration,
    wait_until: WaitUntil,
}

impl PageAudit {
    pub fn new(terms: Vec<TermDefinition>) -> Self {
        Self {
            terms,
            extractor: ProminentTextExtractor::default(),
            matcher: SymbolMatcher::new(),
            screenshots: None,
            nav_timeout: DEFAULT_NAV_TIMEOUT,
            wait_until: WaitUntil::default(),
        }
    }

    pub fn with_nav_timeout(mut self, nav_timeout: Duration) -> Self {
        self.nav_timeout = nav_timeout;
        self
    }

    pub fn with_wait_until(mut self, wait_until: WaitUntil) -> Self {
        self.wait_until = wait_until;
        self
    }

    pub fn with_extractor(mut self, extractor: ProminentTextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// 启用问题页面截图
    pub fn with_screenshots(mut self, writer: ScreenshotWriter) -> Self {
        self.screenshots = Some(writer);
        self
    }

    pub fn terms(&self) -> &[TermDefinition] {
        &self.terms
    }

    /// 处理单个 URL，返回该页面的全部 Finding（按商标定义顺序）
    pub async fn run(&self, page: &dyn RenderPage, ctx: &PageCtx) -> Vec<Finding> {
        let url = ctx.url.as_str();
        info!("{} 🌐 {}", ctx, truncate_text(url, 120));

        if let Err(e) = self.navigate(page, url).await {
            warn!("{} ❌ 导航失败: {}", ctx, e);
            return vec![Finding::page_error(url, Issue::NavigationError, e.to_string())];
        }

        let candidates = match self.extractor.extract(page).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("{} ❌ 提取失败: {}", ctx, e);
                return vec![Finding::page_error(url, Issue::EvaluationError, e.to_string())];
            }
        };
        debug!("{} 候选节点 {} 个", ctx, candidates.len());

        let findings = self.evaluate_terms(url, &candidates);

        if !findings.is_empty() {
            info!("{} ⚠️ 发现 {} 个问题", ctx, findings.len());
            self.capture_screenshot(page, ctx).await;
        } else {
            info!("{} ✓ 全部商标符号正确", ctx);
        }

        findings
    }

    /// 对每个商标定义做一次匹配，正确的不输出
    pub fn evaluate_terms(&self, url: &str, candidates: &[TextCandidate]) -> Vec<Finding> {
        self.terms
            .iter()
            .filter_map(|term| {
                self.matcher
                    .classify(candidates, term)
                    .into_finding(url, term)
            })
            .collect()
    }

    async fn navigate(&self, page: &dyn RenderPage, url: &str) -> AuditResult<()> {
        match timeout(self.nav_timeout, page.navigate(url, self.wait_until)).await {
            Ok(result) => result,
            Err(_) => Err(AuditError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: self.nav_timeout.as_millis() as u64,
            }),
        }
    }

    /// 截图只是附带产物：失败在这里记录后丢弃
    async fn capture_screenshot(&self, page: &dyn RenderPage, ctx: &PageCtx) {
        let Some(writer) = &self.screenshots else {
            return;
        };
        match writer.capture(page, &ctx.url).await {
            Ok(path) => info!("{} 📸 截图已保存: {}", ctx, path.display()),
            Err(e) => warn!("{} ⚠️ 截图失败（已忽略）: {}", ctx, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_terms_one_finding_per_flagged_term() {
        let audit = PageAudit::new(vec![
            TermDefinition::new("Acme", "®").unwrap(),
            TermDefinition::new("Turbo", "™").unwrap(),
            TermDefinition::new("Ghost", "®").unwrap(),
        ]);
        let candidates = vec![
            TextCandidate::new("Acme® Turbo blenders", "html > body > main > h1"),
            TextCandidate::new("Meet Turbo™", "html > body > main > p"),
        ];

        let findings = audit.evaluate_terms("https://a.example/", &candidates);
        let issues: Vec<(&str, Issue)> = findings
            .iter()
            .map(|f| (f.term.as_str(), f.issue))
            .collect();
        assert_eq!(
            issues,
            vec![("Turbo", Issue::MissingSymbol), ("Ghost", Issue::NotFound)]
        );
    }
}

//! 运行状态
//!
//! 所有 worker 共享的可变状态只有这里：URL 队列、完成计数、结果集合。
//! 每次修改都在互斥锁内完成。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::models::Finding;

/// 运行状态（启动前一次性填满队列）
pub struct RunState {
    /// (出队序号, URL)，序号从1开始
    queue: Mutex<VecDeque<(usize, String)>>,
    total: usize,
    completed: AtomicUsize,
    findings: Mutex<Vec<Finding>>,
}

impl RunState {
    pub fn new(urls: Vec<String>) -> Self {
        let total = urls.len();
        let queue = urls
            .into_iter()
            .enumerate()
            .map(|(i, url)| (i + 1, url))
            .collect();
        Self {
            queue: Mutex::new(queue),
            total,
            completed: AtomicUsize::new(0),
            findings: Mutex::new(Vec::new()),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 已完成的 URL 数，可随时读取
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// 取出下一个 URL（FIFO），队列为空时返回 None
    pub async fn next_url(&self) -> Option<(usize, String)> {
        self.queue.lock().await.pop_front()
    }

    pub async fn remaining(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// 追加一个页面的全部结果并计数，返回当前完成数
    ///
    /// 同一页面的结果连续写入，不会与其它页面交错。
    pub async fn record(&self, page_findings: Vec<Finding>) -> usize {
        let mut findings = self.findings.lock().await;
        findings.extend(page_findings);
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 当前结果的副本
    pub async fn snapshot(&self) -> Vec<Finding> {
        self.findings.lock().await.clone()
    }

    /// 取走全部结果（按到达顺序）
    pub async fn take_findings(&self) -> Vec<Finding> {
        std::mem::take(&mut *self.findings.lock().await)
    }
}

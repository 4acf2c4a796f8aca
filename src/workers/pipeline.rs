// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{CrawlerSettings, DiscoverySettings};
use crate::domain::models::career::ResultSet;
use crate::domain::search::engine::SearchIndex;
use crate::engines::traits::CareerProbe;
use crate::utils::errors::CrawlError;
use crate::workers::collector::collect;
use crate::workers::discovery_worker::DiscoveryWorker;
use crate::workers::probe_worker::ProbeWorker;
use metrics::counter;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// 单个爬取周期的结果
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// 周期完整结束，结果集可能为空
    Completed(ResultSet),
    /// 上级取消，本周期的部分结果被丢弃
    Cancelled,
}

/// 爬取流水线
///
/// 每个周期创建自己的通道、工作器和子取消令牌：
/// 一个发现任务写入链接通道，N 个探测器并发消费，
/// 单个收集器把命中汇总为结果集。
pub struct CrawlPipeline {
    search_index: Arc<dyn SearchIndex>,
    prober: Arc<dyn CareerProbe>,
    crawler: CrawlerSettings,
    discovery: DiscoverySettings,
}

impl CrawlPipeline {
    pub fn new(
        search_index: Arc<dyn SearchIndex>,
        prober: Arc<dyn CareerProbe>,
        crawler: CrawlerSettings,
        discovery: DiscoverySettings,
    ) -> Self {
        Self {
            search_index,
            prober,
            crawler,
            discovery,
        }
    }

    /// 运行一个爬取周期
    ///
    /// 发现任务和全部探测器结束后结果集才可见。任一任务返回错误时
    /// 取消整个周期，并返回首个错误。
    ///
    /// # 参数
    ///
    /// * `parent` - 会话级取消令牌，周期令牌由它派生
    pub async fn run_cycle(&self, parent: &CancellationToken) -> Result<CycleOutcome, CrawlError> {
        let token = parent.child_token();
        let capacity = self.crawler.channel_capacity.max(1);
        let (link_tx, link_rx) = mpsc::channel::<String>(capacity);
        let (hit_tx, hit_rx) = mpsc::channel::<String>(capacity);

        info!(
            workers = self.crawler.worker_count,
            index = self.search_index.name(),
            prober = self.prober.name(),
            "Starting crawl cycle"
        );

        let collector = tokio::spawn(collect(hit_rx, token.clone()));

        let mut tasks = JoinSet::new();
        tasks.spawn(
            DiscoveryWorker::new(self.search_index.clone(), &self.discovery)
                .run(link_tx, token.clone()),
        );

        let links = Arc::new(Mutex::new(link_rx));
        for id in 0..self.crawler.worker_count {
            tasks.spawn(ProbeWorker::new(id, self.prober.clone()).run(
                links.clone(),
                hit_tx.clone(),
                token.clone(),
            ));
        }
        // 探测器持有剩余的发送端，全部退出后收集器看到通道关闭
        drop(hit_tx);

        let mut first_error: Option<CrawlError> = None;
        while let Some(joined) = tasks.join_next().await {
            let result = joined
                .map_err(|e| CrawlError::TaskFailed(e.to_string()))
                .and_then(|r| r);

            if let Err(e) = result {
                if first_error.is_none() {
                    error!(error = %e, "Crawl cycle task failed, cancelling cycle");
                    token.cancel();
                    first_error = Some(e);
                } else {
                    warn!(error = %e, "Additional crawl cycle task failure");
                }
            }
        }

        let results = collector
            .await
            .map_err(|e| CrawlError::TaskFailed(e.to_string()))?;

        if let Some(e) = first_error {
            counter!("crawl_cycles_total", "outcome" => "failed").increment(1);
            return Err(e);
        }

        if token.is_cancelled() {
            info!(discarded = results.len(), "Crawl cycle cancelled");
            counter!("crawl_cycles_total", "outcome" => "cancelled").increment(1);
            return Ok(CycleOutcome::Cancelled);
        }

        info!(found = results.len(), "Crawl cycle completed");
        counter!("crawl_cycles_total", "outcome" => "completed").increment(1);
        Ok(CycleOutcome::Completed(results))
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

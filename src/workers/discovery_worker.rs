// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DiscoverySettings;
use crate::domain::search::engine::SearchIndex;
use crate::utils::errors::CrawlError;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// 候选发现工作器
///
/// 顺序请求固定页数，把包含过滤子串的URL写入链接通道。
/// 返回时发送端随之释放，下游据此得知链接流结束。
pub struct DiscoveryWorker {
    index: Arc<dyn SearchIndex>,
    page_count: u32,
    page_delay: Duration,
    url_filter: String,
}

impl DiscoveryWorker {
    pub fn new(index: Arc<dyn SearchIndex>, settings: &DiscoverySettings) -> Self {
        Self {
            index,
            page_count: settings.page_count,
            page_delay: settings.page_delay(),
            url_filter: settings.url_filter.clone(),
        }
    }

    pub async fn run(
        self,
        links: mpsc::Sender<String>,
        token: CancellationToken,
    ) -> Result<(), CrawlError> {
        let mut emitted = 0usize;

        for page in 0..self.page_count {
            if page > 0 {
                tokio::select! {
                    _ = token.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(self.page_delay) => {}
                }
            }

            let hits = tokio::select! {
                _ = token.cancelled() => return Ok(()),
                hits = self.index.query_page(page) => hits?,
            };
            counter!("discovery_pages_total").increment(1);

            for url in hits.into_iter().filter_map(|hit| hit.url) {
                if !url.contains(&self.url_filter) {
                    continue;
                }

                tokio::select! {
                    _ = token.cancelled() => return Ok(()),
                    sent = links.send(url) => {
                        if sent.is_err() {
                            // 所有探测器都已退出
                            debug!("Link channel closed, stopping discovery");
                            return Ok(());
                        }
                    }
                }
                counter!("discovery_candidates_total").increment(1);
                emitted += 1;
            }
        }

        info!(
            index = self.index.name(),
            pages = self.page_count,
            candidates = emitted,
            "Discovery finished"
        );
        Ok(())
    }
}

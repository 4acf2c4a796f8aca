// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::CareerProbe;
use crate::utils::errors::CrawlError;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 多个探测器共享的链接接收端
pub type SharedLinks = Arc<Mutex<mpsc::Receiver<String>>>;

/// 探测工作器
///
/// 从共享链接通道逐个取出候选URL，探测命中后写入输出通道
pub struct ProbeWorker {
    id: usize,
    prober: Arc<dyn CareerProbe>,
}

impl ProbeWorker {
    pub fn new(id: usize, prober: Arc<dyn CareerProbe>) -> Self {
        Self { id, prober }
    }

    pub async fn run(
        self,
        links: SharedLinks,
        hits: mpsc::Sender<String>,
        token: CancellationToken,
    ) -> Result<(), CrawlError> {
        let mut probed = 0usize;

        loop {
            let candidate = tokio::select! {
                _ = token.cancelled() => break,
                next = next_link(&links) => match next {
                    Some(candidate) => candidate,
                    None => break,
                },
            };

            let found = tokio::select! {
                _ = token.cancelled() => break,
                found = self.prober.probe(&candidate) => found?,
            };
            probed += 1;

            if let Some(url) = found {
                tokio::select! {
                    _ = token.cancelled() => break,
                    sent = hits.send(url) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
        }

        debug!(worker = self.id, probed, "Probe worker exited");
        Ok(())
    }
}

async fn next_link(links: &SharedLinks) -> Option<String> {
    links.lock().await.recv().await
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::career::ResultSet;
use metrics::counter;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// 汇总探测命中
///
/// 结果集只在这里被修改。所有发送端释放或周期取消时结束。
pub async fn collect(mut hits: mpsc::Receiver<String>, token: CancellationToken) -> ResultSet {
    let mut results = ResultSet::new();

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            hit = hits.recv() => match hit {
                Some(url) => {
                    counter!("career_links_found_total").increment(1);
                    results.insert(url);
                }
                None => break,
            },
        }
    }

    results
}

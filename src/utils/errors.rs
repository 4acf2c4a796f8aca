// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::engine::SearchError;
use crate::engines::traits::ProbeError;
use thiserror::Error;

/// 爬取周期错误类型
///
/// 周期内任一任务返回的首个错误，出现即取消整个周期
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("发现失败: {0}")]
    Discovery(#[from] SearchError),

    #[error("探测失败: {0}")]
    Probe(#[from] ProbeError),

    #[error("任务异常退出: {0}")]
    TaskFailed(String),
}

impl CrawlError {
    /// 指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlError::Discovery(_) => "discovery",
            CrawlError::Probe(_) => "probe",
            CrawlError::TaskFailed(_) => "task",
        }
    }
}

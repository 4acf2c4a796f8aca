// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::career::ResultSet;
use crate::domain::repositories::career_repository::{CareerRepository, RepositoryError};
use crate::queue::session::{SearchSession, SessionEvent};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

pub const NEW_CAREERS_HEADER: &str = "I found some new careers for you: \n";
pub const SEARCH_FAILED_MESSAGE: &str = "Error occurred during the job search.";

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to deliver notification: {0}")]
    Delivery(String),
}

/// 向用户推送文本通知
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// 职位搜索用例
///
/// 把每个周期的结果集与已记录的链接做差，记录并推送新链接
pub struct JobSearchUseCase<R> {
    careers: Arc<R>,
}

impl<R> JobSearchUseCase<R>
where
    R: CareerRepository + 'static,
{
    pub fn new(careers: Arc<R>) -> Self {
        Self { careers }
    }

    /// 过滤出未记录过的链接并逐个记录
    ///
    /// # 返回值
    ///
    /// 按字典序排列的新链接
    pub async fn clean_up_search(&self, found: &ResultSet) -> Result<Vec<String>, RepositoryError> {
        if found.is_empty() {
            return Ok(Vec::new());
        }

        let known: HashSet<String> = self
            .careers
            .get_all_careers()
            .await?
            .into_iter()
            .map(|c| c.url)
            .collect();

        let mut fresh: Vec<String> = found
            .iter()
            .filter(|url| !known.contains(*url))
            .cloned()
            .collect();
        fresh.sort();

        for url in &fresh {
            self.careers.create_career(url).await?;
        }

        Ok(fresh)
    }

    /// 消费一个会话的全部事件，每个事件至多转换为一条通知
    ///
    /// 会话的两个输出流关闭后返回
    pub async fn run_notifications(&self, mut session: SearchSession, notifier: Arc<dyn Notifier>) {
        while let Some(event) = session.next_event().await {
            let message = match event {
                SessionEvent::Results(found) => {
                    let fresh = match self.clean_up_search(&found).await {
                        Ok(fresh) => fresh,
                        Err(e) => {
                            error!(error = %e, "Failed to record new careers");
                            Vec::new()
                        }
                    };

                    if fresh.is_empty() {
                        info!("No new careers found");
                        continue;
                    }
                    format!("{}{}", NEW_CAREERS_HEADER, fresh.join("\n"))
                }
                SessionEvent::Failed(e) => {
                    error!(error = %e, "Job search failed");
                    SEARCH_FAILED_MESSAGE.to_string()
                }
            };

            if let Err(e) = notifier.notify(&message).await {
                warn!(error = %e, "Failed to send job search notification");
            }
        }

        info!("Job search notifications finished");
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::career_repository::CareerRepository;
use crate::infrastructure::telegram::types::Update;
use crate::infrastructure::telegram::TelegramClient;
use crate::presentation::handlers::MessageHandler;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// 长轮询更新循环
pub struct TelegramBot<R> {
    client: TelegramClient,
    handler: Arc<MessageHandler<R>>,
    poll_timeout_secs: u64,
    retry_delay: Duration,
}

impl<R> TelegramBot<R>
where
    R: CareerRepository + 'static,
{
    pub fn new(client: TelegramClient, handler: Arc<MessageHandler<R>>, poll_timeout_secs: u64) -> Self {
        Self {
            client,
            handler,
            poll_timeout_secs,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// 运行更新循环直到 `token` 被取消
    ///
    /// 启动时丢弃积压的更新，单条更新的处理错误只记录不中断循环
    pub async fn run(&self, token: CancellationToken) -> anyhow::Result<()> {
        let me = self.client.get_me().await?;
        info!(
            "Authorized on account {}",
            me.username.as_deref().unwrap_or(&me.first_name)
        );

        let mut offset = self.discard_backlog().await?;

        loop {
            let polled = tokio::select! {
                _ = token.cancelled() => break,
                polled = self.client.get_updates(offset, self.poll_timeout_secs) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        self.dispatch(&update, &token).await;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to poll updates");
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }

        info!("Bot update loop stopped");
        Ok(())
    }

    async fn discard_backlog(&self) -> anyhow::Result<i64> {
        // offset -1 只返回最新一条积压更新
        let pending = self.client.get_updates(-1, 0).await?;
        let offset = pending.last().map(|u| u.update_id + 1).unwrap_or(0);
        debug!(offset, "Discarded pending updates");
        Ok(offset)
    }

    async fn dispatch(&self, update: &Update, token: &CancellationToken) {
        let reply = match self.handler.handle(update, token).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(update_id = update.update_id, error = %e, "Failed to handle update");
                return;
            }
        };

        if let Some(query) = &update.callback_query {
            if let Err(e) = self.client.answer_callback_query(&query.id).await {
                warn!(error = %e, "Failed to answer callback query");
            }
        }

        if let Some(message) = reply {
            if let Err(e) = self.client.send_message(&message).await {
                warn!(error = %e, "Failed to send reply");
            }
        }
    }
}

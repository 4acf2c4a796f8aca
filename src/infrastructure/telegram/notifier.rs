// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::client::TelegramClient;
use super::types::OutgoingMessage;
use crate::application::use_cases::job_search::{Notifier, NotifyError};
use async_trait::async_trait;

/// 向固定会话推送通知
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: i64,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient, chat_id: i64) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.client
            .send_message(&OutgoingMessage::text(self.chat_id, text))
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

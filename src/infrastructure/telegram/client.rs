// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::types::{ApiResponse, OutgoingMessage, Update, User};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Bot API 错误类型
#[derive(Error, Debug)]
pub enum TelegramError {
    /// 请求发送或响应解析失败
    #[error("Bot API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Bot API 返回 `ok=false`
    #[error("Bot API error: {0}")]
    Api(String),
}

/// Telegram Bot API 客户端
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.method_url(method)).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        // Bot API 在出错时同样返回 JSON 包装体
        let response: ApiResponse<T> = request.send().await?.json().await?;

        match (response.ok, response.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(TelegramError::Api(format!("{} returned no result", method))),
            (false, _) => Err(TelegramError::Api(
                response
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }

    /// 获取机器人自身信息
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &json!({}), None).await
    }

    /// 长轮询获取更新
    ///
    /// # 参数
    ///
    /// * `offset` - 已确认的最大 `update_id + 1`
    /// * `timeout_secs` - 服务端长轮询等待时间
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let body = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });

        // 请求超时必须长于服务端的长轮询时间
        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                &body,
                Some(Duration::from_secs(timeout_secs + 10)),
            )
            .await?;

        debug!(offset, count = updates.len(), "Received updates");
        Ok(updates)
    }

    pub async fn send_message(&self, message: &OutgoingMessage) -> Result<(), TelegramError> {
        let _: serde_json::Value = self.call("sendMessage", message, None).await?;
        Ok(())
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &json!({ "callback_query_id": callback_query_id }),
                None,
            )
            .await?;
        Ok(())
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::telegram::TelegramError;
use thiserror::Error;

/// 聊天层错误类型
#[derive(Error, Debug)]
pub enum HandlerError {
    /// 来自未授权会话的更新
    #[error("Unauthorized chat: {0}")]
    Unauthorized(i64),

    /// 更新不属于任何会话
    #[error("Update has no chat")]
    MissingChat,

    /// 回调查询没有数据
    #[error("Empty callback data")]
    EmptyCallback,

    #[error(transparent)]
    Telegram(#[from] TelegramError),
}

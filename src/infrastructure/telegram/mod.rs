// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Telegram Bot API 模块
///
/// 提供长轮询更新、消息发送和回调应答
pub mod client;
pub mod notifier;
pub mod types;

pub use client::{TelegramClient, TelegramError};
pub use notifier::TelegramNotifier;

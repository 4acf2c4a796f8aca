// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 表现层模块
///
/// 聊天机器人前端：命令解析、消息处理和长轮询更新循环
pub mod bot;
pub mod commands;
pub mod errors;
pub mod handlers;

pub use bot::TelegramBot;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 聊天消息处理器模块
pub mod message_handler;

pub use message_handler::MessageHandler;

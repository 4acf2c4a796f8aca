// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 数据库（database）：提供数据库连接和实体映射
/// - 指标（metrics）：Prometheus 指标导出
/// - 仓库实现（repositories）：提供领域仓库接口的具体实现
/// - 搜索（search）：候选博客的搜索索引客户端
/// - Telegram（telegram）：聊天机器人的 Bot API 客户端
///
/// 基础设施层依赖于领域层的抽象接口，确保领域层不受技术实现的影响。
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod search;
pub mod telegram;

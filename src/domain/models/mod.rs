// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 职位页面（career）：已发现并记录的远程职位页面，以及单周期结果集
/// - 搜索命中（search_hit）：外部搜索索引返回的候选记录
pub mod career;
pub mod search_hit;

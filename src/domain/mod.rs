// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：职位页面、搜索命中和结果集
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 搜索接口（search）：候选博客的发现来源
/// - 服务（services）：页面分类等纯业务规则
///
/// 领域层不依赖于任何外部实现
pub mod models;
pub mod repositories;
pub mod search;
pub mod services;

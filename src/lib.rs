// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 会话结果与已记录链接做差，并推送通知
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心实体、页面分类服务、搜索索引和仓库接口
pub mod domain;

/// 引擎模块
///
/// 职位页面探测器
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如数据库、搜索索引和 Bot API
pub mod infrastructure;

/// 表示层模块
///
/// 聊天机器人前端
pub mod presentation;

/// 队列模块
///
/// 按墙钟触发爬取周期的调度器和搜索会话
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 单个爬取周期内的发现、探测和收集任务
pub mod workers;

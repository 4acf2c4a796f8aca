// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 调度模块
///
/// 按墙钟触发爬取周期，并通过会话句柄向调用方输出结果和错误
pub mod scheduler;
pub mod session;

pub use scheduler::{CrawlScheduler, SchedulerState, TriggerTime};
pub use session::{SearchSession, SessionEvent};

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 一个爬取周期内的并发任务：候选发现、职位页面探测和命中收集，
/// 以及把它们串起来的流水线
pub mod collector;
pub mod discovery_worker;
pub mod pipeline;
pub mod probe_worker;

pub use pipeline::{CrawlPipeline, CycleOutcome};

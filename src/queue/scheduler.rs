// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::domain::models::career::ResultSet;
use crate::queue::session::SearchSession;
use crate::utils::errors::CrawlError;
use crate::workers::pipeline::{CrawlPipeline, CycleOutcome};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// 调度器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// 等待下一次触发
    Idle,
    /// 爬取周期进行中
    Running,
    /// 已取消或遇到致命错误，终态
    Stopped,
}

/// 每日触发时刻（本地时间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTime {
    pub hour: u32,
    pub minute: u32,
}

impl TriggerTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn matches(&self, now: &NaiveDateTime) -> bool {
        now.hour() == self.hour && now.minute() == self.minute
    }
}

/// 墙钟时间来源
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// 系统本地时间
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// 爬取调度器
///
/// 每个轮询间隔检查一次墙钟，到达触发时刻时运行一个爬取周期。
/// 周期按顺序执行，同一天最多运行一次。
#[derive(Clone)]
pub struct CrawlScheduler {
    pipeline: Arc<CrawlPipeline>,
    clock: Arc<dyn Clock>,
    trigger: TriggerTime,
    poll_interval: Duration,
}

impl CrawlScheduler {
    /// 创建新的调度器实例
    ///
    /// # 参数
    ///
    /// * `pipeline` - 爬取流水线
    /// * `settings` - 触发时刻与轮询间隔
    pub fn new(pipeline: Arc<CrawlPipeline>, settings: &CrawlerSettings) -> Self {
        Self {
            pipeline,
            clock: Arc::new(SystemClock),
            trigger: TriggerTime::new(settings.trigger_hour, settings.trigger_minute),
            poll_interval: settings.poll_interval(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 启动一个搜索会话
    ///
    /// 会话令牌由 `parent` 派生，取消任一者都会结束调度循环并关闭两个输出流
    ///
    /// # 返回值
    ///
    /// 持有取消令牌、结果流和错误流的会话句柄
    pub fn start(&self, parent: &CancellationToken) -> SearchSession {
        let token = parent.child_token();
        let (results_tx, results_rx) = mpsc::channel(1);
        let (errors_tx, errors_rx) = mpsc::channel(1);
        let (state_tx, state_rx) = watch::channel(SchedulerState::Idle);

        let scheduler = self.clone();
        let handle = tokio::spawn(scheduler.run(token.clone(), results_tx, errors_tx, state_tx));

        SearchSession::new(token, results_rx, errors_rx, state_rx, handle)
    }

    async fn run(
        self,
        token: CancellationToken,
        results: mpsc::Sender<ResultSet>,
        errors: mpsc::Sender<CrawlError>,
        state: watch::Sender<SchedulerState>,
    ) {
        info!(
            hour = self.trigger.hour,
            minute = self.trigger.minute,
            "Job search scheduler started"
        );

        // 首次检查在一个轮询间隔之后
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_run: Option<NaiveDate> = None;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let now = self.clock.now();
            if !self.trigger.matches(&now) || last_run == Some(now.date()) {
                debug!(now = %now, "Not time to crawl yet");
                continue;
            }
            last_run = Some(now.date());

            state.send_replace(SchedulerState::Running);
            match self.pipeline.run_cycle(&token).await {
                Ok(CycleOutcome::Completed(found)) => {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        sent = results.send(found) => {
                            if sent.is_err() {
                                info!("Result stream dropped, stopping scheduler");
                                break;
                            }
                        }
                    }
                }
                Ok(CycleOutcome::Cancelled) => break,
                Err(e) => {
                    error!(error = %e, kind = e.kind(), "Crawl cycle failed, stopping scheduler");
                    // 错误流只会收到这一条
                    let _ = errors.try_send(e);
                    break;
                }
            }
            state.send_replace(SchedulerState::Idle);
        }

        state.send_replace(SchedulerState::Stopped);
        info!("Job search scheduler stopped");
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;

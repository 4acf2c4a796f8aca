// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::career::ResultSet;
use crate::queue::scheduler::SchedulerState;
use crate::utils::errors::CrawlError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::warn;

/// 会话输出事件
#[derive(Debug)]
pub enum SessionEvent {
    /// 一个周期完成，结果集可能为空
    Results(ResultSet),
    /// 致命错误，之后不会再有事件
    Failed(CrawlError),
}

/// 搜索会话句柄
///
/// 持有者独占会话的取消令牌和两个输出流；句柄被丢弃时会话随之取消
pub struct SearchSession {
    token: CancellationToken,
    results: mpsc::Receiver<ResultSet>,
    errors: mpsc::Receiver<CrawlError>,
    state: watch::Receiver<SchedulerState>,
    handle: Option<JoinHandle<()>>,
    _guard: DropGuard,
}

impl SearchSession {
    pub(crate) fn new(
        token: CancellationToken,
        results: mpsc::Receiver<ResultSet>,
        errors: mpsc::Receiver<CrawlError>,
        state: watch::Receiver<SchedulerState>,
        handle: JoinHandle<()>,
    ) -> Self {
        let guard = token.clone().drop_guard();
        Self {
            token,
            results,
            errors,
            state,
            handle: Some(handle),
            _guard: guard,
        }
    }

    /// 请求停止会话
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// 会话取消令牌
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// 调度器当前状态
    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// 订阅调度器状态变化
    pub fn state_changes(&self) -> watch::Receiver<SchedulerState> {
        self.state.clone()
    }

    /// 等待下一个事件
    ///
    /// 两个流都关闭后返回 `None`
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        tokio::select! {
            biased;
            Some(e) = self.errors.recv() => Some(SessionEvent::Failed(e)),
            Some(found) = self.results.recv() => Some(SessionEvent::Results(found)),
            else => None,
        }
    }

    /// 等待调度循环退出
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Scheduler task ended abnormally");
            }
        }
    }
}

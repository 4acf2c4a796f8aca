// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::job_search::{JobSearchUseCase, Notifier};
use crate::domain::repositories::career_repository::CareerRepository;
use crate::infrastructure::telegram::types::{CallbackQuery, Message, OutgoingMessage, Update};
use crate::presentation::commands::{BotCommand, CallbackAction};
use crate::presentation::errors::HandlerError;
use crate::queue::scheduler::CrawlScheduler;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub const WELCOME_TEXT: &str = "Hey! You can start a job search pressing the button.";
pub const START_BUTTON_TEXT: &str = "Start a job search!";
pub const SEARCH_STARTED_TEXT: &str = "Job search has successfully started";
pub const SEARCH_ALREADY_RUNNING_TEXT: &str = "Job search is already running";
pub const SEARCH_STOPPED_TEXT: &str = "Your job search stopped.";
pub const NO_SEARCH_TEXT: &str = "No job search is running.";
pub const UNKNOWN_CALLBACK_TEXT: &str = "Unknown callback";

/// 处理器持有的活动会话
///
/// 取消令牌来自会话句柄，会话本身交给通知任务消费
struct ActiveSearch {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ActiveSearch {
    fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Job search notification task ended abnormally");
        }
    }
}

/// 聊天消息处理器
///
/// 只响应授权会话，按命令或回调启动、停止职位搜索
pub struct MessageHandler<R> {
    chat_id: i64,
    scheduler: CrawlScheduler,
    use_case: Arc<JobSearchUseCase<R>>,
    notifier: Arc<dyn Notifier>,
    active: Mutex<Option<ActiveSearch>>,
}

impl<R> MessageHandler<R>
where
    R: CareerRepository + 'static,
{
    pub fn new(
        chat_id: i64,
        scheduler: CrawlScheduler,
        use_case: Arc<JobSearchUseCase<R>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            chat_id,
            scheduler,
            use_case,
            notifier,
            active: Mutex::new(None),
        }
    }

    /// 处理一条更新
    ///
    /// # 参数
    ///
    /// * `update` - Bot API 更新
    /// * `root` - 进程级取消令牌，新会话由它派生
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(message))` - 需要回复的消息
    /// * `Ok(None)` - 无需回复
    /// * `Err(HandlerError)` - 未授权或数据无效
    pub async fn handle(
        &self,
        update: &Update,
        root: &CancellationToken,
    ) -> Result<Option<OutgoingMessage>, HandlerError> {
        let chat_id = update.chat_id().ok_or(HandlerError::MissingChat)?;
        if chat_id != self.chat_id {
            return Err(HandlerError::Unauthorized(chat_id));
        }

        if let Some(query) = &update.callback_query {
            return self.handle_callback(query, root).await.map(Some);
        }

        match &update.message {
            Some(message) => self.handle_message(message).await,
            None => Ok(None),
        }
    }

    async fn handle_message(&self, message: &Message) -> Result<Option<OutgoingMessage>, HandlerError> {
        let Some(command) = message.text.as_deref().and_then(BotCommand::parse) else {
            return Ok(None);
        };

        let reply = match command {
            BotCommand::Start => OutgoingMessage::text(self.chat_id, WELCOME_TEXT)
                .with_button(START_BUTTON_TEXT, CallbackAction::StartJobSearch.data()),
            BotCommand::Stop => OutgoingMessage::text(self.chat_id, self.stop_search().await),
        };
        Ok(Some(reply))
    }

    async fn handle_callback(
        &self,
        query: &CallbackQuery,
        root: &CancellationToken,
    ) -> Result<OutgoingMessage, HandlerError> {
        let action = CallbackAction::parse(query.data.as_deref().unwrap_or_default())?;

        let text = match action {
            Some(CallbackAction::StartJobSearch) => self.start_search(root).await,
            None => UNKNOWN_CALLBACK_TEXT,
        };
        Ok(OutgoingMessage::text(self.chat_id, text))
    }

    async fn start_search(&self, root: &CancellationToken) -> &'static str {
        let mut active = self.active.lock().await;
        if active.as_ref().is_some_and(ActiveSearch::is_running) {
            return SEARCH_ALREADY_RUNNING_TEXT;
        }

        let session = self.scheduler.start(root);
        let cancel = session.cancel_token();
        let use_case = self.use_case.clone();
        let notifier = self.notifier.clone();
        let task = tokio::spawn(async move {
            use_case.run_notifications(session, notifier).await;
        });

        *active = Some(ActiveSearch { cancel, task });
        info!("Job search started");
        SEARCH_STARTED_TEXT
    }

    async fn stop_search(&self) -> &'static str {
        let current = self.active.lock().await.take();
        match current {
            Some(search) if search.is_running() => {
                search.stop().await;
                info!("Job search stopped");
                SEARCH_STOPPED_TEXT
            }
            _ => NO_SEARCH_TEXT,
        }
    }

    /// 停止当前会话（如果有）
    pub async fn shutdown(&self) {
        if let Some(search) = self.active.lock().await.take() {
            search.stop().await;
        }
    }
}

#[cfg(test)]
#[path = "message_handler_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::errors::HandlerError;

pub const START_JOB_SEARCH_DATA: &str = "start_job_search";

/// 机器人命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Stop,
}

impl BotCommand {
    /// 从消息文本解析命令
    ///
    /// 只看第一个词，支持 `/start@bot_name` 形式；非命令或未知命令返回 `None`
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name {
            "start" => Some(BotCommand::Start),
            "stop" => Some(BotCommand::Stop),
            _ => None,
        }
    }
}

/// 内联按钮回调
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    StartJobSearch,
}

impl CallbackAction {
    /// 解析回调数据，未知数据返回 `Ok(None)`
    pub fn parse(data: &str) -> Result<Option<Self>, HandlerError> {
        match data {
            "" => Err(HandlerError::EmptyCallback),
            START_JOB_SEARCH_DATA => Ok(Some(CallbackAction::StartJobSearch)),
            _ => Ok(None),
        }
    }

    pub fn data(&self) -> &'static str {
        match self {
            CallbackAction::StartJobSearch => START_JOB_SEARCH_DATA,
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::career::Career;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// 职位页面仓库特质
///
/// 记录已经推送过的职位链接，供调用方与新一轮结果集做差
#[async_trait]
pub trait CareerRepository: Send + Sync {
    /// 记录新的职位链接（标记为已推送、未喜欢）
    async fn create_career(&self, url: &str) -> Result<Career, RepositoryError>;
    /// 获取所有已记录的职位链接
    async fn get_all_careers(&self) -> Result<Vec<Career>, RepositoryError>;
    /// 检查URL是否已记录
    async fn check_exists(&self, url: &str) -> Result<bool, RepositoryError>;
    /// 标记为已读
    async fn mark_read(&self, url: &str) -> Result<(), RepositoryError>;
    /// 标记为喜欢
    async fn mark_liked(&self, url: &str) -> Result<(), RepositoryError>;
}

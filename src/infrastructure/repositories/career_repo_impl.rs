// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::career::Career;
use crate::domain::repositories::career_repository::{CareerRepository, RepositoryError};
use crate::infrastructure::database::entities::career;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

/// 职位页面仓库实现
#[derive(Clone)]
pub struct CareerRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CareerRepositoryImpl {
    /// 创建新的职位页面仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn set_flag(
        &self,
        url: &str,
        column: career::Column,
    ) -> Result<(), RepositoryError> {
        let result = career::Entity::update_many()
            .col_expr(column, Expr::value(true))
            .filter(career::Column::Url.eq(url))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(url.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CareerRepository for CareerRepositoryImpl {
    async fn create_career(&self, url: &str) -> Result<Career, RepositoryError> {
        let model = career::ActiveModel {
            url: Set(url.to_string()),
            seen: Set(true),
            liked: Set(false),
            ..Default::default()
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn get_all_careers(&self) -> Result<Vec<Career>, RepositoryError> {
        let models = career::Entity::find()
            .order_by_asc(career::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn check_exists(&self, url: &str) -> Result<bool, RepositoryError> {
        let count = career::Entity::find()
            .filter(career::Column::Url.eq(url))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn mark_read(&self, url: &str) -> Result<(), RepositoryError> {
        self.set_flag(url, career::Column::Seen).await
    }

    async fn mark_liked(&self, url: &str) -> Result<(), RepositoryError> {
        self.set_flag(url, career::Column::Liked).await
    }
}

impl From<career::Model> for Career {
    fn from(model: career::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            seen: model.seen,
            liked: model.liked,
        }
    }
}

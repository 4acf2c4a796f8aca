// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_hit::SearchHit;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SearchError {
    #[error("Search index error: {0}")]
    EngineError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Failed to decode search page: {0}")]
    DecodeError(String),
}

/// Paginated index of recently posted stories.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Fetch one page of hits, `page` is zero-based
    async fn query_page(&self, page: u32) -> Result<Vec<SearchHit>, SearchError>;

    /// Get the name of the search index
    fn name(&self) -> &'static str;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DiscoverySettings;
use crate::domain::models::search_hit::{SearchHit, SearchPage};
use crate::domain::search::engine::{SearchError, SearchIndex};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const ALGOLIA_AGENT: &str = "Algolia for JavaScript (4.13.1); Browser (lite)";

/// Algolia 托管的 Hacker News 故事索引
///
/// 按发布时间倒序，只返回 `story` 类型
pub struct AlgoliaSearchIndex {
    client: Client,
    settings: DiscoverySettings,
}

impl AlgoliaSearchIndex {
    pub fn new(settings: DiscoverySettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| SearchError::EngineError(e.to_string()))?;

        Ok(Self { client, settings })
    }

    /// 构建分页查询体
    ///
    /// # 参数
    ///
    /// * `page` - 页码（从0开始）
    /// * `created_after` - 只返回该Unix时间戳之后发布的故事
    pub fn build_query_body(&self, page: u32, created_after: i64) -> Value {
        json!({
            "query": self.settings.query,
            "analyticsTags": ["web"],
            "page": page,
            "hitsPerPage": self.settings.hits_per_page,
            "minWordSizefor1Typo": 4,
            "minWordSizefor2Typos": 8,
            "advancedSyntax": true,
            "ignorePlurals": false,
            "clickAnalytics": true,
            "minProximity": 7,
            "numericFilters": [format!("created_at_i>{}", created_after)],
            "tagFilters": [["story"], []],
            "typoTolerance": "min",
            "queryType": "prefixNone",
            "restrictSearchableAttributes": ["title", "comment_text", "url", "story_text", "author"],
            "getRankingInfo": true,
        })
    }

    fn created_after(&self) -> i64 {
        Utc::now().timestamp() - (self.settings.lookback_hours as i64) * 3600
    }
}

#[async_trait]
impl SearchIndex for AlgoliaSearchIndex {
    async fn query_page(&self, page: u32) -> Result<Vec<SearchHit>, SearchError> {
        let body = self.build_query_body(page, self.created_after());

        let response = self
            .client
            .post(&self.settings.endpoint)
            .query(&[
                ("x-algolia-agent", ALGOLIA_AGENT),
                ("x-algolia-api-key", self.settings.api_key.as_str()),
                ("x-algolia-application-id", self.settings.application_id.as_str()),
            ])
            // Algolia treats form-encoded bodies as simple requests, no CORS preflight
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::EngineError(format!(
                "Algolia search error: {}",
                response.status()
            )));
        }

        let page_result: SearchPage = response
            .json()
            .await
            .map_err(|e| SearchError::DecodeError(e.to_string()))?;

        debug!(page, hits = page_result.hits.len(), "Fetched search page");
        Ok(page_result.hits)
    }

    fn name(&self) -> &'static str {
        "algolia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX_PATH: &str = "/1/indexes/Item_dev_sort_date/query";

    fn settings_for(server: &MockServer) -> DiscoverySettings {
        DiscoverySettings {
            endpoint: format!("{}{}", server.uri(), INDEX_PATH),
            application_id: "APPID".to_string(),
            api_key: "search-key".to_string(),
            query: "blog".to_string(),
            page_count: 2,
            hits_per_page: 100,
            page_delay_ms: 0,
            url_filter: "blog".to_string(),
            lookback_hours: 24,
            request_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_query_page_decodes_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INDEX_PATH))
            .and(query_param("x-algolia-api-key", "search-key"))
            .and(query_param("x-algolia-application-id", "APPID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [
                    {"url": "https://blog.a.com/x", "title": "A"},
                    {"url": null, "title": "Ask HN: blog hosting?"},
                    {"title": "no url at all"}
                ],
                "nbPages": 1
            })))
            .mount(&server)
            .await;

        let index = AlgoliaSearchIndex::new(settings_for(&server)).unwrap();
        let hits = index.query_page(0).await.unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].url.as_deref(), Some("https://blog.a.com/x"));
        assert_eq!(hits[1].url, None);
        assert_eq!(hits[2].url, None);
    }

    #[tokio::test]
    async fn test_query_body_carries_page_and_filters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INDEX_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
            .mount(&server)
            .await;

        let index = AlgoliaSearchIndex::new(settings_for(&server)).unwrap();
        index.query_page(3).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["page"], 3);
        assert_eq!(body["query"], "blog");
        assert_eq!(body["hitsPerPage"], 100);
        assert_eq!(body["tagFilters"][0][0], "story");
        assert!(body["numericFilters"][0]
            .as_str()
            .unwrap()
            .starts_with("created_at_i>"));
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Invalid API key"})))
            .mount(&server)
            .await;

        let index = AlgoliaSearchIndex::new(settings_for(&server)).unwrap();
        let err = index.query_page(0).await.unwrap_err();

        assert!(matches!(err, SearchError::EngineError(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let index = AlgoliaSearchIndex::new(settings_for(&server)).unwrap();
        let err = index.query_page(0).await.unwrap_err();

        assert!(matches!(err, SearchError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_index_is_network_error() {
        let server = MockServer::start().await;
        let mut settings = settings_for(&server);
        // Grab a free port and release it again so nothing is listening
        let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        settings.endpoint = format!("http://{}{}", closed.local_addr().unwrap(), INDEX_PATH);
        drop(closed);

        let index = AlgoliaSearchIndex::new(settings).unwrap();
        let err = index.query_page(0).await.unwrap_err();

        assert!(matches!(err, SearchError::NetworkError(_)));
    }

    #[test]
    fn test_created_after_respects_lookback() {
        let server_settings = DiscoverySettings {
            endpoint: "http://localhost/query".to_string(),
            application_id: String::new(),
            api_key: String::new(),
            query: "blog".to_string(),
            page_count: 1,
            hits_per_page: 10,
            page_delay_ms: 0,
            url_filter: "blog".to_string(),
            lookback_hours: 2,
            request_timeout_secs: 5,
        };
        let index = AlgoliaSearchIndex::new(server_settings).unwrap();

        let expected = Utc::now().timestamp() - 2 * 3600;
        assert!((index.created_after() - expected).abs() <= 1);
    }
}

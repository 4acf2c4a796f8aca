// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::{header::HOST, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use jobscout::config::settings::{CrawlerSettings, DiscoverySettings};
use jobscout::engines::careers_prober::CareersProber;
use jobscout::infrastructure::search::AlgoliaSearchIndex;
use jobscout::queue::scheduler::Clock;
use jobscout::workers::CrawlPipeline;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const INDEX_PATH: &str = "/1/indexes/Item_dev_sort_date/query";

/// 所有探测主机都解析到同一个服务，按 Host 头返回页面
async fn careers_site(headers: HeaderMap, uri: Uri) -> Response {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();

    match (host, uri.path()) {
        ("a.com", "/careers") => (StatusCode::OK, "We are remote-first!").into_response(),
        ("careers.b.com", "/") => (StatusCode::OK, "Join our office in Berlin").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn start_careers_site() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, Router::new().fallback(careers_site))
            .await
            .unwrap();
    });

    addr
}

pub fn prober_for(addr: SocketAddr) -> CareersProber {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .resolve("a.com", addr)
        .resolve("b.com", addr)
        .resolve("careers.b.com", addr)
        .build()
        .unwrap();
    CareersProber::new(client)
}

/// 搜索索引每页都返回同一组命中
pub async fn mount_search_index(server: &MockServer, urls: &[String]) {
    let hits: Vec<_> = urls.iter().map(|u| json!({ "url": u })).collect();
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": hits })))
        .mount(server)
        .await;
}

pub fn discovery_settings(server: &MockServer) -> DiscoverySettings {
    DiscoverySettings {
        endpoint: format!("{}{}", server.uri(), INDEX_PATH),
        application_id: "APPID".to_string(),
        api_key: "search-key".to_string(),
        query: "blog".to_string(),
        page_count: 1,
        hits_per_page: 100,
        page_delay_ms: 0,
        url_filter: "blog".to_string(),
        lookback_hours: 24,
        request_timeout_secs: 5,
    }
}

pub fn crawler_settings() -> CrawlerSettings {
    CrawlerSettings {
        poll_interval_secs: 1,
        ..CrawlerSettings::default()
    }
}

pub fn pipeline(index_server: &MockServer, site: SocketAddr) -> Arc<CrawlPipeline> {
    let discovery = discovery_settings(index_server);
    Arc::new(CrawlPipeline::new(
        Arc::new(AlgoliaSearchIndex::new(discovery.clone()).unwrap()),
        Arc::new(prober_for(site)),
        crawler_settings(),
        discovery,
    ))
}

/// 固定在触发时刻的时钟
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(hour: u32, minute: u32) -> Arc<Self> {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        Arc::new(Self(now))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

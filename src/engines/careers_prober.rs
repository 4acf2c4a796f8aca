// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::CrawlerSettings;
use crate::domain::services::page_classifier;
use crate::engines::traits::{CareerProbe, ProbeError};
use crate::utils::url_utils::CareersTarget;
use async_trait::async_trait;
use metrics::counter;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// 构建探测用HTTP客户端
///
/// 同一周期内所有探测器共享，创建后只读
pub fn build_probe_client(settings: &CrawlerSettings) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent("Mozilla/5.0 (compatible; jobscout/0.1)")
        .timeout(Duration::from_secs(settings.probe_timeout_secs))
        .pool_max_idle_per_host(settings.max_idle_connections)
        .pool_idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
        .build()
}

/// 职位页面探测器
///
/// 基于reqwest，先探测 `/careers`，404时尝试一次 `careers.` 子域
#[derive(Clone)]
pub struct CareersProber {
    client: Client,
}

impl CareersProber {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &CrawlerSettings) -> reqwest::Result<Self> {
        Ok(Self::new(build_probe_client(settings)?))
    }

    async fn fetch(&self, url: &str, stage: &'static str) -> Option<Response> {
        counter!("probe_requests_total", "stage" => stage).increment(1);
        match self.client.get(url).send().await {
            Ok(response) => Some(response),
            Err(e) => {
                warn!(url = %url, error = %e, "Careers page request failed");
                None
            }
        }
    }
}

#[async_trait]
impl CareerProbe for CareersProber {
    #[instrument(skip(self))]
    async fn probe(&self, candidate: &str) -> Result<Option<String>, ProbeError> {
        let target = CareersTarget::from_candidate(candidate)?;

        let mut careers_url = target.primary_url();
        let Some(mut response) = self.fetch(&careers_url, "primary").await else {
            return Ok(None);
        };

        if response.status() == StatusCode::NOT_FOUND {
            // Dropping the response hands its connection back before the second request
            drop(response);
            careers_url = target.fallback_url();
            response = match self.fetch(&careers_url, "fallback").await {
                Some(response) => response,
                None => return Ok(None),
            };
        }

        if response.status() != StatusCode::OK {
            debug!(url = %careers_url, status = %response.status(), "No careers page");
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|source| ProbeError::BodyRead {
                url: careers_url.clone(),
                source,
            })?;

        if !page_classifier::classify(&body) {
            debug!(url = %careers_url, "Careers page does not mention remote work");
            return Ok(None);
        }

        info!(url = %careers_url, "Found remote-friendly careers page");
        Ok(Some(careers_url))
    }

    fn name(&self) -> &'static str {
        "careers"
    }
}

#[cfg(test)]
#[path = "careers_prober_test.rs"]
mod tests;

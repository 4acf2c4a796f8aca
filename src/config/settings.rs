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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

/// 应用程序配置设置
///
/// 包含爬取周期、候选发现、聊天机器人、数据库和指标等所有配置项
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    /// 爬取周期配置
    #[validate(nested)]
    pub crawler: CrawlerSettings,
    /// 候选发现配置
    #[validate(nested)]
    pub discovery: DiscoverySettings,
    /// 聊天机器人配置
    #[validate(nested)]
    pub bot: BotSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 爬取周期配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CrawlerSettings {
    /// 并发探测工作器数量
    #[validate(range(min = 1, max = 256))]
    pub worker_count: usize,
    /// 触发时刻（本地时间，小时）
    #[validate(range(max = 23))]
    pub trigger_hour: u32,
    /// 触发时刻（分钟）
    #[validate(range(max = 59))]
    pub trigger_minute: u32,
    /// 检查触发时刻的间隔（秒）
    #[validate(range(min = 1))]
    pub poll_interval_secs: u64,
    /// 单次探测请求超时时间（秒）
    #[validate(range(min = 1))]
    pub probe_timeout_secs: u64,
    /// 每个主机最大空闲连接数
    pub max_idle_connections: usize,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 链接与结果通道容量
    #[validate(range(min = 1))]
    pub channel_capacity: usize,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            worker_count: 10,
            trigger_hour: 19,
            trigger_minute: 0,
            poll_interval_secs: 60,
            probe_timeout_secs: 5,
            max_idle_connections: 10,
            idle_timeout_secs: 5,
            channel_capacity: 1,
        }
    }
}

impl CrawlerSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// 候选发现配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiscoverySettings {
    /// 搜索索引查询地址
    #[validate(url)]
    pub endpoint: String,
    /// Algolia 应用ID
    pub application_id: String,
    /// Algolia 只读搜索密钥
    pub api_key: String,
    /// 搜索关键词
    pub query: String,
    /// 每个周期请求的页数
    #[validate(range(min = 1, max = 1000))]
    pub page_count: u32,
    /// 每页命中数
    #[validate(range(min = 1, max = 1000))]
    pub hits_per_page: u32,
    /// 两次分页请求之间的间隔（毫秒）
    pub page_delay_ms: u64,
    /// 候选URL必须包含的子串
    pub url_filter: String,
    /// 只查询最近多少小时内发布的内容
    #[validate(range(min = 1))]
    pub lookback_hours: u64,
    /// 分页请求超时时间（秒）
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

impl DiscoverySettings {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// 聊天机器人配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BotSettings {
    /// Bot API 令牌，为空时读取 BOT_TOKEN 环境变量
    pub token: String,
    /// 机器人服务的用户名
    pub user: Option<String>,
    /// 唯一授权的会话ID
    pub chat_id: i64,
    /// Bot API 地址
    #[validate(url)]
    pub api_base_url: String,
    /// 长轮询超时时间（秒）
    pub poll_timeout_secs: u64,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用Prometheus导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `JOBSCOUT__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("JOBSCOUT").separator("__"));

        Self::finish(builder)
    }

    /// 从指定配置文件加载（仍叠加环境变量）
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("JOBSCOUT").separator("__"));

        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let crawler = CrawlerSettings::default();
        Config::builder()
            // Crawl cycle
            .set_default("crawler.worker_count", crawler.worker_count as u64)?
            .set_default("crawler.trigger_hour", crawler.trigger_hour)?
            .set_default("crawler.trigger_minute", crawler.trigger_minute)?
            .set_default("crawler.poll_interval_secs", crawler.poll_interval_secs)?
            .set_default("crawler.probe_timeout_secs", crawler.probe_timeout_secs)?
            .set_default("crawler.max_idle_connections", crawler.max_idle_connections as u64)?
            .set_default("crawler.idle_timeout_secs", crawler.idle_timeout_secs)?
            .set_default("crawler.channel_capacity", crawler.channel_capacity as u64)?
            // Hacker News search, stories only
            .set_default(
                "discovery.endpoint",
                "https://uj5wyc0l7x-dsn.algolia.net/1/indexes/Item_dev_sort_date/query",
            )?
            .set_default("discovery.application_id", "UJ5WYC0L7X")?
            .set_default("discovery.api_key", "")?
            .set_default("discovery.query", "blog")?
            .set_default("discovery.page_count", 11)?
            .set_default("discovery.hits_per_page", 100)?
            .set_default("discovery.page_delay_ms", 50)?
            .set_default("discovery.url_filter", "blog")?
            .set_default("discovery.lookback_hours", 24)?
            .set_default("discovery.request_timeout_secs", 30)?
            // Bot
            .set_default("bot.token", "")?
            .set_default("bot.chat_id", 0)?
            .set_default("bot.api_base_url", "https://api.telegram.org")?
            .set_default("bot.poll_timeout_secs", 60)?
            // Storage
            .set_default("database.url", "sqlite://jobscout.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut settings: Settings = builder.build()?.try_deserialize()?;

        if settings.bot.token.is_empty() {
            settings.bot.token = std::env::var("BOT_TOKEN").unwrap_or_default();
        }

        settings
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid settings: {}", e)))?;

        Ok(settings)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

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

use async_trait::async_trait;
use thiserror::Error;

/// 探测错误类型
///
/// 只包含对所在工作器致命的错误；网络层失败在探测器内部记录并视为未命中
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 候选URL无法解析
    #[error("Invalid candidate url {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    /// 候选URL缺少主机
    #[error("Candidate url has no host: {0}")]
    MissingHost(String),
    /// 读取响应体失败
    #[error("Failed to read careers page {url}: {source}")]
    BodyRead {
        url: String,
        source: reqwest::Error,
    },
}

/// 职位页面探测特质
#[async_trait]
pub trait CareerProbe: Send + Sync {
    /// 探测候选站点
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(url))` - 找到支持远程的职位页面，返回实际访问的地址
    /// * `Ok(None)` - 未命中
    /// * `Err(ProbeError)` - 致命错误
    async fn probe(&self, candidate: &str) -> Result<Option<String>, ProbeError>;

    /// 探测器名称
    fn name(&self) -> &'static str;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::ProbeError;
use url::Url;

const BLOG_PREFIX: &str = "blog.";
const WWW: &str = "www.";

/// 从候选博客URL推导出的职位页面探测目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareersTarget {
    scheme: String,
    /// 去掉 `blog.` 前缀后的主机，保留端口
    host: String,
}

impl CareersTarget {
    /// 解析候选URL
    ///
    /// # 返回值
    ///
    /// * `Ok(CareersTarget)` - 解析成功
    /// * `Err(ProbeError)` - URL无法解析或缺少主机
    pub fn from_candidate(candidate: &str) -> Result<Self, ProbeError> {
        let parsed = Url::parse(candidate).map_err(|source| ProbeError::InvalidUrl {
            url: candidate.to_string(),
            source,
        })?;

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ProbeError::MissingHost(candidate.to_string()))?;
        let host = host.strip_prefix(BLOG_PREFIX).unwrap_or(host);
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: parsed.scheme().to_string(),
            host,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// 主探测地址 `{scheme}://{host}/careers`
    pub fn primary_url(&self) -> String {
        format!("{}://{}/careers", self.scheme, self.host)
    }

    /// 主地址返回404时的备用地址
    ///
    /// `careers.` 作为子域前缀；主机带 `www.` 时改为 `www.careers.`
    pub fn fallback_url(&self) -> String {
        if self.host.contains(WWW) {
            format!(
                "{}://www.careers.{}",
                self.scheme,
                self.host.replacen(WWW, "", 1)
            )
        } else {
            format!("{}://careers.{}", self.scheme, self.host)
        }
    }
}

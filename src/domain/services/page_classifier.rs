// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 远程职位指示词
///
/// 大小写敏感，按原样逐个匹配
pub const REMOTE_INDICATORS: [&str; 8] = [
    "fully remote",
    "Fully remote",
    "remote-first",
    "Remote-first",
    "remote first",
    "Remote first",
    "Worldwide",
    "worldwide",
];

/// 判断页面内容是否为支持完全远程的职位页面
///
/// # 参数
///
/// * `page_body` - 页面原始文本
///
/// # 返回值
///
/// 包含任一远程指示词时返回true
pub fn classify(page_body: &str) -> bool {
    REMOTE_INDICATORS
        .iter()
        .any(|indicator| page_body.contains(indicator))
}

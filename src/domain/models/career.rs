// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

/// 单个爬取周期产出的职位链接集合
///
/// 只关心成员关系，不保证顺序
pub type ResultSet = HashSet<String>;

/// 已记录的职位页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Career {
    /// 主键
    pub id: i32,
    /// 职位页面URL
    pub url: String,
    /// 是否已推送给用户
    pub seen: bool,
    /// 是否被用户标记为喜欢
    pub liked: bool,
}

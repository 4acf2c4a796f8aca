// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索服务模块
///
/// 提供候选博客发现所用的搜索索引客户端
pub mod algolia;

pub use algolia::AlgoliaSearchIndex;

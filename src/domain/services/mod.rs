// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 提取服务（extraction_service）：把列表页 HTML 解析为域名记录
/// - 汇总服务（summary_service）：读取持久化表并计算展示统计
pub mod extraction_service;
pub mod summary_service;

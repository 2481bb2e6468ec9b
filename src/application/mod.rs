// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 编排领域服务、列表来源与存储，实现完整的采集流程
pub mod use_cases;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 编排列表获取、提取与存储的采集用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含域名记录、列对齐规则、HTML 提取与汇总统计
pub mod domain;

/// 引擎模块
///
/// 提供搜索列表页的获取方式
pub mod engines;

/// 基础设施模块
///
/// 提供 CSV 表存储实现
pub mod infrastructure;

/// 表示层模块
///
/// 处理查看器的 HTTP 请求和响应
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

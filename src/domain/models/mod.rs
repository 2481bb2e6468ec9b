// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 域名记录（domain_record）：列表页中一行可用域名的字段映射
/// - 表（table）：持久化表的内存视图以及列对齐规则
pub mod domain_record;
pub mod table;

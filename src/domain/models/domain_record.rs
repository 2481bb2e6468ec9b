// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 必填字段名
pub const DOMAIN_FIELD: &str = "domain";

/// 域名记录
///
/// 从列表页的一行中提取的字段映射。`domain` 字段必定存在，
/// 其余字段只有在源标记中存在对应单元格时才会出现。
/// 记录创建后不可变，所有权从提取器移交给表存储。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    fields: BTreeMap<String, String>,
}

impl DomainRecord {
    /// 以域名创建一条记录
    pub fn new(domain: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(DOMAIN_FIELD.to_string(), domain.into());
        Self { fields }
    }

    /// 在记录中追加可选字段（仅构建阶段使用）
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn domain(&self) -> &str {
        self.fields
            .get(DOMAIN_FIELD)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// 记录中出现的字段名，按字典序排列
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

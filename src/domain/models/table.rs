// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeSet;

use serde::Serialize;

use super::domain_record::DomainRecord;

/// 持久化表的内存视图
///
/// `headers` 为列顺序，`rows` 中每一行按列顺序对齐；
/// 旧数据中较短的行不会被补齐。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// 一次合并的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// 本次追加的行数
    pub rows_written: usize,
    /// 本次是否新建了存储文件
    pub created: bool,
    /// 本次新增的列（按追加顺序）
    pub added_columns: Vec<String>,
}

/// 一批记录所需的列集合（字典序）
pub fn batch_columns(records: &[DomainRecord]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|r| r.field_names().map(str::to_string))
        .collect()
}

/// 列对齐
///
/// 保留已有列的原始顺序，把新批次中尚未出现的列按字典序追加到末尾。
/// 已有列永远不会被移除或重排。
///
/// # 参数
///
/// * `existing` - 已持久化的表头
/// * `incoming` - 新批次需要的列
///
/// # 返回值
///
/// 对齐后的表头，是 `existing` 的超集
pub fn reconcile_headers(existing: &[String], incoming: &BTreeSet<String>) -> Vec<String> {
    let mut headers = existing.to_vec();
    for column in incoming {
        if !headers.contains(column) {
            headers.push(column.clone());
        }
    }
    headers
}

/// 按表头顺序展开一条记录，缺失字段写空值
pub fn record_to_row(record: &DomainRecord, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| record.get(h).unwrap_or_default().to_string())
        .collect()
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

use crate::domain::models::table::Table;
use crate::domain::repositories::table_repository::{TableError, TableRepository};
use crate::utils::numeric::clean_number;

/// 查看器使用的数据载荷
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableSummary {
    pub headers: Vec<String>,
    pub data: Vec<Vec<String>>,
    #[serde(rename = "highestBacklinks")]
    pub highest_backlinks: f64,
}

/// 汇总服务
///
/// 读取持久化表并计算展示用的统计值
pub struct SummaryService;

impl SummaryService {
    /// 加载表并计算反向链接最大值
    ///
    /// 存储不存在时返回空表与 `0`；IO 错误向上传递。
    pub fn load_summary<R: TableRepository + ?Sized>(repo: &R) -> Result<TableSummary, TableError> {
        let table = repo.load()?;
        Ok(Self::summarize(table))
    }

    pub fn summarize(table: Table) -> TableSummary {
        let highest_backlinks = highest_backlinks(&table.headers, &table.rows);
        TableSummary {
            headers: table.headers,
            data: table.rows,
            highest_backlinks,
        }
    }
}

/// 反向链接列的最大值
///
/// 取第一个名称包含 `backlinks`（不区分大小写）的列；无此列或无数据时为 `0`。
/// 比列索引短的行被跳过。
pub fn highest_backlinks(headers: &[String], rows: &[Vec<String>]) -> f64 {
    let Some(idx) = headers
        .iter()
        .position(|h| h.to_lowercase().contains("backlinks"))
    else {
        return 0.0;
    };

    rows.iter()
        .filter_map(|row| row.get(idx))
        .map(|cell| clean_number(cell))
        .fold(0.0, f64::max)
}

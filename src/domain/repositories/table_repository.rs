// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::Path;

use thiserror::Error;

use crate::domain::models::domain_record::DomainRecord;
use crate::domain::models::table::{MergeReport, Table};

/// 表存储错误类型
#[derive(Error, Debug)]
pub enum TableError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV 编解码错误
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// 表存储仓库特质
///
/// 单写者、同步阻塞。调用方在异步上下文中应放入阻塞线程池执行。
pub trait TableRepository: Send + Sync {
    /// 将一批记录合并进持久化表
    ///
    /// 空批次不触碰任何文件。列只增不减，已有行与列全部保留，不做去重。
    fn merge(&self, records: &[DomainRecord]) -> Result<MergeReport, TableError>;

    /// 读取完整表头与所有行；存储不存在时返回空表
    fn load(&self) -> Result<Table, TableError>;

    /// 存储位置
    fn location(&self) -> &Path;
}

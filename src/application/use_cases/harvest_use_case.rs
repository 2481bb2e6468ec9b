// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::repositories::table_repository::{TableError, TableRepository};
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::ListingSource;

/// 采集流程错误类型
#[derive(Error, Debug)]
pub enum HarvestError {
    /// 搜索词文件读写失败
    #[error("Terms file error: {0}")]
    Terms(#[from] io::Error),
    /// 表存储失败，终止本次采集
    #[error("Store error: {0}")]
    Store(#[from] TableError),
    /// 阻塞任务异常退出
    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 采集报告
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub terms: usize,
    /// 获取列表页失败的搜索词
    pub failed_terms: Vec<String>,
    pub domains_found: usize,
    pub rows_written: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// 读取搜索词
///
/// 每行一个，去掉首尾空白，忽略空行。文件不存在时创建空文件并返回空列表。
pub async fn load_terms(path: &Path) -> Result<Vec<String>, HarvestError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "Terms file not found, creating an empty one. Add search terms and run again"
            );
            tokio::fs::write(path, "").await?;
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// 采集用例
///
/// 逐个搜索词串行执行：获取列表页、提取可用域名、合并进表存储。
pub struct HarvestUseCase {
    source: Arc<dyn ListingSource>,
    repository: Arc<dyn TableRepository>,
    delay: Duration,
}

impl HarvestUseCase {
    pub fn new(
        source: Arc<dyn ListingSource>,
        repository: Arc<dyn TableRepository>,
        delay: Duration,
    ) -> Self {
        Self {
            source,
            repository,
            delay,
        }
    }

    /// 执行采集
    ///
    /// 单个搜索词获取失败只记录日志并继续；存储错误会终止采集。
    pub async fn run(&self, terms: &[String]) -> Result<HarvestReport, HarvestError> {
        let started_at = Utc::now();
        let mut failed_terms = Vec::new();
        let mut domains_found = 0;
        let mut rows_written = 0;

        if terms.is_empty() {
            info!("No search terms to process");
        }

        for (i, term) in terms.iter().enumerate() {
            info!(term = %term, source = self.source.name(), "Searching for term");

            match self.source.fetch_listing(term).await {
                Ok(html) => {
                    let outcome = ExtractionService::extract(&html);
                    info!(
                        term = %term,
                        "Found {} available domains for term '{}'",
                        outcome.records.len(),
                        term
                    );
                    domains_found += outcome.records.len();

                    if !outcome.records.is_empty() {
                        let repository = self.repository.clone();
                        let records = outcome.records;
                        let report =
                            tokio::task::spawn_blocking(move || repository.merge(&records)).await??;
                        rows_written += report.rows_written;
                    }
                }
                Err(e) => {
                    warn!(term = %term, error = %e, "Error loading search results");
                    failed_terms.push(term.clone());
                }
            }

            if i + 1 < terms.len() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let report = HarvestReport {
            terms: terms.len(),
            failed_terms,
            domains_found,
            rows_written,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            terms = report.terms,
            failed = report.failed_terms.len(),
            domains = report.domains_found,
            rows = report.rows_written,
            elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
            "Harvest finished"
        );
        Ok(report)
    }
}

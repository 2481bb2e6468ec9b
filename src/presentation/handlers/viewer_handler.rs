// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{response::Html, Extension, Json};
use tracing::info;

use crate::domain::repositories::table_repository::TableRepository;
use crate::domain::services::summary_service::{SummaryService, TableSummary};
use crate::presentation::errors::AppError;

/// 模板中需要替换的占位赋值语句
pub const DATA_PLACEHOLDER: &str = "const tableData = [];";
pub const HEADERS_PLACEHOLDER: &str = "const tableHeaders = [];";
pub const BACKLINKS_PLACEHOLDER: &str = "let highestBacklinks = 0;";

/// 查看器共享状态
pub struct ViewerState {
    pub repository: Arc<dyn TableRepository>,
    pub template_path: PathBuf,
}

/// 序列化为可以直接放进 `<script>` 块的 JSON
///
/// `<`、`>`、`&` 只可能出现在字符串字面量内，转成 `\uXXXX` 后 JS 解析结果不变，
/// 单元格中的 `</script>` 也就无法提前结束脚本。
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// 把数据载荷注入页面模板
///
/// 对三个占位赋值语句做文本替换，模板中缺少的占位符保持原样。
pub fn render_template(template: &str, summary: &TableSummary) -> Result<String, serde_json::Error> {
    let data = script_json(&summary.data)?;
    let headers = script_json(&summary.headers)?;
    let highest = script_json(&summary.highest_backlinks)?;

    Ok(template
        .replace(DATA_PLACEHOLDER, &format!("const tableData = {};", data))
        .replace(HEADERS_PLACEHOLDER, &format!("const tableHeaders = {};", headers))
        .replace(BACKLINKS_PLACEHOLDER, &format!("let highestBacklinks = {};", highest)))
}

async fn load_summary(state: &ViewerState) -> Result<TableSummary, AppError> {
    let repository = state.repository.clone();
    let summary = tokio::task::spawn_blocking(move || SummaryService::load_summary(repository.as_ref())).await??;
    Ok(summary)
}

/// 返回表数据 JSON
pub async fn data_json(
    Extension(state): Extension<Arc<ViewerState>>,
) -> Result<Json<TableSummary>, AppError> {
    let summary = load_summary(&state).await?;
    info!(rows = summary.data.len(), "Serving data.json");
    Ok(Json(summary))
}

/// 返回注入了数据的查看器页面
pub async fn index(
    Extension(state): Extension<Arc<ViewerState>>,
) -> Result<Html<String>, AppError> {
    let template = tokio::fs::read_to_string(&state.template_path).await?;
    let summary = load_summary(&state).await?;
    Ok(Html(render_template(&template, &summary)?))
}

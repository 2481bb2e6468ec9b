// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::presentation::handlers::viewer_handler::{self, ViewerState};

/// 创建应用路由
///
/// # 参数
///
/// * `state` - 查看器共享状态
/// * `static_dir` - 未匹配路径回落到的静态文件目录
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: Arc<ViewerState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(viewer_handler::index))
        .route("/index.html", get(viewer_handler::index))
        .route("/data.json", get(viewer_handler::data_json))
        .fallback_service(ServeDir::new(static_dir))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::engines::traits::{EngineError, ListingSource};

/// 已保存页面的文件名：搜索词中的空白折叠为 `_`
pub fn page_file_name(term: &str) -> String {
    let slug = term.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}.html", slug)
}

/// 离线列表来源
///
/// 从目录中读取事先保存的列表页（`<dir>/<term>.html`），用于重放与测试
pub struct FileListingSource {
    pages_dir: PathBuf,
}

impl FileListingSource {
    pub fn new(pages_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
        }
    }

    pub fn page_path(&self, term: &str) -> PathBuf {
        self.pages_dir.join(page_file_name(term))
    }
}

#[async_trait]
impl ListingSource for FileListingSource {
    async fn fetch_listing(&self, term: &str) -> Result<String, EngineError> {
        let path = self.page_path(term);
        debug!(path = %path.display(), "Reading saved listing");
        Ok(tokio::fs::read_to_string(&path).await?)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

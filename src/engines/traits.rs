// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功的HTTP状态码
    #[error("Unexpected status code: {0}")]
    Status(u16),
    /// 读取已保存页面失败
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 判断错误是否可重试
    ///
    /// # 返回值
    ///
    /// 如果错误是可重试的则返回true，否则返回false
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::RequestFailed(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            EngineError::Status(code) => *code >= 500 || *code == 429,
            EngineError::Io(_) | EngineError::Other(_) => false,
        }
    }
}

/// 列表页来源特质
///
/// 为一个搜索词提供一页已按“仅可用域名”过滤的结果 HTML。
/// 登录与页面交互不在此特质的职责内。
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// 获取搜索词对应的列表页
    async fn fetch_listing(&self, term: &str) -> Result<String, EngineError>;

    /// 来源名称
    fn name(&self) -> &'static str;
}

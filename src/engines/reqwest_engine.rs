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

use crate::config::settings::ListingSettings;
use crate::engines::traits::{EngineError, ListingSource};
use crate::utils::retry_policy::RetryPolicy;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use std::time::Instant;
use tracing::{debug, warn};

/// 生成搜索地址
///
/// 把模板中的 `{term}` 替换为表单编码后的搜索词（空格编码为 `+`）
pub fn build_search_url(template: &str, term: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(term.trim().as_bytes()).collect();
    template.replace("{term}", &encoded)
}

/// 列表抓取引擎
///
/// 基于reqwest实现，携带已登录会话的 Cookie 访问搜索页
pub struct ReqwestListingSource {
    client: reqwest::Client,
    search_url: String,
    retry_policy: RetryPolicy,
}

impl ReqwestListingSource {
    /// 根据配置创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 列表抓取配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestListingSource)` - 创建成功
    /// * `Err(EngineError)` - Cookie 非法或客户端构建失败
    pub fn new(settings: &ListingSettings) -> Result<Self, EngineError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &settings.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| EngineError::Other(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            search_url: settings.search_url.clone(),
            retry_policy: RetryPolicy::with_max_retries(settings.max_retries),
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    async fn fetch_once(&self, url: &str) -> Result<String, EngineError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status(status.as_u16()));
        }

        let content = response.text().await?;
        debug!(
            url = %url,
            bytes = content.len(),
            response_time_ms = start.elapsed().as_millis() as u64,
            "Listing fetched"
        );
        Ok(content)
    }
}

#[async_trait]
impl ListingSource for ReqwestListingSource {
    async fn fetch_listing(&self, term: &str) -> Result<String, EngineError> {
        let url = build_search_url(&self.search_url, term);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() && self.retry_policy.should_retry(attempt) => {
                    attempt += 1;
                    let backoff = self.retry_policy.calculate_backoff(attempt);
                    warn!(term = %term, attempt, error = %e, "Listing fetch failed, retrying in {:?}", backoff);
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;

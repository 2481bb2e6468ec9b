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

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 默认的列表搜索地址，`{term}` 会被替换为编码后的搜索词
pub const DEFAULT_SEARCH_URL: &str =
    "https://member.expireddomains.net/domain-name-search/?o=bl&r=d&fwhois=22&q={term}";

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 存储配置
    pub storage: StorageSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 查看器配置
    pub viewer: ViewerSettings,
    /// 列表抓取配置
    pub listing: ListingSettings,
    /// 采集流程配置
    pub harvest: HarvestSettings,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// CSV 表文件路径
    pub csv_path: PathBuf,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 查看器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerSettings {
    /// 页面模板路径
    pub template_path: PathBuf,
    /// 其他静态文件的根目录
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingSettings {
    /// 搜索地址模板
    pub search_url: String,
    /// 已登录会话的 Cookie 头
    pub session_cookie: Option<String>,
    pub user_agent: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 可重试错误的最大重试次数
    pub max_retries: u32,
    /// 已保存页面目录；设置后从文件读取而不是访问网络
    pub pages_dir: Option<PathBuf>,
}

impl ListingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarvestSettings {
    /// 搜索词文件路径（每行一个）
    pub terms_path: PathBuf,
    /// 两个搜索词之间的间隔（毫秒）
    pub delay_ms: u64,
}

impl HarvestSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 按顺序叠加：默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// 以 `DOMAINRS__` 为前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("storage.csv_path", "available_domains.csv")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("viewer.template_path", "html/template.html")?
            .set_default("viewer.static_dir", ".")?
            // Default listing settings
            .set_default("listing.search_url", DEFAULT_SEARCH_URL)?
            .set_default(
                "listing.user_agent",
                "Mozilla/5.0 (compatible; domainrs/0.1)",
            )?
            .set_default("listing.timeout_secs", 30)?
            .set_default("listing.max_retries", 2)?
            .set_default("harvest.terms_path", "terms.txt")?
            .set_default("harvest.delay_ms", 1000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DOMAINRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

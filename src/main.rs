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
use std::sync::Arc;

use clap::{Parser, Subcommand};
use domainrs::application::use_cases::harvest_use_case::{load_terms, HarvestUseCase};
use domainrs::config::settings::Settings;
use domainrs::domain::repositories::table_repository::TableRepository;
use domainrs::engines::file_engine::FileListingSource;
use domainrs::engines::reqwest_engine::ReqwestListingSource;
use domainrs::engines::traits::ListingSource;
use domainrs::infrastructure::storage::CsvTableStore;
use domainrs::presentation::handlers::viewer_handler::ViewerState;
use domainrs::presentation::routes;
use domainrs::utils::telemetry;
use tokio::net::TcpListener;
use tracing::info;

/// 可用域名采集与查看工具
#[derive(Debug, Parser)]
#[command(name = "domainrs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 启动表数据查看器
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// CSV 表文件路径
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// 按搜索词采集可用域名并写入 CSV 表
    Harvest {
        /// 搜索词文件（每行一个）
        #[arg(long)]
        terms: Option<PathBuf>,
        /// 输出 CSV 文件路径
        #[arg(long)]
        output: Option<PathBuf>,
        /// 从已保存页面目录读取列表，而不是访问网络
        #[arg(long)]
        pages_dir: Option<PathBuf>,
    },
}

/// 主函数
///
/// 应用程序入口点，加载配置后执行子命令
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    telemetry::init_telemetry();

    // 2. Load configuration
    let mut settings = Settings::new()?;
    info!("Configuration loaded");

    match cli.command {
        Command::Serve { host, port, csv } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(csv) = csv {
                settings.storage.csv_path = csv;
            }
            serve(settings).await
        }
        Command::Harvest {
            terms,
            output,
            pages_dir,
        } => {
            if let Some(terms) = terms {
                settings.harvest.terms_path = terms;
            }
            if let Some(output) = output {
                settings.storage.csv_path = output;
            }
            if pages_dir.is_some() {
                settings.listing.pages_dir = pages_dir;
            }
            harvest(settings).await
        }
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let repository: Arc<dyn TableRepository> =
        Arc::new(CsvTableStore::new(settings.storage.csv_path.clone()));
    let state = Arc::new(ViewerState {
        repository,
        template_path: settings.viewer.template_path.clone(),
    });
    let app = routes::routes(state, &settings.viewer.static_dir);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Server stopped");
        })
        .await?;
    Ok(())
}

async fn harvest(settings: Settings) -> anyhow::Result<()> {
    let terms = load_terms(&settings.harvest.terms_path).await?;
    if terms.is_empty() {
        info!(
            path = %settings.harvest.terms_path.display(),
            "Terms file is empty. Please add search terms and run the program again"
        );
        return Ok(());
    }

    let source: Arc<dyn ListingSource> = match &settings.listing.pages_dir {
        Some(dir) => Arc::new(FileListingSource::new(dir.clone())),
        None => Arc::new(ReqwestListingSource::new(&settings.listing)?),
    };
    let repository: Arc<dyn TableRepository> =
        Arc::new(CsvTableStore::new(settings.storage.csv_path.clone()));

    let use_case = HarvestUseCase::new(source, repository, settings.harvest.delay());
    let report = use_case.run(&terms).await?;

    info!(
        "Processed {} terms: {} domains found, {} rows written, {} failed",
        report.terms,
        report.domains_found,
        report.rows_written,
        report.failed_terms.len()
    );
    Ok(())
}

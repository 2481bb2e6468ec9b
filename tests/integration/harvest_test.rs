// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domainrs::application::use_cases::harvest_use_case::HarvestUseCase;
use domainrs::domain::repositories::table_repository::TableRepository;
use domainrs::engines::file_engine::FileListingSource;
use domainrs::engines::traits::{EngineError, ListingSource};

use super::helpers::{as_repository, listing_page, temp_store, ListingRow};

/// 第一个搜索词失败、其余返回固定页面的来源
struct ScriptedSource {
    page: String,
}

#[async_trait]
impl ListingSource for ScriptedSource {
    async fn fetch_listing(&self, term: &str) -> Result<String, EngineError> {
        if term == "broken" {
            return Err(EngineError::Status(503));
        }
        Ok(self.page.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn terms(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_harvest_from_saved_pages() {
    let (dir, store) = temp_store();
    let pages = dir.path().join("pages");
    std::fs::create_dir(&pages).unwrap();
    std::fs::write(
        pages.join("web_hosting.html"),
        listing_page(&[
            ListingRow::available("hostfast.com").backlinks("320"),
            ListingRow::available("hostslow.com").status("Registered"),
        ]),
    )
    .unwrap();
    std::fs::write(
        pages.join("coffee.html"),
        listing_page(&[ListingRow::available("beanbag.net").length("7")]),
    )
    .unwrap();

    let use_case = HarvestUseCase::new(
        Arc::new(FileListingSource::new(&pages)),
        as_repository(&store),
        Duration::ZERO,
    );
    let report = use_case
        .run(&terms(&["web hosting", "coffee", "missing"]))
        .await
        .unwrap();

    assert_eq!(report.terms, 3);
    assert_eq!(report.domains_found, 2);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.failed_terms, terms(&["missing"]));

    let table = store.load().unwrap();
    assert_eq!(
        table.headers,
        terms(&["backlinks", "domain", "whois_details", "whois_status", "length"])
    );
    assert_eq!(table.rows.len(), 2);
}

#[tokio::test]
async fn test_fetch_failure_does_not_stop_harvest() {
    let (_dir, store) = temp_store();
    let source = ScriptedSource {
        page: listing_page(&[ListingRow::available("ok.com")]),
    };

    let use_case = HarvestUseCase::new(Arc::new(source), as_repository(&store), Duration::ZERO);
    let report = use_case.run(&terms(&["broken", "fine"])).await.unwrap();

    assert_eq!(report.failed_terms, terms(&["broken"]));
    assert_eq!(report.rows_written, 1);
}

#[tokio::test]
async fn test_empty_results_leave_store_untouched() {
    let (_dir, store) = temp_store();
    let source = ScriptedSource {
        page: listing_page(&[ListingRow::available("gone.com").status("Deleted")]),
    };

    let use_case = HarvestUseCase::new(Arc::new(source), as_repository(&store), Duration::ZERO);
    let report = use_case.run(&terms(&["anything"])).await.unwrap();

    assert_eq!(report.domains_found, 0);
    assert!(!store.location().exists());
}

#[tokio::test(start_paused = true)]
async fn test_delay_between_terms() {
    let (_dir, store) = temp_store();
    let source = ScriptedSource {
        page: listing_page(&[]),
    };
    let use_case = HarvestUseCase::new(
        Arc::new(source),
        as_repository(&store),
        Duration::from_secs(5),
    );

    let start = tokio::time::Instant::now();
    use_case.run(&terms(&["a", "b", "c"])).await.unwrap();
    // 只在搜索词之间等待
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(10));
    assert!(elapsed < Duration::from_secs(15));
}

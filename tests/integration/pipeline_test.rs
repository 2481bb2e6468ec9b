// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use domainrs::domain::models::domain_record::DomainRecord;
use domainrs::domain::repositories::table_repository::TableRepository;
use domainrs::domain::services::extraction_service::ExtractionService;
use domainrs::domain::services::summary_service::SummaryService;

use super::helpers::{listing_page, temp_store, ListingRow};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 端到端：两次合并后表头为“先排序再追加”，缺失单元格为空
#[test]
fn test_two_merges_sorted_then_extended() {
    let (_dir, store) = temp_store();

    store
        .merge(&[DomainRecord::new("a.com").with_field("backlinks", "50")])
        .unwrap();
    store
        .merge(&[DomainRecord::new("b.com").with_field("length", "5")])
        .unwrap();

    let table = store.load().unwrap();
    assert_eq!(table.headers, strings(&["backlinks", "domain", "length"]));
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][table.column_index("length").unwrap()], "");
    assert_eq!(table.rows[1][table.column_index("backlinks").unwrap()], "");
}

/// 从列表页到汇总统计的完整流程
#[test]
fn test_extract_merge_summarize() {
    let (_dir, store) = temp_store();

    let first_page = listing_page(&[
        ListingRow::available("alpha.com").backlinks("12").length("5"),
        ListingRow::available("taken.com").backlinks("99,999").status("Registered"),
        ListingRow::available("beta.net").backlinks("1,204"),
    ]);
    let second_page = listing_page(&[
        ListingRow::available("gamma.org").backlinks("abc"),
        ListingRow::available("delta.io"),
    ]);

    for page in [&first_page, &second_page] {
        let outcome = ExtractionService::extract(page);
        store.merge(&outcome.records).unwrap();
    }

    let summary = SummaryService::load_summary(store.as_ref()).unwrap();
    assert_eq!(summary.data.len(), 4);
    assert_eq!(summary.highest_backlinks, 1204.0);

    let domain_idx = summary.headers.iter().position(|h| h == "domain").unwrap();
    let domains: Vec<_> = summary.data.iter().map(|r| r[domain_idx].as_str()).collect();
    assert_eq!(domains, vec!["alpha.com", "beta.net", "gamma.org", "delta.io"]);
    assert!(!domains.contains(&"taken.com"));
}

/// 行数等于所有非空批次之和，不去重
#[test]
fn test_row_preservation_across_repeated_pages() {
    let (_dir, store) = temp_store();
    let page = listing_page(&[
        ListingRow::available("same.com").backlinks("1"),
        ListingRow::available("other.com"),
    ]);
    let empty_page = listing_page(&[ListingRow::available("x.com").status("Deleted")]);

    let mut expected = 0;
    for html in [&page, &empty_page, &page] {
        let records = ExtractionService::extract(html).records;
        expected += records.len();
        store.merge(&records).unwrap();
    }

    assert_eq!(expected, 4);
    assert_eq!(store.load().unwrap().rows.len(), expected);
}

#[test]
fn test_summary_of_missing_store() {
    let (_dir, store) = temp_store();
    let summary = SummaryService::load_summary(store.as_ref()).unwrap();
    assert!(summary.headers.is_empty());
    assert!(summary.data.is_empty());
    assert_eq!(summary.highest_backlinks, 0.0);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::domain::models::domain_record::DomainRecord;

/// 可用性标记（区分大小写的子串匹配）
pub const AVAILABLE_MARKER: &str = "Available";

/// 否定形式的状态文本，命中时即使包含可用性标记也拒绝
pub const UNAVAILABLE_MARKERS: &[&str] = &["Not Available", "not Available"];

/// 字段提取规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// 单元格的可见文本
    CellText,
    /// 单元格内链接的可见文本
    LinkText,
    /// 链接的 title 属性，缺失时回退到链接文本
    LinkTitleOrText,
    /// 同 `LinkTitleOrText`，并去掉冗余的 TLD 前缀（如 `".com "`）
    LinkTitleStripPrefix(&'static str),
}

/// 可选字段定义
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// 输出字段名
    pub name: &'static str,
    /// 单元格的 class 标记
    pub cell_class: &'static str,
    pub rule: FieldRule,
}

/// 可选字段表，按输出顺序排列
pub const FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec { name: "length", cell_class: "field_length", rule: FieldRule::CellText },
    FieldSpec { name: "backlinks", cell_class: "field_bl", rule: FieldRule::LinkTitleOrText },
    FieldSpec { name: "domainpop", cell_class: "field_domainpop", rule: FieldRule::LinkText },
    FieldSpec { name: "creation_date", cell_class: "field_creationdate", rule: FieldRule::LinkTitleOrText },
    FieldSpec { name: "archive_birth", cell_class: "field_abirth", rule: FieldRule::LinkTitleOrText },
    FieldSpec { name: "archive_entries", cell_class: "field_aentries", rule: FieldRule::LinkTitleOrText },
    FieldSpec { name: "majestic_rank", cell_class: "field_majestic_globalrank", rule: FieldRule::LinkText },
    FieldSpec { name: "dmoz", cell_class: "field_dmoz", rule: FieldRule::CellText },
    FieldSpec { name: "tld_status", cell_class: "field_statustld_registered", rule: FieldRule::LinkText },
    FieldSpec { name: "com_status", cell_class: "field_statuscom", rule: FieldRule::LinkTitleStripPrefix(".com ") },
    FieldSpec { name: "net_status", cell_class: "field_statusnet", rule: FieldRule::LinkTitleStripPrefix(".net ") },
    FieldSpec { name: "org_status", cell_class: "field_statusorg", rule: FieldRule::LinkTitleStripPrefix(".org ") },
    FieldSpec { name: "biz_status", cell_class: "field_statusbiz", rule: FieldRule::LinkTitleStripPrefix(".biz ") },
    FieldSpec { name: "info_status", cell_class: "field_statusinfo", rule: FieldRule::LinkTitleStripPrefix(".info ") },
    FieldSpec { name: "de_status", cell_class: "field_statusde", rule: FieldRule::LinkTitleStripPrefix(".de ") },
    FieldSpec { name: "add_date", cell_class: "field_adddate", rule: FieldRule::CellText },
    FieldSpec { name: "related_cnobi", cell_class: "field_related_cnobi", rule: FieldRule::CellText },
    FieldSpec { name: "wikipedia_links", cell_class: "field_wikipedia_links", rule: FieldRule::CellText },
    FieldSpec { name: "domain_list", cell_class: "field_domainlist", rule: FieldRule::CellText },
];

/// 列表页结构选择器，进程内只编译一次
struct ListingSelectors {
    container: Selector,
    table: Selector,
    row: Selector,
    domain_link: Selector,
    status_cell: Selector,
    link: Selector,
    fields: Vec<(FieldSpec, Selector)>,
}

fn css(selector: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector {selector}: {e}"))
}

static SELECTORS: LazyLock<ListingSelectors> = LazyLock::new(|| ListingSelectors {
    container: css("div#listing"),
    table: css("table"),
    row: css("tr"),
    domain_link: css("td.field_domain a.namelinks"),
    status_cell: css("td.field_whois2"),
    link: css("a"),
    fields: FIELD_SPECS
        .iter()
        .map(|spec| (*spec, css(&format!("td.{}", spec.cell_class))))
        .collect(),
});

/// 提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionOutcome {
    /// 通过可用性校验的记录
    pub records: Vec<DomainRecord>,
    /// 通过可用性校验的行数
    pub available: usize,
    /// 访问过的非表头行数
    pub total: usize,
}

/// 提取服务
///
/// 负责把列表页 HTML 解析成域名记录。结构缺失只会导致空结果或字段缺省，
/// 不会返回错误。
pub struct ExtractionService;

impl ExtractionService {
    /// 提取可用域名
    ///
    /// # 参数
    ///
    /// * `html_content` - 一页搜索结果的 HTML
    ///
    /// # 返回值
    ///
    /// 提取出的记录以及可用/总行数
    pub fn extract(html_content: &str) -> ExtractionOutcome {
        let selectors = &*SELECTORS;
        let document = Html::parse_document(html_content);
        let mut outcome = ExtractionOutcome::default();

        let Some(listing) = document.select(&selectors.container).next() else {
            warn!("No listing found on the page");
            return outcome;
        };

        let Some(table) = listing.select(&selectors.table).next() else {
            warn!("No table found in listing");
            return outcome;
        };

        for row in table.select(&selectors.row) {
            if is_header_row(&row) {
                continue;
            }
            outcome.total += 1;

            if let Some(record) = Self::extract_row(selectors, &row) {
                outcome.available += 1;
                outcome.records.push(record);
            }
        }

        info!(
            available = outcome.available,
            total = outcome.total,
            "Found {} available domains out of {} total domains in the listing",
            outcome.available,
            outcome.total
        );
        outcome
    }

    /// 提取单行；缺少域名或可用性校验失败时返回 `None`
    fn extract_row(selectors: &ListingSelectors, row: &ElementRef) -> Option<DomainRecord> {
        let domain_link = row.select(&selectors.domain_link).next()?;
        let domain = title_or_text(&domain_link);
        if domain.is_empty() {
            return None;
        }

        // 服务端已按可用性过滤，这里再次校验
        let status_cell = row.select(&selectors.status_cell).next()?;
        let status_link = status_cell.select(&selectors.link).next()?;
        let status_text = element_text(&status_link);
        if !is_available(&status_text) {
            debug!(domain = %domain, status = %status_text, "Skipping unavailable domain");
            return None;
        }

        let mut record = DomainRecord::new(domain);
        for (spec, selector) in &selectors.fields {
            let Some(cell) = row.select(selector).next() else {
                continue;
            };
            if let Some(value) = apply_rule(spec.rule, &cell, &selectors.link) {
                record = record.with_field(spec.name, value);
            }
        }

        let details = status_link.value().attr("title").unwrap_or_default().to_string();
        Some(
            record
                .with_field("whois_status", status_text)
                .with_field("whois_details", details),
        )
    }
}

/// 包含可用性标记且不是否定形式
pub fn is_available(status_text: &str) -> bool {
    status_text.contains(AVAILABLE_MARKER)
        && !UNAVAILABLE_MARKERS
            .iter()
            .any(|marker| status_text.contains(marker))
}

fn is_header_row(row: &ElementRef) -> bool {
    row.value().classes().any(|c| c == "thead")
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// title 属性优先；属性缺失或为空白时回退到可见文本
fn title_or_text(element: &ElementRef) -> String {
    match element.value().attr("title") {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => element_text(element),
    }
}

fn apply_rule(rule: FieldRule, cell: &ElementRef, link: &Selector) -> Option<String> {
    match rule {
        FieldRule::CellText => Some(element_text(cell)),
        FieldRule::LinkText => cell.select(link).next().map(|a| element_text(&a)),
        FieldRule::LinkTitleOrText => cell.select(link).next().map(|a| title_or_text(&a)),
        FieldRule::LinkTitleStripPrefix(prefix) => cell
            .select(link)
            .next()
            .map(|a| title_or_text(&a).replace(prefix, "")),
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;

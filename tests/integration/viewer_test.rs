// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use domainrs::domain::models::domain_record::DomainRecord;
use domainrs::domain::repositories::table_repository::TableRepository;
use domainrs::presentation::handlers::viewer_handler::ViewerState;
use domainrs::presentation::routes;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use super::helpers::{as_repository, temp_store};

const TEMPLATE: &str = "<html><script>
const tableData = [];
const tableHeaders = [];
let highestBacklinks = 0;
</script></html>";

fn app(dir: &TempDir, repository: Arc<dyn TableRepository>, template: Option<&str>) -> Router {
    let template_path = dir.path().join("template.html");
    if let Some(template) = template {
        std::fs::write(&template_path, template).unwrap();
    }
    let state = Arc::new(ViewerState {
        repository,
        template_path,
    });
    routes::routes(state, dir.path())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn seed(repository: &dyn TableRepository) {
    repository
        .merge(&[
            DomainRecord::new("a.com").with_field("backlinks", "1,204"),
            DomainRecord::new("b.com").with_field("backlinks", "12"),
        ])
        .unwrap();
    repository
        .merge(&[DomainRecord::new("c.com").with_field("length", "5")])
        .unwrap();
}

/// 健康检查测试
#[tokio::test]
async fn health_check_works() {
    let (dir, store) = temp_store();
    let (status, body) = get(app(&dir, as_repository(&store), None), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn data_json_returns_table_and_maximum() {
    let (dir, store) = temp_store();
    seed(store.as_ref());

    let (status, body) = get(app(&dir, as_repository(&store), None), "/data.json").await;
    assert_eq!(status, StatusCode::OK);

    let payload: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(payload["headers"], json!(["backlinks", "domain", "length"]));
    assert_eq!(
        payload["data"],
        json!([["1,204", "a.com", ""], ["12", "b.com", ""], ["", "c.com", "5"]])
    );
    assert_eq!(payload["highestBacklinks"].as_f64(), Some(1204.0));
}

#[tokio::test]
async fn data_json_on_missing_store_is_empty() {
    let (dir, store) = temp_store();
    let (status, body) = get(app(&dir, as_repository(&store), None), "/data.json").await;

    assert_eq!(status, StatusCode::OK);
    let payload: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(payload["headers"], json!([]));
    assert_eq!(payload["data"], json!([]));
    assert_eq!(payload["highestBacklinks"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn index_injects_payload_into_template() {
    let (dir, store) = temp_store();
    seed(store.as_ref());

    for uri in ["/", "/index.html"] {
        let (status, body) = get(app(&dir, as_repository(&store), Some(TEMPLATE)), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"const tableHeaders = ["backlinks","domain","length"];"#));
        assert!(body.contains(r#"["","c.com","5"]"#));
        assert!(body.contains("let highestBacklinks = 1204.0;"));
    }
}

#[tokio::test]
async fn missing_template_is_server_error() {
    let (dir, store) = temp_store();
    let (status, body) = get(app(&dir, as_repository(&store), None), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let payload: Value = serde_json::from_str(&body).unwrap();
    assert!(payload["error"].is_string());
}

#[tokio::test]
async fn unreadable_store_is_server_error() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("store_is_a_dir");
    std::fs::create_dir(&store_path).unwrap();
    let repository: Arc<dyn TableRepository> =
        Arc::new(domainrs::infrastructure::storage::CsvTableStore::new(&store_path));

    let (status, _) = get(app(&dir, repository, None), "/data.json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn other_paths_are_served_from_static_dir() {
    let (dir, store) = temp_store();
    std::fs::write(dir.path().join("style.css"), "body { color: red; }").unwrap();

    let (status, body) = get(app(&dir, as_repository(&store), None), "/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body { color: red; }");

    let (status, _) = get(app(&dir, as_repository(&store), None), "/nope.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn index_keeps_script_markup_in_cells_inert() {
    let (dir, store) = temp_store();
    store
        .merge(&[DomainRecord::new("evil.com")
            .with_field("whois_details", "</script><script>alert(1)</script>")])
        .unwrap();

    let (status, body) = get(app(&dir, as_repository(&store), Some(TEMPLATE)), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("</script>").count(), 1);
    assert!(body.contains(r#"\u003c/script\u003e\u003cscript\u003ealert(1)"#));
}

#[test]
fn bundled_template_renders_cells_as_text() {
    let template = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/html/template.html")).unwrap();
    assert!(template.contains("const tableData = [];"));
    assert!(template.contains("const tableHeaders = [];"));
    assert!(template.contains("let highestBacklinks = 0;"));
    assert!(template.contains("textContent"));
    assert!(!template.contains("innerHTML"));
}

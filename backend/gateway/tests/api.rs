//! End-to-end API tests: the router is served on an ephemeral port and
//! driven with a real HTTP client, mock vision provider wired in.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx};

use gridscan_core::{ProcessingResult, TableVision, VisionRequest};
use gridscan_extraction::ExtractionService;
use gridscan_gateway::{build_router, AppState};
use gridscan_store::{MemStore, TableStore};
use gridscan_vision::MockVision;

/// Counts transcribe calls so tests can assert the vision capability was
/// never touched on rejected uploads.
struct CountingVision {
    inner: MockVision,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TableVision for CountingVision {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn transcribe(&self, request: &VisionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.transcribe(request).await
    }
}

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    store: Arc<MemStore>,
    vision_calls: Arc<AtomicUsize>,
}

async fn spawn_app(reply: &str) -> TestApp {
    let store = Arc::new(MemStore::new());
    let vision_calls = Arc::new(AtomicUsize::new(0));
    let vision = Arc::new(CountingVision {
        inner: MockVision::new().with_reply(reply),
        calls: vision_calls.clone(),
    });

    let state = AppState {
        service: Arc::new(ExtractionService::new(vision, store.clone())),
        store: store.clone(),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        store,
        vision_calls,
    }
}

fn image_form(bytes: &[u8], filename: &str, mime: &str) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes.to_vec())
        .file_name(filename.to_string())
        .mime_str(mime)
        .unwrap();
    reqwest::multipart::Form::new().part("file", part)
}

async fn upload(app: &TestApp, filename: &str) -> ProcessingResult {
    let response = app
        .client
        .post(format!("{}/api/upload-image", app.base_url))
        .multipart(image_form(b"fake image bytes", filename, "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

const FENCED_REPLY: &str = "```json\n[[\"Name\",\"Age\"],[\"Jo\",\"1\"]]\n```";

#[tokio::test]
async fn test_root_reports_running() {
    let app = spawn_app(FENCED_REPLY).await;
    let body: serde_json::Value = app
        .client
        .get(format!("{}/api/", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "running");
    assert_eq!(body["message"], "Handwritten Table Converter API");
}

#[tokio::test]
async fn test_non_image_upload_rejected_without_side_effects() {
    let app = spawn_app(FENCED_REPLY).await;
    let response = app
        .client
        .post(format!("{}/api/upload-image", app.base_url))
        .multipart(image_form(b"plain text", "notes.txt", "text/plain"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(app.vision_calls.load(Ordering::SeqCst), 0);
    assert!(app.store.list_recent(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_then_export_round_trip() {
    let app = spawn_app(FENCED_REPLY).await;

    let result = upload(&app, "ledger.png").await;
    assert!(result.success);
    assert_eq!(
        result.table_data,
        Some(vec![
            vec!["Name".to_string(), "Age".to_string()],
            vec!["Jo".to_string(), "1".to_string()],
        ])
    );
    let id = result.processing_id.expect("processing id on success");
    assert!(!id.is_empty());

    let response = app
        .client
        .post(format!("{}/api/generate-excel/{id}", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap(),
        "attachment; filename=ledger_extracted.xlsx"
    );

    let bytes = response.bytes().await.unwrap().to_vec();
    let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Extracted Table").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["Name".to_string(), "Age".to_string()],
            vec!["Jo".to_string(), "1".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_export_unknown_id_is_404() {
    let app = spawn_app(FENCED_REPLY).await;
    let response = app
        .client
        .post(format!("{}/api/generate-excel/no-such-id", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_failed_extraction_is_200_with_failure_payload() {
    let app = spawn_app("this is not a table").await;
    let result = upload(&app, "blurry.png").await;
    assert!(!result.success);
    assert!(result.table_data.is_none());
    assert!(result.processing_id.is_none());
    assert!(app.store.list_recent(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_extractions_lists_newest_first() {
    let app = spawn_app(FENCED_REPLY).await;
    upload(&app, "first.png").await;
    upload(&app, "second.png").await;

    let records: Vec<serde_json::Value> = app
        .client
        .get(format!("{}/api/extractions", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["filename"], "second.png");
    assert_eq!(records[1]["filename"], "first.png");
}

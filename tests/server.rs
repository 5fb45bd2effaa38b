//! HTTP API tests driving the router directly with `tower::ServiceExt`.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{docx_bytes, FailingIndex, FakeLlm, MemoryStore, RecordingIndex};
use manualforge::pipeline::Pipeline;
use manualforge::server::build_router;

fn router_with_manual(llm_reply: &str) -> axum::Router {
    let store = Arc::new(MemoryStore::with_object(
        "uploads/manual.docx",
        docx_bytes(&["Check pressure daily"]),
    ));
    let pipeline = Pipeline::new(
        store,
        Arc::new(RecordingIndex::default()),
        Arc::new(FakeLlm::new(llm_reply)),
    );
    build_router(Arc::new(pipeline))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router_with_manual("unused");
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn upload_url_returns_grant() {
    let app = router_with_manual("unused");
    let response = app
        .oneshot(
            Request::get("/upload-url?filename=manual.pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["key"], "uploads/manual.pdf");
    assert!(json["url"].as_str().unwrap().contains("uploads/manual.pdf"));
}

#[tokio::test]
async fn generate_returns_result_url() {
    let app = router_with_manual("Step|Task\n1|Check pressure");
    let request = Request::post("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"keys":["uploads/manual.docx"],"useCase":"checksheet"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let url = json["resultUrl"].as_str().unwrap();
    assert!(url.contains("outputs/checksheet-"));
    assert!(url.contains(".xlsx"));
}

#[tokio::test]
async fn unknown_use_case_falls_back_to_document_output() {
    let app = router_with_manual("some free-form output");
    let request = Request::post("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"keys":["uploads/manual.docx"],"useCase":"summary"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let url = json["resultUrl"].as_str().unwrap();
    assert!(url.contains("outputs/workinstruction-"));
    assert!(url.contains(".docx"));
}

#[tokio::test]
async fn pipeline_failure_maps_to_plain_500() {
    let store = Arc::new(MemoryStore::with_object(
        "uploads/manual.docx",
        docx_bytes(&["Check pressure daily"]),
    ));
    let pipeline = Pipeline::new(
        store,
        Arc::new(FailingIndex),
        Arc::new(FakeLlm::new("unused")),
    );
    let app = build_router(Arc::new(pipeline));

    let request = Request::post("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"keys":["uploads/manual.docx"],"useCase":"checksheet"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("index"), "body: {}", body);
}

#[tokio::test]
async fn missing_document_maps_to_500() {
    let app = router_with_manual("unused");
    let request = Request::post("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"keys":["uploads/nope.pdf"],"useCase":"checksheet"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

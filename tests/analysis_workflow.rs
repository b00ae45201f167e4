//! End-to-end scan ingestion scenarios against a wiremock server.

mod common;

use std::path::PathBuf;

use codedx::{AnalysisWorkflow, CodeDxClient, CodeDxError};
use common::{json_body, quick_poller};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

fn write_scan(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_full_ingestion_returns_final_analysis() {
    let server = MockServer::start().await;

    // Stage 1: prep creation
    Mock::given(method("POST"))
        .and(path("/api/analysis-prep"))
        .respond_with(json_body(json!({ "prepId": "prep-1" })))
        .expect(1)
        .mount(&server)
        .await;

    // Stage 2: upload, whose job completes after two progress ticks
    Mock::given(method("POST"))
        .and(path("/api/analysis-prep/prep-1/upload"))
        .respond_with(json_body(json!({ "jobId": "upload-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/upload-1"))
        .respond_with(json_body(json!({ "jobId": "upload-1", "status": "queued" })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/upload-1"))
        .respond_with(json_body(json!({ "jobId": "upload-1", "status": "completed" })))
        .mount(&server)
        .await;

    // Stage 3: prep verification comes back clean
    Mock::given(method("GET"))
        .and(path("/api/analysis-prep/prep-1"))
        .respond_with(json_body(json!({
            "inputIds": ["input-1"],
            "verificationErrors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Stage 4: run, poll three ticks, fetch details by the submitted id
    Mock::given(method("POST"))
        .and(path("/api/analysis-prep/prep-1/analyze"))
        .respond_with(json_body(json!({ "analysisId": 42, "jobId": "run-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/run-1"))
        .respond_with(json_body(json!({ "jobId": "run-1", "status": "running" })))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/run-1"))
        .respond_with(json_body(json!({ "jobId": "run-1", "status": "completed" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/7/analyses/42"))
        .respond_with(json_body(json!({ "id": 42, "state": "done" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let scan = write_scan(&dir, "scan.xml", b"<report/>");

    let client = CodeDxClient::new("test-key", &server.uri()).unwrap();
    let analysis = AnalysisWorkflow::new(&client)
        .with_poller(quick_poller(&client))
        .run(7, &scan)
        .await
        .unwrap();

    assert_eq!(analysis.id, 42);
    assert_eq!(analysis.state.as_deref(), Some("done"));
}

#[tokio::test]
async fn test_verification_errors_abort_before_analysis_starts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis-prep"))
        .respond_with(json_body(json!({ "prepId": "prep-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/analysis-prep/prep-1/upload"))
        .respond_with(json_body(json!({ "jobId": "upload-1", "status": "completed" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/analysis-prep/prep-1"))
        .respond_with(json_body(json!({
            "inputIds": ["input-1"],
            "verificationErrors": ["unknown tool", "missing severity column"]
        })))
        .mount(&server)
        .await;

    // The run endpoint must never be called with unresolved errors.
    Mock::given(method("POST"))
        .and(path("/api/analysis-prep/prep-1/analyze"))
        .respond_with(json_body(json!({ "analysisId": 1, "jobId": "run-1" })))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let scan = write_scan(&dir, "scan.json", b"{}");

    let client = CodeDxClient::new("test-key", &server.uri()).unwrap();
    let result = AnalysisWorkflow::new(&client)
        .with_poller(quick_poller(&client))
        .run(7, &scan)
        .await;

    match result {
        Err(CodeDxError::VerificationErrors { prep_id, errors }) => {
            assert_eq!(prep_id, "prep-1");
            assert_eq!(errors, vec!["unknown tool", "missing severity column"]);
        }
        other => panic!("expected verification errors, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unaccepted_extension_makes_no_requests() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let scan = write_scan(&dir, "scan.html", b"<html></html>");

    let client = CodeDxClient::new("test-key", &server.uri()).unwrap();
    let result = AnalysisWorkflow::new(&client)
        .with_poller(quick_poller(&client))
        .run(7, &scan)
        .await;

    match result {
        Err(CodeDxError::UnsupportedScanFile { file_name }) => {
            assert_eq!(file_name, "scan.html");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_upload_job_aborts_the_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis-prep"))
        .respond_with(json_body(json!({ "prepId": "prep-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/analysis-prep/prep-1/upload"))
        .respond_with(json_body(json!({ "jobId": "upload-1" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/upload-1"))
        .respond_with(json_body(json!({ "jobId": "upload-1", "status": "failed" })))
        .mount(&server)
        .await;

    // Neither the prep re-fetch nor the run may happen after a failure.
    Mock::given(method("GET"))
        .and(path("/api/analysis-prep/prep-1"))
        .respond_with(json_body(json!({ "verificationErrors": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let scan = write_scan(&dir, "scan.csv", b"id,severity\n");

    let client = CodeDxClient::new("test-key", &server.uri()).unwrap();
    let result = AnalysisWorkflow::new(&client)
        .with_poller(quick_poller(&client))
        .run(7, &scan)
        .await;

    assert!(matches!(result, Err(CodeDxError::JobFailed { .. })));
}

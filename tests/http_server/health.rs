use crate::helpers::*;

#[tokio::test]
async fn health_endpoint_returns_healthy() {
    let server = TestServer::unconfigured().await;

    let resp = server.get("/health").await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    let timestamp = body["timestamp"].as_str().expect("timestamp missing");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());

    server.shutdown().await;
}

#[tokio::test]
async fn unknown_path_returns_not_found() {
    let server = TestServer::unconfigured().await;

    let resp = server.get("/does-not-exist").await;

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Not found");

    server.shutdown().await;
}

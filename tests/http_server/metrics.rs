use crate::helpers::*;

#[tokio::test]
async fn metrics_endpoint_exposes_webhook_counters() {
    let server = TestServer::unconfigured().await;

    let resp = server.post_webhook(r#"{"status":"firing","alerts":[]}"#).await;
    assert_eq!(resp.status(), 200);
    let resp = server.post_webhook("not json").await;
    assert_eq!(resp.status(), 400);

    let resp = server.get("/metrics").await;
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"].to_str().unwrap().starts_with("text/plain"));
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains(r#"telegram_webhook_requests_total{status="200"}"#));
    assert!(body.contains(r#"telegram_webhook_requests_total{status="400"}"#));
    assert!(body.contains("telegram_webhook_errors_total"));

    server.shutdown().await;
}

#[tokio::test]
async fn metrics_endpoint_counts_failed_messages() {
    let server = TestServer::unconfigured().await;

    let payload = r#"{"status":"firing","alerts":[{"labels":{"alertname":"A","severity":"critical"}}]}"#;
    let resp = server.post_webhook(payload).await;
    assert_eq!(resp.status(), 200);

    let body = server.get("/metrics").await.text().await.expect("Failed to read body");
    assert!(body.contains(r#"telegram_messages_sent_total{status="error"}"#));

    server.shutdown().await;
}

#[tokio::test]
async fn metrics_endpoint_counts_posts_to_unknown_paths() {
    let server = TestServer::unconfigured().await;

    let resp = server
        .client
        .post(format!("http://{}/alerts", server.address))
        .body("{}")
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), 404);

    let body = server.get("/metrics").await.text().await.expect("Failed to read body");
    assert!(body.contains(r#"telegram_webhook_requests_total{status="404"}"#));

    server.shutdown().await;
}

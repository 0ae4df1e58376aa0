use mockito::Matcher;
use serde_json::json;

use crate::helpers::*;

fn mixed_batch() -> serde_json::Value {
    let mut alerts = vec![
        json!({"status": "firing", "labels": {"alertname": "Crit1", "severity": "critical"}}),
        json!({"status": "firing", "labels": {"alertname": "Crit2", "severity": "critical"}}),
    ];
    for i in 0..7 {
        alerts.push(json!({
            "status": "firing",
            "labels": {"alertname": format!("Warn{i}"), "severity": "warning"}
        }));
    }
    alerts.push(json!({"status": "firing", "labels": {"alertname": "Other", "severity": "info"}}));

    json!({
        "version": "4",
        "groupKey": "{}:{alertname=\"mixed\"}",
        "status": "firing",
        "receiver": "telegram",
        "alerts": alerts
    })
}

#[tokio::test]
async fn webhook_delivers_classified_messages_in_order() {
    let mut telegram = mockito::Server::new_async().await;
    let crit1 = telegram
        .mock("POST", send_message_path().as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "chat_id": CHAT_ID,
                "parse_mode": "HTML",
                "disable_notification": false
            })),
            Matcher::Regex("Crit1".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;
    let warnings = telegram
        .mock("POST", send_message_path().as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"disable_notification": true})),
            Matcher::Regex(r"Warning Alerts \(7\)".into()),
            Matcher::Regex(r"and 2 more alerts".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;
    let any = telegram
        .mock("POST", send_message_path().as_str())
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(2)
        .create_async()
        .await;

    let server = TestServer::new(telegram_config(&telegram.url(), 20)).await;
    let resp = server.post_webhook(mixed_batch().to_string()).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    crit1.assert_async().await;
    warnings.assert_async().await;
    any.assert_async().await;

    server.shutdown().await;
}

#[tokio::test]
async fn webhook_retries_transient_failures() {
    let mut telegram = mockito::Server::new_async().await;
    let unavailable = telegram
        .mock("POST", send_message_path().as_str())
        .with_status(503)
        .expect(2)
        .create_async()
        .await;
    let ok = telegram
        .mock("POST", send_message_path().as_str())
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create_async()
        .await;

    let server = TestServer::new(telegram_config(&telegram.url(), 20)).await;
    let payload = json!({
        "status": "firing",
        "alerts": [{"labels": {"alertname": "DiskFull", "severity": "critical"}}]
    });
    let resp = server.post_webhook(payload.to_string()).await;

    assert_eq!(resp.status(), 200);
    unavailable.assert_async().await;
    ok.assert_async().await;

    server.shutdown().await;
}

#[tokio::test]
async fn webhook_succeeds_even_when_rate_limited() {
    let mut telegram = mockito::Server::new_async().await;
    let mock = telegram
        .mock("POST", send_message_path().as_str())
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create_async()
        .await;

    let server = TestServer::new(telegram_config(&telegram.url(), 1)).await;
    let resp = server.post_webhook(mixed_batch().to_string()).await;

    assert_eq!(resp.status(), 200);
    mock.assert_async().await;

    server.shutdown().await;
}

#[tokio::test]
async fn webhook_empty_batch_sends_nothing() {
    let mut telegram = mockito::Server::new_async().await;
    let mock = telegram
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let server = TestServer::new(telegram_config(&telegram.url(), 20)).await;
    let resp = server.post_webhook(r#"{"status":"resolved","alerts":[]}"#).await;

    assert_eq!(resp.status(), 200);
    mock.assert_async().await;

    server.shutdown().await;
}

#[tokio::test]
async fn webhook_rejects_malformed_json() {
    let server = TestServer::unconfigured().await;

    let resp = server.post_webhook("{\"alerts\": [").await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));

    server.shutdown().await;
}

#[tokio::test]
async fn webhook_without_credentials_still_accepts_batch() {
    let server = TestServer::unconfigured().await;

    let payload = json!({
        "status": "firing",
        "alerts": [{"labels": {"alertname": "DiskFull", "severity": "critical"}}]
    });
    let resp = server.post_webhook(payload.to_string()).await;

    assert_eq!(resp.status(), 200);

    server.shutdown().await;
}

#[tokio::test]
async fn webhook_rejects_non_object_body() {
    let server = TestServer::unconfigured().await;

    let resp = server.post_webhook("[]").await;

    assert_eq!(resp.status(), 400);

    server.shutdown().await;
}

#[tokio::test]
async fn webhook_accepts_null_labels() {
    let mut telegram = mockito::Server::new_async().await;
    let mock = telegram
        .mock("POST", send_message_path().as_str())
        .match_body(Matcher::Regex("Unknown Alert".into()))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create_async()
        .await;

    let server = TestServer::new(telegram_config(&telegram.url(), 20)).await;
    let resp = server
        .post_webhook(r#"{"status":"firing","alerts":[{"labels":null,"annotations":{"summary":null}}]}"#)
        .await;

    assert_eq!(resp.status(), 200);
    mock.assert_async().await;

    server.shutdown().await;
}

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use common::{setup_failing_storage_app, setup_test_app, MockWebhookClient, StorageFailures};
use serde_json::{json, Value};

#[actix_rt::test]
async fn test_health_and_version() -> anyhow::Result<()> {
    let test_app = setup_test_app(MockWebhookClient::replying(json!({}))).await?;

    let resp = test::call_service(
        &test_app.app,
        TestRequest::get().uri("/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    let body: Value = test::call_and_read_body_json(
        &test_app.app,
        TestRequest::get().uri("/version").to_request(),
    )
    .await;
    assert_eq!(body["service"], "relay-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    Ok(())
}

#[actix_rt::test]
async fn test_health_reports_unreachable_database() -> anyhow::Result<()> {
    let failures = StorageFailures {
        ping: true,
        ..Default::default()
    };
    let test_app = setup_failing_storage_app(MockWebhookClient::replying(json!({})), failures).await?;

    let resp = test::call_service(
        &test_app.app,
        TestRequest::get().uri("/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unavailable");

    Ok(())
}

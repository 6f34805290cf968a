mod common;

use common::TestApp;

#[tokio::test]
async fn health_check_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("health request failed");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("invalid health body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "blog-service");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/docs/openapi.json", app.address))
        .send()
        .await
        .expect("openapi request failed");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("invalid openapi body");
    assert!(body["paths"]["/posts"].is_object());
}

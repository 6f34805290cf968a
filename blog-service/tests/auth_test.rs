mod common;

use common::TestApp;

#[tokio::test]
async fn register_returns_identity_and_working_token() {
    let app = TestApp::spawn().await;

    let response = app
        .register("Ada Lovelace", "ada@example.com", "a sound passphrase")
        .await;
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.expect("invalid body");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"]["password_hash"].is_null());

    let id = body["data"]["id"].as_str().expect("missing id");
    let token = body["data"]["token"].as_str().expect("missing token");

    // The token resolves back to the identity that was just created.
    let me = app
        .client
        .get(format!("{}/auth/me", app.address))
        .bearer_auth(token)
        .send()
        .await
        .expect("me request failed");
    assert_eq!(me.status(), 200);

    let me_body: serde_json::Value = me.json().await.expect("invalid me body");
    assert_eq!(me_body["data"]["id"], id);
    assert!(me_body["data"]["password_hash"].is_null());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_not_a_crash() {
    let app = TestApp::spawn().await;

    app.register_user("ada@example.com").await;

    let response = app
        .register("Someone Else", "ada@example.com", "another passphrase")
        .await;
    assert_eq!(response.status(), 409);

    let body: serde_json::Value = response.json().await.expect("invalid body");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_validates_payload() {
    let app = TestApp::spawn().await;

    let bad_email = app.register("Ada", "not-an-email", "a sound passphrase").await;
    assert_eq!(bad_email.status(), 400);

    let short_password = app.register("Ada", "ada@example.com", "short").await;
    assert_eq!(short_password.status(), 400);

    let no_name = app.register("", "ada@example.com", "a sound passphrase").await;
    assert_eq!(no_name.status(), 400);
}

#[tokio::test]
async fn login_returns_identity_and_working_token() {
    let app = TestApp::spawn().await;
    let (id, _) = app.register_user("ada@example.com").await;

    let response = app.login("ada@example.com", "a sound passphrase").await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("invalid body");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], id.as_str());

    let token = body["data"]["token"].as_str().expect("missing token");
    let me = app
        .client
        .get(format!("{}/auth/me", app.address))
        .bearer_auth(token)
        .send()
        .await
        .expect("me request failed");
    assert_eq!(me.status(), 200);
}

#[tokio::test]
async fn credential_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register_user("ada@example.com").await;

    let wrong_password = app.login("ada@example.com", "wrong passphrase").await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_body: serde_json::Value = wrong_password.json().await.expect("invalid body");

    let unknown_email = app.login("nobody@example.com", "a sound passphrase").await;
    assert_eq!(unknown_email.status(), 401);
    let unknown_body: serde_json::Value = unknown_email.json().await.expect("invalid body");

    // Same kind, same message: a caller cannot probe which emails exist.
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn me_rejects_missing_and_invalid_tokens() {
    let app = TestApp::spawn().await;

    let missing = app
        .client
        .get(format!("{}/auth/me", app.address))
        .send()
        .await
        .expect("request failed");
    assert_eq!(missing.status(), 401);

    let malformed = app
        .client
        .get(format!("{}/auth/me", app.address))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .expect("request failed");
    assert_eq!(malformed.status(), 401);

    let body: serde_json::Value = malformed.json().await.expect("invalid body");
    assert_eq!(body["success"], false);
}

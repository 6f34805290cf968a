mod common;

use common::TestApp;

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_user("author@example.com").await;

    let post_id = app
        .create_post_id(&token, "First post", "<p>Hello, world.</p>")
        .await;

    let response = app.get_post(&post_id).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("invalid body");
    assert_eq!(body["data"]["title"], "First post");
    assert_eq!(body["data"]["content"], "<p>Hello, world.</p>");
    assert_eq!(body["data"]["author_id"], user_id.as_str());
}

#[tokio::test]
async fn creating_a_post_requires_a_token() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/posts", app.address))
        .json(&serde_json::json!({ "title": "T", "content": "C" }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_user("author@example.com").await;

    // Empty title fails the request-level rule.
    let empty_title = app.create_post(&token, "", "content").await;
    assert_eq!(empty_title.status(), 400);

    // Markup-only content survives the length rule but is empty once tags
    // are stripped.
    let markup_only = app.create_post(&token, "Title", "<p>  </p>").await;
    assert_eq!(markup_only.status(), 400);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_user("author@example.com").await;

    let first = app.create_post_id(&token, "first", "one").await;
    let second = app.create_post_id(&token, "second", "two").await;
    let third = app.create_post_id(&token, "third", "three").await;

    let response = app
        .client
        .get(format!("{}/posts", app.address))
        .send()
        .await
        .expect("list request failed");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("invalid body");
    let ids: Vec<&str> = body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|p| p["id"].as_str().expect("missing id"))
        .collect();

    assert_eq!(ids, vec![third.as_str(), second.as_str(), first.as_str()]);

    // A new post moves to the front.
    let fourth = app.create_post_id(&token, "fourth", "four").await;
    let response = app
        .client
        .get(format!("{}/posts", app.address))
        .send()
        .await
        .expect("list request failed");
    let body: serde_json::Value = response.json().await.expect("invalid body");
    assert_eq!(body["data"][0]["id"], fourth.as_str());
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get_post("no-such-id").await;
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.expect("invalid body");
    assert_eq!(body["success"], false);
}

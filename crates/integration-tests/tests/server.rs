//! Server-level behaviour: the `/test` route, CORS, body formats.
//!
//! Requires `PostgreSQL` via `DATABASE_URL`.

use reqwest::StatusCode;
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN};
use serde_json::{Value, json};

use resto_integration_tests::{TestContext, unique_name};

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_server_is_running() {
    let ctx = TestContext::start().await;
    let (status, body) = ctx.get("/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Server is running!" }));

    let (status, _) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_cors_preflight_over_http() {
    let ctx = TestContext::start().await;

    let allowed = ctx
        .client
        .request(reqwest::Method::OPTIONS, ctx.url("/api/orders"))
        .header(ORIGIN, "https://uas-api-web2.vercel.app")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .send()
        .await
        .expect("request");
    assert_eq!(
        allowed.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://uas-api-web2.vercel.app"
    );

    let rejected = ctx
        .client
        .request(reqwest::Method::OPTIONS, ctx.url("/api/orders"))
        .header(ORIGIN, "https://somewhere-else.example")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .send()
        .await
        .expect("request");
    assert!(rejected.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_form_encoded_create() {
    let ctx = TestContext::start().await;
    let name = unique_name("Minuman");

    let resp = ctx
        .client
        .post(ctx.url("/api/kategori"))
        .form(&[("name", name.as_str()), ("description", "Es dan panas")])
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = resp.json().await.expect("json");
    assert_eq!(category["name"], name.as_str());
    assert_eq!(category["description"], "Es dan panas");
}

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use order_api::{app, store::OrderStore};

/// Build a fresh in-process app over an in-memory store. No network I/O;
/// tests drive the router directly via oneshot.
pub async fn make_app() -> Router {
    let store = OrderStore::in_memory().await.expect("in-memory store");
    app(store)
}

/// Drive the app with a single request, returning status and parsed body.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("oneshot");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is not valid JSON")
    };

    (status, value)
}

/// Log in with the default credential pair and return a usable token.
#[allow(dead_code)]
pub async fn login_token(app: &Router) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "usuario": "admin", "senha": "123456" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    assert_eq!(body["auth"], json!(true));
    body["token"].as_str().expect("token").to_string()
}

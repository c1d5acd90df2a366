use super::*;
use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("none")
        .to_string()
}

#[tokio::test]
async fn success_resolves_with_full_body() {
    let app = Router::new().route("/strings/state", get(|| async { "\"hello\"" }));
    let base = spawn_server(app).await;

    let body = HttpTransport::new()
        .send(ApiRequest::get(format!("{base}/strings/state")))
        .await
        .expect("success");
    assert_eq!(body, "\"hello\"");
}

#[tokio::test]
async fn empty_body_is_success_not_failure() {
    let app = Router::new()
        .route("/empty", get(|| async { "" }))
        .route("/no-content", get(|| async { StatusCode::NO_CONTENT }));
    let base = spawn_server(app).await;
    let transport = HttpTransport::new();

    let body = transport
        .send(ApiRequest::get(format!("{base}/empty")))
        .await
        .expect("success");
    assert_eq!(body, "");

    let body = transport
        .send(ApiRequest::get(format!("{base}/no-content")))
        .await
        .expect("success");
    assert_eq!(body, "");
}

#[tokio::test]
async fn error_status_is_failure_and_body_is_discarded() {
    let app = Router::new().route(
        "/crash",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace") }),
    );
    let base = spawn_server(app).await;

    let err = HttpTransport::new()
        .send(ApiRequest::get(format!("{base}/crash")))
        .await
        .expect_err("must fail");
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(!err.to_string().contains("stack trace"));
}

#[tokio::test]
async fn not_found_is_failure() {
    let base = spawn_server(Router::new()).await;

    let err = HttpTransport::new()
        .send(ApiRequest::get(format!("{base}/strings/missing")))
        .await
        .expect_err("must fail");
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn connection_refused_is_network_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = HttpTransport::new()
        .send(ApiRequest::get(format!("http://{addr}/strings/state")))
        .await
        .expect_err("must fail");
    assert!(matches!(err, TransportError::Network { .. }), "{err}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn put_sends_json_content_type_and_body() {
    let app = Router::new().route(
        "/strings/state",
        put(|headers: HeaderMap, body: String| async move {
            format!("{}|{body}", content_type(&headers))
        }),
    );
    let base = spawn_server(app).await;

    let echoed = HttpTransport::new()
        .send(ApiRequest::put_json(
            format!("{base}/strings/state"),
            "\"abc\"",
        ))
        .await
        .expect("success");
    assert_eq!(echoed, "application/json|\"abc\"");
}

#[tokio::test]
async fn get_sends_no_content_type() {
    let app = Router::new().route(
        "/strings/state",
        get(|headers: HeaderMap| async move { content_type(&headers) }),
    );
    let base = spawn_server(app).await;

    let echoed = HttpTransport::new()
        .send(ApiRequest::get(format!("{base}/strings/state")))
        .await
        .expect("success");
    assert_eq!(echoed, "none");
}

#[test]
fn content_type_follows_body_presence() {
    assert_eq!(ApiRequest::get("http://x/strings/state").content_type(), None);
    assert_eq!(
        ApiRequest::put_json("http://x/strings/state", "\"a\"").content_type(),
        Some("application/json")
    );
}

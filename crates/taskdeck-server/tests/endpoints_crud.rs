// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use taskdeck_server::{build_router, AppState};
use taskdeck_store::SqliteTaskStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn spawn_app() -> SocketAddr {
    let store = SqliteTaskStore::open_in_memory().expect("open in-memory store");
    let app = build_router(AppState::new(Arc::new(store)));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    addr
}

async fn send_raw(addr: SocketAddr, request: String) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("connect server");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    response
}

async fn request(addr: SocketAddr, method: &str, path: &str, body: Option<&str>) -> (u16, Value) {
    let raw = match body {
        Some(b) => format!(
            "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{b}",
            b.len()
        ),
        None => format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    };
    let response = send_raw(addr, raw).await;
    let status = response
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status line");
    let body = response
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.trim())
        .unwrap_or_default();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).expect("json body")
    };
    (status, json)
}

#[tokio::test]
async fn integration_full_crud_flow() {
    let addr = spawn_app().await;

    let (status, created) = request(
        addr,
        "POST",
        "/tasks",
        Some(r#"{"title": "  Buy milk  ", "description": "2 liters"}"#),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["description"], "2 liters");
    assert_eq!(created["completed"], false);
    assert_eq!(created["createdAt"], created["updatedAt"]);
    let id = created["id"].as_i64().expect("generated id");
    assert!(id > 0);

    let (status, listed) = request(addr, "GET", "/tasks", None).await;
    assert_eq!(status, 200);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["tasks"][0]["id"], id);

    let (status, fetched) = request(addr, "GET", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);

    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, updated) = request(
        addr,
        "PUT",
        &format!("/tasks/{id}"),
        Some(r#"{"completed": true}"#),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "Buy milk");
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    let created_at = chrono::DateTime::parse_from_rfc3339(
        updated["createdAt"].as_str().expect("createdAt"),
    )
    .expect("parse createdAt");
    let updated_at = chrono::DateTime::parse_from_rfc3339(
        updated["updatedAt"].as_str().expect("updatedAt"),
    )
    .expect("parse updatedAt");
    assert!(updated_at > created_at, "updatedAt must advance on update");

    let (status, body) = request(addr, "DELETE", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, 204);
    assert_eq!(body, Value::Null);

    let (status, missing) = request(addr, "GET", &format!("/tasks/{id}"), None).await;
    assert_eq!(status, 404);
    assert_eq!(missing["error"], "NotFoundError");
}

#[tokio::test]
async fn integration_validation_failures_share_one_error_shape() {
    let addr = spawn_app().await;

    let (status, body) = request(addr, "POST", "/tasks", Some("{}")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["details"][0]["field"], "title");

    let (status, body) = request(addr, "POST", "/tasks", Some("not json")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "ValidationError");

    let (status, body) = request(
        addr,
        "POST",
        "/tasks",
        Some(r#"{"title": "x", "completed": "yes"}"#),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["details"][0]["field"], "completed");

    for bad_id in ["12.5", "-1", "0", "abc"] {
        let (status, body) = request(addr, "GET", &format!("/tasks/{bad_id}"), None).await;
        assert_eq!(status, 400, "id {bad_id:?} must reject");
        assert_eq!(body["error"], "ValidationError");
        assert_eq!(body["details"][0]["field"], "id");
    }

    let (status, body) = request(addr, "PUT", "/tasks/7", Some("{}")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn integration_absent_ids_resolve_to_404_not_500() {
    let addr = spawn_app().await;

    let (status, body) = request(addr, "GET", "/tasks/999999", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NotFoundError");

    let (status, _) = request(
        addr,
        "PUT",
        "/tasks/999999",
        Some(r#"{"completed": true}"#),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = request(addr, "DELETE", "/tasks/999999", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn integration_request_id_is_echoed_and_propagated() {
    let addr = spawn_app().await;

    let response = send_raw(
        addr,
        format!("GET /healthz HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    let headers = response.to_ascii_lowercase();
    assert!(headers.contains("x-request-id: req-"));

    let response = send_raw(
        addr,
        format!(
            "GET /healthz HTTP/1.1\r\nHost: {addr}\r\nx-request-id: trace-42\r\nConnection: close\r\n\r\n"
        ),
    )
    .await;
    assert!(response.to_ascii_lowercase().contains("x-request-id: trace-42"));
}

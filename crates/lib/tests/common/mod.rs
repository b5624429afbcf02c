//! Fake Bot API for integration tests: an axum server on a free local port that records every
//! call and serves queued getUpdates batches.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tgbot::{Api, ApiOptions};

pub const BOT_ID: i64 = 1;
pub const TOKEN: &str = "test-token";

/// One recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub content_type: String,
    /// Parsed JSON body, or the raw body as a string when it is not JSON.
    pub body: Value,
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    batches: VecDeque<Value>,
    reject_token: bool,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
    pub base: String,
}

pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

impl FakeApi {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake api");
        let addr = listener.local_addr().expect("local_addr");
        let fake = FakeApi {
            inner: Arc::default(),
            base: format!("http://{}", addr),
        };
        let app = Router::new().fallback(handle).with_state(fake.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        fake
    }

    pub fn api(&self) -> Api {
        Api::new(
            BOT_ID,
            TOKEN,
            ApiOptions {
                client: None,
                base_url: Some(self.base.clone()),
            },
        )
    }

    /// Queue one getUpdates result array.
    pub fn push_batch(&self, updates: Value) {
        self.inner.lock().unwrap().batches.push_back(updates);
    }

    /// Make getMe fail with 401 like a revoked token.
    pub fn reject_token(&self) {
        self.inner.lock().unwrap().reject_token = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .collect()
    }

    /// Wait up to 5s for `check` to hold over the recorded calls.
    pub async fn wait_for(&self, what: &str, check: impl Fn(&[Call]) -> bool) {
        for _ in 0..100 {
            if check(&self.calls()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("timed out waiting for {}; calls: {:#?}", what, self.calls());
    }
}

/// A private-chat text update.
pub fn text_update(update_id: i64, text: &str) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id * 10,
            "date": 1_600_000_000,
            "chat": { "id": 77, "type": "private" },
            "from": { "id": 77, "is_bot": false, "first_name": "Ann" },
            "text": text
        }
    })
}

fn ok(result: Value) -> Response {
    Json(json!({ "ok": true, "result": result })).into_response()
}

fn fail(status: StatusCode, description: &str) -> Response {
    (
        status,
        Json(json!({ "ok": false, "error_code": status.as_u16(), "description": description })),
    )
        .into_response()
}

async fn handle(State(fake): State<FakeApi>, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path().to_string();
    let file_prefix = format!("/file/bot{}:{}/", BOT_ID, TOKEN);
    if let Some(file) = path.strip_prefix(&file_prefix) {
        return match file {
            "photos/a.jpg" => (StatusCode::OK, "JPEGDATA").into_response(),
            _ => fail(StatusCode::NOT_FOUND, "Not Found"),
        };
    }
    let method_prefix = format!("/bot{}:{}/", BOT_ID, TOKEN);
    let Some(method) = path.strip_prefix(&method_prefix) else {
        return fail(StatusCode::NOT_FOUND, "Not Found");
    };
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let parsed = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    let reject = {
        let mut inner = fake.inner.lock().unwrap();
        inner.calls.push(Call {
            method: method.to_string(),
            content_type,
            body: parsed.clone(),
        });
        inner.reject_token
    };

    match method {
        "getMe" if reject => fail(StatusCode::UNAUTHORIZED, "Unauthorized"),
        "getMe" => ok(json!({
            "id": BOT_ID, "is_bot": true, "first_name": "Fake", "username": "fake_bot"
        })),
        "getUpdates" => {
            let next = fake.inner.lock().unwrap().batches.pop_front();
            match next {
                Some(batch) => ok(batch),
                None => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    ok(json!([]))
                }
            }
        }
        "sendMediaGroup" => ok(json!([])),
        "getChat" => fail(StatusCode::BAD_REQUEST, "Bad Request: chat not found"),
        "sendMessage" | "sendPhoto" => {
            let chat_id = parsed.get("chat_id").and_then(Value::as_i64).unwrap_or(77);
            ok(json!({
                "message_id": 999,
                "date": 1_600_000_000,
                "chat": { "id": chat_id, "type": "private" },
                "text": parsed.get("text").cloned().unwrap_or(Value::Null)
            }))
        }
        _ => ok(json!(true)),
    }
}

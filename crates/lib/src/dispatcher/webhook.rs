//! Webhook ingestion: a single-endpoint HTTP server fed by the Bot API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::sync::watch;

use super::dispatch::{dispatch_update, Shared};
use super::error::BotError;
use crate::types::Update;

pub(crate) const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Where the local server listens and what it accepts.
#[derive(Debug, Clone)]
pub(crate) struct WebhookEngine {
    /// Request path taken from the public webhook URL.
    pub path: String,
    pub listen: String,
    pub secret: Option<String>,
}

#[derive(Clone)]
struct WebhookState {
    engine: Arc<WebhookEngine>,
    shared: Arc<Shared>,
}

fn router(engine: WebhookEngine, shared: Arc<Shared>) -> Router {
    // Fallback instead of a route: the path comes from a user URL and may hold characters the
    // router treats as captures.
    Router::new().fallback(receive).with_state(WebhookState {
        engine: Arc::new(engine),
        shared,
    })
}

/// Serve until `shutdown` flips to true. Bind failures are returned at once.
pub(crate) async fn serve(
    engine: WebhookEngine,
    shared: Arc<Shared>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), BotError> {
    let listener = tokio::net::TcpListener::bind(&engine.listen)
        .await
        .map_err(BotError::Webhook)?;
    log::info!(
        "webhook: listening on {} at {}",
        engine.listen,
        engine.path
    );
    let app = router(engine, shared);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
        })
        .await
        .map_err(BotError::Webhook)?;
    log::info!("webhook: stopped");
    Ok(())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Validate one delivery and dispatch it. Rejections never reach the handlers.
async fn receive(
    State(state): State<WebhookState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let engine = &state.engine;
    if uri.path() != engine.path {
        return StatusCode::NOT_FOUND;
    }
    if method != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED;
    }
    if let Some(ref expected) = engine.secret {
        let provided = headers
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if provided != expected.as_str() {
            log::warn!("webhook: rejected delivery with a bad secret token");
            return StatusCode::FORBIDDEN;
        }
    }
    if !is_json(&headers) {
        return StatusCode::BAD_REQUEST;
    }
    let update: Update = match serde_json::from_slice(&body) {
        Ok(u) => u,
        Err(e) => {
            log::debug!("webhook: malformed update: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };
    if update.update_id == 0 {
        return StatusCode::BAD_REQUEST;
    }
    dispatch_update(&state.shared, update);
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Api, ApiOptions};
    use crate::dispatcher::handler::HandlerRegistry;
    use tokio::sync::mpsc;

    fn state(secret: Option<&str>) -> WebhookState {
        let (errors, _rx) = mpsc::unbounded_channel();
        WebhookState {
            engine: Arc::new(WebhookEngine {
                path: "/hook".into(),
                listen: "127.0.0.1:0".into(),
                secret: secret.map(str::to_string),
            }),
            shared: Arc::new(Shared {
                api: Api::new(1, "t", ApiOptions::default()),
                registry: HandlerRegistry::default(),
                errors,
            }),
        }
    }

    fn json_headers() -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        h
    }

    async fn post(state: WebhookState, path: &str, headers: HeaderMap, body: &str) -> StatusCode {
        receive(
            State(state),
            Method::POST,
            path.parse().unwrap(),
            headers,
            Bytes::from(body.to_string()),
        )
        .await
    }

    #[tokio::test]
    async fn accepts_a_well_formed_update() {
        let code = post(state(None), "/hook", json_headers(), r#"{"update_id":123}"#).await;
        assert_eq!(code, StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_zero_update_id_and_bad_json() {
        let code = post(state(None), "/hook", json_headers(), r#"{"update_id":0}"#).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        let code = post(state(None), "/hook", json_headers(), "not json").await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_non_json_content_type() {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        let code = post(state(None), "/hook", h, r#"{"update_id":1}"#).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        let code = post(state(None), "/hook", HeaderMap::new(), r#"{"update_id":1}"#).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_other_methods_and_paths() {
        let code = receive(
            State(state(None)),
            Method::GET,
            "/hook".parse().unwrap(),
            json_headers(),
            Bytes::new(),
        )
        .await;
        assert_eq!(code, StatusCode::METHOD_NOT_ALLOWED);
        let code = post(state(None), "/other", json_headers(), r#"{"update_id":1}"#).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn enforces_the_secret_token() {
        let code = post(state(Some("s3")), "/hook", json_headers(), r#"{"update_id":1}"#).await;
        assert_eq!(code, StatusCode::FORBIDDEN);

        let mut h = json_headers();
        h.insert(SECRET_HEADER, "s3".parse().unwrap());
        let code = post(state(Some("s3")), "/hook", h, r#"{"update_id":1}"#).await;
        assert_eq!(code, StatusCode::OK);
    }
}

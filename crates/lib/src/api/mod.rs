//! Bot API client.
//!
//! [`Api`] holds the bot credentials and one shared `reqwest::Client`. It is cheap to clone and
//! safe to share across tasks; nothing in it changes after construction. Methods are grouped by
//! area in the submodules and all return `Result<_, ApiError>`.

mod chat;
mod editing;
pub mod error;
mod games;
mod inline;
mod messages;
pub mod params;
mod passport;
mod payments;
mod response;
mod updates;

use std::path::Path;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

pub use chat::{AnswerCallbackQueryOptions, PromoteChatMemberOptions};
pub use editing::{EditTextOptions, EditedMessage};
pub use error::ApiError;
pub use games::SetGameScoreOptions;
pub use inline::{AnswerInlineQueryOptions, MAX_INLINE_RESULTS};
pub use messages::{
    ChatAction, CopyMessageOptions, MessageId, SendContactOptions, SendLocationOptions,
    SendPollOptions, SendVenueOptions,
};
pub use params::{
    ChatId, MessageTarget, ReplyMarkup, SendMediaOptions, SendMessageOptions, SendOptions,
};
pub use payments::{InvoiceParams, SendInvoiceOptions};
pub use updates::{GetUpdates, SetWebhookOptions};

use crate::types::InputFile;

/// Default Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Optional construction parameters for [`Api`].
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    /// HTTP client to use instead of a fresh `reqwest::Client`.
    pub client: Option<reqwest::Client>,
    /// API host (default [`DEFAULT_API_BASE`]). Used for both method calls and file downloads.
    pub base_url: Option<String>,
}

/// Bot API handle.
#[derive(Clone)]
pub struct Api {
    id: i64,
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("id", &self.id)
            .field("token", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// A file part of a multipart request.
struct UploadPart<'a> {
    name: String,
    file: &'a InputFile,
}

impl Api {
    /// `id` is the numeric part of the BotFather token (`<id>:<token>`), `token` the secret part.
    pub fn new(id: i64, token: impl Into<String>, options: ApiOptions) -> Self {
        let base_url = options
            .base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            id,
            token: token.into(),
            base_url,
            client: options.client.unwrap_or_default(),
        }
    }

    /// Split a full BotFather token (`123456:ABC-DEF`) into id and secret.
    pub fn from_token(full_token: &str, options: ApiOptions) -> Result<Self, ApiError> {
        let (id, token) = full_token
            .trim()
            .split_once(':')
            .ok_or_else(|| ApiError::InvalidInput("bot token must look like <id>:<secret>".into()))?;
        let id = id
            .parse::<i64>()
            .map_err(|_| ApiError::InvalidInput(format!("bot id {:?} is not a number", id)))?;
        Ok(Self::new(id, token, options))
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}:{}/{}", self.base_url, self.id, self.token, method)
    }

    /// Download URL of a file path returned by getFile.
    pub fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}:{}/{}",
            self.base_url,
            self.id,
            self.token,
            file_path.trim_start_matches('/')
        )
    }

    /// GET a file by its getFile path. Any status other than 200 is an error.
    pub async fn download_file(&self, file_path: &str) -> Result<reqwest::Response, ApiError> {
        let res = self.client.get(self.file_url(file_path)).send().await?;
        if res.status() != reqwest::StatusCode::OK {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(res)
    }

    /// Download a file fully into memory.
    pub async fn download_bytes(&self, file_path: &str) -> Result<Vec<u8>, ApiError> {
        let res = self.download_file(file_path).await?;
        Ok(res.bytes().await?.to_vec())
    }

    /// Stream a file to `dest`, returning the number of bytes written.
    pub async fn download_to(&self, file_path: &str, dest: impl AsRef<Path>) -> anyhow::Result<u64> {
        let res = self.download_file(file_path).await?;
        let mut out = tokio::fs::File::create(dest.as_ref()).await?;
        let mut stream = res.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        out.flush().await?;
        Ok(written)
    }

    async fn decode<T: DeserializeOwned>(
        method: &str,
        res: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = res.status().as_u16();
        let body = res.bytes().await?;
        let result = response::decode(status, &body);
        if let Err(ref e) = result {
            log::debug!("telegram api: {} failed: {}", method, e);
        }
        result
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, method: &str) -> Result<T, ApiError> {
        log::trace!("telegram api: GET {}", method);
        let res = self.client.get(self.method_url(method)).send().await?;
        Self::decode(method, res).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &Value,
    ) -> Result<T, ApiError> {
        log::trace!("telegram api: POST {}", method);
        let res = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        Self::decode(method, res).await
    }

    /// POST `body`, switching to multipart when one of `fields` holds an upload. `fields` names
    /// body fields whose value is a file. `attached` are the uploads referenced from
    /// `body["media"]`, in the order they appear there; each becomes part `file<i>`.
    pub(crate) async fn post_files<T: DeserializeOwned>(
        &self,
        method: &str,
        mut body: Value,
        fields: &[(&str, &InputFile)],
        attached: &[&InputFile],
    ) -> Result<T, ApiError> {
        let mut parts = Vec::new();
        for &(name, file) in fields {
            if file.is_upload() {
                if let Value::Object(map) = &mut body {
                    map.remove(name);
                }
                parts.push(UploadPart {
                    name: name.to_string(),
                    file,
                });
            } else {
                body[name] = Value::String(file.as_reference());
            }
        }
        if !attached.is_empty() {
            if let Some(media) = body.get_mut("media") {
                let mut next = 0;
                number_attachments(media, &mut next);
            }
            let uploads = attached.iter().filter(|f| f.is_upload());
            for (i, &file) in uploads.enumerate() {
                parts.push(UploadPart {
                    name: attachment_name(i),
                    file,
                });
            }
        }
        if parts.is_empty() {
            return self.post(method, &body).await;
        }

        log::trace!("telegram api: POST multipart {}", method);
        let form = multipart_form(&body, &parts)?;
        let res = self
            .client
            .post(self.method_url(method))
            .multipart(form)
            .send()
            .await?;
        Self::decode(method, res).await
    }
}

fn attachment_name(index: usize) -> String {
    format!("file{}", index)
}

/// Rewrite each `attach://` reference in media items to its indexed part name, in document
/// order (item by item, `media` before `thumb`).
fn number_attachments(value: &mut Value, next: &mut usize) {
    match value {
        Value::Array(items) => {
            for item in items {
                number_attachments(item, next);
            }
        }
        Value::Object(map) => {
            for key in ["media", "thumb"] {
                if let Some(Value::String(reference)) = map.get_mut(key) {
                    if reference.starts_with("attach://") {
                        *reference = format!("attach://{}", attachment_name(*next));
                        *next += 1;
                    }
                }
            }
        }
        _ => {}
    }
}

/// Text fields carry strings verbatim and every other JSON value encoded as JSON.
fn multipart_form(body: &Value, parts: &[UploadPart<'_>]) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    if let Value::Object(map) = body {
        for (k, v) in map {
            let text = match v {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => serde_json::to_string(other)?,
            };
            form = form.text(k.clone(), text);
        }
    }
    for part in parts {
        if let InputFile::Upload { file_name, data } = part.file {
            let p = reqwest::multipart::Part::bytes(data.clone()).file_name(file_name.clone());
            form = form.part(part.name.clone(), p);
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_embed_id_and_token() {
        let api = Api::new(
            42,
            "secret",
            ApiOptions {
                base_url: Some("http://127.0.0.1:9/".into()),
                ..Default::default()
            },
        );
        assert_eq!(api.method_url("getMe"), "http://127.0.0.1:9/bot42:secret/getMe");
        assert_eq!(
            api.file_url("photos/file_1.jpg"),
            "http://127.0.0.1:9/file/bot42:secret/photos/file_1.jpg"
        );
    }

    #[test]
    fn default_base_is_telegram() {
        let api = Api::new(1, "t", ApiOptions::default());
        assert_eq!(api.base_url(), DEFAULT_API_BASE);
        assert_eq!(api.file_url("a"), "https://api.telegram.org/file/bot1:t/a");
    }

    #[test]
    fn debug_masks_token() {
        let api = Api::new(7, "very-secret", ApiOptions::default());
        let s = format!("{:?}", api);
        assert!(s.contains("***"));
        assert!(!s.contains("very-secret"));
    }

    #[test]
    fn from_token_splits_id() {
        let api = Api::from_token("123:ABC-def", ApiOptions::default()).unwrap();
        assert_eq!(api.id(), 123);
        assert!(api.method_url("x").ends_with("/bot123:ABC-def/x"));
        assert!(matches!(
            Api::from_token("nocolon", ApiOptions::default()),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn attachments_are_numbered_in_document_order() {
        let mut media = serde_json::json!([
            { "type": "video", "media": "attach://same.mp4", "thumb": "attach://t.jpg", "caption": "attach://x" },
            { "type": "photo", "media": "AgADfileid" },
            { "type": "photo", "media": "attach://same.mp4" }
        ]);
        let mut next = 0;
        number_attachments(&mut media, &mut next);
        assert_eq!(next, 3);
        assert_eq!(media[0]["media"], "attach://file0");
        assert_eq!(media[0]["thumb"], "attach://file1");
        assert_eq!(media[0]["caption"], "attach://x");
        assert_eq!(media[1]["media"], "AgADfileid");
        assert_eq!(media[2]["media"], "attach://file2");
    }
}

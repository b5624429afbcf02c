//! Integration tests: Api requests and envelopes over HTTP against the fake Bot API.

mod common;

use common::FakeApi;
use serde_json::json;
use tgbot::api::{ChatAction, SendMediaOptions};
use tgbot::types::{InputFile, InputMedia, InputMediaPhoto};
use tgbot::ApiError;

#[tokio::test]
async fn get_me_decodes_the_envelope() {
    let fake = FakeApi::start().await;
    let me = fake.api().get_me().await.unwrap();
    assert!(me.is_bot);
    assert_eq!(me.username.as_deref(), Some("fake_bot"));
}

#[tokio::test]
async fn api_error_carries_code_and_description() {
    let fake = FakeApi::start().await;
    let err = fake.api().get_chat(-100).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { .. }));
    assert_eq!(err.code(), Some(400));
    assert_eq!(err.to_string(), "Bad Request: chat not found");
    assert_eq!(fake.calls_to("getChat")[0].body, json!({ "chat_id": -100 }));
}

#[tokio::test]
async fn username_chat_ids_are_sent_as_strings() {
    let fake = FakeApi::start().await;
    fake.api()
        .send_chat_action("@channel", ChatAction::Typing)
        .await
        .unwrap();
    assert_eq!(
        fake.calls_to("sendChatAction")[0].body,
        json!({ "chat_id": "@channel", "action": "typing" })
    );
}

#[tokio::test]
async fn file_ids_go_out_as_json() {
    let fake = FakeApi::start().await;
    fake.api()
        .send_photo(5, &InputFile::file_id("AgADBAAD"), &SendMediaOptions::caption("hi"))
        .await
        .unwrap();
    let call = &fake.calls_to("sendPhoto")[0];
    assert!(call.content_type.starts_with("application/json"));
    assert_eq!(
        call.body,
        json!({ "chat_id": 5, "photo": "AgADBAAD", "caption": "hi" })
    );
}

#[tokio::test]
async fn uploads_go_out_as_multipart() {
    let fake = FakeApi::start().await;
    let photo = InputFile::upload("cat.jpg", b"\xFF\xD8catbytes".to_vec());
    let sent = fake
        .api()
        .send_photo(5, &photo, &SendMediaOptions::caption("a cat"))
        .await
        .unwrap();
    assert_eq!(sent.chat.id, 77);

    let call = &fake.calls_to("sendPhoto")[0];
    assert!(call.content_type.starts_with("multipart/form-data"));
    let raw = call.body.as_str().expect("multipart body is not JSON");
    assert!(raw.contains(r#"name="photo"; filename="cat.jpg""#));
    assert!(raw.contains(r#"name="caption""#));
    assert!(raw.contains("a cat"));
    assert!(raw.contains(r#"name="chat_id""#));
}

#[tokio::test]
async fn media_group_uploads_sharing_a_name_get_distinct_parts() {
    let fake = FakeApi::start().await;
    let media = vec![
        InputMedia::Photo(InputMediaPhoto::new(InputFile::upload("same.jpg", b"first".to_vec()))),
        InputMedia::Photo(InputMediaPhoto::new(InputFile::file_id("AgADkept"))),
        InputMedia::Photo(InputMediaPhoto::new(InputFile::upload("same.jpg", b"second".to_vec()))),
    ];
    fake.api()
        .send_media_group(5, &media, &Default::default())
        .await
        .unwrap();

    let call = &fake.calls_to("sendMediaGroup")[0];
    assert!(call.content_type.starts_with("multipart/form-data"));
    let raw = call.body.as_str().expect("multipart body is not JSON");
    assert!(raw.contains(r#"name="file0"; filename="same.jpg""#));
    assert!(raw.contains(r#"name="file1"; filename="same.jpg""#));
    assert!(raw.contains(r#""media":"attach://file0""#));
    assert!(raw.contains(r#""media":"AgADkept""#));
    assert!(raw.contains(r#""media":"attach://file1""#));
    let first = raw.find("first").expect("first upload missing");
    let second = raw.find("second").expect("second upload missing");
    assert!(first < second);
}

#[tokio::test]
async fn downloads_use_the_file_endpoint() {
    let fake = FakeApi::start().await;
    let api = fake.api();
    assert_eq!(
        api.file_url("photos/a.jpg"),
        format!("{}/file/bot1:test-token/photos/a.jpg", fake.base)
    );
    let bytes = api.download_bytes("photos/a.jpg").await.unwrap();
    assert_eq!(bytes, b"JPEGDATA");

    let err = api.download_bytes("photos/missing.jpg").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn download_to_writes_the_file() {
    let fake = FakeApi::start().await;
    let dest = std::env::temp_dir().join(format!("tgbot-dl-{}.jpg", uuid::Uuid::new_v4()));
    let written = fake.api().download_to("photos/a.jpg", &dest).await.unwrap();
    assert_eq!(written, 8);
    assert_eq!(std::fs::read(&dest).unwrap(), b"JPEGDATA");
    let _ = std::fs::remove_file(&dest);
}

#[tokio::test]
async fn inline_answers_are_validated_before_sending() {
    let fake = FakeApi::start().await;
    let results: Vec<tgbot::types::InlineQueryResult> = (0..51)
        .map(|i| tgbot::types::InlineQueryResultArticle::text(i.to_string(), "t", "x").into())
        .collect();
    let err = fake
        .api()
        .answer_inline_query("q", &results, &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(fake.calls_to("answerInlineQuery").is_empty());
}

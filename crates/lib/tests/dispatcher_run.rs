//! Integration tests: drive a real Dispatcher against the fake Bot API over HTTP.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{free_port, text_update, FakeApi};
use serde_json::json;
use tgbot::api::SetWebhookOptions;
use tgbot::types::{InlineQueryResult, InlineQueryResultArticle};
use tgbot::{BotError, Context, Dispatcher, InlineQueryContext, RunPhase, TextContext};
use tokio::sync::mpsc;

async fn finish(
    run: tokio::task::JoinHandle<Result<(), BotError>>,
) -> Result<(), BotError> {
    tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("run did not finish within 5s")
        .expect("run task panicked")
}

#[tokio::test]
async fn polling_dispatches_whole_batch_and_advances_offset() {
    let fake = FakeApi::start().await;
    fake.push_batch(json!([
        text_update(5, "five"),
        text_update(6, "six"),
        text_update(7, "seven")
    ]));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    {
        let seen = Arc::clone(&seen);
        bot.set_text_processor(move |ctx: TextContext| {
            let seen = Arc::clone(&seen);
            async move {
                seen.lock().unwrap().push(ctx.text.clone());
                Ok(())
            }
        });
    }
    let handle = bot.shutdown_handle();
    let run = tokio::spawn(bot.run());

    fake.wait_for("getUpdates with offset 8", |calls| {
        calls
            .iter()
            .any(|c| c.method == "getUpdates" && c.body["offset"] == json!(8))
    })
    .await;
    let first = &fake.calls_to("getUpdates")[0];
    assert_eq!(first.body["offset"], json!(0));
    assert_eq!(first.body["limit"], json!(1));

    for _ in 0..100 {
        if seen.lock().unwrap().len() == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    let mut texts = seen.lock().unwrap().clone();
    texts.sort();
    assert_eq!(texts, vec!["five", "seven", "six"]);

    assert_eq!(handle.phase(), RunPhase::Running);
    handle.shutdown();
    finish(run).await.unwrap();
    assert_eq!(handle.phase(), RunPhase::Terminated);
}

#[tokio::test]
async fn polling_mode_deletes_the_webhook_before_polling() {
    let fake = FakeApi::start().await;
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    bot.add_active_processor(|_api| async { Ok(()) });

    finish(tokio::spawn(bot.run())).await.unwrap();
    let methods: Vec<String> = fake.calls().into_iter().map(|c| c.method).collect();
    assert_eq!(&methods[..2], &["getMe".to_string(), "deleteWebhook".to_string()]);
}

#[tokio::test]
async fn handler_error_ends_the_run() {
    let fake = FakeApi::start().await;
    fake.push_batch(json!([text_update(1, "hi")]));
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    bot.set_text_processor(|_ctx: TextContext| async { Err(anyhow::anyhow!("cannot reply")) });

    let err = finish(tokio::spawn(bot.run())).await.unwrap_err();
    assert!(matches!(err, BotError::Handler { .. }));
    assert_eq!(err.to_string(), "text handler: cannot reply");
}

#[tokio::test]
async fn handler_error_ends_the_run_while_a_processor_is_still_running() {
    let fake = FakeApi::start().await;
    fake.push_batch(json!([text_update(1, "hi")]));
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    bot.add_active_processor(|_api| async {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    });
    bot.set_text_processor(|_ctx: TextContext| async { Err(anyhow::anyhow!("cannot reply")) });

    let started = std::time::Instant::now();
    let err = finish(tokio::spawn(bot.run())).await.unwrap_err();
    assert!(matches!(err, BotError::Handler { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn handler_panic_ends_the_run() {
    let fake = FakeApi::start().await;
    fake.push_batch(json!([text_update(1, "hi")]));
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    bot.set_text_processor(|ctx: TextContext| async move {
        if ctx.text == "hi" {
            panic!("unexpected greeting");
        }
        Ok(())
    });

    let err = finish(tokio::spawn(bot.run())).await.unwrap_err();
    assert_eq!(err.to_string(), "text handler: panicked: unexpected greeting");
}

#[tokio::test]
async fn processor_error_names_its_position() {
    let fake = FakeApi::start().await;
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    bot.add_active_processor(|_api| async { Ok(()) });
    bot.add_active_processor(|_api| async { Err(anyhow::anyhow!("producer broke")) });

    let err = finish(tokio::spawn(bot.run())).await.unwrap_err();
    match err {
        BotError::Processor { index, ref error } => {
            assert_eq!(index, 2);
            assert_eq!(error.to_string(), "producer broke");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn processors_get_a_working_api() {
    let fake = FakeApi::start().await;
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    bot.add_active_processor(|api| async move {
        api.send_message(42, "tick", &Default::default()).await?;
        Ok(())
    });

    finish(tokio::spawn(bot.run())).await.unwrap();
    let sent = fake.calls_to("sendMessage");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, json!({ "chat_id": 42, "text": "tick" }));
}

#[tokio::test]
async fn failed_identity_check_aborts_startup() {
    let fake = FakeApi::start().await;
    fake.reject_token();
    let mut bot = Dispatcher::new(fake.api());
    bot.add_active_processor(|_api| async { Ok(()) });

    let err = finish(tokio::spawn(bot.run())).await.unwrap_err();
    assert!(matches!(err, BotError::ApiCheck(_)));
    assert_eq!(err.to_string(), "check api call failed: Unauthorized");
    assert!(fake.calls_to("getUpdates").is_empty());
}

#[tokio::test]
async fn empty_dispatcher_returns_at_once() {
    let fake = FakeApi::start().await;
    let bot = Dispatcher::new(fake.api());
    let handle = bot.shutdown_handle();

    finish(tokio::spawn(bot.run())).await.unwrap();
    assert_eq!(handle.phase(), RunPhase::Terminated);
    assert!(fake.calls_to("getUpdates").is_empty());
}

#[tokio::test]
async fn command_then_text_fall_through() {
    let fake = FakeApi::start().await;
    let mut update = text_update(3, "/start");
    update["message"]["entities"] = json!([{ "type": "bot_command", "offset": 0, "length": 6 }]);
    fake.push_batch(json!([update]));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    {
        let tx = tx.clone();
        bot.add_command_processor("/start", move |ctx: Context| {
            let tx = tx.clone();
            async move {
                ctx.send_text("welcome").await?;
                let _ = tx.send("command");
                Ok(())
            }
        });
    }
    bot.set_text_processor(move |_ctx: TextContext| {
        let tx = tx.clone();
        async move {
            let _ = tx.send("text");
            Ok(())
        }
    });
    let handle = bot.shutdown_handle();
    let run = tokio::spawn(bot.run());

    let mut got = Vec::new();
    for _ in 0..2 {
        let label = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("handler did not run")
            .expect("channel closed");
        got.push(label);
    }
    assert_eq!(got, vec!["command", "text"]);
    assert_eq!(
        fake.calls_to("sendMessage")[0].body,
        json!({ "chat_id": 77, "text": "welcome" })
    );

    handle.shutdown();
    finish(run).await.unwrap();
}

#[tokio::test]
async fn inline_queries_bypass_message_handlers() {
    let fake = FakeApi::start().await;
    fake.push_batch(json!([{
        "update_id": 9,
        "inline_query": {
            "id": "iq-1",
            "from": { "id": 77, "is_bot": false, "first_name": "Ann" },
            "query": "hello",
            "offset": ""
        }
    }]));

    let mut bot = Dispatcher::new(fake.api()).with_poll_timeout(0);
    bot.set_message_processor(|_ctx: Context| async { Err(anyhow::anyhow!("should not run")) });
    bot.set_inline_query_processor(|ctx: InlineQueryContext| async move {
        let results: Vec<InlineQueryResult> = vec![InlineQueryResultArticle::text(
            "a",
            "Echo",
            ctx.query.query.clone(),
        )
        .into()];
        ctx.answer(&results, &Default::default()).await?;
        Ok(())
    });
    let handle = bot.shutdown_handle();
    let run = tokio::spawn(bot.run());

    fake.wait_for("answerInlineQuery", |calls| {
        calls.iter().any(|c| c.method == "answerInlineQuery")
    })
    .await;
    let body = &fake.calls_to("answerInlineQuery")[0].body;
    assert_eq!(body["inline_query_id"], json!("iq-1"));
    assert_eq!(body["results"][0]["type"], json!("article"));
    assert_eq!(
        body["results"][0]["input_message_content"]["message_text"],
        json!("hello")
    );

    handle.shutdown();
    finish(run).await.unwrap();
}

async fn post_update(
    client: &reqwest::Client,
    url: &str,
    secret: Option<&str>,
    body: serde_json::Value,
) -> reqwest::Result<reqwest::StatusCode> {
    let mut req = client.post(url).json(&body);
    if let Some(s) = secret {
        req = req.header("X-Telegram-Bot-Api-Secret-Token", s);
    }
    Ok(req.send().await?.status())
}

#[tokio::test]
async fn webhook_mode_validates_and_dispatches() {
    let fake = FakeApi::start().await;
    let port = free_port();
    let listen = format!("127.0.0.1:{}", port);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut bot = Dispatcher::new(fake.api());
    bot.set_text_processor(move |ctx: TextContext| {
        let tx = tx.clone();
        async move {
            let _ = tx.send(ctx.text.clone());
            Ok(())
        }
    });
    let options = SetWebhookOptions {
        secret_token: Some("s3cret".into()),
        ..Default::default()
    };
    bot.set_webhook("https://bot.example.org/tg/hook", &listen, options)
        .await
        .unwrap();
    let set = &fake.calls_to("setWebhook")[0].body;
    assert_eq!(set["url"], json!("https://bot.example.org/tg/hook"));
    assert_eq!(set["secret_token"], json!("s3cret"));

    let handle = bot.shutdown_handle();
    let run = tokio::spawn(bot.run());

    let url = format!("http://{}/tg/hook", listen);
    let client = reqwest::Client::new();
    let mut status = None;
    for _ in 0..100 {
        if let Ok(s) = post_update(&client, &url, Some("s3cret"), text_update(123, "via hook")).await {
            status = Some(s);
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(status, Some(reqwest::StatusCode::OK));
    let text = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("handler did not run");
    assert_eq!(text.as_deref(), Some("via hook"));

    let zero = post_update(&client, &url, Some("s3cret"), text_update(0, "x")).await.unwrap();
    assert_eq!(zero, reqwest::StatusCode::BAD_REQUEST);
    let wrong = post_update(&client, &url, Some("nope"), text_update(124, "x")).await.unwrap();
    assert_eq!(wrong, reqwest::StatusCode::FORBIDDEN);
    let get = client.get(&url).send().await.unwrap().status();
    assert_eq!(get, reqwest::StatusCode::METHOD_NOT_ALLOWED);
    let plain = client
        .post(&url)
        .header("X-Telegram-Bot-Api-Secret-Token", "s3cret")
        .header("Content-Type", "text/plain")
        .body(text_update(125, "x").to_string())
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(plain, reqwest::StatusCode::BAD_REQUEST);

    assert!(fake.calls_to("deleteWebhook").is_empty());
    handle.shutdown();
    finish(run).await.unwrap();
    assert_eq!(handle.phase(), RunPhase::Terminated);
}

#[tokio::test]
async fn webhook_bind_failure_is_fatal() {
    let fake = FakeApi::start().await;
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let listen = taken.local_addr().unwrap().to_string();

    let mut bot = Dispatcher::new(fake.api());
    bot.set_message_processor(|_ctx: Context| async { Ok(()) });
    bot.set_webhook("https://bot.example.org/hook", &listen, Default::default())
        .await
        .unwrap();

    let err = finish(tokio::spawn(bot.run())).await.unwrap_err();
    assert!(matches!(err, BotError::Webhook(_)));
}

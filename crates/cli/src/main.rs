use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tgbot::api::{AnswerInlineQueryOptions, SendMediaOptions};
use tgbot::config::{load_config, resolve_webhook_secret, Config};
use tgbot::types::{InlineQueryResult, InlineQueryResultArticle, InputFile};
use tgbot::{Context, Dispatcher, FileContext, InlineQueryContext, PhotoContext, TextContext};

#[derive(Parser)]
#[command(name = "tgbot")]
#[command(about = "Telegram bot CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Print the bot's own user (getMe). Useful to check credentials.
    Me {
        /// Config file path (default: TGBOT_CONFIG_PATH or ~/.tgbot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print the current webhook status.
    WebhookInfo {
        /// Config file path (default: TGBOT_CONFIG_PATH or ~/.tgbot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Remove the webhook so the bot can be polled again.
    DeleteWebhook {
        /// Config file path (default: TGBOT_CONFIG_PATH or ~/.tgbot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Also drop updates waiting on the server.
        #[arg(long)]
        drop_pending: bool,
    },

    /// Run an echo bot. Uses the webhook when webhook.url is configured, long polling otherwise.
    Echo {
        /// Config file path (default: TGBOT_CONFIG_PATH or ~/.tgbot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("tgbot {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Me { config }) => {
            if let Err(e) = run_me(config).await {
                log::error!("me failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::WebhookInfo { config }) => {
            if let Err(e) = run_webhook_info(config).await {
                log::error!("webhook-info failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::DeleteWebhook {
            config,
            drop_pending,
        }) => {
            if let Err(e) = run_delete_webhook(config, drop_pending).await {
                log::error!("delete-webhook failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Echo { config }) => {
            if let Err(e) = run_echo(config).await {
                log::error!("echo failed: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn load(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    let (config, path) = load_config(config_path)?;
    log::debug!("loaded config from {}", path.display());
    config.validate()?;
    Ok(config)
}

async fn run_me(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let api = load(config_path)?.api()?;
    let me = api.get_me().await?;
    println!("{}", serde_json::to_string_pretty(&me)?);
    Ok(())
}

async fn run_webhook_info(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let api = load(config_path)?.api()?;
    let info = api.get_webhook_info().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

async fn run_delete_webhook(config_path: Option<PathBuf>, drop_pending: bool) -> anyhow::Result<()> {
    let api = load(config_path)?.api()?;
    api.delete_webhook(drop_pending).await?;
    println!("webhook deleted");
    Ok(())
}

async fn run_echo(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load(config_path)?;
    let mut bot = Dispatcher::new(config.api()?).with_poll_timeout(config.bot.poll_timeout);

    bot.add_command_processor("/start", |ctx: Context| async move {
        ctx.send_text("Send me text or a photo and I will send it back.")
            .await?;
        Ok(())
    });
    bot.set_default_command_processor(|ctx: Context| async move {
        let command = ctx.command().unwrap_or_default().to_string();
        ctx.reply(&format!("unknown command {}", command)).await?;
        Ok(())
    });
    bot.set_text_processor(|ctx: TextContext| async move {
        if !ctx.text.starts_with('/') {
            ctx.reply(&ctx.text).await?;
        }
        Ok(())
    });
    bot.set_photo_processor(|ctx: PhotoContext| async move {
        let Some(file_id) = ctx.file_id() else {
            return Ok(());
        };
        let options = SendMediaOptions {
            caption: ctx.caption.clone(),
            ..Default::default()
        };
        ctx.base
            .api
            .send_photo(ctx.base.chat.id, &InputFile::file_id(file_id), &options)
            .await?;
        Ok(())
    });
    bot.set_inline_query_processor(|ctx: InlineQueryContext| async move {
        let query = ctx.query.query.trim();
        if query.is_empty() {
            return Ok(());
        }
        let results: Vec<InlineQueryResult> =
            vec![InlineQueryResultArticle::text("echo", format!("Echo: {}", query), query).into()];
        let options = AnswerInlineQueryOptions {
            cache_time: Some(0),
            ..Default::default()
        };
        ctx.answer(&results, &options).await?;
        Ok(())
    });

    if let Some(url) = config.webhook.url.clone() {
        let secret = resolve_webhook_secret(&config);
        bot.set_webhook(&url, &config.webhook.listen, config.webhook_options(secret))
            .await?;
    }

    let handle = bot.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("interrupt received, stopping");
            handle.shutdown();
        }
    });

    println!("echo bot running, press Ctrl+C to stop");
    bot.run().await?;
    Ok(())
}

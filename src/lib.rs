#![warn(missing_docs)]
//! A Telegram bot for Islamic community groups.
//!
//! The bot answers religious content commands (Qur'an verses and tafsir,
//! hadith, daily prayers, Asmaul Husna), moderates group messages with a
//! language model, keeps per-group settings and warnings, posts a daily verse
//! and keeps a small HTTP server alive for uptime pingers.

/// The language model client and prompts.
pub mod ai;
/// The main handler for the bot's logic.
pub mod bot_handler;
/// The configuration for the application.
pub mod config;
/// Clients for the religious content APIs.
pub mod content;
/// The dispatcher for routing updates to the correct handlers.
pub mod dispatcher;
/// Group administration through the Telegram API.
pub mod group_admin;
/// Shared HTTP client setup and retries.
pub mod http;
/// The keep-alive HTTP server.
pub mod keep_alive;
/// The service for sending messages to chats.
pub mod messaging;
/// Warnings and per-group settings.
pub mod moderation;
/// The daily verse, reminders and active hours.
pub mod scheduler;
/// The storage layer for persisting group settings.
pub mod storage;
/// Helpers shared by unit and integration tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

use std::{path::Path, sync::Arc};

use teloxide::{dispatching::dialogue::serializer, prelude::*};

use crate::{
    ai::{GeminiClient, LanguageModel},
    bot_handler::{BotHandler, Command, DialogueStorage},
    config::Config,
    content::DefaultContentClient,
    dispatcher::{BotDispatcher, DeveloperErrorHandler},
    group_admin::TelegramGroupAdmin,
    messaging::TelegramMessagingService,
    moderation::DefaultModerationService,
    scheduler::{ActiveWindow, DailyVerseScheduler},
    storage::{SettingsStorage, json_file::JsonFileStorage},
};

/// Runs the bot.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let bot = Bot::new(config.telegram_bot_token.clone());

    let settings_storage: Arc<dyn SettingsStorage> =
        Arc::new(JsonFileStorage::new(&config.settings_path));
    let messaging_service = Arc::new(TelegramMessagingService::new(bot.clone()));
    let content_client = Arc::new(DefaultContentClient::new(&config)?);
    let language_model = GeminiClient::from_config(&config)?
        .map(|client| Arc::new(client) as Arc<dyn LanguageModel>);
    let moderation_service =
        Arc::new(DefaultModerationService::new(settings_storage.clone(), config.default_warn_limit));
    let group_admin = Arc::new(TelegramGroupAdmin::new(bot.clone()));

    // Updates sent while the bot was offline are dropped.
    bot.delete_webhook().drop_pending_updates(true).await?;
    bot.set_my_commands(Command::menu(language_model.is_some())).await?;
    tracing::debug!("Bot commands registered.");

    let port = config.keep_alive_port;
    tokio::spawn(async move {
        if let Err(e) = keep_alive::serve(port).await {
            tracing::error!("Keep-alive server stopped: {e}");
        }
    });

    let scheduler = DailyVerseScheduler::new(
        content_client.clone(),
        settings_storage.clone(),
        messaging_service.clone(),
        &config,
    );
    tokio::spawn(async move { scheduler.run().await });

    create_database_dir(&config.dialogue_database_url)?;
    let dialogue_storage =
        DialogueStorage::open(&config.dialogue_database_url, serializer::Json).await?;

    let handler = Arc::new(BotHandler::new(
        messaging_service.clone(),
        moderation_service,
        group_admin,
        content_client,
        language_model,
    ));
    let error_handler = Arc::new(DeveloperErrorHandler::new(
        messaging_service,
        config.developer_chat_id.map(ChatId),
    ));
    let mut dispatcher = BotDispatcher::new(
        handler,
        dialogue_storage,
        ActiveWindow::from_config(&config),
        error_handler,
    )
    .build(bot);
    tracing::info!("Bot started, polling for updates.");

    dispatcher.dispatch().await;

    Ok(())
}

/// Creates the parent directory of a file based SQLite URL.
fn create_database_dir(database_url: &str) -> std::io::Result<()> {
    let path = database_url.trim_start_matches("sqlite:").trim_start_matches("//");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// Inline keyboards.
pub mod keyboards;
/// Message formatting.
pub mod utils;

use async_trait::async_trait;
use mockall::automock;
use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, ForceReply, InlineKeyboardMarkup, MessageId, ParseMode, ReplyParameters},
    utils::{command::BotCommands, html},
};
use thiserror::Error;

use crate::{
    bot_handler::{BotHandlerError, Command},
    messaging::keyboards::{COMMAND_KEYBOARD, build_settings_keyboard},
    storage::GroupSettings,
};

/// Errors from sending messages.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The Bot API request failed.
    #[error("Teloxide API request failed: {0}")]
    TeloxideRequest(#[from] teloxide::RequestError),
}

type Result<T> = std::result::Result<T, MessagingError>;

const START_TEXT: &str = "Assalamu'alaikum! 👋\n\nSaya adalah bot Islami untuk membantu grup ini: \
                          ayat dan tafsir Al-Qur'an, hadits, doa harian, Asmaul Husna, pengingat, \
                          serta moderasi grup. Ketik /help untuk melihat semua perintah.";

/// Trait for sending messages to chats.
#[automock]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Sends an HTML message to the chat.
    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<()>;

    /// Replies to a message with HTML text and an optional keyboard.
    async fn reply_html(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;

    /// Replies with a long text. When `header` and `body` together exceed the
    /// Telegram limit the header is sent first, followed by the body in parts.
    /// `body` is plain text.
    async fn reply_long_html(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        header: String,
        body: String,
    ) -> Result<()>;

    /// Replies with a plain status text and returns the sent message so it
    /// can be removed later.
    async fn send_status_msg(&self, chat_id: ChatId, reply_to: MessageId, text: &str)
    -> Result<Message>;

    /// Deletes a message.
    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()>;

    /// Shows a chat action such as typing.
    async fn send_chat_action(&self, chat_id: ChatId, action: ChatAction) -> Result<()>;

    /// Asks the user for text input with a force reply.
    async fn prompt_for_input(&self, chat_id: ChatId, reply_to: MessageId, prompt: &str)
    -> Result<()>;

    /// Sends the greeting with the command keyboard.
    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the command list.
    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the settings menu of a group.
    async fn send_settings_menu(
        &self,
        chat_id: ChatId,
        settings: GroupSettings,
        warn_limit: u32,
    ) -> Result<()>;

    /// Redraws the settings menu after a change.
    async fn edit_settings_menu(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        settings: GroupSettings,
        warn_limit: u32,
    ) -> Result<()>;

    /// Replaces the settings menu with a closing note.
    async fn close_settings_menu(&self, chat_id: ChatId, message_id: MessageId) -> Result<()>;

    /// Answers a callback query to clear the button spinner. `text` is shown
    /// as a toast when not empty.
    async fn answer_callback_query(&self, query_id: &str, text: &str) -> Result<()>;

    /// Sends an error message to the provided chat.
    async fn send_error_msg(&self, chat_id: ChatId, error: BotHandlerError) -> Result<()>;
}

/// Telegram messaging service.
pub struct TelegramMessagingService {
    bot: Bot,
}

impl TelegramMessagingService {
    /// Creates the service.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn settings_text(settings: &GroupSettings) -> String {
        let welcome = if settings.welcome_message.is_some() { "kustom" } else { "bawaan" };
        let rules = if settings.rules.is_some() { "kustom" } else { "bawaan" };
        format!(
            "⚙️ <b>Pengaturan Grup</b>\n\nPesan sambutan: {welcome}\nPeraturan: {rules}\n\nTekan \
             tombol di bawah untuk mengubah pengaturan."
        )
    }

    /// Splits `header` and `body` into the messages to send.
    pub fn long_message_parts(header: &str, body: &str) -> Vec<String> {
        let body_chars = body.chars().count();
        if header.chars().count() + body_chars <= utils::MAX_MESSAGE_CHARS {
            return vec![format!("{header}{}", html::escape(body))];
        }

        let mut parts = vec![header.to_string()];
        parts.extend(
            utils::split_chunks(body, utils::CHUNK_CHARS).iter().map(|chunk| html::escape(chunk)),
        );
        parts
    }
}

#[async_trait]
impl MessagingService for TelegramMessagingService {
    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn reply_html(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let request = self
            .bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(reply_to).allow_sending_without_reply());

        let result = match keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await,
            None => request.await,
        };
        result.map(|_| ()).map_err(MessagingError::TeloxideRequest)
    }

    async fn reply_long_html(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        header: String,
        body: String,
    ) -> Result<()> {
        for part in Self::long_message_parts(&header, &body) {
            self.reply_html(chat_id, reply_to, part, None).await?;
        }
        Ok(())
    }

    async fn send_status_msg(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: &str,
    ) -> Result<Message> {
        self.bot
            .send_message(chat_id, text)
            .reply_parameters(ReplyParameters::new(reply_to).allow_sending_without_reply())
            .await
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.bot
            .delete_message(chat_id, message_id)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_chat_action(&self, chat_id: ChatId, action: ChatAction) -> Result<()> {
        self.bot
            .send_chat_action(chat_id, action)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn prompt_for_input(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        prompt: &str,
    ) -> Result<()> {
        self.bot
            .send_message(chat_id, prompt)
            .reply_parameters(ReplyParameters::new(reply_to).allow_sending_without_reply())
            .reply_markup(ForceReply::new().selective())
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()> {
        self.bot
            .send_message(chat_id, START_TEXT)
            .parse_mode(ParseMode::Html)
            .reply_markup(COMMAND_KEYBOARD.clone())
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()> {
        let help_text = Command::descriptions().to_string();
        self.bot
            .send_message(chat_id, help_text)
            .reply_markup(COMMAND_KEYBOARD.clone())
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_settings_menu(
        &self,
        chat_id: ChatId,
        settings: GroupSettings,
        warn_limit: u32,
    ) -> Result<()> {
        self.bot
            .send_message(chat_id, Self::settings_text(&settings))
            .parse_mode(ParseMode::Html)
            .reply_markup(build_settings_keyboard(&settings, warn_limit))
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn edit_settings_menu(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        settings: GroupSettings,
        warn_limit: u32,
    ) -> Result<()> {
        self.bot
            .edit_message_text(chat_id, message_id, Self::settings_text(&settings))
            .parse_mode(ParseMode::Html)
            .reply_markup(build_settings_keyboard(&settings, warn_limit))
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn close_settings_menu(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.bot
            .edit_message_text(chat_id, message_id, "⚙️ Pengaturan ditutup.")
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn answer_callback_query(&self, query_id: &str, text: &str) -> Result<()> {
        let request = self.bot.answer_callback_query(query_id);
        let result = if text.is_empty() { request.await } else { request.text(text).await };
        result.map(|_| ()).map_err(MessagingError::TeloxideRequest)
    }

    async fn send_error_msg(&self, chat_id: ChatId, error: BotHandlerError) -> Result<()> {
        self.send_html(chat_id, format!("❌ {}", html::escape(&error.to_string()))).await
    }
}

mod callback_actions;
mod callbacks;
mod commands;
mod events;
#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
mod utils;

use std::sync::Arc;

pub use callback_actions::CallbackAction;
use serde::{Deserialize, Serialize};
use teloxide::{
    dispatching::dialogue::{Dialogue, SqliteStorage, SqliteStorageError, serializer::Json},
    prelude::*,
    types::{BotCommand, ChatAction, Message, User},
    utils::command::BotCommands,
};
use thiserror::Error;

use crate::{
    ai::LanguageModel,
    content::ContentClient,
    group_admin::{GroupAdminError, GroupAdminService},
    messaging::{MessagingError, MessagingService},
    moderation::{ModerationError, ModerationService},
};

/// Perintah yang tersedia:
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Memulai bot.
    Start,
    /// Menampilkan bantuan.
    Help,
    /// Peraturan grup.
    Rules,
    /// (Admin) Atur bot untuk grup ini.
    Settings,
    /// Batalkan pengaturan yang sedang berlangsung.
    Batal,
    /// (Admin) Beri peringatan, balas pesan anggota. /warn [alasan]
    Warn(String),
    /// (Admin) Hapus peringatan anggota, balas pesannya.
    Unwarn,
    /// Lihat jumlah peringatan.
    Warns,
    /// (Admin) Keluarkan anggota, balas pesannya. /kick [alasan]
    Kick(String),
    /// Statistik grup.
    Statistic,
    /// Doa harian acak.
    Doa,
    /// Mutiara kata dari para ulama.
    MutiaraKata,
    /// Cari ayat Al-Qur'an. /ayat [surah]:[ayat]
    Ayat(String),
    /// Cari tafsir ayat. /tafsir [surah]:[ayat]
    Tafsir(String),
    /// Cari hadits. /hadits [kitab] [nomor]
    Hadits(String),
    /// Asmaul Husna. /asmaulhusna [nomor]
    AsmaulHusna(String),
    /// Tanya jawab Islami dengan AI. /tanya [pertanyaan]
    Tanya(String),
    /// Kisah Nabi atau Sahabat dari AI. /kisah [nama]
    Kisah(String),
    /// Buat pengingat. /ingatkan [waktu] [pesan], contoh: /ingatkan 10m Sholat
    Ingatkan(String),
}

/// Commands answered by the language model.
const AI_COMMANDS: [&str; 2] = ["tanya", "kisah"];

impl Command {
    /// The command menu registered with Telegram. AI commands are left out
    /// when no language model is configured.
    pub fn menu(ai_enabled: bool) -> Vec<BotCommand> {
        Self::bot_commands()
            .into_iter()
            .filter(|cmd| ai_enabled || !AI_COMMANDS.contains(&cmd.command.trim_start_matches('/')))
            .collect()
    }
}

/// Persists dialogue states across restarts.
pub type DialogueStorage = SqliteStorage<Json>;

/// The state of the settings dialogue of a chat.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandState {
    /// No input is pending.
    #[default]
    None,
    /// The admin chose to set the welcome message and the next text they
    /// send is stored.
    AwaitingWelcomeMessage {
        /// The admin who opened the prompt.
        admin_id: UserId,
    },
    /// The next text from `admin_id` becomes the group rules.
    AwaitingRules {
        /// The admin who opened the prompt.
        admin_id: UserId,
    },
}

/// Errors returned by update handlers.
#[derive(Debug, Error)]
pub enum BotHandlerError {
    /// The update could not be handled as given.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing the dialogue state failed.
    #[error("Failed to get or update dialogue: {0}")]
    DialogueError(#[from] SqliteStorageError<serde_json::Error>),

    /// A Telegram request failed.
    #[error("Failed to send message: {0}")]
    SendMessageError(#[from] MessagingError),

    /// Reading or writing group settings failed.
    #[error("Moderation error: {0}")]
    ModerationError(#[from] ModerationError),

    /// A group administration request failed.
    #[error("Group administration error: {0}")]
    GroupAdminError(#[from] GroupAdminError),
}

/// Result of an update handler.
pub type BotHandlerResult<T> = Result<T, BotHandlerError>;

/// Context groups the data needed by all command and callback handlers.
pub struct Context<'a> {
    /// The handler owning the services.
    pub handler: &'a BotHandler,
    /// The message being answered. For callbacks, the message holding the keyboard.
    pub message: &'a Message,
    /// The dialogue of the chat.
    pub dialogue: &'a Dialogue<CommandState, DialogueStorage>,
    /// The button press, for callback updates.
    pub query: Option<&'a CallbackQuery>,
}

impl Context<'_> {
    /// Replies to the context message with HTML text.
    pub async fn reply(&self, text: impl Into<String> + Send) -> BotHandlerResult<()> {
        self.handler
            .messaging_service
            .reply_html(self.message.chat.id, self.message.id, text.into(), None)
            .await?;
        Ok(())
    }

    /// The user who triggered the update. For callbacks that is the user who
    /// pressed the button, not the author of the message holding it.
    pub fn sender(&self) -> Option<&User> {
        match self.query {
            Some(query) => Some(&query.from),
            None => self.message.from.as_ref(),
        }
    }
}

/// Encapsulates the services used to answer updates.
pub struct BotHandler {
    messaging_service: Arc<dyn MessagingService>,
    moderation_service: Arc<dyn ModerationService>,
    group_admin: Arc<dyn GroupAdminService>,
    content_client: Arc<dyn ContentClient>,
    language_model: Option<Arc<dyn LanguageModel>>,
}

impl BotHandler {
    /// Creates a new `BotHandler` instance. AI commands and moderation are
    /// off when `language_model` is `None`.
    pub fn new(
        messaging_service: Arc<dyn MessagingService>,
        moderation_service: Arc<dyn ModerationService>,
        group_admin: Arc<dyn GroupAdminService>,
        content_client: Arc<dyn ContentClient>,
        language_model: Option<Arc<dyn LanguageModel>>,
    ) -> Self {
        Self { messaging_service, moderation_service, group_admin, content_client, language_model }
    }

    /// Dispatches the incoming command to the appropriate handler.
    pub async fn handle_commands(
        &self,
        msg: &Message,
        cmd: Command,
        dialogue: Dialogue<CommandState, DialogueStorage>,
    ) -> BotHandlerResult<()> {
        let ctx = Context { handler: self, message: msg, dialogue: &dialogue, query: None };

        match cmd {
            Command::Start => commands::start::handle(ctx).await,
            Command::Help => commands::help::handle(ctx).await,
            Command::Rules => commands::rules::handle(ctx).await,
            Command::Settings => commands::settings::handle(ctx).await,
            Command::Batal => commands::batal::handle(ctx).await,
            Command::Warn(reason) => commands::warn::handle(ctx, &reason).await,
            Command::Unwarn => commands::unwarn::handle(ctx).await,
            Command::Warns => commands::warns::handle(ctx).await,
            Command::Kick(reason) => commands::kick::handle(ctx, &reason).await,
            Command::Statistic => commands::statistic::handle(ctx).await,
            Command::Doa => commands::doa::handle(ctx).await,
            Command::MutiaraKata => commands::mutiarakata::handle(ctx).await,
            Command::Ayat(arg) => commands::ayat::handle(ctx, &arg).await,
            Command::Tafsir(arg) => commands::tafsir::handle(ctx, &arg).await,
            Command::Hadits(args) => commands::hadits::handle(ctx, &args).await,
            Command::AsmaulHusna(arg) => commands::asmaulhusna::handle(ctx, &arg).await,
            Command::Tanya(question) => commands::tanya::handle(ctx, &question).await,
            Command::Kisah(name) => commands::kisah::handle(ctx, &name).await,
            Command::Ingatkan(args) => commands::ingatkan::handle(ctx, &args).await,
        }
    }

    /// Handles a button press on one of the bot's inline keyboards.
    pub async fn handle_callback_query(
        &self,
        query: &CallbackQuery,
        dialogue: Dialogue<CommandState, DialogueStorage>,
    ) -> BotHandlerResult<()> {
        let action = query.data.as_deref().and_then(|data| {
            serde_json::from_str::<CallbackAction>(data)
                .map_err(|e| tracing::warn!("Unknown callback data '{data}': {e}"))
                .ok()
        });
        let message = query.message.as_ref().and_then(|m| m.regular_message());

        let (Some(action), Some(message)) = (action, message) else {
            self.messaging_service.answer_callback_query(&query.id, "").await?;
            return Ok(());
        };

        let ctx = Context { handler: self, message, dialogue: &dialogue, query: Some(query) };

        match action {
            CallbackAction::ToggleFeature(feature) => {
                callbacks::toggle_feature::handle(ctx, feature).await
            }
            CallbackAction::AdjustWarnLimit(delta) => {
                callbacks::warn_limit::handle(ctx, i32::from(delta)).await
            }
            CallbackAction::SetWelcome => {
                callbacks::text_setting::handle(ctx, callbacks::text_setting::TextSetting::Welcome)
                    .await
            }
            CallbackAction::SetRules => {
                callbacks::text_setting::handle(ctx, callbacks::text_setting::TextSetting::Rules)
                    .await
            }
            CallbackAction::CloseSettings => callbacks::close_settings::handle(ctx).await,
            CallbackAction::Noop => {
                self.messaging_service.answer_callback_query(&query.id, "").await?;
                Ok(())
            }
            // Command keyboard actions are handled as commands.
            CallbackAction::Help
            | CallbackAction::Rules
            | CallbackAction::Doa
            | CallbackAction::MutiaraKata
            | CallbackAction::AsmaulHusna => {
                self.messaging_service.answer_callback_query(&query.id, "").await?;
                match action {
                    CallbackAction::Help => commands::help::handle(ctx).await,
                    CallbackAction::Rules => commands::rules::handle(ctx).await,
                    CallbackAction::Doa => commands::doa::handle(ctx).await,
                    CallbackAction::MutiaraKata => commands::mutiarakata::handle(ctx).await,
                    _ => commands::asmaulhusna::handle(ctx, "").await,
                }
            }
        }
    }

    /// Handles a plain text message: pending settings input first, AI
    /// moderation otherwise.
    pub async fn handle_text(
        &self,
        msg: &Message,
        dialogue: Dialogue<CommandState, DialogueStorage>,
    ) -> BotHandlerResult<()> {
        let ctx = Context { handler: self, message: msg, dialogue: &dialogue, query: None };

        if events::settings_input::handle(&ctx).await? {
            return Ok(());
        }
        events::ai_moderation::handle(&ctx).await
    }

    /// Greets members who just joined a group.
    pub async fn handle_new_members(
        &self,
        msg: &Message,
        dialogue: Dialogue<CommandState, DialogueStorage>,
    ) -> BotHandlerResult<()> {
        let ctx = Context { handler: self, message: msg, dialogue: &dialogue, query: None };
        events::welcome::handle(&ctx).await
    }

    /// Shows "typing..." while a slow answer is prepared. Failures only
    /// lose the indicator.
    async fn show_typing(&self, chat_id: ChatId) {
        if let Err(e) = self.messaging_service.send_chat_action(chat_id, ChatAction::Typing).await
        {
            tracing::debug!("Failed to send chat action to {chat_id}: {e}");
        }
    }
}

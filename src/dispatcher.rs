use std::sync::Arc;

use futures::future::BoxFuture;
use teloxide::{
    dispatching::{DefaultKey, UpdateHandler, dialogue::Dialogue},
    dptree::{deps, filter_map},
    error_handlers::ErrorHandler,
    prelude::*,
    types::Update,
};

use crate::{
    bot_handler::{BotHandler, BotHandlerError, Command, CommandState, DialogueStorage},
    messaging::MessagingService,
    scheduler::ActiveWindow,
};

type BotDialogue = Dialogue<CommandState, DialogueStorage>;

/// Encapsulates the dispatcher logic for the bot.
pub struct BotDispatcher {
    handler: Arc<BotHandler>,
    dialogue_storage: Arc<DialogueStorage>,
    active_window: ActiveWindow,
    error_handler: Arc<DeveloperErrorHandler>,
}

impl BotDispatcher {
    /// Creates a new `BotDispatcher`.
    pub fn new(
        handler: Arc<BotHandler>,
        dialogue_storage: Arc<DialogueStorage>,
        active_window: ActiveWindow,
        error_handler: Arc<DeveloperErrorHandler>,
    ) -> Self {
        Self { handler, dialogue_storage, active_window, error_handler }
    }

    /// Builds the dispatcher using the provided `bot` instance.
    #[must_use = "This function returns a Dispatcher that should not be ignored"]
    pub fn build(&self, bot: Bot) -> Dispatcher<Bot, BotHandlerError, DefaultKey> {
        Dispatcher::builder(bot, Self::schema())
            .dependencies(deps![
                self.dialogue_storage.clone(),
                self.handler.clone(),
                self.active_window
            ])
            .error_handler(self.error_handler.clone())
            .default_handler(ignore_update)
            .enable_ctrlc_handler()
            .build()
    }

    /// The update routing tree. Updates outside the active window are
    /// dropped before any branch runs.
    fn schema() -> UpdateHandler<BotHandlerError> {
        dptree::entry()
            .filter(|window: ActiveWindow| window.is_active())
            .branch(Self::build_commands_branch())
            .branch(Self::build_callback_queries_branch())
            .branch(Self::build_new_members_branch())
            .branch(Self::build_text_branch())
    }

    /// Builds the branch for handling text commands.
    fn build_commands_branch() -> UpdateHandler<BotHandlerError> {
        Update::filter_message()
            .filter_command::<Command>()
            .chain(filter_map(extract_dialogue))
            .endpoint(
                |msg: Message, cmd: Command, dialogue: BotDialogue, handler: Arc<BotHandler>| async move {
                    handler.handle_commands(&msg, cmd, dialogue).await
                },
            )
    }

    /// Builds the branch for inline keyboard button presses.
    fn build_callback_queries_branch() -> UpdateHandler<BotHandlerError> {
        Update::filter_callback_query().chain(filter_map(extract_dialogue)).endpoint(
            |query: CallbackQuery, dialogue: BotDialogue, handler: Arc<BotHandler>| async move {
                handler.handle_callback_query(&query, dialogue).await
            },
        )
    }

    /// Builds the branch for service messages announcing new members.
    fn build_new_members_branch() -> UpdateHandler<BotHandlerError> {
        Update::filter_message()
            .filter(|msg: Message| msg.new_chat_members().is_some())
            .chain(filter_map(extract_dialogue))
            .endpoint(|msg: Message, dialogue: BotDialogue, handler: Arc<BotHandler>| async move {
                handler.handle_new_members(&msg, dialogue).await
            })
    }

    /// Builds the branch for every other text message.
    fn build_text_branch() -> UpdateHandler<BotHandlerError> {
        Update::filter_message()
            .filter(|msg: Message| msg.text().is_some())
            .chain(filter_map(extract_dialogue))
            .endpoint(|msg: Message, dialogue: BotDialogue, handler: Arc<BotHandler>| async move {
                handler.handle_text(&msg, dialogue).await
            })
    }
}

/// Extracts a dialogue from an update using the provided dialogue storage.
fn extract_dialogue(update: Update, storage: Arc<DialogueStorage>) -> Option<BotDialogue> {
    update.chat().map(|chat| Dialogue::new(storage, chat.id))
}

/// Updates no branch accepts: outside the active window, stickers, photos
/// and other media.
async fn ignore_update(update: Arc<Update>) {
    tracing::debug!("Ignoring update {}", update.id.0);
}

/// Logs handler errors and forwards them to the developer chat.
pub struct DeveloperErrorHandler {
    messaging_service: Arc<dyn MessagingService>,
    developer_chat: Option<ChatId>,
}

impl DeveloperErrorHandler {
    /// Creates the handler. Reports are only logged when `developer_chat` is `None`.
    pub fn new(messaging_service: Arc<dyn MessagingService>, developer_chat: Option<ChatId>) -> Self {
        Self { messaging_service, developer_chat }
    }

    async fn report(&self, error: BotHandlerError) {
        tracing::error!("Error while handling update: {error}");

        let Some(chat_id) = self.developer_chat else {
            return;
        };
        if let Err(e) = self.messaging_service.send_error_msg(chat_id, error).await {
            tracing::error!("Failed to report error to developer chat {chat_id}: {e}");
        }
    }
}

impl ErrorHandler<BotHandlerError> for DeveloperErrorHandler {
    fn handle_error(self: Arc<Self>, error: BotHandlerError) -> BoxFuture<'static, ()> {
        Box::pin(async move { self.report(error).await })
    }
}

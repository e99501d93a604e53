use std::sync::Arc;

use serde_json::{Value, json};
use teloxide::{
    dispatching::dialogue::{Dialogue, serializer},
    types::{CallbackQuery, ChatId, Message, MessageId, UserId},
};

use super::*;
use crate::{
    ai::MockLanguageModel,
    content::MockContentClient,
    group_admin::MockGroupAdminService,
    messaging::MockMessagingService,
    moderation::MockModerationService,
};

pub const GROUP_ID: ChatId = ChatId(-100123);
pub const PRIVATE_ID: ChatId = ChatId(555);
pub const ADMIN_ID: UserId = UserId(1);
pub const MEMBER_ID: UserId = UserId(2);
pub const MESSAGE_ID: MessageId = MessageId(10);
pub const QUERY_ID: &str = "test_callback_id";

/// Mocks for every service of the handler. Set expectations, then call
/// `build`.
#[derive(Default)]
pub struct Mocks {
    pub messaging: MockMessagingService,
    pub moderation: MockModerationService,
    pub group_admin: MockGroupAdminService,
    pub content: MockContentClient,
    pub model: Option<MockLanguageModel>,
}

impl Mocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a language model with the given setup.
    pub fn with_model(mut self, setup: impl FnOnce(&mut MockLanguageModel)) -> Self {
        let mut model = MockLanguageModel::new();
        setup(&mut model);
        self.model = Some(model);
        self
    }

    pub async fn build(self) -> TestHarness {
        let language_model =
            self.model.map(|model| Arc::new(model) as Arc<dyn crate::ai::LanguageModel>);
        let bot_handler = BotHandler::new(
            Arc::new(self.messaging),
            Arc::new(self.moderation),
            Arc::new(self.group_admin),
            Arc::new(self.content),
            language_model,
        );
        let storage = DialogueStorage::open("sqlite::memory:", serializer::Json).await.unwrap();
        let dialogue = Dialogue::new(storage.clone(), GROUP_ID);

        TestHarness { bot_handler, dialogue, storage }
    }
}

// Test harness to encapsulate common test setup and actions.
pub struct TestHarness {
    bot_handler: BotHandler,
    pub dialogue: Dialogue<CommandState, DialogueStorage>,
    storage: Arc<DialogueStorage>,
}

impl TestHarness {
    // Creates a new dialogue for the same chat to test state persistence.
    pub fn new_dialogue(&self) -> Dialogue<CommandState, DialogueStorage> {
        Dialogue::new(self.storage.clone(), GROUP_ID)
    }

    pub async fn command(&self, msg: Message, command: Command) -> BotHandlerResult<()> {
        self.bot_handler.handle_commands(&msg, command, self.dialogue.clone()).await
    }

    pub async fn callback(&self, from: UserId, action: CallbackAction) -> BotHandlerResult<()> {
        let query = callback_query(from, &action);
        self.bot_handler.handle_callback_query(&query, self.dialogue.clone()).await
    }

    pub async fn callback_raw(&self, query: &CallbackQuery) -> BotHandlerResult<()> {
        self.bot_handler.handle_callback_query(query, self.dialogue.clone()).await
    }

    pub async fn text(&self, msg: Message) -> BotHandlerResult<()> {
        self.bot_handler.handle_text(&msg, self.dialogue.clone()).await
    }

    pub async fn new_members(&self, msg: Message) -> BotHandlerResult<()> {
        self.bot_handler.handle_new_members(&msg, self.dialogue.clone()).await
    }
}

pub fn user_json(id: UserId, first_name: &str, is_bot: bool) -> Value {
    json!({ "id": id.0, "is_bot": is_bot, "first_name": first_name })
}

fn chat_json(chat_id: ChatId) -> Value {
    if chat_id == PRIVATE_ID {
        json!({ "id": chat_id.0, "type": "private", "first_name": "Ali" })
    } else {
        json!({ "id": chat_id.0, "type": "supergroup", "title": "Kajian Sunnah" })
    }
}

fn message_json(chat_id: ChatId, from: UserId, text: &str) -> Value {
    json!({
        "message_id": MESSAGE_ID.0,
        "date": 1_715_817_600,
        "chat": chat_json(chat_id),
        "from": user_json(from, if from == ADMIN_ID { "Admin" } else { "Budi" }, false),
        "text": text,
    })
}

// Helper to create a teloxide text message from `from` in `chat_id`.
pub fn message(chat_id: ChatId, from: UserId, text: &str) -> Message {
    serde_json::from_value(message_json(chat_id, from, text)).unwrap()
}

// A message from `from` replying to a message written by `target`.
pub fn reply_message(from: UserId, target: Value, text: &str) -> Message {
    let mut value = message_json(GROUP_ID, from, text);
    value["reply_to_message"] = json!({
        "message_id": 3,
        "date": 1_715_817_500,
        "chat": chat_json(GROUP_ID),
        "from": target,
        "text": "pesan",
    });
    serde_json::from_value(value).unwrap()
}

// A service message announcing new members.
pub fn new_members_message(members: Vec<Value>) -> Message {
    let value = json!({
        "message_id": MESSAGE_ID.0,
        "date": 1_715_817_600,
        "chat": chat_json(GROUP_ID),
        "from": user_json(MEMBER_ID, "Budi", false),
        "new_chat_members": members,
    });
    serde_json::from_value(value).unwrap()
}

// Helper to create a callback query on the bot's menu message in the group.
pub fn callback_query(from: UserId, action: &CallbackAction) -> CallbackQuery {
    let mut menu = message_json(GROUP_ID, UserId(999), "⚙️ Pengaturan Grup");
    menu["from"] = user_json(UserId(999), "Bot", true);

    let value = json!({
        "id": QUERY_ID,
        "from": user_json(from, "Admin", false),
        "message": menu,
        "chat_instance": "test_instance",
        "data": serde_json::to_string(action).unwrap(),
    });
    serde_json::from_value(value).unwrap()
}

use async_trait::async_trait;
use mockall::automock;
use teloxide::{
    prelude::*,
    types::{ChatId, UserId},
};
use thiserror::Error;

/// Errors from group administration requests.
#[derive(Debug, Error)]
pub enum GroupAdminError {
    /// The Bot API request failed.
    #[error("Teloxide API request failed: {0}")]
    TeloxideRequest(#[from] teloxide::RequestError),
}

type Result<T> = std::result::Result<T, GroupAdminError>;

/// Group administration actions performed through the Bot API.
#[automock]
#[async_trait]
pub trait GroupAdminService: Send + Sync {
    /// Whether the user is the owner or an administrator of the chat.
    async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<bool>;

    /// Bans a user. They cannot rejoin until unbanned.
    async fn ban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;

    /// Removes a user from the chat. They may rejoin with an invite link.
    async fn kick_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;

    /// Number of members in the chat.
    async fn member_count(&self, chat_id: ChatId) -> Result<u32>;

    /// Number of administrators, the owner included.
    async fn admin_count(&self, chat_id: ChatId) -> Result<usize>;
}

/// `GroupAdminService` backed by the Bot API.
pub struct TelegramGroupAdmin {
    bot: Bot,
}

impl TelegramGroupAdmin {
    /// Creates the service.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl GroupAdminService for TelegramGroupAdmin {
    async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<bool> {
        let member = self.bot.get_chat_member(chat_id, user_id).await?;
        Ok(member.is_privileged())
    }

    async fn ban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.bot.ban_chat_member(chat_id, user_id).await?;
        tracing::info!("Banned user {user_id} from chat {chat_id}");
        Ok(())
    }

    async fn kick_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.bot.ban_chat_member(chat_id, user_id).await?;
        self.bot.unban_chat_member(chat_id, user_id).only_if_banned(true).await?;
        tracing::info!("Kicked user {user_id} from chat {chat_id}");
        Ok(())
    }

    async fn member_count(&self, chat_id: ChatId) -> Result<u32> {
        self.bot.get_chat_member_count(chat_id).await.map_err(GroupAdminError::from)
    }

    async fn admin_count(&self, chat_id: ChatId) -> Result<usize> {
        let admins = self.bot.get_chat_administrators(chat_id).await?;
        Ok(admins.len())
    }
}

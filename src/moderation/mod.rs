
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use teloxide::types::{ChatId, UserId};
use thiserror::Error;

use crate::storage::{Feature, GroupSettings, SettingsStorage, StorageError};

/// Bounds for a group's warning limit set from the settings menu.
pub const MIN_WARN_LIMIT: u32 = 1;
/// Highest warning limit an admin can set.
pub const MAX_WARN_LIMIT: u32 = 10;

/// Errors from the moderation service.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// The settings store failed.
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

type Result<T> = std::result::Result<T, ModerationError>;

/// Result of warning a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarnOutcome {
    /// The user now has `count` of `limit` warnings.
    Warned {
        /// Warnings the user has now.
        count: u32,
        /// Warnings that lead to a ban.
        limit: u32,
    },
    /// The user reached the limit and must be banned. Their warnings were
    /// cleared.
    Banned {
        /// The limit that was reached.
        limit: u32,
    },
}

/// Warnings and group settings as seen by the handlers.
#[automock]
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// Adds a warning and tells whether the user crossed the group's limit.
    async fn warn(&self, chat_id: ChatId, user_id: UserId) -> Result<WarnOutcome>;

    /// Clears a user's warnings. Returns whether there were any.
    async fn reset(&self, chat_id: ChatId, user_id: UserId) -> Result<bool>;

    /// Returns `(count, limit)` for a user.
    async fn warnings(&self, chat_id: ChatId, user_id: UserId) -> Result<(u32, u32)>;

    /// Returns the stored settings of a group.
    async fn group_settings(&self, chat_id: ChatId) -> Result<GroupSettings>;

    /// Returns the warning limit in effect for a group.
    async fn warn_limit(&self, chat_id: ChatId) -> Result<u32>;

    /// Flips a feature and returns its new state.
    async fn toggle_feature(&self, chat_id: ChatId, feature: Feature) -> Result<bool>;

    /// Stores the welcome template.
    async fn set_welcome_message(&self, chat_id: ChatId, text: String) -> Result<()>;

    /// Stores the group rules.
    async fn set_rules(&self, chat_id: ChatId, text: String) -> Result<()>;

    /// Moves the warning limit by `delta`, clamped to
    /// `MIN_WARN_LIMIT..=MAX_WARN_LIMIT`. Returns the new limit.
    async fn adjust_warn_limit(&self, chat_id: ChatId, delta: i32) -> Result<u32>;

    /// Number of users with at least one warning.
    async fn count_warned_users(&self, chat_id: ChatId) -> Result<usize>;
}

/// `ModerationService` over a `SettingsStorage`.
pub struct DefaultModerationService {
    storage: Arc<dyn SettingsStorage>,
    default_warn_limit: u32,
}

impl DefaultModerationService {
    /// Creates the service. `default_warn_limit` applies to groups without their own limit.
    pub fn new(storage: Arc<dyn SettingsStorage>, default_warn_limit: u32) -> Self {
        Self { storage, default_warn_limit: default_warn_limit.max(MIN_WARN_LIMIT) }
    }

    fn limit_of(&self, settings: &GroupSettings) -> u32 {
        settings.warn_limit.unwrap_or(self.default_warn_limit).max(MIN_WARN_LIMIT)
    }
}

#[async_trait]
impl ModerationService for DefaultModerationService {
    async fn warn(&self, chat_id: ChatId, user_id: UserId) -> Result<WarnOutcome> {
        let count = self.storage.add_warning(chat_id, user_id).await?;
        let limit = self.warn_limit(chat_id).await?;

        if count >= limit {
            self.storage.reset_warnings(chat_id, user_id).await?;
            tracing::info!("User {user_id} reached {count}/{limit} warnings in chat {chat_id}");
            return Ok(WarnOutcome::Banned { limit });
        }

        tracing::debug!("User {user_id} has {count}/{limit} warnings in chat {chat_id}");
        Ok(WarnOutcome::Warned { count, limit })
    }

    async fn reset(&self, chat_id: ChatId, user_id: UserId) -> Result<bool> {
        self.storage.reset_warnings(chat_id, user_id).await.map_err(ModerationError::from)
    }

    async fn warnings(&self, chat_id: ChatId, user_id: UserId) -> Result<(u32, u32)> {
        let settings = self.storage.get_group_settings(chat_id).await?;
        Ok((settings.warnings_for(user_id), self.limit_of(&settings)))
    }

    async fn group_settings(&self, chat_id: ChatId) -> Result<GroupSettings> {
        self.storage.get_group_settings(chat_id).await.map_err(ModerationError::from)
    }

    async fn warn_limit(&self, chat_id: ChatId) -> Result<u32> {
        let settings = self.storage.get_group_settings(chat_id).await?;
        Ok(self.limit_of(&settings))
    }

    async fn toggle_feature(&self, chat_id: ChatId, feature: Feature) -> Result<bool> {
        let enabled = self.storage.toggle_feature(chat_id, feature).await?;
        tracing::info!("Feature {feature} set to {enabled} in chat {chat_id}");
        Ok(enabled)
    }

    async fn set_welcome_message(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.storage.set_welcome_message(chat_id, text).await.map_err(ModerationError::from)
    }

    async fn set_rules(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.storage.set_rules(chat_id, text).await.map_err(ModerationError::from)
    }

    async fn adjust_warn_limit(&self, chat_id: ChatId, delta: i32) -> Result<u32> {
        let current = self.warn_limit(chat_id).await?;
        let limit = current
            .saturating_add_signed(delta)
            .clamp(MIN_WARN_LIMIT, MAX_WARN_LIMIT);

        if limit != current {
            self.storage.set_warn_limit(chat_id, limit).await?;
        }
        Ok(limit)
    }

    async fn count_warned_users(&self, chat_id: ChatId) -> Result<usize> {
        self.storage.count_warned_users(chat_id).await.map_err(ModerationError::from)
    }
}

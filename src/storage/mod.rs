mod group_settings;
/// The JSON file store.
pub mod json_file;

use async_trait::async_trait;
pub use group_settings::{
    DEFAULT_RULES, DEFAULT_WELCOME_MESSAGE, Feature, FeatureFlags, GroupSettings,
};
use mockall::automock;
use teloxide::types::{ChatId, UserId};
use thiserror::Error;

/// Errors from the settings store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the file failed.
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),
    /// The settings could not be encoded.
    #[error("Failed to serialize settings: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of a storage operation.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent per-group settings and warning counters.
#[automock]
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Get the settings of a group, or the defaults if nothing is stored.
    async fn get_group_settings(&self, chat_id: ChatId) -> StorageResult<GroupSettings>;

    /// Store a custom welcome message template for a group.
    async fn set_welcome_message(&self, chat_id: ChatId, text: String) -> StorageResult<()>;

    /// Store custom rules for a group.
    async fn set_rules(&self, chat_id: ChatId, text: String) -> StorageResult<()>;

    /// Store the number of warnings that triggers a ban in a group.
    async fn set_warn_limit(&self, chat_id: ChatId, limit: u32) -> StorageResult<()>;

    /// Flip a feature flag. Returns the new value.
    async fn toggle_feature(&self, chat_id: ChatId, feature: Feature) -> StorageResult<bool>;

    /// Get the number of warnings a user has in a group.
    async fn get_warnings(&self, chat_id: ChatId, user_id: UserId) -> StorageResult<u32>;

    /// Add a warning to a user. Returns the new count.
    async fn add_warning(&self, chat_id: ChatId, user_id: UserId) -> StorageResult<u32>;

    /// Clear a user's warnings. Returns whether the user had any.
    async fn reset_warnings(&self, chat_id: ChatId, user_id: UserId) -> StorageResult<bool>;

    /// Count users in a group that currently have at least one warning.
    async fn count_warned_users(&self, chat_id: ChatId) -> StorageResult<usize>;
}

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use teloxide::types::{ChatId, UserId};
use tokio::{fs, sync::Mutex};

use crate::storage::{Feature, GroupSettings, SettingsStorage, StorageResult};

/// The whole file: group settings keyed by the chat id as a decimal string.
type SettingsMap = BTreeMap<String, GroupSettings>;

/// Settings storage backed by a single JSON file.
///
/// Every operation reads the file, and every mutation rewrites it, while
/// holding one mutex.
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Creates a store for the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::debug!("Using settings file: {}", path.display());
        Self { path, lock: Mutex::new(()) }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StorageResult<SettingsMap> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "{} not found. It will be created when settings are saved.",
                    self.path.display()
                );
                return Ok(SettingsMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(SettingsMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::error!(
                    "Failed to parse {}: {e}. Starting from empty settings.",
                    self.path.display()
                );
                self.backup_corrupt_file().await;
                Ok(SettingsMap::new())
            }
        }
    }

    async fn save(&self, settings: &SettingsMap) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(settings)?;
        let tmp_path = self.sibling_path("tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }

    async fn backup_corrupt_file(&self) {
        let backup_path = self.sibling_path("bak");
        match fs::copy(&self.path, &backup_path).await {
            Ok(_) => tracing::warn!("Corrupt settings backed up to {}", backup_path.display()),
            Err(e) => tracing::error!("Failed to back up corrupt settings file: {e}"),
        }
    }

    fn sibling_path(&self, extension: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }

    async fn read_group(&self, chat_id: ChatId) -> StorageResult<GroupSettings> {
        let _guard = self.lock.lock().await;
        let mut settings = self.load().await?;
        Ok(settings.remove(&chat_id.0.to_string()).unwrap_or_default())
    }

    /// Applies `f` to the group's settings and writes the file back.
    async fn update_group<T, F>(&self, chat_id: ChatId, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut GroupSettings) -> T + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let mut settings = self.load().await?;
        let result = f(settings.entry(chat_id.0.to_string()).or_default());
        self.save(&settings).await?;
        Ok(result)
    }
}

#[async_trait]
impl SettingsStorage for JsonFileStorage {
    async fn get_group_settings(&self, chat_id: ChatId) -> StorageResult<GroupSettings> {
        self.read_group(chat_id).await
    }

    async fn set_welcome_message(&self, chat_id: ChatId, text: String) -> StorageResult<()> {
        tracing::debug!("Setting welcome message for chat {chat_id}");
        self.update_group(chat_id, |group| group.welcome_message = Some(text)).await
    }

    async fn set_rules(&self, chat_id: ChatId, text: String) -> StorageResult<()> {
        tracing::debug!("Setting rules for chat {chat_id}");
        self.update_group(chat_id, |group| group.rules = Some(text)).await
    }

    async fn set_warn_limit(&self, chat_id: ChatId, limit: u32) -> StorageResult<()> {
        tracing::debug!("Setting warn limit for chat {chat_id} to {limit}");
        self.update_group(chat_id, |group| group.warn_limit = Some(limit.max(1))).await
    }

    async fn toggle_feature(&self, chat_id: ChatId, feature: Feature) -> StorageResult<bool> {
        tracing::debug!("Toggling {feature} for chat {chat_id}");
        self.update_group(chat_id, |group| group.features.toggle(feature)).await
    }

    async fn get_warnings(&self, chat_id: ChatId, user_id: UserId) -> StorageResult<u32> {
        Ok(self.read_group(chat_id).await?.warnings_for(user_id))
    }

    async fn add_warning(&self, chat_id: ChatId, user_id: UserId) -> StorageResult<u32> {
        tracing::debug!("Adding warning for user {user_id} in chat {chat_id}");
        self.update_group(chat_id, |group| group.add_warning(user_id)).await
    }

    async fn reset_warnings(&self, chat_id: ChatId, user_id: UserId) -> StorageResult<bool> {
        tracing::debug!("Resetting warnings for user {user_id} in chat {chat_id}");
        self.update_group(chat_id, |group| group.reset_warnings(user_id)).await
    }

    async fn count_warned_users(&self, chat_id: ChatId) -> StorageResult<usize> {
        Ok(self.read_group(chat_id).await?.warnings.len())
    }
}

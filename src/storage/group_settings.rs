use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use teloxide::types::UserId;

/// Per-group feature switches. Every feature is enabled until an admin turns
/// it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Moderate group messages with the language model.
    pub ai_moderation: bool,
    /// Greet new members.
    pub welcome: bool,
    /// Receive the daily verse.
    pub daily_verse: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self { ai_moderation: true, welcome: true, daily_verse: true }
    }
}

impl FeatureFlags {
    /// Whether `feature` is on.
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::AiModeration => self.ai_moderation,
            Feature::Welcome => self.welcome,
            Feature::DailyVerse => self.daily_verse,
        }
    }

    /// Flips the flag and returns its new value.
    pub fn toggle(&mut self, feature: Feature) -> bool {
        let flag = match feature {
            Feature::AiModeration => &mut self.ai_moderation,
            Feature::Welcome => &mut self.welcome,
            Feature::DailyVerse => &mut self.daily_verse,
        };
        *flag = !*flag;
        *flag
    }
}

/// A feature an admin can switch on or off for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Moderation of group messages with the language model.
    AiModeration,
    /// Greeting of new members.
    Welcome,
    /// The scheduled daily verse.
    DailyVerse,
}

impl Feature {
    /// Every feature, in settings menu order.
    pub const ALL: [Feature; 3] = [Feature::AiModeration, Feature::Welcome, Feature::DailyVerse];

    /// Human readable label shown on the settings keyboard.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::AiModeration => "Moderasi AI",
            Feature::Welcome => "Pesan Sambutan",
            Feature::DailyVerse => "Ayat Harian",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::AiModeration => "ai_moderation",
            Feature::Welcome => "welcome",
            Feature::DailyVerse => "daily_verse",
        };
        f.write_str(name)
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai_moderation" => Ok(Feature::AiModeration),
            "welcome" => Ok(Feature::Welcome),
            "daily_verse" => Ok(Feature::DailyVerse),
            other => Err(format!("Unknown feature '{other}'")),
        }
    }
}

/// Everything stored for a single group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSettings {
    /// Welcome template set by an admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    /// Rules set by an admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    /// Warning limit set by an admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn_limit: Option<u32>,
    /// Feature switches.
    pub features: FeatureFlags,
    /// Warning counts keyed by user id. JSON object keys must be strings.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub warnings: HashMap<String, u32>,
}

impl GroupSettings {
    /// The user's warning count, 0 when none.
    pub fn warnings_for(&self, user_id: UserId) -> u32 {
        self.warnings.get(&user_id.0.to_string()).copied().unwrap_or(0)
    }

    /// Increments the user's warning count and returns the new value.
    pub fn add_warning(&mut self, user_id: UserId) -> u32 {
        let count = self.warnings.entry(user_id.0.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Forgets the user's warnings. Returns whether there were any.
    pub fn reset_warnings(&mut self, user_id: UserId) -> bool {
        self.warnings.remove(&user_id.0.to_string()).is_some()
    }

    /// The welcome template, falling back to the default one.
    pub fn welcome_template(&self) -> &str {
        self.welcome_message.as_deref().unwrap_or(DEFAULT_WELCOME_MESSAGE)
    }

    /// The group rules, falling back to the default ones.
    pub fn rules_text(&self) -> &str {
        self.rules.as_deref().unwrap_or(DEFAULT_RULES)
    }
}

/// Placeholders: `{user_mention}` and `{chat_title}`.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Ahlan wa sahlan, {user_mention}!\n\nSelamat datang di \
                                           grup <b>{chat_title}</b>. Semoga betah dan jangan lupa \
                                           untuk membaca peraturan dengan perintah /rules.";

/// Rules shown when the group has none.
pub const DEFAULT_RULES: &str = "📜 <b>Peraturan Grup</b>\n\n1. Jaga adab dan gunakan bahasa yang \
                                 sopan.\n2. Dilarang keras mengirim spam, promosi, atau tautan \
                                 yang tidak relevan.\n3. Dilarang membahas isu SARA, politik, \
                                 atau hal yang dapat memicu perdebatan.\n4. Dilarang mengirim \
                                 konten pornografi atau kekerasan.\n5. Hormati sesama anggota \
                                 grup.\n\n<i>Pelanggaran terhadap aturan akan ditindak oleh admin \
                                 atau moderator AI.</i>";

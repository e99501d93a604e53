use std::env::{self, VarError};

use chrono::NaiveTime;

const DEFAULT_SETTINGS_PATH: &str = "db_settings.json";
const DEFAULT_DIALOGUE_DATABASE_URL: &str = "sqlite:data/dialogues.db";
const DEFAULT_KEEP_ALIVE_PORT: u16 = 8080;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_EQURAN_API_URL: &str = "https://equran.id/api/v2";
const DEFAULT_HADITH_API_URL: &str = "https://api.hadith.gading.dev";
const DEFAULT_DOA_API_URL: &str = "https://open-api.my.id/api/doa";
const DEFAULT_ASMAUL_HUSNA_API_URL: &str = "https://asmaul-husna-api.vercel.app/api/all";
const DEFAULT_WARN_LIMIT: u32 = 3;
const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DAILY_VERSE_TIMES: &str = "05:00,16:00";

/// A daily window, in whole local hours, during which the bot answers updates.
/// `end` may be 24 to mean midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveHours {
    /// First active hour (inclusive).
    pub start: u32,
    /// Last active hour (exclusive).
    pub end: u32,
}

impl ActiveHours {
    /// Parses `"7-24"` style ranges.
    pub fn parse(s: &str) -> Option<Self> {
        let (start, end) = s.trim().split_once('-')?;
        let start: u32 = start.trim().parse().ok()?;
        let end: u32 = end.trim().parse().ok()?;
        if start >= end || end > 24 {
            return None;
        }
        Some(Self { start, end })
    }

    /// Returns whether the given local hour falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// Represents the application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The Telegram bot token.
    pub telegram_bot_token: String,
    /// The Gemini API key. AI features are disabled when absent.
    pub gemini_api_key: Option<String>,
    /// The Gemini model name.
    pub gemini_model: String,
    /// The base URL of the Gemini REST API.
    pub gemini_api_url: String,
    /// Chat that receives error reports.
    pub developer_chat_id: Option<i64>,
    /// Group that receives the scheduled daily verse.
    pub target_group_id: Option<i64>,
    /// Path of the JSON settings file.
    pub settings_path: String,
    /// The URL of the dialogue state database.
    pub dialogue_database_url: String,
    /// Port of the keep-alive HTTP server.
    pub keep_alive_port: u16,
    /// The base URL of the equran.id API.
    pub equran_api_url: String,
    /// The base URL of the hadith API.
    pub hadith_api_url: String,
    /// The URL of the doa API.
    pub doa_api_url: String,
    /// The URL of the Asmaul Husna API.
    pub asmaul_husna_api_url: String,
    /// Warnings before an automatic ban, unless a group overrides it.
    pub default_warn_limit: u32,
    /// Offset of the local timezone used for schedules.
    pub utc_offset_hours: i32,
    /// Daily active window. `None` means always active.
    pub active_hours: Option<ActiveHours>,
    /// Local times at which the daily verse is posted.
    pub daily_verse_times: Vec<NaiveTime>,
    /// Timeout for outgoing HTTP requests.
    pub http_timeout_secs: u64,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    pub fn from_env() -> Result<Self, VarError> {
        let telegram_bot_token = env::var("TELOXIDE_TOKEN").or_else(|_| env::var("BOT_TOKEN"))?;

        Ok(Self {
            telegram_bot_token,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            developer_chat_id: env::var("DEVELOPER_CHAT_ID").ok().and_then(|v| v.parse().ok()),
            target_group_id: env::var("TARGET_GROUP_ID").ok().and_then(|v| v.parse().ok()),
            settings_path: env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string()),
            dialogue_database_url: env::var("DIALOGUE_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DIALOGUE_DATABASE_URL.to_string()),
            keep_alive_port: env::var("KEEP_ALIVE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_KEEP_ALIVE_PORT),
            equran_api_url: env::var("EQURAN_API_URL")
                .unwrap_or_else(|_| DEFAULT_EQURAN_API_URL.to_string()),
            hadith_api_url: env::var("HADITH_API_URL")
                .unwrap_or_else(|_| DEFAULT_HADITH_API_URL.to_string()),
            doa_api_url: env::var("DOA_API_URL").unwrap_or_else(|_| DEFAULT_DOA_API_URL.to_string()),
            asmaul_husna_api_url: env::var("ASMAUL_HUSNA_API_URL")
                .unwrap_or_else(|_| DEFAULT_ASMAUL_HUSNA_API_URL.to_string()),
            default_warn_limit: env::var("DEFAULT_WARN_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_WARN_LIMIT),
            utc_offset_hours: env::var("UTC_OFFSET_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|offset: &i32| (-12..=14).contains(offset))
                .unwrap_or(DEFAULT_UTC_OFFSET_HOURS),
            active_hours: env::var("ACTIVE_HOURS").ok().and_then(|v| ActiveHours::parse(&v)),
            daily_verse_times: env::var("DAILY_VERSE_TIMES")
                .ok()
                .and_then(|v| parse_times(&v))
                .or_else(|| parse_times(DEFAULT_DAILY_VERSE_TIMES))
                .unwrap_or_default(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    /// Returns whether the AI features can be enabled.
    pub fn ai_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

/// Parses a comma separated list of `HH:MM` times. Returns `None` if any entry
/// is malformed or the list is empty.
fn parse_times(s: &str) -> Option<Vec<NaiveTime>> {
    let times = s
        .split(',')
        .map(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
        .collect::<Option<Vec<_>>>()?;
    if times.is_empty() { None } else { Some(times) }
}

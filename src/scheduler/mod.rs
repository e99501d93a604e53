//! Time based jobs: the daily verse, one-shot reminders and the active hours
//! window.


use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Days, FixedOffset, NaiveTime, Offset, Timelike, Utc};
use teloxide::{
    types::{ChatId, MessageId},
    utils::html,
};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    config::{ActiveHours, Config},
    content::{ContentClient, ContentError},
    messaging::{MessagingError, MessagingService, utils::format_daily_verse},
    storage::{Feature, SettingsStorage, StorageError},
};

/// Longest delay accepted for a reminder.
pub const MAX_REMINDER_DELAY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Errors from posting the daily verse.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Fetching the verse failed.
    #[error("Failed to fetch the daily verse: {0}")]
    Content(#[from] ContentError),
    /// Reading the group settings failed.
    #[error("Failed to access storage: {0}")]
    Storage(#[from] StorageError),
    /// Sending the post failed.
    #[error("Failed to send the daily verse: {0}")]
    Messaging(#[from] MessagingError),
}

type Result<T> = std::result::Result<T, SchedulerError>;

/// Converts whole hours east of UTC into an offset. Out of range values fall
/// back to UTC.
pub fn local_offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| {
        tracing::warn!("Invalid UTC offset of {hours} hours, using UTC");
        Utc.fix()
    })
}

/// The daily window in which the bot answers updates.
#[derive(Debug, Clone, Copy)]
pub struct ActiveWindow {
    hours: Option<ActiveHours>,
    offset: FixedOffset,
}

impl ActiveWindow {
    /// Creates a window. `None` hours means always active.
    pub fn new(hours: Option<ActiveHours>, offset: FixedOffset) -> Self {
        Self { hours, offset }
    }

    /// The window configured by `ACTIVE_HOURS` and `UTC_OFFSET_HOURS`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.active_hours, local_offset(config.utc_offset_hours))
    }

    /// Returns whether `now` falls inside the window. Always true when no
    /// window is configured.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.hours {
            Some(hours) => hours.contains(now.with_timezone(&self.offset).hour()),
            None => true,
        }
    }

    /// Whether the bot should answer right now.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

/// Returns the first of `times` strictly after `now`, today or tomorrow.
pub fn next_run(now: DateTime<FixedOffset>, times: &[NaiveTime]) -> Option<DateTime<FixedOffset>> {
    let offset = *now.offset();
    let today = now.date_naive();

    times
        .iter()
        .filter_map(|time| {
            let date = if today.and_time(*time) > now.naive_local() {
                today
            } else {
                today.checked_add_days(Days::new(1))?
            };
            date.and_time(*time).and_local_timezone(offset).single()
        })
        .min()
}

/// Posts a random verse to the target group at the configured local times.
pub struct DailyVerseScheduler {
    content_client: Arc<dyn ContentClient>,
    storage: Arc<dyn SettingsStorage>,
    messaging_service: Arc<dyn MessagingService>,
    target_group: Option<ChatId>,
    times: Vec<NaiveTime>,
    offset: FixedOffset,
}

impl DailyVerseScheduler {
    /// Creates the scheduler with the target group and times from `config`.
    pub fn new(
        content_client: Arc<dyn ContentClient>,
        storage: Arc<dyn SettingsStorage>,
        messaging_service: Arc<dyn MessagingService>,
        config: &Config,
    ) -> Self {
        Self {
            content_client,
            storage,
            messaging_service,
            target_group: config.target_group_id.map(ChatId),
            times: config.daily_verse_times.clone(),
            offset: local_offset(config.utc_offset_hours),
        }
    }

    /// Runs forever. Failed posts are logged and the next slot is awaited.
    pub async fn run(&self) {
        tracing::debug!("Starting daily verse scheduler");

        loop {
            let now = Utc::now().with_timezone(&self.offset);
            let Some(next) = next_run(now, &self.times) else {
                tracing::warn!("No daily verse times configured, scheduler stopped");
                return;
            };

            tracing::debug!("Next daily verse at {next}");
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            tokio::time::sleep(wait).await;

            if let Err(e) = self.post_daily_verse().await {
                tracing::error!("Failed to post daily verse: {e}");
            }
        }
    }

    /// Sends one random verse to the target group, unless no group is
    /// configured or the group turned the feature off.
    pub async fn post_daily_verse(&self) -> Result<()> {
        let Some(chat_id) = self.target_group else {
            tracing::warn!("TARGET_GROUP_ID is not set, skipping daily verse");
            return Ok(());
        };

        let settings = self.storage.get_group_settings(chat_id).await?;
        if !settings.features.is_enabled(Feature::DailyVerse) {
            tracing::debug!("Daily verse is disabled for chat {chat_id}");
            return Ok(());
        }

        let verse = self.content_client.random_verse().await?;
        self.messaging_service.send_html(chat_id, format_daily_verse(&verse)).await?;
        tracing::info!("Posted daily verse {} to chat {chat_id}", verse.verse_ref);

        Ok(())
    }
}

/// Parses durations such as `10m`, `2h`, `1h30m` or `45s`. Units are `s`,
/// `m`, `h` and `d`. Zero durations are rejected.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let unit = match c {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 24 * 60 * 60,
            _ => return None,
        };
        let value: u64 = digits.parse().ok()?;
        total = total.checked_add(value.checked_mul(unit)?)?;
        digits.clear();
    }

    // Trailing number without a unit.
    if !digits.is_empty() || total == 0 {
        return None;
    }
    Some(Duration::from_secs(total))
}

/// Formats a duration in Indonesian, e.g. `1 jam 30 menit`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let parts = [
        (secs / 86_400, "hari"),
        (secs % 86_400 / 3_600, "jam"),
        (secs % 3_600 / 60, "menit"),
        (secs % 60, "detik"),
    ];

    let text = parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value} {unit}"))
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() { "0 detik".to_string() } else { text }
}

/// Replies to `reply_to` with the reminder once `delay` has passed. The task
/// lives only in memory and is lost on restart.
pub fn spawn_reminder(
    messaging_service: Arc<dyn MessagingService>,
    chat_id: ChatId,
    reply_to: MessageId,
    mention: String,
    text: String,
    delay: Duration,
) -> JoinHandle<()> {
    tracing::debug!("Scheduling reminder in chat {chat_id} after {delay:?}");

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let reminder = format!("⏰ <b>Pengingat</b> untuk {mention}:\n{}", html::escape(&text));
        if let Err(e) = messaging_service.reply_html(chat_id, reply_to, reminder, None).await {
            tracing::error!("Failed to send reminder to chat {chat_id}: {e}");
        }
    })
}

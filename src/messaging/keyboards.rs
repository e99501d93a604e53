use lazy_static::lazy_static;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use super::utils;
use crate::{
    bot_handler::CallbackAction,
    content::quran::VerseRef,
    storage::{Feature, GroupSettings},
};

/// Settings menu: one toggle per feature, the warning limit stepper, the
/// two text settings and a close button.
pub fn build_settings_keyboard(settings: &GroupSettings, warn_limit: u32) -> InlineKeyboardMarkup {
    let mut buttons: Vec<Vec<InlineKeyboardButton>> = Feature::ALL
        .iter()
        .map(|&feature| {
            let mark = if settings.features.is_enabled(feature) { "✅" } else { "❌" };
            vec![InlineKeyboardButton::callback(
                format!("{mark} {}", feature.label()),
                utils::serialize_action(&CallbackAction::ToggleFeature(feature)),
            )]
        })
        .collect();

    buttons.push(vec![
        InlineKeyboardButton::callback(
            "➖",
            utils::serialize_action(&CallbackAction::AdjustWarnLimit(-1)),
        ),
        InlineKeyboardButton::callback(
            format!("⚠️ Batas peringatan: {warn_limit}"),
            utils::serialize_action(&CallbackAction::Noop),
        ),
        InlineKeyboardButton::callback(
            "➕",
            utils::serialize_action(&CallbackAction::AdjustWarnLimit(1)),
        ),
    ]);
    buttons.push(vec![InlineKeyboardButton::callback(
        "✏️ Atur pesan sambutan",
        utils::serialize_action(&CallbackAction::SetWelcome),
    )]);
    buttons.push(vec![InlineKeyboardButton::callback(
        "📜 Atur peraturan",
        utils::serialize_action(&CallbackAction::SetRules),
    )]);
    buttons.push(vec![InlineKeyboardButton::callback(
        "🔒 Tutup",
        utils::serialize_action(&CallbackAction::CloseSettings),
    )]);

    InlineKeyboardMarkup::new(buttons)
}

/// A link to the verse on quran.com, if the URL can be built.
pub fn build_verse_keyboard(verse_ref: VerseRef) -> Option<InlineKeyboardMarkup> {
    let url = Url::parse(&format!("https://quran.com/{}/{}", verse_ref.surah, verse_ref.ayat))
        .map_err(|e| tracing::warn!("Failed to build verse URL for {verse_ref}: {e}"))
        .ok()?;

    Some(InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        "🔗 Baca di Quran.com",
        url,
    )]]))
}

lazy_static! {
    /// Shortcuts shown under the `/start` greeting.
    pub static ref COMMAND_KEYBOARD: InlineKeyboardMarkup = InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("ℹ️ Bantuan", utils::serialize_action(&CallbackAction::Help)),
            InlineKeyboardButton::callback(
                "📜 Peraturan",
                utils::serialize_action(&CallbackAction::Rules)
            ),
        ],
        vec![
            InlineKeyboardButton::callback("🤲 Doa Harian", utils::serialize_action(&CallbackAction::Doa)),
            InlineKeyboardButton::callback(
                "💎 Mutiara Kata",
                utils::serialize_action(&CallbackAction::MutiaraKata)
            ),
        ],
        vec![InlineKeyboardButton::callback(
            "✨ Asmaul Husna",
            utils::serialize_action(&CallbackAction::AsmaulHusna)
        )],
    ]);
}

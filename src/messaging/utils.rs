use teloxide::{types::User, utils::html};

use crate::{
    bot_handler::CallbackAction,
    content::{
        asmaul_husna::AsmaulHusna, doa::Doa, hadith::Hadith, quotes::Quote, quran::Tafsir,
        quran::Verse,
    },
};

/// Telegram rejects text messages longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;
/// Size of each part when a long text is split.
pub const CHUNK_CHARS: usize = 4000;

/// Serializes a `CallbackAction` to a JSON string. Used for keyboard buttons.
/// Falls back to an empty payload, which the callback handler ignores.
pub fn serialize_action(action: &CallbackAction) -> String {
    serde_json::to_string(action).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize callback action {action:?}: {e}");
        String::new()
    })
}

/// An HTML link that notifies the user.
pub fn user_mention(user: &User) -> String {
    format!(r#"<a href="tg://user?id={}">{}</a>"#, user.id, html::escape(&user.full_name()))
}

/// Fills the `{user_mention}` and `{chat_title}` placeholders of a welcome
/// template. The template itself is HTML written by the group admins.
pub fn render_welcome(template: &str, user: &User, chat_title: &str) -> String {
    template
        .replace("{user_mention}", &user_mention(user))
        .replace("{chat_title}", &html::escape(chat_title))
}

/// Splits text into parts of at most `max_chars` characters, never inside a
/// UTF-8 sequence.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(max_chars.max(1)).map(|chunk| chunk.iter().collect()).collect()
}

/// A verse with its translation.
pub fn format_verse(verse: &Verse) -> String {
    format!(
        "📖 <b>{} ({})</b>\n\n<b>{}</b>\n\n<i>Artinya: \"{}\"</i>",
        html::escape(&verse.surah_name),
        verse.verse_ref,
        html::escape(&verse.arabic),
        html::escape(&verse.translation),
    )
}

/// The scheduled daily verse post.
pub fn format_daily_verse(verse: &Verse) -> String {
    format!("✨ <b>Ayat Harian</b> ✨\n\n{}\n\n#AyatHarian", format_verse(verse))
}

/// The part of a tafsir reply that precedes the tafsir text.
pub fn format_tafsir_header(tafsir: &Tafsir) -> String {
    format!(
        "📜 <b>Tafsir {} ({})</b>\n\n<b>{}</b>\n\n<b>Tafsir (Kemenag):</b>\n",
        html::escape(&tafsir.surah_name),
        tafsir.verse_ref,
        html::escape(&tafsir.verse_text),
    )
}

/// Title and Arabic text of a hadith. The translation follows as the message body.
pub fn format_hadith_header(hadith: &Hadith) -> String {
    format!(
        "📚 <b>{} No. {}</b>\n\n<b>{}</b>\n\n",
        html::escape(&hadith.book_name),
        hadith.number,
        html::escape(&hadith.arabic),
    )
}

/// A prayer with its transliteration and translation.
pub fn format_doa(doa: &Doa) -> String {
    let mut text = format!("🤲 <b>{}</b>\n\n<b>{}</b>", html::escape(&doa.judul), html::escape(&doa.arab));
    if !doa.latin.is_empty() {
        text.push_str(&format!("\n\n<i>{}</i>", html::escape(&doa.latin)));
    }
    text.push_str(&format!("\n\nArtinya: \"{}\"", html::escape(&doa.terjemah)));
    text
}

/// One of the 99 names.
pub fn format_asmaul_husna(name: &AsmaulHusna) -> String {
    format!(
        "✨ <b>Asmaul Husna #{}</b>\n\n<b>{}</b>\n<b>{}</b>\n\nArtinya: {}",
        name.urutan,
        html::escape(&name.arab),
        html::escape(&name.latin),
        html::escape(&name.arti),
    )
}

/// A scholar quote.
pub fn format_quote(quote: &Quote) -> String {
    format!(
        "💎 <b>Mutiara Kata</b>\n\n<i>\"{}\"</i>\n\n~ {}",
        html::escape(quote.text),
        html::escape(quote.author)
    )
}

/// The `/statistic` reply.
pub fn format_statistic(
    chat_title: &str,
    member_count: u32,
    admin_count: usize,
    warned_users: usize,
) -> String {
    format!(
        "📊 <b>Statistik Grup {}</b>\n\n👥 Jumlah anggota: {member_count}\n👮 Jumlah admin: \
         {admin_count}\n⚠️ Anggota dengan peringatan: {warned_users}",
        html::escape(chat_title)
    )
}


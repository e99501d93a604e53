use std::str::FromStr;

use crate::{
    bot_handler::{BotHandlerResult, Context},
    content::{ContentError, quran::VerseRef},
    messaging::{keyboards::build_verse_keyboard, utils::format_verse},
};

/// Reasons a `surah:ayat` argument is rejected.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum VerseArgError {
    Missing,
    Invalid,
}

/// Parses the first word of a command argument as `surah:ayat`.
pub(crate) fn parse_verse_arg(arg: &str) -> Result<VerseRef, VerseArgError> {
    let first = arg.split_whitespace().next().ok_or(VerseArgError::Missing)?;
    VerseRef::from_str(first).map_err(|_| VerseArgError::Invalid)
}

/// Replies to an invalid `surah:ayat` argument.
pub(crate) async fn reply_arg_error(
    ctx: &Context<'_>,
    command: &str,
    err: VerseArgError,
) -> BotHandlerResult<()> {
    match err {
        VerseArgError::Missing => {
            ctx.reply(format!(
                "Format salah: <code>/{command} [surah]:[ayat]</code>\nContoh: <code>/{command} 1:5</code>"
            ))
            .await
        }
        VerseArgError::Invalid => {
            ctx.reply(format!(
                "Format nomor surah atau ayat tidak valid. Contoh: <code>/{command} 2:255</code>"
            ))
            .await
        }
    }
}

/// Removes the "searching" message. Failures are only logged.
pub(crate) async fn remove_status(ctx: &Context<'_>, status: &teloxide::types::Message) {
    if let Err(e) = ctx.handler.messaging_service.delete_message(status.chat.id, status.id).await {
        tracing::warn!("Failed to delete status message: {e}");
    }
}

pub async fn handle(ctx: Context<'_>, arg: &str) -> BotHandlerResult<()> {
    let verse_ref = match parse_verse_arg(arg) {
        Ok(verse_ref) => verse_ref,
        Err(err) => return reply_arg_error(&ctx, "ayat", err).await,
    };

    let chat_id = ctx.message.chat.id;
    let status = ctx
        .handler
        .messaging_service
        .send_status_msg(chat_id, ctx.message.id, "📖 Sedang mencari ayat...")
        .await?;
    let result = ctx.handler.content_client.get_verse(verse_ref).await;
    remove_status(&ctx, &status).await;

    match result {
        Ok(verse) => {
            ctx.handler
                .messaging_service
                .reply_html(
                    chat_id,
                    ctx.message.id,
                    format_verse(&verse),
                    build_verse_keyboard(verse.verse_ref),
                )
                .await?;
            Ok(())
        }
        Err(ContentError::NotFound) => {
            ctx.reply(format!(
                "Maaf, Surah {} Ayat {} tidak dapat ditemukan.",
                verse_ref.surah, verse_ref.ayat
            ))
            .await
        }
        Err(e) => {
            tracing::error!("Failed to fetch verse {verse_ref}: {e}");
            ctx.reply("Maaf, terjadi kesalahan pada server Al-Qur'an. Coba lagi nanti.").await
        }
    }
}

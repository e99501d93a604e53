use crate::{
    bot_handler::{
        BotHandlerResult, Context,
        commands::ayat::{parse_verse_arg, remove_status, reply_arg_error},
    },
    content::ContentError,
    messaging::utils::format_tafsir_header,
};

pub async fn handle(ctx: Context<'_>, arg: &str) -> BotHandlerResult<()> {
    let verse_ref = match parse_verse_arg(arg) {
        Ok(verse_ref) => verse_ref,
        Err(err) => return reply_arg_error(&ctx, "tafsir", err).await,
    };

    let chat_id = ctx.message.chat.id;
    let status = ctx
        .handler
        .messaging_service
        .send_status_msg(chat_id, ctx.message.id, "📜 Sedang mencari tafsir...")
        .await?;
    let result = ctx.handler.content_client.get_tafsir(verse_ref).await;
    remove_status(&ctx, &status).await;

    match result {
        Ok(tafsir) => {
            let header = format_tafsir_header(&tafsir);
            ctx.handler
                .messaging_service
                .reply_long_html(chat_id, ctx.message.id, header, tafsir.text)
                .await?;
            Ok(())
        }
        Err(ContentError::NotFound) => {
            ctx.reply(format!(
                "Maaf, Tafsir untuk Surah {} Ayat {} tidak dapat ditemukan.",
                verse_ref.surah, verse_ref.ayat
            ))
            .await
        }
        Err(e) => {
            tracing::error!("Failed to fetch tafsir {verse_ref}: {e}");
            ctx.reply("Maaf, terjadi kesalahan pada server Tafsir. Coba lagi nanti.").await
        }
    }
}

use crate::{
    ai::prompts,
    bot_handler::{BotHandlerResult, Context, utils::AI_UNAVAILABLE_MSG},
};

pub async fn handle(ctx: Context<'_>, question: &str) -> BotHandlerResult<()> {
    let Some(model) = ctx.handler.language_model.as_ref() else {
        return ctx.reply(AI_UNAVAILABLE_MSG).await;
    };

    let question = question.trim();
    if question.is_empty() {
        return ctx
            .reply("Silakan tulis pertanyaan Anda. Contoh: <code>/tanya apa itu zakat fitrah?</code>")
            .await;
    }

    let chat_id = ctx.message.chat.id;
    ctx.handler.show_typing(chat_id).await;

    match model.generate(&prompts::question(question)).await {
        Ok(answer) => {
            ctx.handler
                .messaging_service
                .reply_long_html(chat_id, ctx.message.id, "🤖 <b>Jawaban</b>\n\n".to_string(), answer)
                .await?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to answer question in chat {chat_id}: {e}");
            ctx.reply("Maaf, terjadi kesalahan saat memproses pertanyaan Anda.").await
        }
    }
}

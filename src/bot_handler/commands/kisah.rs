use crate::{
    ai::prompts,
    bot_handler::{BotHandlerResult, Context, utils::AI_UNAVAILABLE_MSG},
};

pub async fn handle(ctx: Context<'_>, name: &str) -> BotHandlerResult<()> {
    let Some(model) = ctx.handler.language_model.as_ref() else {
        return ctx.reply(AI_UNAVAILABLE_MSG).await;
    };

    let name = Some(name.trim()).filter(|n| !n.is_empty());
    let chat_id = ctx.message.chat.id;
    ctx.handler.show_typing(chat_id).await;

    match model.generate(&prompts::story(name)).await {
        Ok(story) => {
            ctx.handler
                .messaging_service
                .reply_long_html(chat_id, ctx.message.id, "📖 <b>Kisah</b>\n\n".to_string(), story)
                .await?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to generate story {name:?} in chat {chat_id}: {e}");
            ctx.reply("Maaf, gagal membuat kisah. Coba lagi nanti.").await
        }
    }
}

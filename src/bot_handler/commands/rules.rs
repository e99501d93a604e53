use crate::bot_handler::{BotHandlerResult, Context};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    let settings = ctx.handler.moderation_service.group_settings(ctx.message.chat.id).await?;
    ctx.reply(settings.rules_text()).await
}

use crate::bot_handler::{BotHandlerResult, Context, callbacks::admin_query};

pub async fn handle(ctx: Context<'_>, delta: i32) -> BotHandlerResult<()> {
    let Some(query) = admin_query(&ctx).await? else {
        return Ok(());
    };
    let chat_id = ctx.message.chat.id;

    let limit = ctx.handler.moderation_service.adjust_warn_limit(chat_id, delta).await?;
    ctx.handler
        .messaging_service
        .answer_callback_query(&query.id, &format!("Batas peringatan: {limit}"))
        .await?;

    let settings = ctx.handler.moderation_service.group_settings(chat_id).await?;
    ctx.handler.messaging_service.edit_settings_menu(chat_id, ctx.message.id, settings, limit).await?;

    Ok(())
}

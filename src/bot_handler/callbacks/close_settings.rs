use crate::bot_handler::{BotHandlerResult, Context, callbacks::admin_query};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    let Some(query) = admin_query(&ctx).await? else {
        return Ok(());
    };

    ctx.handler.messaging_service.close_settings_menu(ctx.message.chat.id, ctx.message.id).await?;
    ctx.handler.messaging_service.answer_callback_query(&query.id, "Pengaturan ditutup").await?;

    Ok(())
}

use crate::bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context, utils};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    if !utils::require_group_admin(&ctx).await? {
        return Ok(());
    }

    let chat_id = ctx.message.chat.id;
    let settings = ctx.handler.moderation_service.group_settings(chat_id).await?;
    let warn_limit = ctx.handler.moderation_service.warn_limit(chat_id).await?;

    ctx.handler.messaging_service.send_settings_menu(chat_id, settings, warn_limit).await?;

    // A new menu drops any input that was still pending.
    ctx.dialogue.update(CommandState::None).await.map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

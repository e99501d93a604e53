use futures::{TryFutureExt, try_join};

use crate::{
    bot_handler::{BotHandlerError, BotHandlerResult, Context, callbacks::admin_query},
    storage::Feature,
};

pub async fn handle(ctx: Context<'_>, feature: Feature) -> BotHandlerResult<()> {
    let Some(query) = admin_query(&ctx).await? else {
        return Ok(());
    };
    let chat_id = ctx.message.chat.id;

    let enabled = ctx.handler.moderation_service.toggle_feature(chat_id, feature).await?;

    let state = if enabled { "aktif" } else { "nonaktif" };
    let toast = format!("{} {state}", feature.label());

    // Concurrently answer the query and fetch the values shown in the menu.
    let (_, settings, warn_limit) = try_join!(
        ctx.handler
            .messaging_service
            .answer_callback_query(&query.id, &toast)
            .map_err(BotHandlerError::from),
        ctx.handler.moderation_service.group_settings(chat_id).map_err(BotHandlerError::from),
        ctx.handler.moderation_service.warn_limit(chat_id).map_err(BotHandlerError::from)
    )?;

    ctx.handler
        .messaging_service
        .edit_settings_menu(chat_id, ctx.message.id, settings, warn_limit)
        .await?;

    Ok(())
}

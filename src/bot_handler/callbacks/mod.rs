pub mod close_settings;
pub mod text_setting;
pub mod toggle_feature;
pub mod warn_limit;

use teloxide::types::CallbackQuery;

use crate::bot_handler::{BotHandlerError, BotHandlerResult, Context};

const ADMIN_ONLY_TOAST: &str = "Hanya admin yang dapat mengubah pengaturan.";

/// Returns the query when its sender is an admin of the chat holding the
/// menu. Other users get a toast and `None`.
async fn admin_query<'a>(ctx: &Context<'a>) -> BotHandlerResult<Option<&'a CallbackQuery>> {
    let query = ctx
        .query
        .ok_or_else(|| BotHandlerError::InvalidInput("Callback query is missing".to_string()))?;

    if !ctx.handler.group_admin.is_admin(ctx.message.chat.id, query.from.id).await? {
        ctx.handler.messaging_service.answer_callback_query(&query.id, ADMIN_ONLY_TOAST).await?;
        return Ok(None);
    }
    Ok(Some(query))
}

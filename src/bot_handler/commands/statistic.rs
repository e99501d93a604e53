use futures::{TryFutureExt, try_join};

use crate::{
    bot_handler::{BotHandlerError, BotHandlerResult, Context, utils},
    messaging::utils::format_statistic,
};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    if !utils::is_group(&ctx.message.chat) {
        return ctx.reply(utils::GROUP_ONLY_MSG).await;
    }

    let chat_id = ctx.message.chat.id;

    // Concurrently fetch the member, admin and warning counts.
    let (members, admins, warned) = try_join!(
        ctx.handler.group_admin.member_count(chat_id).map_err(BotHandlerError::from),
        ctx.handler.group_admin.admin_count(chat_id).map_err(BotHandlerError::from),
        ctx.handler.moderation_service.count_warned_users(chat_id).map_err(BotHandlerError::from)
    )?;

    let title = ctx.message.chat.title().unwrap_or("grup ini");
    ctx.reply(format_statistic(title, members, admins, warned)).await
}

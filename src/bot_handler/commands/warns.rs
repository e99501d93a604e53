use crate::{
    bot_handler::{BotHandlerResult, Context, utils},
    messaging::utils::user_mention,
};

/// Shows the warnings of the replied-to user, or of the sender.
pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    if !utils::is_group(&ctx.message.chat) {
        return ctx.reply(utils::GROUP_ONLY_MSG).await;
    }

    let Some(user) = utils::reply_target(ctx.message).or(ctx.sender()) else {
        return Ok(());
    };

    let (count, limit) =
        ctx.handler.moderation_service.warnings(ctx.message.chat.id, user.id).await?;

    ctx.reply(format!("{} memiliki {count}/{limit} peringatan.", user_mention(user))).await
}

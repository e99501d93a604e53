use crate::{
    bot_handler::{BotHandlerResult, Context, utils},
    messaging::utils::user_mention,
};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    if !utils::require_group_admin(&ctx).await? {
        return Ok(());
    }

    let Some(target) = utils::reply_target(ctx.message) else {
        return ctx.reply("Balas pesan anggota yang peringatannya ingin dihapus dengan /unwarn.").await;
    };

    let mention = user_mention(target);
    if ctx.handler.moderation_service.reset(ctx.message.chat.id, target.id).await? {
        ctx.reply(format!("✅ Peringatan untuk {mention} telah dihapus.")).await
    } else {
        ctx.reply(format!("{mention} tidak memiliki peringatan.")).await
    }
}

use crate::{
    bot_handler::{BotHandlerResult, Context, utils},
    messaging::utils::user_mention,
};

pub async fn handle(ctx: Context<'_>, reason: &str) -> BotHandlerResult<()> {
    if !utils::require_group_admin(&ctx).await? {
        return Ok(());
    }

    let Some(target) = utils::reply_target(ctx.message) else {
        return ctx
            .reply("Balas pesan anggota yang ingin dikeluarkan dengan /kick [alasan].")
            .await;
    };

    if !utils::ensure_punishable(&ctx, target).await? {
        return Ok(());
    }

    let chat_id = ctx.message.chat.id;
    let mention = user_mention(target);

    match ctx.handler.group_admin.kick_member(chat_id, target.id).await {
        Ok(()) => {
            ctx.reply(format!(
                "👢 {mention} telah dikeluarkan dari grup.{}",
                utils::reason_line(reason)
            ))
            .await
        }
        Err(e) => {
            tracing::error!("Failed to kick user {} from chat {chat_id}: {e}", target.id);
            ctx.reply(format!(
                "Gagal mengeluarkan {mention}. Pastikan bot adalah admin dengan izin memblokir \
                 anggota."
            ))
            .await
        }
    }
}

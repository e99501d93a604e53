use crate::bot_handler::{BotHandlerResult, Context, utils};

pub async fn handle(ctx: Context<'_>, reason: &str) -> BotHandlerResult<()> {
    if !utils::require_group_admin(&ctx).await? {
        return Ok(());
    }

    let Some(target) = utils::reply_target(ctx.message) else {
        return ctx
            .reply("Balas pesan anggota yang ingin diberi peringatan dengan /warn [alasan].")
            .await;
    };

    if !utils::ensure_punishable(&ctx, target).await? {
        return Ok(());
    }

    utils::apply_warning(&ctx, target, reason).await
}

use teloxide::{
    types::{Chat, Message, User},
    utils::html,
};

use crate::{
    bot_handler::{BotHandlerResult, Context},
    messaging::utils::user_mention,
    moderation::WarnOutcome,
};

pub const GROUP_ONLY_MSG: &str = "Perintah ini hanya dapat digunakan di dalam grup.";
pub const ADMIN_ONLY_MSG: &str = "Maaf, hanya admin grup yang dapat menggunakan perintah ini.";
pub const AI_UNAVAILABLE_MSG: &str = "Maaf, fitur AI sedang tidak tersedia.";

pub fn is_group(chat: &Chat) -> bool {
    chat.is_group() || chat.is_supergroup()
}

/// The author of the message that `msg` replies to.
pub fn reply_target(msg: &Message) -> Option<&User> {
    msg.reply_to_message().and_then(|replied| replied.from.as_ref())
}

/// Checks that the update comes from a group admin. Replies with a refusal and
/// returns `false` otherwise.
pub async fn require_group_admin(ctx: &Context<'_>) -> BotHandlerResult<bool> {
    if !is_group(&ctx.message.chat) {
        ctx.reply(GROUP_ONLY_MSG).await?;
        return Ok(false);
    }

    let Some(sender) = ctx.sender() else {
        return Ok(false);
    };

    if !ctx.handler.group_admin.is_admin(ctx.message.chat.id, sender.id).await? {
        ctx.reply(ADMIN_ONLY_MSG).await?;
        return Ok(false);
    }
    Ok(true)
}

/// Checks that moderation may act on `target`. Bots and admins are exempt.
pub async fn ensure_punishable(ctx: &Context<'_>, target: &User) -> BotHandlerResult<bool> {
    if target.is_bot || ctx.handler.group_admin.is_admin(ctx.message.chat.id, target.id).await? {
        ctx.reply("Admin atau bot tidak dapat diberi tindakan moderasi.").await?;
        return Ok(false);
    }
    Ok(true)
}

/// Formats the optional reason of a moderation action.
pub fn reason_line(reason: &str) -> String {
    let reason = reason.trim();
    if reason.is_empty() { String::new() } else { format!("\nAlasan: {}", html::escape(reason)) }
}

/// Adds a warning to `target` and bans them when they reach the group's
/// limit.
pub async fn apply_warning(ctx: &Context<'_>, target: &User, reason: &str) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let mention = user_mention(target);

    match ctx.handler.moderation_service.warn(chat_id, target.id).await? {
        WarnOutcome::Warned { count, limit } => {
            ctx.reply(format!(
                "⚠️ {mention} mendapat peringatan ({count}/{limit}).{}",
                reason_line(reason)
            ))
            .await
        }
        WarnOutcome::Banned { limit } => {
            match ctx.handler.group_admin.ban_member(chat_id, target.id).await {
                Ok(()) => {
                    ctx.reply(format!(
                        "🚫 {mention} telah mencapai {limit} peringatan dan diblokir dari grup.{}",
                        reason_line(reason)
                    ))
                    .await
                }
                Err(e) => {
                    tracing::error!("Failed to ban user {} in chat {chat_id}: {e}", target.id);
                    ctx.reply(format!(
                        "⚠️ {mention} telah mencapai batas peringatan, tetapi bot gagal \
                         memblokirnya. Pastikan bot adalah admin dengan izin memblokir anggota."
                    ))
                    .await
                }
            }
        }
    }
}

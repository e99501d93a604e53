use teloxide::utils::html;

use crate::{
    ai::{ModerationVerdict, prompts},
    bot_handler::{BotHandlerResult, Context, utils},
    messaging::utils::user_mention,
    storage::Feature,
};

/// Checks a group message with the language model and warns the author of a
/// violating message.
pub async fn handle(ctx: &Context<'_>) -> BotHandlerResult<()> {
    let msg = ctx.message;
    if !utils::is_group(&msg.chat) {
        return Ok(());
    }
    let Some(text) = msg.text().filter(|t| !t.starts_with('/')) else {
        return Ok(());
    };
    let Some(model) = ctx.handler.language_model.as_ref() else {
        return Ok(());
    };
    let Some(sender) = msg.from.as_ref().filter(|user| !user.is_bot) else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let settings = ctx.handler.moderation_service.group_settings(chat_id).await?;
    if !settings.features.is_enabled(Feature::AiModeration) {
        return Ok(());
    }

    let reply = match model.generate(&prompts::moderation(&sender.full_name(), text)).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Moderation check failed in chat {chat_id}: {e}");
            return Ok(());
        }
    };

    let ModerationVerdict::Violation(reason) = ModerationVerdict::from_reply(&reply) else {
        return Ok(());
    };

    if ctx.handler.group_admin.is_admin(chat_id, sender.id).await? {
        tracing::debug!("Ignoring moderation verdict for admin {} in chat {chat_id}", sender.id);
        return Ok(());
    }

    tracing::info!("Message {} from user {} flagged in chat {chat_id}", msg.id, sender.id);

    ctx.reply(format!(
        "⚠️ Peringatan untuk {}:\n<i>{}</i>",
        user_mention(sender),
        html::escape(&reason)
    ))
    .await?;

    if let Err(e) = ctx.handler.messaging_service.delete_message(chat_id, msg.id).await {
        tracing::warn!("Failed to delete flagged message {} in chat {chat_id}: {e}", msg.id);
    }

    utils::apply_warning(ctx, sender, "").await
}

use teloxide::utils::html;

use crate::bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context};

/// Stores the text of a pending welcome message or rules input. Returns
/// whether the message was consumed.
pub async fn handle(ctx: &Context<'_>) -> BotHandlerResult<bool> {
    let state = ctx.dialogue.get().await.map_err(BotHandlerError::DialogueError)?;

    let (admin_id, is_welcome) = match state {
        Some(CommandState::AwaitingWelcomeMessage { admin_id }) => (admin_id, true),
        Some(CommandState::AwaitingRules { admin_id }) => (admin_id, false),
        _ => return Ok(false),
    };

    // Other members keep talking while the admin types.
    if ctx.sender().map(|user| user.id) != Some(admin_id) {
        return Ok(false);
    }
    // Commands for other bots and unknown commands are not input.
    let Some(text) =
        ctx.message.text().map(str::trim).filter(|t| !t.is_empty() && !t.starts_with('/'))
    else {
        return Ok(false);
    };

    let chat_id = ctx.message.chat.id;
    let text = html::escape(text);

    let confirmation = if is_welcome {
        ctx.handler.moderation_service.set_welcome_message(chat_id, text).await?;
        "✅ Pesan sambutan berhasil diperbarui."
    } else {
        ctx.handler.moderation_service.set_rules(chat_id, text).await?;
        "✅ Peraturan grup berhasil diperbarui."
    };
    tracing::info!("Admin {admin_id} updated settings text in chat {chat_id}");

    ctx.dialogue.exit().await.map_err(BotHandlerError::DialogueError)?;
    ctx.reply(confirmation).await?;

    Ok(true)
}

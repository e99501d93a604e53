use crate::bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    let state = ctx.dialogue.get().await.map_err(BotHandlerError::DialogueError)?;

    let pending_admin = match state {
        Some(CommandState::AwaitingWelcomeMessage { admin_id })
        | Some(CommandState::AwaitingRules { admin_id }) => admin_id,
        _ => return ctx.reply("Tidak ada pengaturan yang sedang berlangsung.").await,
    };

    // Only the admin who opened the input may cancel it.
    if ctx.sender().map(|user| user.id) != Some(pending_admin) {
        return Ok(());
    }

    ctx.dialogue.exit().await.map_err(BotHandlerError::DialogueError)?;
    ctx.reply("Pengaturan dibatalkan.").await
}

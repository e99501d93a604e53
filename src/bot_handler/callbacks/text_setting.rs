use crate::bot_handler::{
    BotHandlerError, BotHandlerResult, CommandState, Context, callbacks::admin_query,
};

/// A free text group setting entered through the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSetting {
    Welcome,
    Rules,
}

pub async fn handle(ctx: Context<'_>, setting: TextSetting) -> BotHandlerResult<()> {
    let Some(query) = admin_query(&ctx).await? else {
        return Ok(());
    };
    let admin_id = query.from.id;

    let (state, prompt) = match setting {
        TextSetting::Welcome => (
            CommandState::AwaitingWelcomeMessage { admin_id },
            "Kirim pesan sambutan baru. Gunakan {user_mention} untuk menyebut anggota baru dan \
             {chat_title} untuk nama grup.\nKetik /batal untuk membatalkan.",
        ),
        TextSetting::Rules => (
            CommandState::AwaitingRules { admin_id },
            "Kirim teks peraturan grup yang baru.\nKetik /batal untuk membatalkan.",
        ),
    };

    ctx.dialogue.update(state).await.map_err(BotHandlerError::DialogueError)?;
    ctx.handler.messaging_service.answer_callback_query(&query.id, "").await?;
    ctx.handler.messaging_service.prompt_for_input(ctx.message.chat.id, ctx.message.id, prompt).await?;

    Ok(())
}

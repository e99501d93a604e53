use crate::{
    bot_handler::{BotHandlerResult, Context},
    messaging::utils::render_welcome,
    storage::Feature,
};

pub async fn handle(ctx: &Context<'_>) -> BotHandlerResult<()> {
    let msg = ctx.message;
    let Some(members) = msg.new_chat_members() else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let settings = ctx.handler.moderation_service.group_settings(chat_id).await?;
    if !settings.features.is_enabled(Feature::Welcome) {
        return Ok(());
    }

    let chat_title = msg.chat.title().unwrap_or("grup ini");
    for member in members.iter().filter(|member| !member.is_bot) {
        let text = render_welcome(settings.welcome_template(), member, chat_title);
        ctx.handler.messaging_service.send_html(chat_id, text).await?;
    }

    Ok(())
}

use crate::{
    bot_handler::{BotHandlerResult, Context},
    messaging::utils::user_mention,
    scheduler::{self, MAX_REMINDER_DELAY},
};

const USAGE: &str = "Format: <code>/ingatkan [waktu] [pesan]</code>\n\
                     Contoh: <code>/ingatkan 10m Sholat Dzuhur</code>, \
                     <code>/ingatkan 1h30m Kajian</code>";

pub async fn handle(ctx: Context<'_>, args: &str) -> BotHandlerResult<()> {
    let Some((duration, text)) = args.trim().split_once(char::is_whitespace) else {
        return ctx.reply(USAGE).await;
    };
    let text = text.trim();

    let Some(delay) = scheduler::parse_duration(duration) else {
        return ctx.reply(USAGE).await;
    };
    if text.is_empty() {
        return ctx.reply(USAGE).await;
    }
    if delay > MAX_REMINDER_DELAY {
        return ctx.reply("Pengingat maksimal 7 hari.").await;
    }

    let Some(sender) = ctx.sender() else {
        return Ok(());
    };

    scheduler::spawn_reminder(
        ctx.handler.messaging_service.clone(),
        ctx.message.chat.id,
        ctx.message.id,
        user_mention(sender),
        text.to_string(),
        delay,
    );

    ctx.reply(format!("⏰ Baik, saya akan mengingatkan dalam {}.", scheduler::format_duration(delay)))
        .await
}

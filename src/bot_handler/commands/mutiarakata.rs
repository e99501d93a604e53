use crate::{
    bot_handler::{BotHandlerResult, Context},
    content::quotes::random_quote,
    messaging::utils::format_quote,
};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    ctx.reply(format_quote(&random_quote())).await
}

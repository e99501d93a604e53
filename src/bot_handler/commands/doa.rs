use crate::{
    bot_handler::{BotHandlerResult, Context},
    messaging::utils::format_doa,
};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    match ctx.handler.content_client.random_doa().await {
        Ok(doa) => ctx.reply(format_doa(&doa)).await,
        Err(e) => {
            tracing::error!("Failed to fetch doa: {e}");
            ctx.reply("Maaf, gagal mengambil doa harian. Coba lagi nanti.").await
        }
    }
}

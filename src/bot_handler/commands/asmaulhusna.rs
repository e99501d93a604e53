use crate::{
    bot_handler::{BotHandlerResult, Context},
    content::asmaul_husna::NAMES_COUNT,
    messaging::utils::format_asmaul_husna,
};

pub async fn handle(ctx: Context<'_>, arg: &str) -> BotHandlerResult<()> {
    let arg = arg.trim();
    let number = if arg.is_empty() {
        None
    } else {
        match arg.parse::<u32>() {
            Ok(n) if (1..=NAMES_COUNT).contains(&n) => Some(n),
            _ => {
                return ctx
                    .reply(format!("Nomor Asmaul Husna harus antara 1 dan {NAMES_COUNT}."))
                    .await;
            }
        }
    };

    match ctx.handler.content_client.get_asmaul_husna(number).await {
        Ok(name) => ctx.reply(format_asmaul_husna(&name)).await,
        Err(e) => {
            tracing::error!("Failed to fetch Asmaul Husna {number:?}: {e}");
            ctx.reply("Maaf, gagal mengambil Asmaul Husna. Coba lagi nanti.").await
        }
    }
}

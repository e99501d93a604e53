use crate::{
    bot_handler::{BotHandlerResult, Context},
    content::{
        ContentError,
        hadith::{BOOKS, DEFAULT_BOOK, normalize_book},
    },
    messaging::utils::format_hadith_header,
};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HadithArgs {
    Valid { book: &'static str, number: Option<u32> },
    UnknownBook,
    InvalidNumber,
}

/// Parses `[book] [number]`. A trailing number selects the hadith and the
/// remaining words name the book, which defaults to Bukhari.
pub(crate) fn parse_args(arg: &str) -> HadithArgs {
    let mut words: Vec<&str> = arg.split_whitespace().collect();

    let number = match words.last().map(|w| w.parse::<u32>()) {
        Some(Ok(0)) => return HadithArgs::InvalidNumber,
        Some(Ok(number)) => {
            words.pop();
            Some(number)
        }
        _ => None,
    };

    if words.is_empty() {
        return HadithArgs::Valid { book: DEFAULT_BOOK, number };
    }

    match normalize_book(&words.join(" ")) {
        Some(book) => HadithArgs::Valid { book, number },
        None => HadithArgs::UnknownBook,
    }
}

pub async fn handle(ctx: Context<'_>, arg: &str) -> BotHandlerResult<()> {
    let (book, number) = match parse_args(arg) {
        HadithArgs::Valid { book, number } => (book, number),
        HadithArgs::UnknownBook => {
            return ctx
                .reply(format!(
                    "Kitab tidak dikenal. Pilihan yang tersedia: {}\nContoh: <code>/hadits muslim 10</code>",
                    BOOKS.join(", ")
                ))
                .await;
        }
        HadithArgs::InvalidNumber => {
            return ctx.reply("Nomor hadits harus lebih dari 0.").await;
        }
    };

    let chat_id = ctx.message.chat.id;
    ctx.handler.show_typing(chat_id).await;

    match ctx.handler.content_client.get_hadith(book, number).await {
        Ok(hadith) => {
            ctx.handler
                .messaging_service
                .reply_long_html(
                    chat_id,
                    ctx.message.id,
                    format_hadith_header(&hadith),
                    hadith.translation,
                )
                .await?;
            Ok(())
        }
        Err(ContentError::NotFound) => {
            let wanted = number.map(|n| format!(" nomor {n}")).unwrap_or_default();
            ctx.reply(format!("Maaf, hadits {book}{wanted} tidak ditemukan.")).await
        }
        Err(e) => {
            tracing::error!("Failed to fetch hadith {book} {number:?}: {e}");
            ctx.reply("Maaf, gagal mengambil hadits. Coba lagi nanti.").await
        }
    }
}

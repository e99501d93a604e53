use mockall::predicate::*;

use super::{test_helpers::*, *};
use crate::{
    ai::AiError,
    content::{
        ContentError,
        doa::Doa,
        quran::{Tafsir, Verse, VerseRef},
    },
    moderation::WarnOutcome,
    storage::{Feature, GroupSettings},
};

fn member() -> serde_json::Value {
    user_json(MEMBER_ID, "Budi", false)
}

fn expect_admin(mocks: &mut Mocks, user_id: UserId, is_admin: bool) {
    mocks
        .group_admin
        .expect_is_admin()
        .with(eq(GROUP_ID), eq(user_id))
        .returning(move |_, _| Ok(is_admin));
}

fn expect_reply(mocks: &mut Mocks, check: impl Fn(&str) -> bool + Send + 'static) {
    mocks
        .messaging
        .expect_reply_html()
        .withf(move |_, _, text, keyboard| check(text) && keyboard.is_none())
        .times(1)
        .returning(|_, _, _, _| Ok(()));
}

fn verse() -> Verse {
    Verse {
        surah_name: "Al-Baqarah".to_string(),
        verse_ref: VerseRef { surah: 2, ayat: 255 },
        arabic: "اللَّهُ لَا إِلَٰهَ إِلَّا هُوَ".to_string(),
        translation: "Allah, tidak ada tuhan selain Dia.".to_string(),
    }
}

#[tokio::test]
async fn test_warn_requires_admin() {
    // Arrange
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, MEMBER_ID, false);
    expect_reply(&mut mocks, |text| text == utils::ADMIN_ONLY_MSG);
    mocks.moderation.expect_warn().never();
    let harness = mocks.build().await;

    // Act
    let msg = reply_message(MEMBER_ID, user_json(UserId(3), "Cici", false), "/warn");
    let result = harness.command(msg, Command::Warn(String::new())).await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_warn_in_private_chat() {
    let mut mocks = Mocks::new();
    mocks
        .messaging
        .expect_reply_html()
        .withf(|chat_id, _, text, _| *chat_id == PRIVATE_ID && text == utils::GROUP_ONLY_MSG)
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    let msg = message(PRIVATE_ID, ADMIN_ID, "/warn");
    let result = harness.command(msg, Command::Warn(String::new())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_warn_without_reply_shows_usage() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    expect_reply(&mut mocks, |text| text.contains("Balas pesan anggota"));
    let harness = mocks.build().await;

    let msg = message(GROUP_ID, ADMIN_ID, "/warn");
    let result = harness.command(msg, Command::Warn(String::new())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_warn_member() {
    // Arrange
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    expect_admin(&mut mocks, MEMBER_ID, false);
    mocks
        .moderation
        .expect_warn()
        .with(eq(GROUP_ID), eq(MEMBER_ID))
        .times(1)
        .returning(|_, _| Ok(WarnOutcome::Warned { count: 1, limit: 3 }));
    expect_reply(&mut mocks, |text| text.contains("(1/3)") && text.ends_with("Alasan: spam &lt;link&gt;"));
    let harness = mocks.build().await;

    // Act
    let msg = reply_message(ADMIN_ID, member(), "/warn spam <link>");
    let result = harness.command(msg, Command::Warn("spam <link>".to_string())).await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_warn_at_limit_bans_member() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    expect_admin(&mut mocks, MEMBER_ID, false);
    mocks
        .moderation
        .expect_warn()
        .returning(|_, _| Ok(WarnOutcome::Banned { limit: 3 }));
    mocks
        .group_admin
        .expect_ban_member()
        .with(eq(GROUP_ID), eq(MEMBER_ID))
        .times(1)
        .returning(|_, _| Ok(()));
    expect_reply(&mut mocks, |text| text.contains("diblokir"));
    let harness = mocks.build().await;

    let msg = reply_message(ADMIN_ID, member(), "/warn");
    let result = harness.command(msg, Command::Warn(String::new())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_warn_refuses_bots() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks.moderation.expect_warn().never();
    expect_reply(&mut mocks, |text| text.contains("tidak dapat diberi tindakan"));
    let harness = mocks.build().await;

    let msg = reply_message(ADMIN_ID, user_json(UserId(999), "Bot", true), "/warn");
    let result = harness.command(msg, Command::Warn(String::new())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unwarn_resets_warnings() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks
        .moderation
        .expect_reset()
        .with(eq(GROUP_ID), eq(MEMBER_ID))
        .times(1)
        .returning(|_, _| Ok(true));
    expect_reply(&mut mocks, |text| text.starts_with("✅ Peringatan untuk") && text.contains("Budi"));
    let harness = mocks.build().await;

    let result = harness.command(reply_message(ADMIN_ID, member(), "/unwarn"), Command::Unwarn).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unwarn_member_without_warnings() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks.moderation.expect_reset().times(1).returning(|_, _| Ok(false));
    expect_reply(&mut mocks, |text| text.ends_with("tidak memiliki peringatan."));
    let harness = mocks.build().await;

    let result = harness.command(reply_message(ADMIN_ID, member(), "/unwarn"), Command::Unwarn).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unwarn_without_reply_shows_usage() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks.moderation.expect_reset().never();
    expect_reply(&mut mocks, |text| text.contains("/unwarn"));
    let harness = mocks.build().await;

    let result = harness.command(message(GROUP_ID, ADMIN_ID, "/unwarn"), Command::Unwarn).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_kick_member() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    expect_admin(&mut mocks, MEMBER_ID, false);
    mocks
        .group_admin
        .expect_kick_member()
        .with(eq(GROUP_ID), eq(MEMBER_ID))
        .times(1)
        .returning(|_, _| Ok(()));
    expect_reply(&mut mocks, |text| text.starts_with("👢"));
    let harness = mocks.build().await;

    let msg = reply_message(ADMIN_ID, member(), "/kick");
    let result = harness.command(msg, Command::Kick(String::new())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_warns_shows_own_count() {
    let mut mocks = Mocks::new();
    mocks
        .moderation
        .expect_warnings()
        .with(eq(GROUP_ID), eq(MEMBER_ID))
        .returning(|_, _| Ok((2, 3)));
    expect_reply(&mut mocks, |text| text.ends_with("memiliki 2/3 peringatan."));
    let harness = mocks.build().await;

    let result = harness.command(message(GROUP_ID, MEMBER_ID, "/warns"), Command::Warns).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_rules_uses_group_text() {
    let mut mocks = Mocks::new();
    mocks.moderation.expect_group_settings().returning(|_| {
        Ok(GroupSettings { rules: Some("Jaga adab.".to_string()), ..Default::default() })
    });
    expect_reply(&mut mocks, |text| text == "Jaga adab.");
    let harness = mocks.build().await;

    let result = harness.command(message(GROUP_ID, MEMBER_ID, "/rules"), Command::Rules).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_statistic() {
    let mut mocks = Mocks::new();
    mocks.group_admin.expect_member_count().returning(|_| Ok(120));
    mocks.group_admin.expect_admin_count().returning(|_| Ok(4));
    mocks.moderation.expect_count_warned_users().returning(|_| Ok(2));
    expect_reply(&mut mocks, |text| {
        text.contains("Kajian Sunnah") && text.contains("120") && text.contains(": 4")
    });
    let harness = mocks.build().await;

    let result =
        harness.command(message(GROUP_ID, MEMBER_ID, "/statistic"), Command::Statistic).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ayat_success() {
    // Arrange
    let mut mocks = Mocks::new();
    mocks
        .messaging
        .expect_send_status_msg()
        .with(eq(GROUP_ID), eq(MESSAGE_ID), eq("📖 Sedang mencari ayat..."))
        .times(1)
        .returning(|_, _, text| Ok(message(GROUP_ID, UserId(999), text)));
    mocks
        .content
        .expect_get_verse()
        .with(eq(VerseRef { surah: 2, ayat: 255 }))
        .times(1)
        .returning(|_| Ok(verse()));
    mocks.messaging.expect_delete_message().times(1).returning(|_, _| Ok(()));
    mocks
        .messaging
        .expect_reply_html()
        .withf(|_, _, text, keyboard| text.contains("Al-Baqarah (2:255)") && keyboard.is_some())
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    // Act
    let result =
        harness.command(message(GROUP_ID, MEMBER_ID, "/ayat 2:255"), Command::Ayat("2:255".into())).await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ayat_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .messaging
        .expect_send_status_msg()
        .returning(|_, _, text| Ok(message(GROUP_ID, UserId(999), text)));
    mocks.content.expect_get_verse().returning(|_| Err(ContentError::NotFound));
    // A failed delete does not stop the reply.
    mocks.messaging.expect_delete_message().returning(|_, _| {
        Err(crate::messaging::MessagingError::TeloxideRequest(
            teloxide::RequestError::Io(std::io::Error::other("gone").into()),
        ))
    });
    expect_reply(&mut mocks, |text| text == "Maaf, Surah 2 Ayat 286 tidak dapat ditemukan.");
    let harness = mocks.build().await;

    let result =
        harness.command(message(GROUP_ID, MEMBER_ID, "/ayat 2:286"), Command::Ayat("2:286".into())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ayat_invalid_reference() {
    let mut mocks = Mocks::new();
    mocks.content.expect_get_verse().never();
    expect_reply(&mut mocks, |text| text.starts_with("Format nomor surah atau ayat tidak valid"));
    let harness = mocks.build().await;

    let result =
        harness.command(message(GROUP_ID, MEMBER_ID, "/ayat 115:1"), Command::Ayat("115:1".into())).await;

    assert!(result.is_ok());
}

fn tafsir() -> Tafsir {
    Tafsir {
        surah_name: "Al-Fatihah".to_string(),
        verse_ref: VerseRef { surah: 1, ayat: 1 },
        verse_text: "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ".to_string(),
        text: "Tafsir ayat pertama.".to_string(),
    }
}

fn expect_status(mocks: &mut Mocks, status: &'static str) {
    mocks
        .messaging
        .expect_send_status_msg()
        .with(eq(GROUP_ID), eq(MESSAGE_ID), eq(status))
        .times(1)
        .returning(|_, _, text| Ok(message(GROUP_ID, UserId(999), text)));
    mocks.messaging.expect_delete_message().times(1).returning(|_, _| Ok(()));
}

#[tokio::test]
async fn test_tafsir_success() {
    // Arrange
    let mut mocks = Mocks::new();
    expect_status(&mut mocks, "📜 Sedang mencari tafsir...");
    mocks
        .content
        .expect_get_tafsir()
        .with(eq(VerseRef { surah: 1, ayat: 1 }))
        .times(1)
        .returning(|_| Ok(tafsir()));
    mocks
        .messaging
        .expect_reply_long_html()
        .withf(|chat_id, reply_to, header, body| {
            *chat_id == GROUP_ID
                && *reply_to == MESSAGE_ID
                && header.contains("Al-Fatihah")
                && body == "Tafsir ayat pertama."
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    // Act
    let result =
        harness.command(message(GROUP_ID, MEMBER_ID, "/tafsir 1:1"), Command::Tafsir("1:1".into())).await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_tafsir_not_found() {
    let mut mocks = Mocks::new();
    expect_status(&mut mocks, "📜 Sedang mencari tafsir...");
    mocks.content.expect_get_tafsir().returning(|_| Err(ContentError::NotFound));
    mocks.messaging.expect_reply_long_html().never();
    expect_reply(&mut mocks, |text| {
        text == "Maaf, Tafsir untuk Surah 1 Ayat 9 tidak dapat ditemukan."
    });
    let harness = mocks.build().await;

    let result =
        harness.command(message(GROUP_ID, MEMBER_ID, "/tafsir 1:9"), Command::Tafsir("1:9".into())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_tafsir_server_error() {
    let mut mocks = Mocks::new();
    expect_status(&mut mocks, "📜 Sedang mencari tafsir...");
    mocks.content.expect_get_tafsir().returning(|_| Err(ContentError::Api("code 500".into())));
    expect_reply(&mut mocks, |text| text.starts_with("Maaf, terjadi kesalahan pada server Tafsir"));
    let harness = mocks.build().await;

    let result =
        harness.command(message(GROUP_ID, MEMBER_ID, "/tafsir 1:1"), Command::Tafsir("1:1".into())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_hadits_unknown_book() {
    let mut mocks = Mocks::new();
    mocks.content.expect_get_hadith().never();
    expect_reply(&mut mocks, |text| text.starts_with("Kitab tidak dikenal"));
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/hadits kitab 1"), Command::Hadits("kitab 1".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_doa_api_error() {
    let mut mocks = Mocks::new();
    mocks.content.expect_random_doa().returning(|| Err(ContentError::Api("down".to_string())));
    expect_reply(&mut mocks, |text| text.starts_with("Maaf, gagal mengambil doa"));
    let harness = mocks.build().await;

    let result = harness.command(message(GROUP_ID, MEMBER_ID, "/doa"), Command::Doa).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_asmaulhusna_out_of_range() {
    let mut mocks = Mocks::new();
    mocks.content.expect_get_asmaul_husna().never();
    expect_reply(&mut mocks, |text| text == "Nomor Asmaul Husna harus antara 1 dan 99.");
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/asmaulhusna 100"), Command::AsmaulHusna("100".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_tanya_without_model() {
    let mut mocks = Mocks::new();
    expect_reply(&mut mocks, |text| text == utils::AI_UNAVAILABLE_MSG);
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/tanya apa itu zakat"), Command::Tanya("apa itu zakat".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_tanya_answers_with_model() {
    // Arrange
    let mut mocks = Mocks::new().with_model(|model| {
        model
            .expect_generate()
            .withf(|prompt| prompt.ends_with("Pertanyaan: apa itu zakat"))
            .times(1)
            .returning(|_| Ok("Zakat adalah <rukun> Islam.".to_string()));
    });
    mocks.messaging.expect_send_chat_action().returning(|_, _| Ok(()));
    mocks
        .messaging
        .expect_reply_long_html()
        .withf(|chat_id, reply_to, header, body| {
            *chat_id == GROUP_ID
                && *reply_to == MESSAGE_ID
                && header.contains("Jawaban")
                && body == "Zakat adalah <rukun> Islam."
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    // Act
    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/tanya apa itu zakat"), Command::Tanya("apa itu zakat".into()))
        .await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_tanya_model_error() {
    let mut mocks = Mocks::new().with_model(|model| {
        model.expect_generate().returning(|_| Err(AiError::EmptyResponse(Some("SAFETY".into()))));
    });
    mocks.messaging.expect_send_chat_action().returning(|_, _| Ok(()));
    mocks.messaging.expect_reply_long_html().never();
    expect_reply(&mut mocks, |text| text.starts_with("Maaf, terjadi kesalahan"));
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/tanya sesuatu"), Command::Tanya("sesuatu".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_kisah_tells_story_of_name() {
    let mut mocks = Mocks::new().with_model(|model| {
        model
            .expect_generate()
            .withf(|prompt| prompt.contains("tentang Nabi Yusuf"))
            .times(1)
            .returning(|_| Ok("Nabi Yusuf adalah putra Nabi Yaqub.".to_string()));
    });
    mocks.messaging.expect_send_chat_action().returning(|_, _| Ok(()));
    mocks
        .messaging
        .expect_reply_long_html()
        .withf(|_, _, header, body| header.contains("Kisah") && body == "Nabi Yusuf adalah putra Nabi Yaqub.")
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/kisah Nabi Yusuf"), Command::Kisah("Nabi Yusuf".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_kisah_without_name_lets_model_choose() {
    let mut mocks = Mocks::new().with_model(|model| {
        model
            .expect_generate()
            .withf(|prompt| prompt.contains("pilihan Anda"))
            .times(1)
            .returning(|_| Err(AiError::EmptyResponse(None)));
    });
    mocks.messaging.expect_send_chat_action().returning(|_, _| Ok(()));
    mocks.messaging.expect_reply_long_html().never();
    expect_reply(&mut mocks, |text| text == "Maaf, gagal membuat kisah. Coba lagi nanti.");
    let harness = mocks.build().await;

    let result = harness.command(message(GROUP_ID, MEMBER_ID, "/kisah"), Command::Kisah(String::new())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_kisah_without_model() {
    let mut mocks = Mocks::new();
    expect_reply(&mut mocks, |text| text == utils::AI_UNAVAILABLE_MSG);
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/kisah Umar"), Command::Kisah("Umar".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ingatkan_invalid_duration() {
    let mut mocks = Mocks::new();
    expect_reply(&mut mocks, |text| text.starts_with("Format:"));
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/ingatkan nanti sholat"), Command::Ingatkan("nanti sholat".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ingatkan_rejects_more_than_a_week() {
    let mut mocks = Mocks::new();
    expect_reply(&mut mocks, |text| text == "Pengingat maksimal 7 hari.");
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/ingatkan 8d puasa"), Command::Ingatkan("8d puasa".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ingatkan_confirms() {
    let mut mocks = Mocks::new();
    expect_reply(&mut mocks, |text| text.ends_with("dalam 1 jam 30 menit."));
    let harness = mocks.build().await;

    let result = harness
        .command(message(GROUP_ID, MEMBER_ID, "/ingatkan 1h30m kajian"), Command::Ingatkan("1h30m kajian".into()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_settings_opens_menu() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks.moderation.expect_group_settings().returning(|_| Ok(GroupSettings::default()));
    mocks.moderation.expect_warn_limit().returning(|_| Ok(3));
    mocks
        .messaging
        .expect_send_settings_menu()
        .with(eq(GROUP_ID), eq(GroupSettings::default()), eq(3))
        .times(1)
        .returning(|_, _, _| Ok(()));
    let harness = mocks.build().await;

    let result = harness.command(message(GROUP_ID, ADMIN_ID, "/settings"), Command::Settings).await;

    assert!(result.is_ok());
    assert_eq!(harness.dialogue.get().await.unwrap(), Some(CommandState::None));
}

#[tokio::test]
async fn test_toggle_feature_requires_admin() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, MEMBER_ID, false);
    mocks.moderation.expect_toggle_feature().never();
    mocks
        .messaging
        .expect_answer_callback_query()
        .with(eq(QUERY_ID), eq("Hanya admin yang dapat mengubah pengaturan."))
        .times(1)
        .returning(|_, _| Ok(()));
    let harness = mocks.build().await;

    let result =
        harness.callback(MEMBER_ID, CallbackAction::ToggleFeature(Feature::DailyVerse)).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_toggle_feature() {
    // Arrange
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks
        .moderation
        .expect_toggle_feature()
        .with(eq(GROUP_ID), eq(Feature::DailyVerse))
        .times(1)
        .returning(|_, _| Ok(false));
    mocks
        .messaging
        .expect_answer_callback_query()
        .with(eq(QUERY_ID), eq("Ayat Harian nonaktif"))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks.moderation.expect_group_settings().returning(|_| Ok(GroupSettings::default()));
    mocks.moderation.expect_warn_limit().returning(|_| Ok(3));
    mocks
        .messaging
        .expect_edit_settings_menu()
        .with(eq(GROUP_ID), eq(MESSAGE_ID), always(), eq(3))
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    // Act
    let result = harness.callback(ADMIN_ID, CallbackAction::ToggleFeature(Feature::DailyVerse)).await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_adjust_warn_limit() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks
        .moderation
        .expect_adjust_warn_limit()
        .with(eq(GROUP_ID), eq(1))
        .times(1)
        .returning(|_, _| Ok(4));
    mocks
        .messaging
        .expect_answer_callback_query()
        .with(eq(QUERY_ID), eq("Batas peringatan: 4"))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks.moderation.expect_group_settings().returning(|_| Ok(GroupSettings::default()));
    mocks
        .messaging
        .expect_edit_settings_menu()
        .with(eq(GROUP_ID), eq(MESSAGE_ID), always(), eq(4))
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    let result = harness.callback(ADMIN_ID, CallbackAction::AdjustWarnLimit(1)).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_set_welcome_flow() {
    // Arrange
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks.messaging.expect_answer_callback_query().returning(|_, _| Ok(()));
    mocks
        .messaging
        .expect_prompt_for_input()
        .withf(|chat_id, _, prompt| *chat_id == GROUP_ID && prompt.contains("{user_mention}"))
        .times(1)
        .returning(|_, _, _| Ok(()));
    mocks
        .moderation
        .expect_set_welcome_message()
        .with(eq(GROUP_ID), eq("Ahlan &lt;b&gt; {user_mention}".to_string()))
        .times(1)
        .returning(|_, _| Ok(()));
    expect_reply(&mut mocks, |text| text == "✅ Pesan sambutan berhasil diperbarui.");
    let harness = mocks.build().await;

    // Act
    harness.callback(ADMIN_ID, CallbackAction::SetWelcome).await.unwrap();
    let state = harness.new_dialogue().get().await.unwrap();
    let result = harness.text(message(GROUP_ID, ADMIN_ID, "Ahlan <b> {user_mention}")).await;

    // Assert
    assert_eq!(state, Some(CommandState::AwaitingWelcomeMessage { admin_id: ADMIN_ID }));
    assert!(result.is_ok());
    assert_eq!(harness.new_dialogue().get().await.unwrap(), None);
}

#[tokio::test]
async fn test_settings_input_ignores_other_members() {
    let mut mocks = Mocks::new();
    mocks.moderation.expect_set_rules().never();
    let harness = mocks.build().await;
    harness
        .dialogue
        .update(CommandState::AwaitingRules { admin_id: ADMIN_ID })
        .await
        .unwrap();

    // No language model, so the message is not moderated either.
    let result = harness.text(message(GROUP_ID, MEMBER_ID, "halo semua")).await;

    assert!(result.is_ok());
    assert_eq!(
        harness.dialogue.get().await.unwrap(),
        Some(CommandState::AwaitingRules { admin_id: ADMIN_ID })
    );
}

#[tokio::test]
async fn test_settings_input_skips_commands() {
    let mut mocks = Mocks::new();
    mocks.moderation.expect_set_rules().never();
    mocks.messaging.expect_reply_html().never();
    let harness = mocks.build().await;
    harness
        .dialogue
        .update(CommandState::AwaitingRules { admin_id: ADMIN_ID })
        .await
        .unwrap();

    for text in ["/start@OtherBot", "/ban"] {
        let result = harness.text(message(GROUP_ID, ADMIN_ID, text)).await;
        assert!(result.is_ok());
    }

    assert_eq!(
        harness.new_dialogue().get().await.unwrap(),
        Some(CommandState::AwaitingRules { admin_id: ADMIN_ID })
    );
}

#[tokio::test]
async fn test_batal_cancels_pending_input() {
    let mut mocks = Mocks::new();
    expect_reply(&mut mocks, |text| text == "Pengaturan dibatalkan.");
    let harness = mocks.build().await;
    harness
        .dialogue
        .update(CommandState::AwaitingRules { admin_id: ADMIN_ID })
        .await
        .unwrap();

    let result = harness.command(message(GROUP_ID, ADMIN_ID, "/batal"), Command::Batal).await;

    assert!(result.is_ok());
    assert_eq!(harness.dialogue.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_close_settings() {
    let mut mocks = Mocks::new();
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks
        .messaging
        .expect_close_settings_menu()
        .with(eq(GROUP_ID), eq(MESSAGE_ID))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks.messaging.expect_answer_callback_query().times(1).returning(|_, _| Ok(()));
    let harness = mocks.build().await;

    let result = harness.callback(ADMIN_ID, CallbackAction::CloseSettings).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_command_keyboard_runs_command() {
    let mut mocks = Mocks::new();
    mocks
        .messaging
        .expect_answer_callback_query()
        .with(eq(QUERY_ID), eq(""))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks.content.expect_random_doa().times(1).returning(|| {
        Ok(Doa {
            judul: "Doa sebelum tidur".to_string(),
            arab: "بِاسْمِكَ اللَّهُمَّ".to_string(),
            latin: String::new(),
            terjemah: "Dengan nama-Mu ya Allah".to_string(),
        })
    });
    expect_reply(&mut mocks, |text| text.starts_with("🤲 <b>Doa sebelum tidur</b>"));
    let harness = mocks.build().await;

    let result = harness.callback(MEMBER_ID, CallbackAction::Doa).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ai_moderation_warns_on_violation() {
    // Arrange
    let mut mocks = Mocks::new().with_model(|model| {
        model
            .expect_generate()
            .withf(|prompt| prompt.contains("Pesan Pengguna: \"beli sekarang\""))
            .times(1)
            .returning(|_| Ok("Pesan Anda mengandung promosi.".to_string()));
    });
    mocks.moderation.expect_group_settings().returning(|_| Ok(GroupSettings::default()));
    expect_admin(&mut mocks, MEMBER_ID, false);
    mocks
        .messaging
        .expect_reply_html()
        .withf(|_, _, text, _| text.starts_with("⚠️ Peringatan untuk") && text.contains("<i>Pesan Anda"))
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    mocks
        .messaging
        .expect_delete_message()
        .with(eq(GROUP_ID), eq(MESSAGE_ID))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks
        .moderation
        .expect_warn()
        .with(eq(GROUP_ID), eq(MEMBER_ID))
        .times(1)
        .returning(|_, _| Ok(WarnOutcome::Warned { count: 1, limit: 3 }));
    mocks
        .messaging
        .expect_reply_html()
        .withf(|_, _, text, _| text.contains("(1/3)"))
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let harness = mocks.build().await;

    // Act
    let result = harness.text(message(GROUP_ID, MEMBER_ID, "beli sekarang")).await;

    // Assert
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ai_moderation_safe_message() {
    let mut mocks = Mocks::new().with_model(|model| {
        model.expect_generate().times(1).returning(|_| Ok("safe".to_string()));
    });
    mocks.moderation.expect_group_settings().returning(|_| Ok(GroupSettings::default()));
    mocks.moderation.expect_warn().never();
    mocks.messaging.expect_delete_message().never();
    let harness = mocks.build().await;

    let result = harness.text(message(GROUP_ID, MEMBER_ID, "Assalamu'alaikum")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ai_moderation_skips_admins() {
    let mut mocks = Mocks::new().with_model(|model| {
        model.expect_generate().returning(|_| Ok("Pesan Anda kasar.".to_string()));
    });
    mocks.moderation.expect_group_settings().returning(|_| Ok(GroupSettings::default()));
    expect_admin(&mut mocks, ADMIN_ID, true);
    mocks.moderation.expect_warn().never();
    mocks.messaging.expect_delete_message().never();
    let harness = mocks.build().await;

    let result = harness.text(message(GROUP_ID, ADMIN_ID, "pesan admin")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ai_moderation_disabled_for_group() {
    let mut mocks = Mocks::new().with_model(|model| {
        model.expect_generate().never();
    });
    mocks.moderation.expect_group_settings().returning(|_| {
        let mut settings = GroupSettings::default();
        settings.features.toggle(Feature::AiModeration);
        Ok(settings)
    });
    let harness = mocks.build().await;

    let result = harness.text(message(GROUP_ID, MEMBER_ID, "halo")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_ai_moderation_ignores_model_errors() {
    let mut mocks = Mocks::new().with_model(|model| {
        model.expect_generate().returning(|_| Err(AiError::EmptyResponse(None)));
    });
    mocks.moderation.expect_group_settings().returning(|_| Ok(GroupSettings::default()));
    mocks.moderation.expect_warn().never();
    let harness = mocks.build().await;

    let result = harness.text(message(GROUP_ID, MEMBER_ID, "halo")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_welcome_new_members() {
    let mut mocks = Mocks::new();
    mocks.moderation.expect_group_settings().returning(|_| {
        Ok(GroupSettings {
            welcome_message: Some("Ahlan {user_mention} di {chat_title}".to_string()),
            ..Default::default()
        })
    });
    mocks
        .messaging
        .expect_send_html()
        .with(
            eq(GROUP_ID),
            eq(r#"Ahlan <a href="tg://user?id=7">Cici</a> di Kajian Sunnah"#.to_string()),
        )
        .times(1)
        .returning(|_, _| Ok(()));
    let harness = mocks.build().await;

    let msg = new_members_message(vec![
        user_json(UserId(7), "Cici", false),
        user_json(UserId(8), "HelperBot", true),
    ]);
    let result = harness.new_members(msg).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_welcome_disabled() {
    let mut mocks = Mocks::new();
    mocks.moderation.expect_group_settings().returning(|_| {
        let mut settings = GroupSettings::default();
        settings.features.toggle(Feature::Welcome);
        Ok(settings)
    });
    mocks.messaging.expect_send_html().never();
    let harness = mocks.build().await;

    let msg = new_members_message(vec![user_json(UserId(7), "Cici", false)]);
    let result = harness.new_members(msg).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unknown_callback_data_is_answered() {
    let mut mocks = Mocks::new();
    mocks.messaging.expect_answer_callback_query().times(1).returning(|_, _| Ok(()));
    let harness = mocks.build().await;

    let mut query = callback_query(ADMIN_ID, &CallbackAction::Noop);
    query.data = Some("not json".to_string());
    let result = harness.callback_raw(&query).await;

    assert!(result.is_ok());
}

#[test]
fn test_menu_hides_ai_commands_without_model() {
    let names = |menu: Vec<teloxide::types::BotCommand>| {
        menu.into_iter().map(|cmd| cmd.command.trim_start_matches('/').to_string()).collect::<Vec<_>>()
    };

    let without_model = names(Command::menu(false));
    let with_model = names(Command::menu(true));

    assert!(!without_model.iter().any(|cmd| cmd == "tanya" || cmd == "kisah"));
    assert!(without_model.iter().any(|cmd| cmd == "ayat"));
    assert!(with_model.iter().any(|cmd| cmd == "tanya"));
    assert!(with_model.iter().any(|cmd| cmd == "kisah"));
    assert_eq!(with_model.len(), without_model.len() + 2);
}

#[test]
fn test_command_parsing() {
    assert_eq!(Command::parse("/ayat 2:255", "bot").unwrap(), Command::Ayat("2:255".to_string()));
    assert_eq!(Command::parse("/mutiarakata", "bot").unwrap(), Command::MutiaraKata);
    assert_eq!(
        Command::parse("/ingatkan 10m Sholat", "bot").unwrap(),
        Command::Ingatkan("10m Sholat".to_string())
    );
    assert_eq!(Command::parse("/warn", "bot").unwrap(), Command::Warn(String::new()));
    assert!(Command::parse("/unknown", "bot").is_err());
}

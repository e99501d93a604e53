use chrono::NaiveTime;

use crate::config::{ActiveHours, Config};

/// A configuration pointing at local placeholder endpoints.
pub fn test_config() -> Config {
    Config {
        telegram_bot_token: "123:test".to_string(),
        gemini_api_key: Some("test_key".to_string()),
        gemini_model: "gemini-test".to_string(),
        gemini_api_url: "http://localhost:1/gemini/".to_string(),
        developer_chat_id: Some(42),
        target_group_id: Some(-100123),
        settings_path: "db_settings.json".to_string(),
        dialogue_database_url: "sqlite::memory:".to_string(),
        keep_alive_port: 8080,
        equran_api_url: "http://localhost:1/equran/".to_string(),
        hadith_api_url: "http://localhost:1/hadith/".to_string(),
        doa_api_url: "http://localhost:1/doa".to_string(),
        asmaul_husna_api_url: "http://localhost:1/asmaul-husna".to_string(),
        default_warn_limit: 3,
        utc_offset_hours: 7,
        active_hours: Some(ActiveHours { start: 7, end: 24 }),
        daily_verse_times: vec![
            NaiveTime::from_hms_opt(5, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
        ],
        http_timeout_secs: 5,
    }
}

/// Serves `router` on a random local port and returns its base URL.
pub async fn serve_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });
    format!("http://{addr}")
}

use axum::{Router, http::Uri, routing::get};
use tokio::net::TcpListener;

const ALIVE_TEXT: &str = "Bot is running and active.";

/// Routes of the keep-alive server. Every path answers so uptime pingers can
/// use any URL.
pub fn router() -> Router {
    Router::new().route("/health", get(health)).fallback(alive)
}

async fn health() -> &'static str {
    "ok"
}

async fn alive(uri: Uri) -> &'static str {
    tracing::info!("Keep-alive ping on {}", uri.path());
    ALIVE_TEXT
}

/// Binds the keep-alive server on all interfaces and serves until the
/// process exits.
pub async fn serve(port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Keep-alive server listening on port {port}");
    serve_on(listener).await
}

/// Serves the keep-alive routes on an already bound listener.
pub async fn serve_on(listener: TcpListener) -> std::io::Result<()> {
    axum::serve(listener, router()).await
}

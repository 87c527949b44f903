//! Service Entry Point
//!
//! トレーシングを初期化し、HTTPサーバを起動するバイナリ。

use tracing::info;
use tracing_subscriber::EnvFilter;

use csv2xlsx::ServiceConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOGが未設定の場合の既定フィルタ
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("csv2xlsx=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::from_env()?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Starting csv2xlsx HTTP server");

    axum::serve(listener, csv2xlsx::router()).await?;
    Ok(())
}

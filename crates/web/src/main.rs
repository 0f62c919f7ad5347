//! planner-web バイナリのエントリポイント
//! 環境変数から設定を読み込み、HTTP サーバを起動します。

use std::sync::Arc;

use anyhow::{anyhow, Context};
use infrastructure::SqliteStore;
use planner_web::{app_with_state, AppState, HandlebarsRenderer};
use shared::{init_tracing, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format).map_err(|e| anyhow!("failed to initialize tracing: {e}"))?;

    let store = SqliteStore::open(&config).context("failed to open database")?;
    let renderer =
        HandlebarsRenderer::new().map_err(|e| anyhow!("failed to load templates: {e}"))?;
    let state = AppState::new(store, Arc::new(renderer));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        database = %config.database_path,
        environment = %config.environment,
        "server starting"
    );

    axum::serve(listener, app_with_state(state))
        .await
        .context("server error")?;
    Ok(())
}

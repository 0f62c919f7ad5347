//! リクエストハンドラ
//!
//! パラメータを取り出してサービスを呼び、リダイレクトか描画結果を返すだけの薄い層です。
//! SQLite への同期アクセスは `run_blocking` でブロッキングスレッドに逃がします。

pub mod events;
pub mod pages;
pub mod tasks;

use axum::response::Html;
use serde_json::Value;

use crate::error::WebError;
use crate::render::Page;
use crate::AppState;

async fn run_blocking<T, F>(f: F) -> Result<T, WebError>
where
    F: FnOnce() -> Result<T, WebError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| WebError::Internal(format!("blocking task failed: {e}")))?
}

fn render(state: &AppState, page: Page, context: &Value) -> Result<Html<String>, WebError> {
    Ok(Html(state.renderer.render(page, context)?))
}

//! HTTP フロントエンド（axum）
//!
//! タスク一覧とイベント予約の画面をサーバサイドで描画します。
//! ストアと描画コラボレータは `AppState` 経由で注入します。

pub mod error;
pub mod handlers;
pub mod render;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use infrastructure::{EventService, SqliteStore, TaskService};
use serde::Serialize;

pub use error::WebError;
pub use render::{HandlebarsRenderer, Page, RenderError, Renderer};

/// アプリケーションの共有状態
#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
    pub events: EventService,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// 同じストアを両サービスに注入します。
    pub fn new(store: SqliteStore, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            tasks: TaskService::new(store.clone()),
            events: EventService::new(store),
            renderer,
        }
    }
}

/// ルータを構築して返します。
pub fn app_with_state(state: AppState) -> Router {
    use handlers::{events, pages, tasks};

    Router::new()
        .route("/", get(pages::landing))
        .route("/about/", get(pages::about))
        .route("/homepage/", get(pages::calendar))
        .route("/health", get(health))
        .route("/tasks/", get(tasks::list).post(tasks::create))
        .route("/tasks/delete/:id", get(tasks::delete))
        .route("/tasks/update/:id", get(tasks::edit).post(tasks::update))
        .route("/events/", get(events::list).post(events::create))
        .route("/events/update/:id", get(events::edit).post(events::update))
        .route("/events/delete/:id", get(events::delete).post(events::delete))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    tracing::info!(%method, %path, "Incoming request");

    let response = next.run(req).await;
    tracing::debug!(%method, %path, status = response.status().as_u16(), "Request completed");
    response
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

/// ヘルスチェック用ハンドラ
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthBody { status: "ok" }))
}

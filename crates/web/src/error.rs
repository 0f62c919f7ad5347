use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use infrastructure::ServiceError;
use thiserror::Error;

use crate::render::RenderError;

/// ハンドラのエラー
///
/// 本文は常にプレーンテキスト。サービス層の失敗は 200 のまま本文で伝えます。
#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Failure(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebError {
    /// Todo 系: NotFound 以外は固定文言
    pub fn task(err: ServiceError, message: &str) -> Self {
        if err.is_not_found() {
            return WebError::NotFound(err.to_string());
        }
        tracing::error!(error = %err, "task operation failed");
        WebError::Failure(message.to_string())
    }

    /// Event 系: 失敗理由を本文に埋め込む
    pub fn event(err: ServiceError, action: &str) -> Self {
        if err.is_not_found() {
            return WebError::NotFound(err.to_string());
        }
        tracing::error!(error = %err, action, "event operation failed");
        WebError::Failure(format!("Error {action} event: {err}"))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Failure(_) => StatusCode::OK,
            WebError::Render(_) | WebError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

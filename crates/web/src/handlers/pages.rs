use axum::{extract::State, response::Html};
use serde_json::json;

use super::{render, run_blocking};
use crate::error::WebError;
use crate::render::Page;
use crate::AppState;

/// GET /
pub async fn landing(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    render(&state, Page::Landing, &json!({}))
}

/// GET /about/
pub async fn about(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    render(&state, Page::About, &json!({}))
}

/// GET /homepage/
/// 全イベントを `{title, start}` に射影してカレンダーに渡す
pub async fn calendar(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let events = state.events.clone();
    let booked_dates = run_blocking(move || {
        events
            .calendar()
            .map_err(|e| WebError::event(e, "loading"))
    })
    .await?;

    // <script> 内に埋め込むため `</` をエスケープする
    let booked_dates_json = serde_json::to_string(&booked_dates)
        .map_err(|e| WebError::Internal(e.to_string()))?
        .replace("</", "<\\/");
    render(
        &state,
        Page::Calendar,
        &json!({ "booked_dates": booked_dates, "booked_dates_json": booked_dates_json }),
    )
}

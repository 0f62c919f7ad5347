use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use domain::{EventFields, EventId, EventQuery};
use serde::Deserialize;
use serde_json::json;

use super::{render, run_blocking};
use crate::error::WebError;
use crate::render::Page;
use crate::AppState;

pub const EVENTS_PATH: &str = "/events/";

/// 作成・更新フォーム
///
/// 金額は文字列のまま受け取り、解析はサービス層の検証に任せます。
/// `full_day` はチェックボックスなので、キーの有無だけを見ます。
/// 欠けたキーは空文字となり、検証エラーとして本文で返ります。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventForm {
    pub event_name: String,
    pub customer_name: String,
    pub event_date: String,
    pub advance_payment: String,
    pub total_payment: String,
    pub full_day: Option<String>,
}

impl From<EventForm> for EventFields {
    fn from(form: EventForm) -> Self {
        EventFields {
            name: form.event_name,
            customer_name: form.customer_name,
            date: form.event_date,
            advance_payment: form.advance_payment,
            total_payment: form.total_payment,
            full_day: form.full_day.is_some(),
        }
    }
}

/// GET /events/ のクエリ
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub filter_full_day: Option<String>,
    pub sort_date: Option<String>,
}

/// GET /events/
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> Result<Html<String>, WebError> {
    let query = EventQuery::from_params(
        params.filter_full_day.as_deref(),
        params.sort_date.as_deref(),
    );
    let events = state.events.clone();
    let listed =
        run_blocking(move || events.list(&query).map_err(|e| WebError::event(e, "loading"))).await?;

    render(
        &state,
        Page::Events,
        &json!({
            "events": listed,
            "filter_full_day": params.filter_full_day,
            "sort_date": params.sort_date,
        }),
    )
}

/// POST /events/
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<EventForm>,
) -> Result<Redirect, WebError> {
    let fields = EventFields::from(form);
    let events = state.events.clone();
    let _ = run_blocking(move || {
        events
            .create(&fields)
            .map_err(|e| WebError::event(e, "adding"))
    })
    .await?;
    Ok(Redirect::to(EVENTS_PATH))
}

/// GET /events/update/{id}
pub async fn edit(
    Path(id): Path<EventId>,
    State(state): State<AppState>,
) -> Result<Html<String>, WebError> {
    let events = state.events.clone();
    let event = run_blocking(move || events.get(id).map_err(|e| WebError::event(e, "loading"))).await?;
    render(&state, Page::EventEdit, &json!({ "event": event }))
}

/// POST /events/update/{id}
pub async fn update(
    Path(id): Path<EventId>,
    State(state): State<AppState>,
    Form(form): Form<EventForm>,
) -> Result<Redirect, WebError> {
    let fields = EventFields::from(form);
    let events = state.events.clone();
    let _ = run_blocking(move || {
        events
            .update(id, &fields)
            .map_err(|e| WebError::event(e, "updating"))
    })
    .await?;
    Ok(Redirect::to(EVENTS_PATH))
}

/// GET|POST /events/delete/{id}
/// 存在しない ID でも一覧へリダイレクトする
pub async fn delete(
    Path(id): Path<EventId>,
    State(state): State<AppState>,
) -> Result<Redirect, WebError> {
    let events = state.events.clone();
    run_blocking(move || events.delete(id).map_err(|e| WebError::event(e, "deleting"))).await?;
    Ok(Redirect::to(EVENTS_PATH))
}

use crate::booking::{Event, DATE_FORMAT};
use serde::{Deserialize, Serialize};

/// カレンダー表示用の 1 件（顧客名と日付のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub title: String,
    pub start: String,
}

/// イベント一覧をカレンダー用に射影します。入力の順序は保持されます。
pub fn project_for_calendar(events: &[Event]) -> Vec<CalendarEntry> {
    events
        .iter()
        .map(|event| CalendarEntry {
            title: event.customer_name.clone(),
            start: event.date.format(DATE_FORMAT).to_string(),
        })
        .collect()
}

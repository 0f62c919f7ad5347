use domain::{project_for_calendar, CalendarEntry, Event, EventFields, EventId, EventQuery};
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::repositories::EventRepository;
use crate::sqlite::SqliteStore;

const ENTITY: &str = "event";

/// イベント予約の作成・一覧（絞り込み/並べ替え）・更新・削除
#[derive(Clone)]
pub struct EventService {
    store: SqliteStore,
}

impl EventService {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub fn create(&self, fields: &EventFields) -> Result<Event, ServiceError> {
        let draft = fields.validate()?;
        let conn = self.store.connection()?;
        let event = EventRepository::insert(&conn, &draft)?;
        info!(event_id = event.id, date = %event.date, "event created");
        Ok(event)
    }

    pub fn list(&self, query: &EventQuery) -> Result<Vec<Event>, ServiceError> {
        let conn = self.store.connection()?;
        let events = EventRepository::list(&conn, query)?;
        debug!(?query, count = events.len(), "events listed");
        Ok(events)
    }

    pub fn get(&self, id: EventId) -> Result<Event, ServiceError> {
        let conn = self.store.connection()?;
        EventRepository::get(&conn, id)?.ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    /// 全項目を 1 トランザクションで置き換えます。
    /// 存在確認を入力検証より先に行います。
    pub fn update(&self, id: EventId, fields: &EventFields) -> Result<Event, ServiceError> {
        let mut conn = self.store.connection()?;
        let tx = conn.transaction()?;
        if EventRepository::get(&tx, id)?.is_none() {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        let draft = fields.validate()?;
        let _ = EventRepository::update(&tx, id, &draft)?;
        tx.commit()?;
        info!(event_id = id, "event updated");
        Ok(Event::from_draft(id, &draft))
    }

    /// 存在しない ID でもエラーにしません（Todo の削除とは異なる）。
    pub fn delete(&self, id: EventId) -> Result<(), ServiceError> {
        let conn = self.store.connection()?;
        if EventRepository::delete(&conn, id)? == 0 {
            debug!(event_id = id, "delete of unknown event ignored");
        } else {
            info!(event_id = id, "event deleted");
        }
        Ok(())
    }

    /// カレンダー表示用に `{title, start}` へ射影します。
    pub fn project_for_calendar(events: &[Event]) -> Vec<CalendarEntry> {
        project_for_calendar(events)
    }

    /// 全イベントをカレンダー用に取得します（既定の並び順）。
    pub fn calendar(&self) -> Result<Vec<CalendarEntry>, ServiceError> {
        let events = self.list(&EventQuery::default())?;
        Ok(Self::project_for_calendar(&events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;

    fn service() -> EventService {
        EventService::new(SqliteStore::in_memory().unwrap())
    }

    fn fields(customer: &str, date: &str) -> EventFields {
        EventFields {
            name: "Party".into(),
            customer_name: customer.into(),
            date: date.into(),
            advance_payment: "0".into(),
            total_payment: "0".into(),
            full_day: false,
        }
    }

    #[test]
    fn create_with_bad_date_is_validation_error() {
        let svc = service();
        let err = svc.create(&fields("Acme", "2024/03/05")).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(DomainError::InvalidDate(_))));
        assert!(svc.list(&EventQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn calendar_projects_stored_events() {
        let svc = service();
        let _ = svc.create(&fields("Acme", "2024-03-05")).unwrap();
        let entries = svc.calendar().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Acme");
        assert_eq!(entries[0].start, "2024-03-05");
    }

    #[test]
    fn update_missing_with_invalid_fields_is_not_found() {
        let mut bad = fields("", "not a date");
        bad.advance_payment = "-1".into();
        let err = service().update(999, &bad).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "event", id: 999 }));
    }

    #[test]
    fn update_with_invalid_fields_leaves_row_untouched() {
        let svc = service();
        let event = svc.create(&fields("Acme", "2024-03-05")).unwrap();

        let mut bad = fields("Other", "2024-04-01");
        bad.total_payment = "-5".into();
        assert!(matches!(
            svc.update(event.id, &bad),
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(svc.get(event.id).unwrap(), event);
    }
}

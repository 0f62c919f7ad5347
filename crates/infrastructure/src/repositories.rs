//! テーブルごとのリポジトリ（`todo`, `event`）
//!
//! どちらも状態を持たず、各メソッドが `&Connection` を受け取ります。
//! トランザクションの境界はサービス層が決めます。

use chrono::{DateTime, Utc};
use domain::{DateSort, Event, EventDraft, EventId, EventQuery, Todo, TodoId};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::StoreError;

/// `date_created` の保存形式（固定幅なので文字列比較で時系列順になる）
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub struct TodoRepository;

impl TodoRepository {
    pub fn insert(
        conn: &Connection,
        content: &str,
        date_created: DateTime<Utc>,
    ) -> Result<Todo, StoreError> {
        let _ = conn.execute(
            "INSERT INTO todo (content, date_created) VALUES (?1, ?2)",
            params![content, date_created.format(TIMESTAMP_FORMAT).to_string()],
        )?;
        let id = conn.last_insert_rowid();
        Self::get(conn, id)?.ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get(conn: &Connection, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todo = conn
            .query_row(
                "SELECT id, content, date_created FROM todo WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(todo)
    }

    /// 作成日時の昇順（同時刻は ID 順）
    pub fn list(conn: &Connection) -> Result<Vec<Todo>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT id, content, date_created FROM todo ORDER BY date_created ASC, id ASC",
        )?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 本文を更新し、変更行数を返します。
    pub fn update_content(conn: &Connection, id: TodoId, content: &str) -> Result<usize, StoreError> {
        Ok(conn.execute(
            "UPDATE todo SET content = ?1 WHERE id = ?2",
            params![content, id],
        )?)
    }

    pub fn delete(conn: &Connection, id: TodoId) -> Result<usize, StoreError> {
        Ok(conn.execute("DELETE FROM todo WHERE id = ?1", params![id])?)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
        let raw: String = row.get(2)?;
        let date_created = DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?
            .with_timezone(&Utc);
        Ok(Todo {
            id: row.get(0)?,
            content: row.get(1)?,
            date_created,
        })
    }
}

const EVENT_COLUMNS: &str =
    "id, customer_name, name, date, advance_payment, total_payment, full_day";

pub struct EventRepository;

impl EventRepository {
    pub fn insert(conn: &Connection, draft: &EventDraft) -> Result<Event, StoreError> {
        let _ = conn.execute(
            "INSERT INTO event (customer_name, name, date, advance_payment, total_payment, full_day)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.customer_name,
                draft.name,
                draft.date,
                draft.advance_payment,
                draft.total_payment,
                draft.full_day
            ],
        )?;
        Ok(Event::from_draft(conn.last_insert_rowid(), draft))
    }

    pub fn get(conn: &Connection, id: EventId) -> Result<Option<Event>, StoreError> {
        let event = conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM event WHERE id = ?1"),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(event)
    }

    /// 絞り込み → 並べ替えの順で一覧を返します。
    /// 並び順の指定がなければ登録順（ID 昇順）です。
    pub fn list(conn: &Connection, query: &EventQuery) -> Result<Vec<Event>, StoreError> {
        let mut sql = format!("SELECT {EVENT_COLUMNS} FROM event");
        if query.full_day.is_some() {
            sql.push_str(" WHERE full_day = ?1");
        }
        sql.push_str(match query.sort {
            Some(DateSort::Asc) => " ORDER BY date ASC, id ASC",
            Some(DateSort::Desc) => " ORDER BY date DESC, id ASC",
            None => " ORDER BY id ASC",
        });

        let mut stmt = conn.prepare(&sql)?;
        let rows = match query.full_day {
            Some(flag) => stmt
                .query_map(params![flag], Self::map_row)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map([], Self::map_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(rows)
    }

    /// 全列を置き換え、変更行数を返します。
    pub fn update(conn: &Connection, id: EventId, draft: &EventDraft) -> Result<usize, StoreError> {
        Ok(conn.execute(
            "UPDATE event
             SET customer_name = ?1, name = ?2, date = ?3,
                 advance_payment = ?4, total_payment = ?5, full_day = ?6
             WHERE id = ?7",
            params![
                draft.customer_name,
                draft.name,
                draft.date,
                draft.advance_payment,
                draft.total_payment,
                draft.full_day,
                id
            ],
        )?)
    }

    pub fn delete(conn: &Connection, id: EventId) -> Result<usize, StoreError> {
        Ok(conn.execute("DELETE FROM event WHERE id = ?1", params![id])?)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
        Ok(Event {
            id: row.get(0)?,
            customer_name: row.get(1)?,
            name: row.get(2)?,
            date: row.get(3)?,
            advance_payment: row.get(4)?,
            total_payment: row.get(5)?,
            full_day: row.get(6)?,
        })
    }
}

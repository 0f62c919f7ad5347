use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Todo の識別子（SQLite の rowid）
pub type TodoId = i64;

/// `content` 列の最大文字数
pub const MAX_CONTENT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub content: String,
    pub date_created: DateTime<Utc>,
}

/// タスク本文を検証します。
/// 空文字・空白のみ・最大長超過は `DomainError` になります。
pub fn validate_content(raw: &str) -> Result<String, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::EmptyField("content"));
    }
    if raw.chars().count() > MAX_CONTENT_CHARS {
        return Err(DomainError::TooLong {
            field: "content",
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(raw.to_string())
}

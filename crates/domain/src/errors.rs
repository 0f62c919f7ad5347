use thiserror::Error;

/// 入力検証エラー
///
/// どの変種もサービス層では `ValidationError` として扱われます。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Validation error: {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Validation error: {field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Validation error: invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Validation error: {field} must be a non-negative number, got '{value}'")]
    InvalidPayment { field: &'static str, value: String },
}

use domain::DomainError;
use thiserror::Error;

/// ストア（SQLite）層のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("migration error: {message}")]
    Migration { message: String },
}

/// サービス層のエラー
///
/// - `Validation`: 入力の不備（ValidationError）
/// - `NotFound`: 対象 ID が存在しない（NotFoundError）
/// - `Persistence`: 書き込み・コミットの失敗（PersistenceError）
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(e: rusqlite::Error) -> Self {
        ServiceError::Persistence(StoreError::Sqlite(e))
    }
}

impl From<r2d2::Error> for ServiceError {
    fn from(e: r2d2::Error) -> Self {
        ServiceError::Persistence(StoreError::Pool(e))
    }
}

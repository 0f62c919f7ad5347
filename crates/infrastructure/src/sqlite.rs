//! SQLite 接続プール
//!
//! `r2d2` + `r2d2_sqlite` でプールを構築し、接続取得時に PRAGMA を設定します。
//! オープン時にマイグレーションを 1 度だけ実行します。

use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use shared::Config;
use tracing::info;

use crate::errors::StoreError;
use crate::migrations;

pub type ConnectionPool = Pool<SqliteConnectionManager>;
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug)]
struct PragmaCustomizer;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;\
             PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};\
             PRAGMA foreign_keys = ON;"
        ))
    }
}

/// サービスに注入するストアハンドル
#[derive(Clone)]
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    /// 設定に従ってプールを作成し、スキーマを最新化します。
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let store = if config.is_in_memory() {
            Self::in_memory()?
        } else {
            let pool = build_pool(SqliteConnectionManager::file(&config.database_path), config.pool_size)?;
            Self::migrated(pool)?
        };
        info!(path = %config.database_path, "database ready");
        Ok(store)
    }

    /// インメモリ DB（テスト/開発用）
    ///
    /// 接続ごとに別 DB になるため、プールは 1 接続に制限します。
    pub fn in_memory() -> Result<Self, StoreError> {
        let pool = build_pool(SqliteConnectionManager::memory(), 1)?;
        Self::migrated(pool)
    }

    fn migrated(pool: ConnectionPool) -> Result<Self, StoreError> {
        let conn = pool.get()?;
        let applied = migrations::run_migrations(&conn)?;
        drop(conn);
        info!(applied, version = migrations::latest_version(), "migrations complete");
        Ok(Self { pool })
    }

    pub fn connection(&self) -> Result<PooledConnection, StoreError> {
        Ok(self.pool.get()?)
    }
}

fn build_pool(manager: SqliteConnectionManager, size: u32) -> Result<ConnectionPool, StoreError> {
    let pool = Pool::builder()
        .max_size(size)
        .connection_timeout(Duration::from_secs(5))
        // インメモリ DB は接続を閉じると消えるため、接続を再作成しない
        .max_lifetime(None)
        .idle_timeout(None)
        .connection_customizer(Box::new(PragmaCustomizer))
        .build(manager)?;
    Ok(pool)
}

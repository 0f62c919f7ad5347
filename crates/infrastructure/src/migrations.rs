//! スキーママイグレーション
//!
//! SQL は `include_str!` で埋め込み、バージョン順に適用します。
//! 適用済みバージョンは `schema_version` に記録されるため、
//! 起動のたびに実行しても冪等です。既存データを消すことはありません。

use rusqlite::Connection;
use tracing::{debug, info};

use crate::errors::StoreError;

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "todo and event tables",
    sql: include_str!("migrations/v001_schema.sql"),
}];

/// 未適用のマイグレーションを実行し、適用した件数を返します。
pub fn run_migrations(conn: &Connection) -> Result<u32, StoreError> {
    ensure_version_table(conn)?;
    let current = current_version(conn)?;
    let mut applied = 0;

    for migration in MIGRATIONS {
        if migration.version <= current {
            debug!(version = migration.version, "migration already applied, skipping");
            continue;
        }
        info!(
            version = migration.version,
            description = migration.description,
            "applying migration"
        );
        apply_migration(conn, migration)?;
        applied += 1;
    }

    Ok(applied)
}

/// 適用済みの最大バージョン（未適用なら 0）
pub fn current_version(conn: &Connection) -> Result<u32, StoreError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StoreError::Migration {
        message: format!("failed to read schema_version: {e}"),
    })
}

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

fn ensure_version_table(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
           version     INTEGER PRIMARY KEY,
           applied_at  TEXT    NOT NULL,
           description TEXT
         );",
    )
    .map_err(|e| StoreError::Migration {
        message: format!("failed to create schema_version table: {e}"),
    })
}

fn apply_migration(conn: &Connection, migration: &Migration) -> Result<(), StoreError> {
    let failed = |e: rusqlite::Error| StoreError::Migration {
        message: format!(
            "v{:03} ({}) failed: {e}",
            migration.version, migration.description
        ),
    };

    // 失敗時は tx の drop でロールバックされる
    let tx = conn.unchecked_transaction().map_err(failed)?;
    tx.execute_batch(migration.sql).map_err(failed)?;
    let _ = tx
        .execute(
            "INSERT INTO schema_version (version, applied_at, description) VALUES (?1, datetime('now'), ?2)",
            rusqlite::params![migration.version, migration.description],
        )
        .map_err(failed)?;
    tx.commit().map_err(failed)
}

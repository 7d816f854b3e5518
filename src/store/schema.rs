use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{Result, WorkforceError};

pub const CURRENT_SCHEMA_VERSION: i64 = 2;

struct Migration {
    version: i64,
    statements: &'static [&'static str],
}

// Every statement is create-if-missing so a step can be replayed over a
// partially upgraded file without touching stored rows.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        statements: &[
            "CREATE TABLE IF NOT EXISTS missions (
                mission_id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                status TEXT NOT NULL,
                record TEXT NOT NULL
            )",
            "CREATE INDEX IF NOT EXISTS idx_missions_created_at ON missions(created_at)",
            "CREATE INDEX IF NOT EXISTS idx_missions_status ON missions(status)",
        ],
    },
    Migration {
        version: 2,
        statements: &["CREATE TABLE IF NOT EXISTS agents (
                name TEXT PRIMARY KEY,
                record TEXT NOT NULL
            )"],
    },
];

async fn ensure_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| WorkforceError::storage("schema_version", e))?;
    Ok(())
}

/// Highest applied migration. Read-only; the version table is created by
/// [`migrate`].
pub async fn current_version(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(|e| WorkforceError::storage("schema_version", e))
}

/// Applies every migration newer than the recorded version.
pub async fn migrate(pool: &SqlitePool) -> Result<i64> {
    migrate_to(pool, CURRENT_SCHEMA_VERSION).await
}

pub(crate) async fn migrate_to(pool: &SqlitePool, target: i64) -> Result<i64> {
    ensure_version_table(pool).await?;
    let current = current_version(pool).await?;
    if current >= target {
        debug!("Record store schema at version {current}, nothing to apply");
        return Ok(current);
    }

    let mut applied = current;
    for migration in MIGRATIONS
        .iter()
        .filter(|m| m.version > current && m.version <= target)
    {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| WorkforceError::storage("migrate", e))?;
        for statement in migration.statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| WorkforceError::storage("migrate", e))?;
        }
        sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| WorkforceError::storage("migrate", e))?;
        tx.commit()
            .await
            .map_err(|e| WorkforceError::storage("migrate", e))?;
        applied = migration.version;
    }

    info!("Upgraded record store schema from version {current} to {applied}");
    Ok(applied)
}

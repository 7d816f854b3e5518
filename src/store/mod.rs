#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Local record store: SQLite tables for mission and agent records.
//!
//! A [`RecordStore`] starts closed. Every record operation fails with
//! [`WorkforceError::NotReady`] until [`RecordStore::open`] has completed;
//! `open` is idempotent and concurrent callers share one initialization.

pub(crate) mod schema;

use chrono::SecondsFormat;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{Result, WorkforceError};
use crate::repository::{MissionStore, StoreFuture};
use crate::types::{AgentTool, Mission, MissionId, MissionStatus};

pub use schema::CURRENT_SCHEMA_VERSION;

static GLOBAL_STORE: OnceLock<RecordStore> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

pub struct RecordStore {
    location: StoreLocation,
    pool: OnceCell<SqlitePool>,
}

impl RecordStore {
    #[must_use]
    pub const fn new(location: StoreLocation) -> Self {
        Self {
            location,
            pool: OnceCell::const_new(),
        }
    }

    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(StoreLocation::File(path.as_ref().to_path_buf()))
    }

    #[must_use]
    pub const fn in_memory() -> Self {
        Self::new(StoreLocation::Memory)
    }

    /// Process-wide store, created on first call and never closed. Later
    /// calls ignore `location` and return the existing handle.
    pub fn global(location: impl FnOnce() -> StoreLocation) -> &'static Self {
        GLOBAL_STORE.get_or_init(|| Self::new(location()))
    }

    #[must_use]
    pub const fn location(&self) -> &StoreLocation {
        &self.location
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pool.initialized()
    }

    /// Connects and brings the schema up to [`CURRENT_SCHEMA_VERSION`].
    ///
    /// # Errors
    /// Returns `WorkforceError::StorageFailure` if the database cannot be
    /// opened or upgraded, or `WorkforceError::IoError` if its parent
    /// directory cannot be created.
    pub async fn open(&self) -> Result<()> {
        self.pool
            .get_or_try_init(|| async {
                let pool = self.connect().await?;
                let version = schema::migrate(&pool).await?;
                info!(
                    "Opened record store at {} (schema v{version})",
                    self.describe()
                );
                Ok::<_, WorkforceError>(pool)
            })
            .await
            .map(|_| ())
    }

    async fn connect(&self) -> Result<SqlitePool> {
        let (options, max_connections) = match &self.location {
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .busy_timeout(Duration::from_secs(5))
                    .journal_mode(SqliteJournalMode::Wal);
                (options, 4)
            }
            // An in-memory database lives only as long as its connection.
            StoreLocation::Memory => (
                SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| WorkforceError::storage("open", e))?,
                1,
            ),
        };

        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| WorkforceError::storage("open", e))
    }

    fn describe(&self) -> String {
        match &self.location {
            StoreLocation::File(path) => path.display().to_string(),
            StoreLocation::Memory => ":memory:".to_string(),
        }
    }

    fn pool(&self) -> Result<&SqlitePool> {
        self.pool.get().ok_or(WorkforceError::NotReady)
    }

    /// # Errors
    /// Returns `WorkforceError::NotReady` before `open`.
    pub async fn schema_version(&self) -> Result<i64> {
        schema::current_version(self.pool()?).await
    }

    /// Inserts or fully replaces the record keyed by its `mission_id`.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` before `open`, or
    /// `WorkforceError::StorageFailure` if the write is rejected.
    pub async fn put_mission(&self, mission: &Mission) -> Result<()> {
        let pool = self.pool()?;
        let record = serde_json::to_string(mission)?;
        sqlx::query(
            "INSERT INTO missions (mission_id, created_at, status, record)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(mission_id) DO UPDATE SET
                created_at = excluded.created_at,
                status = excluded.status,
                record = excluded.record",
        )
        .bind(mission.mission_id.value())
        .bind(
            mission
                .created_at
                .to_rfc3339_opts(SecondsFormat::Nanos, true),
        )
        .bind(mission.status.as_str())
        .bind(record)
        .execute(pool)
        .await
        .map_err(|e| WorkforceError::storage("put_mission", e))?;

        debug!("Stored mission {}", mission.mission_id);
        Ok(())
    }

    /// # Errors
    /// Returns `WorkforceError::NotReady` before `open`, or
    /// `WorkforceError::StorageFailure` if the read fails or the stored
    /// record no longer decodes.
    pub async fn get_mission(&self, id: &MissionId) -> Result<Option<Mission>> {
        let pool = self.pool()?;
        sqlx::query_scalar::<_, String>("SELECT record FROM missions WHERE mission_id = ?")
            .bind(id.value())
            .fetch_optional(pool)
            .await
            .map_err(|e| WorkforceError::storage("get_mission", e))?
            .map(|record| decode_mission(&record))
            .transpose()
    }

    /// Removes the record if present. Absent ids are not an error.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` before `open`, or
    /// `WorkforceError::StorageFailure` if the delete is rejected.
    pub async fn delete_mission(&self, id: &MissionId) -> Result<()> {
        let pool = self.pool()?;
        let result = sqlx::query("DELETE FROM missions WHERE mission_id = ?")
            .bind(id.value())
            .execute(pool)
            .await
            .map_err(|e| WorkforceError::storage("delete_mission", e))?;

        debug!(
            "Deleted mission {id} ({} row(s))",
            result.rows_affected()
        );
        Ok(())
    }

    /// Every stored mission, in no particular order.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` before `open`, or
    /// `WorkforceError::StorageFailure` on read or decode failure.
    pub async fn list_missions(&self) -> Result<Vec<Mission>> {
        self.fetch_missions("list_missions", "SELECT record FROM missions", None)
            .await
    }

    /// Missions in the given lifecycle status, served by the status index.
    ///
    /// # Errors
    /// Same as [`RecordStore::list_missions`].
    pub async fn list_missions_by_status(&self, status: MissionStatus) -> Result<Vec<Mission>> {
        self.fetch_missions(
            "list_missions_by_status",
            "SELECT record FROM missions WHERE status = ?",
            Some(status.as_str()),
        )
        .await
    }

    /// Missions newest first, served by the `created_at` index.
    ///
    /// # Errors
    /// Same as [`RecordStore::list_missions`].
    pub async fn list_missions_recent(&self) -> Result<Vec<Mission>> {
        self.fetch_missions(
            "list_missions_recent",
            "SELECT record FROM missions ORDER BY created_at DESC, mission_id",
            None,
        )
        .await
    }

    async fn fetch_missions(
        &self,
        operation: &str,
        sql: &str,
        status: Option<&str>,
    ) -> Result<Vec<Mission>> {
        let pool = self.pool()?;
        let query = sqlx::query_scalar::<_, String>(sql);
        let query = match status {
            Some(status) => query.bind(status.to_string()),
            None => query,
        };
        query
            .fetch_all(pool)
            .await
            .map_err(|e| WorkforceError::storage(operation, e))?
            .iter()
            .map(|record| decode_mission(record))
            .collect()
    }

    /// Upserts catalog entries keyed by name, in one transaction.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` before `open`, or
    /// `WorkforceError::StorageFailure` if any write is rejected.
    pub async fn put_agents(&self, agents: &[AgentTool]) -> Result<()> {
        let pool = self.pool()?;
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| WorkforceError::storage("put_agents", e))?;
        for agent in agents {
            sqlx::query(
                "INSERT INTO agents (name, record) VALUES (?, ?)
                 ON CONFLICT(name) DO UPDATE SET record = excluded.record",
            )
            .bind(&agent.name)
            .bind(serde_json::to_string(agent)?)
            .execute(&mut *tx)
            .await
            .map_err(|e| WorkforceError::storage("put_agents", e))?;
        }
        tx.commit()
            .await
            .map_err(|e| WorkforceError::storage("put_agents", e))?;

        debug!("Cached {} catalog agents", agents.len());
        Ok(())
    }

    /// Cached catalog entries ordered by name.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` before `open`, or
    /// `WorkforceError::StorageFailure` on read or decode failure.
    pub async fn list_agents(&self) -> Result<Vec<AgentTool>> {
        let pool = self.pool()?;
        sqlx::query_scalar::<_, String>("SELECT record FROM agents ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(|e| WorkforceError::storage("list_agents", e))?
            .iter()
            .map(|record| {
                serde_json::from_str(record)
                    .map_err(|e| WorkforceError::storage("decode agent", e))
            })
            .collect()
    }
}

fn decode_mission(record: &str) -> Result<Mission> {
    serde_json::from_str(record).map_err(|e| WorkforceError::storage("decode mission", e))
}

impl MissionStore for RecordStore {
    fn put_mission<'a>(&'a self, mission: &'a Mission) -> StoreFuture<'a, ()> {
        Box::pin(Self::put_mission(self, mission))
    }

    fn get_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, Option<Mission>> {
        Box::pin(Self::get_mission(self, id))
    }

    fn delete_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, ()> {
        Box::pin(Self::delete_mission(self, id))
    }

    fn list_missions(&self) -> StoreFuture<'_, Vec<Mission>> {
        Box::pin(Self::list_missions(self))
    }

    fn list_missions_by_status(&self, status: MissionStatus) -> StoreFuture<'_, Vec<Mission>> {
        Box::pin(Self::list_missions_by_status(self, status))
    }

    fn list_missions_recent(&self) -> StoreFuture<'_, Vec<Mission>> {
        Box::pin(Self::list_missions_recent(self))
    }
}

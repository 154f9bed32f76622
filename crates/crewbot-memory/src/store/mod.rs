//! SQLite-backed appointment log.

#[cfg(test)]
mod tests;

use crate::appointments::{AppointmentLog, AppointmentRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crewbot_core::{error::CrewError, message::ConversationId, shellexpand};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Appointment log persisted in SQLite.
#[derive(Clone)]
pub struct SqliteAppointmentLog {
    pool: SqlitePool,
}

impl SqliteAppointmentLog {
    /// Open (or create) the database at `db_path`, running migrations on first use.
    pub async fn new(db_path: &str) -> Result<Self, CrewError> {
        let db_path = shellexpand(db_path);

        // Ensure parent directory exists.
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CrewError::Store(format!("failed to create data dir: {e}")))?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| CrewError::Store(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| CrewError::Store(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool).await?;

        info!("Appointment store initialized at {db_path}");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run SQL migrations, tracking which have already been applied.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), CrewError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| CrewError::Store(format!("failed to create migrations table: {e}")))?;

        let migrations: &[(&str, &str)] = &[(
            "001_appointments",
            include_str!("../../migrations/001_appointments.sql"),
        )];

        for (name, sql) in migrations {
            let applied: Option<(String,)> =
                sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| {
                        CrewError::Store(format!("failed to check migration {name}: {e}"))
                    })?;

            if applied.is_some() {
                continue;
            }

            sqlx::raw_sql(sql)
                .execute(pool)
                .await
                .map_err(|e| CrewError::Store(format!("migration {name} failed: {e}")))?;

            sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await
                .map_err(|e| CrewError::Store(format!("failed to record migration {name}: {e}")))?;
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentLog for SqliteAppointmentLog {
    async fn append(&self, record: &AppointmentRecord) -> Result<(), CrewError> {
        sqlx::query(
            "INSERT INTO appointments (conversation_id, id, details, submitted_at) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT(conversation_id) DO UPDATE SET \
             id = excluded.id, details = excluded.details, submitted_at = excluded.submitted_at",
        )
        .bind(record.conversation_id.as_str())
        .bind(record.id.to_string())
        .bind(&record.details)
        .bind(record.submitted_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| CrewError::Store(format!("appointment write failed: {e}")))?;

        debug!("stored appointment {} for {}", record.id, record.conversation_id);
        Ok(())
    }

    async fn latest(&self, id: &ConversationId) -> Result<Option<AppointmentRecord>, CrewError> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT id, details, submitted_at FROM appointments WHERE conversation_id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CrewError::Store(format!("appointment read failed: {e}")))?;

        row.map(|(record_id, details, submitted_at)| {
            Ok(AppointmentRecord {
                id: Uuid::parse_str(&record_id)
                    .map_err(|e| CrewError::Store(format!("bad appointment id: {e}")))?,
                conversation_id: id.clone(),
                details,
                submitted_at: DateTime::parse_from_rfc3339(&submitted_at)
                    .map_err(|e| CrewError::Store(format!("bad appointment timestamp: {e}")))?
                    .with_timezone(&Utc),
            })
        })
        .transpose()
    }

    async fn count(&self) -> Result<usize, CrewError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CrewError::Store(format!("appointment count failed: {e}")))?;
        Ok(count as usize)
    }
}

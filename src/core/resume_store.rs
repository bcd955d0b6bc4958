// src/core/resume_store.rs
//! Persistence of the single stored resume.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use crate::core::FsOps;

/// Storage key of the resume slot.
pub const RESUME_KEY: &str = "resume";

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Overwrites the stored resume.
    async fn save(&self, resume: &str) -> Result<()>;
    async fn load(&self) -> Result<Option<String>>;
    /// Removing an absent resume is not an error.
    async fn clear(&self) -> Result<()>;
}

// ===== SQLite-backed store =====

pub struct SqliteResumeStore {
    pool: SqlitePool,
}

impl SqliteResumeStore {
    /// Open (or create) the store at `database_path`.
    pub async fn open(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            FsOps::ensure_dir_exists(parent).await?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        info!("Resume store opened: {}", database_path.display());

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database, mainly for tests.
    pub async fn in_memory() -> Result<Self> {
        // every connection to :memory: is a separate database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create kv_store table")?;

        Ok(())
    }
}

#[async_trait]
impl ResumeStore for SqliteResumeStore {
    async fn save(&self, resume: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(RESUME_KEY)
        .bind(resume)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to save resume")?;

        info!("Resume saved ({} characters)", resume.chars().count());
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(RESUME_KEY)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load resume")?;

        row.map(|r| r.try_get::<String, _>("value"))
            .transpose()
            .context("Failed to decode stored resume")
    }

    async fn clear(&self) -> Result<()> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(RESUME_KEY)
            .execute(&self.pool)
            .await
            .context("Failed to remove resume")?;

        info!("Resume removed (rows affected: {})", result.rows_affected());
        Ok(())
    }
}

// ===== In-memory store =====

#[derive(Default)]
pub struct MemoryResumeStore {
    slot: Mutex<Option<String>>,
    read_only: bool,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resume(resume: &str) -> Self {
        Self {
            slot: Mutex::new(Some(resume.to_string())),
            read_only: false,
        }
    }

    /// A store that loads fine but rejects every write.
    pub fn read_only() -> Self {
        Self {
            slot: Mutex::new(None),
            read_only: true,
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| anyhow::anyhow!("resume slot lock poisoned"))
    }

    fn writable_slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        if self.read_only {
            anyhow::bail!("storage is read-only");
        }
        self.slot()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn save(&self, resume: &str) -> Result<()> {
        *self.writable_slot()? = Some(resume.to_string());
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.writable_slot()? = None;
        Ok(())
    }
}

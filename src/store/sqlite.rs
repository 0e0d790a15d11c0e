use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

use super::{BlobStore, StoreKey};

const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Durable blob store backed by a single SQLite database. One row per
/// `(kind, profile_id)` key; values are opaque JSON text.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create store directory {}", parent.display())
            })?;
        }

        let mut conn = Connection::open(&db_path)
            .with_context(|| format!("failed to open store at {}", db_path.display()))?;

        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }

        run_migrations(&mut conn).context("failed to run store migrations")?;

        info!("Blob store initialized at {}", db_path.display());

        Ok(Self { conn })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn =
            Connection::open_in_memory().context("failed to open in-memory store")?;
        run_migrations(&mut conn).context("failed to run store migrations")?;
        Ok(Self { conn })
    }
}

fn run_migrations(conn: &mut Connection) -> Result<()> {
    let mut version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "store version ({}) is newer than supported schema ({})",
            version,
            CURRENT_SCHEMA_VERSION
        );
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        apply_migration(&tx, next_version)
            .with_context(|| format!("migration to version {next_version} failed"))?;
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

fn apply_migration(tx: &rusqlite::Transaction<'_>, version: i32) -> Result<()> {
    match version {
        1 => {
            tx.execute_batch(
                "CREATE TABLE blobs (
                     kind TEXT NOT NULL,
                     profile_id TEXT NOT NULL,
                     value TEXT NOT NULL,
                     updated_at TEXT NOT NULL,
                     PRIMARY KEY (kind, profile_id)
                 );",
            )
            .context("failed to create blobs table")?;
            Ok(())
        }
        other => bail!("unknown schema version {other}"),
    }
}

impl BlobStore for SqliteStore {
    fn load(&self, key: &StoreKey) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM blobs WHERE kind = ?1 AND profile_id = ?2",
                params![key.kind(), key.profile_id()],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to load blob {:?}", key))
    }

    fn save(&self, key: &StoreKey, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO blobs (kind, profile_id, value, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (kind, profile_id) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![
                    key.kind(),
                    key.profile_id(),
                    value,
                    Utc::now().to_rfc3339(),
                ],
            )
            .with_context(|| format!("failed to save blob {:?}", key))?;
        Ok(())
    }

    fn delete(&self, key: &StoreKey) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM blobs WHERE kind = ?1 AND profile_id = ?2",
                params![key.kind(), key.profile_id()],
            )
            .with_context(|| format!("failed to delete blob {:?}", key))?;
        Ok(())
    }
}

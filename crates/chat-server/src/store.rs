//! Append-only SQLite chat log
//!
//! Each exchange is one row in `chat_logs`. Timestamps are stored as
//! fixed-width RFC 3339 strings (microseconds, `Z` suffix) so text order is
//! chronological order.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chat_core::ChatLogEntry;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use serde::Serialize;

use crate::error::{Result, ServerError};

/// A chat log row as read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredChatLog {
    /// Row id, increasing with insertion order
    pub id: i64,
    /// The logged exchange
    #[serde(flatten)]
    pub entry: ChatLogEntry,
}

/// SQLite-backed chat log; writes are serialised through a mutex
pub struct ChatLogStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl ChatLogStore {
    /// Open (or create) the log database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        };
        store.initialize()?;
        tracing::info!(path = %path.display(), "Chat log opened");
        Ok(store)
    }

    /// Open a private in-memory log
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Database file, `None` for in-memory logs
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn initialize(&self) -> Result<()> {
        self.lock()?.execute(
            "CREATE TABLE IF NOT EXISTS chat_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_input TEXT NOT NULL,
                bot_response TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ServerError::LockPoisoned)
    }

    /// Append one exchange, returning its row id
    pub fn append(&self, entry: &ChatLogEntry) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO chat_logs (user_input, bot_response, timestamp) VALUES (?1, ?2, ?3)",
            params![
                entry.user_input,
                entry.bot_response,
                entry.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// The most recent `limit` exchanges, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<StoredChatLog>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_input, bot_response, timestamp FROM chat_logs
             ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit], row_to_log)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Total number of logged exchanges
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM chat_logs", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

fn row_to_log(row: &Row<'_>) -> rusqlite::Result<StoredChatLog> {
    let raw: String = row.get(3)?;
    let timestamp = DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(StoredChatLog {
        id: row.get(0)?,
        entry: ChatLogEntry::at(row.get::<_, String>(1)?, row.get::<_, String>(2)?, timestamp),
    })
}

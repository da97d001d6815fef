//! Snapshot store contracts and implementations.
//!
//! # Responsibility
//! - Persist one serialized task list under a fixed namespace key.
//! - Return the last saved snapshot, or report that none exists.
//!
//! # Invariants
//! - `load` never fails; unreadable storage is reported as `Absent`.
//! - `save` overwrites the previous snapshot in one statement (last write
//!   wins, no partial writes visible to a later `load`).
//! - Snapshot bytes are opaque here; decoding belongs to `TaskList`.

use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of reading the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Absent,
    Snapshot(Vec<u8>),
}

/// Failure to persist a snapshot.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Task list could not be serialized.
    Encode(String),
    /// Backend refused the write (quota, read-only medium).
    WriteRejected(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(message) => write!(f, "failed to encode snapshot: {message}"),
            Self::WriteRejected(message) => write!(f, "snapshot write rejected: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(_) | Self::WriteRejected(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value storage for task list snapshots.
pub trait SnapshotStore {
    fn load(&self) -> LoadOutcome;
    fn save(&mut self, snapshot: &[u8]) -> StoreResult<()>;
}

/// SQLite-backed snapshot store keyed by namespace.
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
    namespace: String,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    /// Creates a store over a migrated connection.
    pub fn new(conn: &'conn Connection, namespace: impl Into<String>) -> Self {
        Self {
            conn,
            namespace: namespace.into(),
        }
    }

    fn read_payload(&self) -> StoreResult<Option<Vec<u8>>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE namespace = ?1;",
                [self.namespace.as_str()],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(payload)
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn load(&self) -> LoadOutcome {
        match self.read_payload() {
            Ok(Some(payload)) => LoadOutcome::Snapshot(payload),
            Ok(None) => LoadOutcome::Absent,
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=error namespace={} error={}",
                    self.namespace, err
                );
                LoadOutcome::Absent
            }
        }
    }

    fn save(&mut self, snapshot: &[u8]) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (namespace, payload)
             VALUES (?1, ?2)
             ON CONFLICT(namespace) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![self.namespace.as_str(), snapshot],
        )?;
        Ok(())
    }
}

/// In-process snapshot store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    payload: Option<Vec<u8>>,
    reject_writes: Option<String>,
    saves: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing snapshot, as if saved by an earlier session.
    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    /// Makes every following `save` fail with `WriteRejected(reason)`.
    pub fn reject_writes(&mut self, reason: impl Into<String>) {
        self.reject_writes = Some(reason.into());
    }

    pub fn accept_writes(&mut self) {
        self.reject_writes = None;
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> LoadOutcome {
        match &self.payload {
            Some(payload) => LoadOutcome::Snapshot(payload.clone()),
            None => LoadOutcome::Absent,
        }
    }

    fn save(&mut self, snapshot: &[u8]) -> StoreResult<()> {
        if let Some(reason) = &self.reject_writes {
            return Err(StoreError::WriteRejected(reason.clone()));
        }
        self.payload = Some(snapshot.to_vec());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOutcome, MemorySnapshotStore, SnapshotStore, StoreError};

    #[test]
    fn memory_store_starts_absent() {
        assert_eq!(MemorySnapshotStore::new().load(), LoadOutcome::Absent);
    }

    #[test]
    fn memory_store_last_write_wins() {
        let mut store = MemorySnapshotStore::new();
        store.save(b"[1]").expect("first save");
        store.save(b"[2]").expect("second save");
        assert_eq!(store.load(), LoadOutcome::Snapshot(b"[2]".to_vec()));
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn rejected_write_keeps_previous_payload() {
        let mut store = MemorySnapshotStore::with_payload(b"[]".to_vec());
        store.reject_writes("quota exceeded");
        let err = store.save(b"[1]").unwrap_err();
        assert!(matches!(err, StoreError::WriteRejected(reason) if reason == "quota exceeded"));
        assert_eq!(store.payload(), Some(&b"[]"[..]));

        store.accept_writes();
        store.save(b"[1]").expect("writes accepted again");
        assert_eq!(store.payload(), Some(&b"[1]"[..]));
    }
}

//! Persistence backends for the store document.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};
use tempfile::NamedTempFile;

use crate::document::Document;
use crate::error::StoreError;

pub trait Backend: Send + Sync {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Document>, StoreError>;

    /// Replaces the stored document as a whole.
    fn save(&self, document: &Document) -> Result<(), StoreError>;

    fn describe(&self) -> String;
}

/// One pretty-printed JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl Backend for JsonFileBackend {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        let dir = self.dir();
        fs::create_dir_all(dir)?;

        // Write next to the target so the rename stays on one filesystem.
        let bytes = serde_json::to_vec_pretty(document)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// The document stored as a single row of a SQLite table.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
    label: String,
}

impl SqliteBackend {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn, format!("sqlite:{}", path.display()))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, "sqlite::memory:".to_string())
    }

    fn with_connection(conn: Connection, label: String) -> Result<Self, StoreError> {
        Self::initialize(&conn)?;
        Ok(SqliteBackend {
            conn: Mutex::new(conn),
            label,
        })
    }

    fn initialize(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "
            -- The whole store document, one row
            CREATE TABLE IF NOT EXISTS document (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                body TEXT NOT NULL,
                revision INTEGER NOT NULL DEFAULT 0,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )
    }

    /// Number of saves so far, `None` before the first one.
    pub fn revision(&self) -> Result<Option<i64>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let revision = conn
            .query_row("SELECT revision FROM document WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(revision)
    }
}

impl Backend for SqliteBackend {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let body: Option<String> = conn
            .query_row("SELECT body FROM document WHERE id = 1", [], |row| row.get(0))
            .optional()?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        let body = serde_json::to_string(document)?;
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO document (id, body, revision) VALUES (1, ?1, 1)
             ON CONFLICT(id) DO UPDATE SET
                body = excluded.body,
                revision = document.revision + 1,
                updated_at = CURRENT_TIMESTAMP",
            [&body],
        )?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    document: Mutex<Option<Document>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

/// Keeps the document in memory. Clones share state, so a caller can keep a
/// handle after giving one to a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        let backend = Self::default();
        if let Ok(mut slot) = backend.state.document.lock() {
            *slot = Some(document);
        }
        backend
    }

    /// Makes every following save fail with an I/O error.
    pub fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.state.writes.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Option<Document> {
        self.state
            .document
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
    }
}

impl Backend for MemoryBackend {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        let slot = self.state.document.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        if self.state.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("write refused").into());
        }
        let mut slot = self.state.document.lock().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(document.clone());
        self.state.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

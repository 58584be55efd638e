use std::path::PathBuf;
use std::str::FromStr;

use crate::db::Store;
use crate::error::StoreError;
use crate::storage::{JsonFileBackend, SqliteBackend};

/// Directory created under the platform's per-user data directory.
pub const APP_DIR: &str = "luxe-salon";

pub const JSON_FILE: &str = "luxe_db.json";
pub const SQLITE_FILE: &str = "luxe_db.sqlite";

pub const DATA_DIR_VAR: &str = "LUXE_DATA_DIR";
pub const BACKEND_VAR: &str = "LUXE_BACKEND";
pub const LOG_VAR: &str = "LUXE_LOG";

/// `$XDG_DATA_HOME/luxe-salon` and its platform equivalents. Falls back to
/// the current directory only where the platform reports no data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(BackendKind::Json),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => Err(StoreError::Config(format!(
                "unknown backend `{other}`, expected `json` or `sqlite`"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        AppConfig {
            data_dir: data_dir.into(),
            backend: BackendKind::default(),
            log_filter: None,
        }
    }

    /// `default_data_dir` overridden by the `LUXE_*` environment variables.
    pub fn from_env(default_data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::from_lookup(default_data_dir, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        default_data_dir: impl Into<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, StoreError> {
        let mut config = Self::new(default_data_dir);

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(BACKEND_VAR) {
            config.backend = backend.parse()?;
        }
        config.log_filter = lookup(LOG_VAR).filter(|v| !v.trim().is_empty());

        Ok(config)
    }

    pub fn document_path(&self) -> PathBuf {
        match self.backend {
            BackendKind::Json => self.data_dir.join(JSON_FILE),
            BackendKind::Sqlite => self.data_dir.join(SQLITE_FILE),
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn open_store(&self) -> Result<Store, StoreError> {
        let path = self.document_path();
        tracing::info!(path = %path.display(), backend = ?self.backend, "Opening store");
        match self.backend {
            BackendKind::Json => Store::open(JsonFileBackend::new(path)),
            BackendKind::Sqlite => Store::open(SqliteBackend::open(path)?),
        }
    }
}

use crate::errors::TrackerError;
use crate::models::{Configuration, Entry, TrackingData};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Tracking,
    Config,
}

impl Document {
    pub fn file_name(self) -> &'static str {
        match self {
            Document::Tracking => "tracking_data.json",
            Document::Config => "config.json",
        }
    }
}

/// Data directory holding one JSON file per document.
#[derive(Debug, Clone)]
pub struct Backend {
    dir: PathBuf,
}

impl Backend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, document: Document) -> PathBuf {
        self.dir.join(document.file_name())
    }

    pub async fn read(&self, document: Document) -> Result<Option<Vec<u8>>, TrackerError> {
        match fs::read(self.path(document)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the whole document. No temp file or rename is involved.
    pub async fn write(&self, document: Document, payload: Vec<u8>) -> Result<(), TrackerError> {
        ensure_dir(&self.dir).await?;
        fs::write(self.path(document), payload).await?;
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, document: Document) -> Result<Option<T>, TrackerError> {
        let Some(bytes) = self.read(document).await? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| TrackerError::Parse {
                document: document.file_name(),
                source,
            })
    }

    async fn write_json<T: Serialize>(&self, document: Document, value: &T) -> Result<(), TrackerError> {
        let payload = serde_json::to_vec_pretty(value).map_err(|source| TrackerError::Encode {
            document: document.file_name(),
            source,
        })?;
        self.write(document, payload).await
    }
}

async fn ensure_dir(dir: &Path) -> Result<(), TrackerError> {
    if fs::metadata(dir).await.is_err() {
        fs::create_dir_all(dir).await?;
        info!("created data directory {}", dir.display());
    }
    Ok(())
}

/// Per-category goals and notification preferences.
#[derive(Clone)]
pub struct ConfigStore {
    backend: Backend,
}

impl ConfigStore {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Loads the configuration, persisting the default document on first run.
    pub async fn load(&self) -> Result<Configuration, TrackerError> {
        if let Some(config) = self.backend.read_json(Document::Config).await? {
            return Ok(config);
        }

        let config = Configuration::default();
        self.save(&config).await?;
        info!("materialized default configuration in {}", self.backend.dir().display());
        Ok(config)
    }

    pub async fn save(&self, config: &Configuration) -> Result<(), TrackerError> {
        self.backend.write_json(Document::Config, config).await
    }
}

/// Append-only log of entries.
#[derive(Clone)]
pub struct EntryStore {
    backend: Backend,
}

impl EntryStore {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// All entries in the order they were appended. A missing document is an
    /// empty log.
    pub async fn load_all(&self) -> Result<Vec<Entry>, TrackerError> {
        let data: TrackingData = self
            .backend
            .read_json(Document::Tracking)
            .await?
            .unwrap_or_default();
        Ok(data.entries)
    }

    /// Read-modify-write of the whole document. A malformed document is left
    /// untouched and reported. Concurrent appends are not serialised.
    pub async fn append(&self, entry: Entry) -> Result<(), TrackerError> {
        let mut data: TrackingData = self
            .backend
            .read_json(Document::Tracking)
            .await?
            .unwrap_or_default();
        data.entries.push(entry);
        self.backend.write_json(Document::Tracking, &data).await?;
        debug!("stored entry #{}", data.entries.len());
        Ok(())
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, SystemTime};

use log::{debug, info, warn};

use crate::error::LoadError;
use crate::record_model::{Collection, Record};

const DEFAULT_CACHE_FILE: &str = "json_search_cache.json";

/// `<temp dir>/json_search_cache.json`, for callers that want a shared
/// snapshot location. Nothing picks it up implicitly.
pub fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_FILE)
}

pub struct DataStore {
    records: Collection,
    loaded: bool,
    cache_path: Option<PathBuf>,
    cache_ttl: Duration,
}

impl DataStore {
    pub fn new(cache_path: Option<PathBuf>, cache_ttl: Duration) -> Self {
        Self {
            records: Vec::new(),
            loaded: false,
            cache_path,
            cache_ttl,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether any load has succeeded yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Loads `source`, serving a fresh snapshot instead when one exists.
    pub fn load(&mut self, source: &Path) -> Result<&[Record], LoadError> {
        if let Some(records) = self.read_snapshot() {
            info!("Loaded {} records from cache snapshot", records.len());
            self.records = records;
            self.loaded = true;
            return Ok(&self.records);
        }
        self.reload(source)
    }

    /// Parses `source` unconditionally and overwrites the snapshot.
    pub fn reload(&mut self, source: &Path) -> Result<&[Record], LoadError> {
        let bytes = fs::read(source).map_err(|source_err| LoadError::Unreadable {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let records: Collection = serde_json::from_slice(&bytes)?;
        info!("Parsed {} records from {}", records.len(), source.display());

        self.write_snapshot(&records);
        self.records = records;
        self.loaded = true;
        Ok(&self.records)
    }

    /// Decodes an in-memory document. The snapshot is neither read nor written.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&[Record], LoadError> {
        self.records = serde_json::from_slice(bytes)?;
        self.loaded = true;
        info!("Parsed {} records from memory", self.records.len());
        Ok(&self.records)
    }

    pub fn clear_cache(&self) -> io::Result<()> {
        let Some(path) = self.cache_path.as_deref() else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn caching_enabled(&self) -> Option<&Path> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        self.cache_path.as_deref()
    }

    fn read_snapshot(&self) -> Option<Collection> {
        let path = self.caching_enabled()?;
        let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok()?;
        // an mtime in the future counts as brand new
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= self.cache_ttl {
            debug!("Cache snapshot {} is stale ({:?} old)", path.display(), age);
            return None;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not read cache snapshot {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!("Discarding unreadable cache snapshot {}: {e}", path.display());
                None
            }
        }
    }

    fn write_snapshot(&self, records: &[Record]) {
        let Some(path) = self.caching_enabled() else {
            return;
        };
        let bytes = match serde_json::to_vec(records) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not serialize cache snapshot: {e}");
                return;
            }
        };

        let staging = path.with_extension(format!("{}.tmp", process::id()));
        let written = fs::write(&staging, bytes).and_then(|_| fs::rename(&staging, path));
        if let Err(e) = written {
            warn!("Could not write cache snapshot {}: {e}", path.display());
            let _ = fs::remove_file(&staging);
        }
    }
}

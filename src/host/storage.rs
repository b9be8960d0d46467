//! Key-value store backed by one JSON file.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use pagebrief_protocols::error::PlatformError;
use pagebrief_protocols::types::StorageRecord;

/// Flat JSON object on disk. The file is created on the first write; a
/// missing file reads as an empty store. It holds the API key, so on Unix
/// it is readable by the owner only.
pub struct JsonStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Values for `keys`. Absent keys are left out.
    pub async fn get(&self, keys: &[&str]) -> Result<StorageRecord, PlatformError> {
        let all = self.read_all().await?;
        Ok(all
            .into_iter()
            .filter(|(key, _)| keys.contains(&key.as_str()))
            .collect())
    }

    /// Merge `values` into the store.
    pub async fn set(&self, values: StorageRecord) -> Result<(), PlatformError> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.read_all().await?;
        let count = values.len();
        all.extend(values);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(storage_error)?;
        }
        let json = serde_json::to_string_pretty(&all)
            .map_err(|e| PlatformError::Storage(e.to_string()))?;
        write_private(&self.path, json.as_bytes())
            .await
            .map_err(storage_error)?;
        debug!(path = ?self.path, keys = count, "Storage written");
        Ok(())
    }

    async fn read_all(&self) -> Result<StorageRecord, PlatformError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StorageRecord::new()),
            Err(e) => return Err(storage_error(e)),
        };
        match serde_json::from_str::<StorageRecord>(&content) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Storage file is not a JSON object, treating as empty");
                Ok(StorageRecord::new())
            }
        }
    }
}

async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let mut file = options.open(path).await?;

    // `mode` only applies on creation.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .await?;
    }
    file.write_all(contents).await?;
    file.flush().await
}

fn storage_error(e: std::io::Error) -> PlatformError {
    PlatformError::Storage(e.to_string())
}

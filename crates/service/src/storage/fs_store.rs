use std::{io::ErrorKind, path::{Path, PathBuf}, sync::Arc};
use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::graph::name::GraphName;
use crate::storage::port::GraphStorage;

pub const FILE_SUFFIX: &str = ".json";

/// Directory-backed `GraphStorage`: one `<name>.json` file per graph.
///
/// Writes go to a hidden temp file in the same directory and are renamed over
/// the target, so a reader sees either the previous document or the new one.
#[derive(Clone, Debug)]
pub struct FileGraphStorage {
    dir: PathBuf,
}

impl FileGraphStorage {
    /// Open the store rooted at `dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(ServiceError::write)?;
        info!(dir = %dir.display(), "graph storage directory ready");
        Ok(Arc::new(Self { dir }))
    }

    /// Location of the document file for `key`.
    pub fn path_for(&self, key: &GraphName) -> PathBuf {
        self.dir.join(format!("{key}{FILE_SUFFIX}"))
    }

    fn temp_path_for(&self, key: &GraphName) -> PathBuf {
        self.dir.join(format!(".{key}{FILE_SUFFIX}.{}.tmp", Uuid::new_v4().simple()))
    }

    async fn write_temp(tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl GraphStorage for FileGraphStorage {
    async fn list_keys(&self) -> Result<Vec<String>, ServiceError> {
        let mut entries = fs::read_dir(&self.dir).await.map_err(ServiceError::read)?;
        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(ServiceError::read)? {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else { continue };
            // temp files start with '.'; foreign files fail the name check
            let Some(stem) = file_name.strip_suffix(FILE_SUFFIX) else { continue };
            if GraphName::parse(stem).is_err() {
                continue;
            }
            match entry.file_type().await {
                Ok(ft) if ft.is_file() => keys.push(stem.to_string()),
                Ok(_) => {}
                Err(e) => return Err(ServiceError::read(e)),
            }
        }
        Ok(keys)
    }

    async fn read(&self, key: &GraphName) -> Result<Option<Vec<u8>>, ServiceError> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), len = bytes.len(), "graph file read");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::read(e)),
        }
    }

    async fn write(&self, key: &GraphName, bytes: &[u8]) -> Result<(), ServiceError> {
        let target = self.path_for(key);
        let tmp = self.temp_path_for(key);

        let result = match Self::write_temp(&tmp, bytes).await {
            Ok(()) => fs::rename(&tmp, &target).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp file");
                }
            }
            return Err(ServiceError::write(e));
        }
        debug!(path = %target.display(), len = bytes.len(), "graph file written");
        Ok(())
    }

    async fn remove(&self, key: &GraphName) -> Result<bool, ServiceError> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "graph file removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServiceError::write(e)),
        }
    }
}

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::domain::{SessionKey, SessionStore, StoreError};

// Process-local session store; state is lost on exit.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    values: Arc<Mutex<HashMap<SessionKey, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().await.get(&key).cloned())
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        self.values.lock().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        self.values.lock().await.remove(&key);
        Ok(())
    }
}

// Session store persisted as a flat JSON object (`{"token": "...", ...}`).
// Each write goes to a uniquely named temp file in the same directory, which is
// then renamed over the original.
#[derive(Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                tokio::fs::create_dir_all(parent).await?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };
        let bytes = serde_json::to_vec_pretty(values)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.persist(&path).map_err(|err| err.error)?;
            Ok(())
        })
        .await
        .map_err(|err| StoreError::Io(std::io::Error::other(err)))?
    }

    async fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        apply(&mut values);
        self.save(&values).await
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError> {
        Ok(self.load().await?.remove(key.as_str()))
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError> {
        self.update(|values| {
            values.insert(key.as_str().to_string(), value.to_string());
        })
        .await
    }

    async fn remove(&self, key: SessionKey) -> Result<(), StoreError> {
        self.update(|values| {
            values.remove(key.as_str());
        })
        .await
    }
}

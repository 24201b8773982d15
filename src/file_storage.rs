use crate::backend::StorageBackend;
use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::error;

/// Persistent key-value store: one JSON object on disk holding all key
/// families, loaded at startup and flushed on every mutation. Flush failures
/// are logged and the in-memory state stays authoritative until the next
/// successful write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: Arc<PathBuf>,
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl FileStorage {
    pub fn new(path: &Path) -> io::Result<Self> {
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw).unwrap_or_else(|err| {
                error!(?err, "Storage file is unreadable, starting empty");
                HashMap::new()
            })
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: Arc::new(path.to_path_buf()),
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let encoded = match serde_json::to_string(entries) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(?err, "Failed to encode storage contents");
                return;
            }
        };
        if let Err(err) = std::fs::write(self.path.as_ref(), encoded) {
            error!(?err, "Failed to write storage file");
        }
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value);
        self.flush(&entries);
    }

    fn update(&self, key: &str, update: impl FnOnce(Option<&str>) -> Option<String>) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(value) = update(entries.get(key).map(String::as_str)) {
            entries.insert(key.to_string(), value);
            self.flush(&entries);
        }
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        self.flush(&entries);
    }
}

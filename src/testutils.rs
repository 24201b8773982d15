use crate::backend::StorageBackend;
use crate::configuration::Configuration;
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

pub struct MockStorageInner {
    pub calls_to_read: AtomicU64,
    pub calls_to_write: AtomicU64,
    pub calls_to_update: AtomicU64,
    pub calls_to_remove: AtomicU64,
    pub entries: Mutex<HashMap<String, String>>,
}

/// Counting storage fake. Behaves like `LocalStorage` so full flows work, but
/// records how often each operation was hit.
#[derive(Clone)]
pub struct MockStorage(pub Arc<MockStorageInner>);

impl MockStorage {
    pub fn new() -> Self {
        Self(Arc::new(MockStorageInner {
            calls_to_read: AtomicU64::default(),
            calls_to_write: AtomicU64::default(),
            calls_to_update: AtomicU64::default(),
            calls_to_remove: AtomicU64::default(),
            entries: Mutex::default(),
        }))
    }
}

impl StorageBackend for MockStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.0.calls_to_read.fetch_add(1, Ordering::SeqCst);
        self.0.entries.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        self.0.calls_to_write.fetch_add(1, Ordering::SeqCst);
        self.0.entries.lock().unwrap().insert(key.to_string(), value);
    }

    fn update(&self, key: &str, update: impl FnOnce(Option<&str>) -> Option<String>) {
        self.0.calls_to_update.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.0.entries.lock().unwrap();
        if let Some(value) = update(entries.get(key).map(String::as_str)) {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        self.0.calls_to_remove.fetch_add(1, Ordering::SeqCst);
        self.0.entries.lock().unwrap().remove(key);
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub share_origin: String,
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            share_origin: "http://localhost:3000".into(),
        }
    }
}

impl Configuration for TestConfiguration {
    fn port(&self) -> String {
        "0".into()
    }

    fn share_origin(&self) -> String {
        self.share_origin.clone()
    }

    fn storage_path(&self) -> Option<PathBuf> {
        None
    }
}

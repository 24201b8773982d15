use crate::backend::StorageBackend;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// In-memory key-value store, the counterpart of the browser's local storage.
/// Contents live as long as the process.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    fn update(&self, key: &str, update: impl FnOnce(Option<&str>) -> Option<String>) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(value) = update(entries.get(key).map(String::as_str)) {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_read_write_remove() {
        let storage = LocalStorage::default();
        assert_eq!(storage.read("availability-id-1"), None);

        storage.write("availability-id-1", "[]".into());
        assert_eq!(storage.read("availability-id-1"), Some("[]".into()));

        storage.write("availability-id-1", "[1]".into());
        assert_eq!(storage.read("availability-id-1"), Some("[1]".into()));

        storage.remove("availability-id-1");
        assert_eq!(storage.read("availability-id-1"), None);

        storage.remove("availability-id-1"); // removing twice is fine
    }

    #[test]
    fn test_update_writes_only_when_a_value_is_returned() {
        let storage = LocalStorage::default();

        storage.update("bookings-id-1", |current| {
            assert_eq!(current, None);
            Some("[]".into())
        });
        assert_eq!(storage.read("bookings-id-1"), Some("[]".into()));

        storage.update("bookings-id-1", |current| {
            assert_eq!(current, Some("[]"));
            None
        });
        assert_eq!(storage.read("bookings-id-1"), Some("[]".into()));
    }
}

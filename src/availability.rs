use crate::backend::StorageBackend;
use crate::error::{BookingError, Result};
use crate::token;
use crate::types::Slot;
use tracing::error;

const KEY_PREFIX: &str = "availability-";

/// Keyed collection of slot sets. The only mutation is whole-set creation;
/// slots are never updated or removed individually.
#[derive(Debug, Clone)]
pub struct AvailabilityStore<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> AvailabilityStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }

    /// Persists the slot sequence under a freshly generated token. An empty
    /// sequence is rejected before any token is generated.
    pub fn publish(&self, slots: Vec<Slot>) -> Result<String> {
        if slots.is_empty() {
            return Err(BookingError::EmptyPublish);
        }
        let token = token::generate();
        let encoded = serde_json::to_string(&slots).unwrap();
        self.storage.write(&Self::key(&token), encoded);
        Ok(token)
    }

    /// Reads back the slot set for a token, in publish order. Absent keys and
    /// unparsable stored data both surface as `NotFound`.
    pub fn get(&self, token: &str) -> Result<Vec<Slot>> {
        let raw = self
            .storage
            .read(&Self::key(token))
            .ok_or(BookingError::NotFound)?;
        serde_json::from_str(&raw).map_err(|err| {
            error!(?err, token, "Stored availability is unreadable");
            BookingError::NotFound
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::local_storage::LocalStorage;
    use chrono::{NaiveDate, NaiveTime};

    fn slot(day: u32, hour: u32) -> Slot {
        Slot::new(
            NaiveDate::from_ymd_opt(2999, 1, day).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_publish_and_read_back_preserves_order() {
        let store = AvailabilityStore::new(LocalStorage::default());

        let slots = vec![slot(12, 14), slot(10, 9), slot(10, 11)];
        let token = store.publish(slots.clone()).unwrap();

        assert_eq!(store.get(&token).unwrap(), slots);
    }

    #[test]
    fn test_publish_empty_is_rejected() {
        let store = AvailabilityStore::new(LocalStorage::default());
        assert_eq!(store.publish(vec![]).unwrap_err(), BookingError::EmptyPublish);
    }

    #[test]
    fn test_get_unknown_token() {
        let store = AvailabilityStore::new(LocalStorage::default());
        assert_eq!(store.get("id-0-missing").unwrap_err(), BookingError::NotFound);
    }

    #[test]
    fn test_get_corrupted_data() {
        let storage = LocalStorage::default();
        storage.write("availability-id-0-bad", "not json".into());

        let store = AvailabilityStore::new(storage);
        assert_eq!(store.get("id-0-bad").unwrap_err(), BookingError::NotFound);
    }

    #[test]
    fn test_separate_publishes_get_separate_tokens() {
        let store = AvailabilityStore::new(LocalStorage::default());

        let first = store.publish(vec![slot(10, 9)]).unwrap();
        let second = store.publish(vec![slot(11, 9)]).unwrap();
        assert_ne!(first, second);

        let first_date = NaiveDate::from_ymd_opt(2999, 1, 10).unwrap();
        let second_date = NaiveDate::from_ymd_opt(2999, 1, 11).unwrap();
        assert_eq!(store.get(&first).unwrap()[0].date, first_date);
        assert_eq!(store.get(&second).unwrap()[0].date, second_date);
    }
}

use crate::backend::StorageBackend;
use crate::error::{BookingError, Result};
use crate::types::Booking;
use tracing::error;

const KEY_PREFIX: &str = "bookings-";

/// Keyed collection of booked slots, one ordered log per slot-set token. The
/// log is append-only apart from the wholesale clear. Mutations run through
/// the backend's `update` so the read-modify-write happens under one lock,
/// two concurrent requests can neither overwrite each other's append nor
/// both claim the same pair.
#[derive(Debug, Clone)]
pub struct BookingStore<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> BookingStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }

    fn decode(token: &str, raw: Option<&str>) -> Vec<Booking> {
        let Some(raw) = raw else {
            return vec![];
        };
        serde_json::from_str(raw).unwrap_or_else(|err| {
            error!(?err, token, "Stored bookings are unreadable");
            vec![]
        })
    }

    pub fn append(&self, token: &str, booking: Booking) {
        self.storage.update(&Self::key(token), |raw| {
            let mut bookings = Self::decode(token, raw);
            bookings.push(booking);
            Some(serde_json::to_string(&bookings).unwrap())
        });
    }

    /// Appends unless the exact `(date, time)` pair is already claimed. The
    /// duplicate check and the write share one backend lock scope, so of two
    /// concurrent claims for the same pair exactly one commits.
    pub fn append_if_absent(&self, token: &str, booking: Booking) -> Result<()> {
        let mut result = Ok(());
        self.storage.update(&Self::key(token), |raw| {
            let mut bookings = Self::decode(token, raw);
            if bookings
                .iter()
                .any(|existing| existing.date == booking.date && existing.time == booking.time)
            {
                result = Err(BookingError::AlreadyBooked);
                return None;
            }
            bookings.push(booking);
            Some(serde_json::to_string(&bookings).unwrap())
        });
        result
    }

    /// The full booking log in append order. Empty when nothing was recorded
    /// yet; an unreadable log is treated as empty as well.
    pub fn read_all(&self, token: &str) -> Vec<Booking> {
        let raw = self.storage.read(&Self::key(token));
        Self::decode(token, raw.as_deref())
    }

    /// Empties the booking log unconditionally, also for tokens without one.
    pub fn clear(&self, token: &str) {
        self.storage.remove(&Self::key(token));
    }
}

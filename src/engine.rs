//! The booking engine: derived availability queries and the selection state
//! machine that applies a booking. Queries re-read the stores on every call,
//! since the shared medium can change underneath at any point; the duplicate
//! check runs again at commit time, atomically with the append.

use crate::availability::AvailabilityStore;
use crate::backend::StorageBackend;
use crate::bookings::BookingStore;
use crate::error::{BookingError, Result};
use crate::types::{Booking, Slot};
use chrono::{Local, NaiveDate, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoSelection,
    DateSelected,
    TimeSelected,
    Booked,
}

/// The distinct dates of a slot set that are today or later, in first-seen
/// order. Fully booked dates stay offerable; only past dates drop out.
pub fn offerable_dates(slots: &[Slot], today: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for slot in slots {
        if slot.date >= today && !dates.contains(&slot.date) {
            dates.push(slot.date);
        }
    }
    dates
}

/// Slot start times for a date, in slot-set insertion order, minus the times
/// already claimed in the booking log for that date.
pub fn offerable_times(slots: &[Slot], log: &[Booking], date: NaiveDate) -> Vec<NaiveTime> {
    slots
        .iter()
        .filter(|slot| slot.date == date)
        .map(|slot| slot.start_time)
        .filter(|time| !is_duplicate(log, date, *time))
        .collect()
}

pub fn is_duplicate(log: &[Booking], date: NaiveDate, time: NaiveTime) -> bool {
    log.iter()
        .any(|booking| booking.date == date && booking.time == time)
}

fn slot_times(slots: &[Slot], date: NaiveDate) -> Vec<NaiveTime> {
    slots
        .iter()
        .filter(|slot| slot.date == date)
        .map(|slot| slot.start_time)
        .collect()
}

/// One booker's session against a single slot set.
#[derive(Debug, Clone)]
pub struct BookingEngine<S: StorageBackend> {
    availability: AvailabilityStore<S>,
    bookings: BookingStore<S>,
    token: String,
    selected_date: Option<NaiveDate>,
    selected_time: Option<NaiveTime>,
    state: SelectionState,
}

impl<S: StorageBackend> BookingEngine<S> {
    /// Opens a session for a token. Fails with `NotFound` when no slot set is
    /// published under it.
    pub fn open(
        availability: AvailabilityStore<S>,
        bookings: BookingStore<S>,
        token: &str,
    ) -> Result<Self> {
        availability.get(token)?;
        Ok(Self {
            availability,
            bookings,
            token: token.to_string(),
            selected_date: None,
            selected_time: None,
            state: SelectionState::NoSelection,
        })
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<NaiveTime> {
        self.selected_time
    }

    // A slot set cleared after open behaves as "no offerable slots", so an
    // orphaned booking log never offers anything.
    fn slots(&self) -> Vec<Slot> {
        self.availability.get(&self.token).unwrap_or_default()
    }

    pub fn offerable_dates(&self) -> Vec<NaiveDate> {
        offerable_dates(&self.slots(), Local::now().date_naive())
    }

    pub fn offerable_times(&self, date: NaiveDate) -> Vec<NaiveTime> {
        offerable_times(&self.slots(), &self.bookings.read_all(&self.token), date)
    }

    /// Picks a date. The date must be offerable; any previously selected time
    /// is dropped.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        if !self.offerable_dates().contains(&date) {
            return Err(BookingError::DateNotOfferable);
        }
        self.selected_date = Some(date);
        self.selected_time = None;
        self.state = SelectionState::DateSelected;
        Ok(())
    }

    /// Picks a start time on the selected date. Validated against the slot
    /// set's times; whether the time is still unclaimed is decided at confirm
    /// time, not here.
    pub fn select_time(&mut self, time: NaiveTime) -> Result<()> {
        let date = self.selected_date.ok_or(BookingError::MissingSelection)?;
        if !slot_times(&self.slots(), date).contains(&time) {
            return Err(BookingError::TimeNotOfferable);
        }
        self.selected_time = Some(time);
        self.state = SelectionState::TimeSelected;
        Ok(())
    }

    /// Applies the booking. The duplicate check and the append run in one
    /// backend lock scope against the current log, so a claim that landed
    /// after `select_time` is still caught and of two concurrent confirms for
    /// the same pair exactly one commits. On success the time is cleared and
    /// the date retained for the next interaction; on `AlreadyBooked` the
    /// selection stays untouched so another time can be picked.
    pub fn confirm_booking(&mut self) -> Result<Booking> {
        let (Some(date), Some(time)) = (self.selected_date, self.selected_time) else {
            return Err(BookingError::MissingSelection);
        };
        let booking = Booking { date, time };
        self.bookings.append_if_absent(&self.token, booking.clone())?;
        self.selected_time = None;
        self.state = SelectionState::Booked;
        Ok(booking)
    }

    pub fn clear_bookings(&self) {
        self.bookings.clear(&self.token);
    }
}

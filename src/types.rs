use crate::error::{BookingError, Result};
use crate::token;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single offered time interval on a date. Immutable once created; slots are
/// only ever discarded together with their whole slot set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Slot {
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Result<Self> {
        if end_time <= start_time {
            return Err(BookingError::EndNotAfterStart);
        }
        Ok(Self {
            id: token::generate(),
            date,
            start_time,
            end_time,
        })
    }
}

/// A claim on one slot's start time, recorded against a slot-set token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

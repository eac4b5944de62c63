use std::fmt::Display;

use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::Serialize;

use super::Booking;

/// Expired bookings stay visible in the history for this long after they end.
pub const HISTORY_RETENTION_HOURS: i64 = 7 * 24;

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Active,
    Expired,
}

impl BookingStatus {
    pub fn of(booking: &Booking, now: Timestamp) -> Self {
        if now < booking.end {
            BookingStatus::Active
        } else {
            BookingStatus::Expired
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BookingStatus::Active => "active",
                BookingStatus::Expired => "expired",
            }
        )
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub booking: Booking,
    pub status: BookingStatus,
}

/// A user's recent bookings: active ones first, then expired ones, each group
/// ordered by end time, latest first.
pub fn booking_history(bookings: Vec<Booking>, now: Timestamp) -> Vec<HistoryEntry> {
    let cutoff = now - SignedDuration::from_hours(HISTORY_RETENTION_HOURS);

    let mut entries = bookings
        .into_iter()
        .filter(|booking| booking.end > cutoff)
        .map(|booking| HistoryEntry {
            status: BookingStatus::of(&booking, now),
            booking,
        })
        .collect::<Vec<_>>();

    entries.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then_with(|| b.booking.end.cmp(&a.booking.end))
    });

    entries
}

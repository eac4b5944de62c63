use jiff::civil::Date;
use thiserror::Error;

use crate::screen::booking_screen::ScreenPhase;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Date {date} is in the past")]
    PastDate { date: Date },

    #[error("You already have a booking for this cabinet on the selected day")]
    AlreadyBookedToday,

    #[error("Please select a date and a time slot")]
    NoSlotSelected,

    #[error("Time slot {0} is not available")]
    SlotUnavailable(String),

    #[error("A booking is already being submitted")]
    SubmissionInFlight,

    #[error("Cannot {action} while the screen is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: ScreenPhase,
    },

    #[error("Cannot resolve slot to an instant: {0}")]
    InvalidInstant(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown time zone {name}: {source}")]
    TimeZone { name: String, source: jiff::Error },

    #[error("Invalid UTC offset {value}: {reason}")]
    Offset { value: String, reason: String },

    #[error("Invalid midnight rollover: {0}")]
    Rollover(String),
}

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{define_id_newtype, slot::interval::CivilInterval};

pub mod history;

define_id_newtype!(BookingId);
define_id_newtype!(UserId);
define_id_newtype!(ResourceId);

/// A reservation of a charging cabinet, as returned by the booking backend.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Option<BookingId>,
    pub start: Timestamp,
    pub end: Timestamp,
    pub user_id: Option<UserId>,
    pub resource_id: Option<ResourceId>,
    pub user_name: Option<String>,
}

impl Booking {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Booking {
            id: None,
            start,
            end,
            user_id: None,
            resource_id: None,
            user_name: None,
        }
    }

    pub fn with_id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_resource(mut self, resource_id: ResourceId) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.user_id == Some(user_id)
    }

    /// Whether the booking starts on `date` in the civil time of `time_zone`.
    pub fn starts_on(&self, date: Date, time_zone: &TimeZone) -> bool {
        time_zone.to_datetime(self.start).date() == date
    }

    /// The booking expressed in the civil time of `time_zone`.
    pub fn civil_interval(&self, time_zone: &TimeZone) -> CivilInterval {
        CivilInterval::new(
            time_zone.to_datetime(self.start),
            time_zone.to_datetime(self.end),
        )
    }
}

/// What the booking screen submits once a slot is chosen.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub start: Timestamp,
    pub end: Timestamp,
}

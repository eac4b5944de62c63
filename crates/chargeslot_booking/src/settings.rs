use jiff::{
    Timestamp,
    civil::Date,
    tz::{self, Offset, TimeZone},
};

use crate::{error::SettingsError, slot::time_window::MidnightRollover};

const TIME_ZONE_ENV_VAR: &str = "CHARGESLOT_TIME_ZONE";
const UTC_OFFSET_ENV_VAR: &str = "CHARGESLOT_UTC_OFFSET_HOURS";
const MIDNIGHT_ROLLOVER_ENV_VAR: &str = "CHARGESLOT_MIDNIGHT_ROLLOVER";

/// Stations operate on Bangkok time, which has no DST.
pub const DEFAULT_UTC_OFFSET_HOURS: i8 = 7;

#[derive(Debug, Clone)]
pub struct SlotSettings {
    pub time_zone: TimeZone,
    pub rollover: MidnightRollover,
}

impl Default for SlotSettings {
    fn default() -> Self {
        SlotSettings {
            time_zone: TimeZone::fixed(tz::offset(DEFAULT_UTC_OFFSET_HOURS)),
            rollover: MidnightRollover::default(),
        }
    }
}

impl SlotSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// A named time zone wins over a fixed offset. Both fall back to the
    /// default offset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = SlotSettings::default();

        if let Some(name) = lookup(TIME_ZONE_ENV_VAR).filter(|name| !name.trim().is_empty()) {
            settings.time_zone =
                TimeZone::get(name.trim()).map_err(|source| SettingsError::TimeZone {
                    name: name.clone(),
                    source,
                })?;
        } else if let Some(value) = lookup(UTC_OFFSET_ENV_VAR) {
            let hours = value
                .trim()
                .parse::<i8>()
                .map_err(|error| SettingsError::Offset {
                    value: value.clone(),
                    reason: error.to_string(),
                })?;
            let offset = Offset::from_hours(hours).map_err(|error| SettingsError::Offset {
                value: value.clone(),
                reason: error.to_string(),
            })?;
            settings.time_zone = TimeZone::fixed(offset);
        }

        if let Some(value) = lookup(MIDNIGHT_ROLLOVER_ENV_VAR) {
            settings.rollover = value.parse().map_err(SettingsError::Rollover)?;
        }

        Ok(settings)
    }

    /// The current calendar date at the station.
    pub fn today(&self) -> Date {
        self.time_zone.to_datetime(Timestamp::now()).date()
    }
}

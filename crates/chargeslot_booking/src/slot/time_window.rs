use std::{fmt::Display, str::FromStr};

use jiff::civil::{Date, DateTime, Time};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::interval::CivilInterval;

const CLOCK_FORMAT: &str = "%H:%M";

/// How the end of a window that crosses midnight is anchored.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MidnightRollover {
    /// `21:00 - 00:00` ends at midnight of the following day.
    #[default]
    NextDay,
    /// The end stays on the selected date, so `21:00 - 00:00` becomes an
    /// inverted interval. Matches the historical behaviour of the mobile app.
    SameDay,
}

impl Display for MidnightRollover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MidnightRollover::NextDay => "next_day",
                MidnightRollover::SameDay => "same_day",
            }
        )
    }
}

impl FromStr for MidnightRollover {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next_day" | "next-day" => Ok(MidnightRollover::NextDay),
            "same_day" | "same-day" => Ok(MidnightRollover::SameDay),
            other => Err(format!("unknown midnight rollover `{other}`")),
        }
    }
}

/// A daily charging window, expressed in wall-clock time without a date.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    label: String,
    start: Time,
    end: Time,
}

impl TimeWindow {
    pub fn new(start: Time, end: Time) -> Self {
        TimeWindow {
            label: format!(
                "{} - {}",
                start.strftime(CLOCK_FORMAT),
                end.strftime(CLOCK_FORMAT)
            ),
            start,
            end,
        }
    }

    /// Parses `HH:MM` bounds, e.g. `TimeWindow::from_clock("21:00", "00:00")`.
    pub fn from_clock(start: &str, end: &str) -> Result<Self, jiff::Error> {
        let start = Time::strptime(CLOCK_FORMAT, start)?;
        let end = Time::strptime(CLOCK_FORMAT, end)?;
        Ok(TimeWindow::new(start, end))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// The absolute civil interval this window covers on `date`.
    pub fn interval_on(&self, date: Date, rollover: MidnightRollover) -> CivilInterval {
        let start = date.to_datetime(self.start);
        let end = match rollover {
            MidnightRollover::NextDay if self.crosses_midnight() => date
                .tomorrow()
                .map(|next_day| next_day.to_datetime(self.end))
                .unwrap_or(DateTime::MAX),
            _ => date.to_datetime(self.end),
        };

        CivilInterval::new(start, end)
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

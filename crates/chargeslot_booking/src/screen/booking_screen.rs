use std::fmt::Display;

use jiff::civil::Date;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    booking::{Booking, BookingRequest, ResourceId, UserId},
    error::ScreenError,
    settings::SlotSettings,
    slot::{availability::available_slots, catalog::SlotCatalog, time_window::TimeWindow},
};

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScreenPhase {
    NoDateSelected,
    Loading,
    Loaded,
    LoadFailed,
    SlotChosen,
    Submitting,
    Succeeded,
}

impl Display for ScreenPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ScreenPhase::NoDateSelected => "waiting for a date",
                ScreenPhase::Loading => "loading bookings",
                ScreenPhase::Loaded => "showing available slots",
                ScreenPhase::LoadFailed => "showing a load error",
                ScreenPhase::SlotChosen => "holding a chosen slot",
                ScreenPhase::Submitting => "submitting",
                ScreenPhase::Succeeded => "done",
            }
        )
    }
}

/// Message surfaced to the user alongside the screen.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

/// Identifies one bookings fetch. Only the ticket of the latest fetch is
/// accepted back by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub resource_id: ResourceId,
    pub date: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// View-model of the date/slot booking screen for one cabinet and one user.
#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct BookingScreen {
    resource_id: ResourceId,
    user_id: UserId,
    phase: ScreenPhase,
    selected_date: Option<Date>,
    bookings: Vec<Booking>,
    available_slots: Vec<TimeWindow>,
    selected_slot: Option<TimeWindow>,
    already_booked_today: bool,
    generation: u64,
    notice: Option<Notice>,
    confirmed_booking: Option<Booking>,

    #[serde(skip)]
    catalog: SlotCatalog,
    #[serde(skip)]
    settings: SlotSettings,
}

impl BookingScreen {
    pub fn new(
        resource_id: ResourceId,
        user_id: UserId,
        catalog: SlotCatalog,
        settings: SlotSettings,
    ) -> Self {
        BookingScreen {
            resource_id,
            user_id,
            phase: ScreenPhase::NoDateSelected,
            selected_date: None,
            bookings: Vec::new(),
            available_slots: Vec::new(),
            selected_slot: None,
            already_booked_today: false,
            generation: 0,
            notice: None,
            confirmed_booking: None,
            catalog,
            settings,
        }
    }

    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn selected_date(&self) -> Option<Date> {
        self.selected_date
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn available_slots(&self) -> &[TimeWindow] {
        &self.available_slots
    }

    pub fn selected_slot(&self) -> Option<&TimeWindow> {
        self.selected_slot.as_ref()
    }

    pub fn already_booked_today(&self) -> bool {
        self.already_booked_today
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn confirmed_booking(&self) -> Option<&Booking> {
        self.confirmed_booking.as_ref()
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SlotSettings {
        &self.settings
    }

    /// Whether the user may pick a slot right now.
    pub fn can_choose_slot(&self) -> bool {
        matches!(self.phase, ScreenPhase::Loaded | ScreenPhase::SlotChosen)
            && !self.already_booked_today
            && !self.available_slots.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == ScreenPhase::SlotChosen && !self.already_booked_today
    }

    /// Starts loading the bookings of `date`. Dates before `today` are refused.
    pub fn select_date(&mut self, date: Date, today: Date) -> Result<FetchTicket, ScreenError> {
        self.ensure_editable("select a date")?;

        if date < today {
            return Err(ScreenError::PastDate { date });
        }

        self.generation += 1;
        self.selected_date = Some(date);
        self.clear_day();
        self.phase = ScreenPhase::Loading;

        debug!(
            resource_id = %self.resource_id,
            %date,
            generation = self.generation,
            "Selected booking date"
        );

        Ok(FetchTicket {
            generation: self.generation,
            resource_id: self.resource_id,
            date,
        })
    }

    pub fn clear_date(&mut self) -> Result<(), ScreenError> {
        self.ensure_editable("clear the date")?;

        self.generation += 1;
        self.selected_date = None;
        self.clear_day();
        self.phase = ScreenPhase::NoDateSelected;

        Ok(())
    }

    pub fn bookings_loaded(&mut self, ticket: FetchTicket, bookings: Vec<Booking>) -> Applied {
        if !self.is_current(&ticket) {
            warn!(
                generation = ticket.generation,
                current_generation = self.generation,
                date = %ticket.date,
                "Discarding stale bookings response"
            );
            return Applied::Stale;
        }

        // Bookings carried over from the previous day still block slots but do
        // not count against today's booking.
        self.already_booked_today = bookings.iter().any(|booking| {
            booking.belongs_to(self.user_id)
                && booking.starts_on(ticket.date, &self.settings.time_zone)
        });
        self.available_slots = available_slots(
            &self.catalog,
            self.selected_date,
            &bookings,
            &self.settings,
        )
        .into_iter()
        .cloned()
        .collect();
        self.bookings = bookings;
        self.selected_slot = None;
        self.phase = ScreenPhase::Loaded;

        self.notice = if self.already_booked_today {
            Some(Notice::Warning(
                ScreenError::AlreadyBookedToday.to_string(),
            ))
        } else if self.available_slots.is_empty() {
            Some(Notice::Info(String::from(
                "No time slots left, this day is fully booked",
            )))
        } else {
            None
        };

        Applied::Current
    }

    /// The filter is not run and the previous list is not kept.
    pub fn bookings_failed(&mut self, ticket: FetchTicket, message: impl Into<String>) -> Applied {
        if !self.is_current(&ticket) {
            warn!(
                generation = ticket.generation,
                current_generation = self.generation,
                "Discarding stale bookings failure"
            );
            return Applied::Stale;
        }

        self.clear_day();
        self.phase = ScreenPhase::LoadFailed;
        self.notice = Some(Notice::Error(message.into()));

        Applied::Current
    }

    pub fn choose_slot(&mut self, label: &str) -> Result<(), ScreenError> {
        match self.phase {
            ScreenPhase::Loaded | ScreenPhase::SlotChosen => {}
            phase => {
                return Err(ScreenError::InvalidTransition {
                    action: "choose a slot",
                    phase,
                });
            }
        }

        if self.already_booked_today {
            return self.reject(ScreenError::AlreadyBookedToday);
        }

        let slot = self
            .available_slots
            .iter()
            .find(|slot| slot.label() == label)
            .cloned()
            .ok_or_else(|| ScreenError::SlotUnavailable(label.to_owned()))?;

        self.selected_slot = Some(slot);
        self.phase = ScreenPhase::SlotChosen;
        self.notice = None;

        Ok(())
    }

    /// Runs the submission policy checks and, when they pass, locks the
    /// screen until `submit_succeeded` or `submit_failed`.
    pub fn begin_submit(&mut self) -> Result<BookingRequest, ScreenError> {
        if self.phase == ScreenPhase::Submitting {
            return Err(ScreenError::SubmissionInFlight);
        }

        if self.already_booked_today {
            return self.reject(ScreenError::AlreadyBookedToday);
        }

        let (Some(date), Some(slot)) = (self.selected_date, self.selected_slot.clone()) else {
            return self.reject(ScreenError::NoSlotSelected);
        };

        if self.phase != ScreenPhase::SlotChosen {
            return Err(ScreenError::InvalidTransition {
                action: "submit a booking",
                phase: self.phase,
            });
        }

        let interval = slot.interval_on(date, self.settings.rollover);
        let time_zone = &self.settings.time_zone;
        let start = time_zone
            .to_timestamp(interval.start())
            .map_err(|error| ScreenError::InvalidInstant(error.to_string()))?;
        let end = time_zone
            .to_timestamp(interval.end())
            .map_err(|error| ScreenError::InvalidInstant(error.to_string()))?;

        self.phase = ScreenPhase::Submitting;
        self.notice = None;

        Ok(BookingRequest {
            resource_id: self.resource_id,
            user_id: self.user_id,
            start,
            end,
        })
    }

    pub fn submit_succeeded(&mut self, booking: Booking) -> Result<(), ScreenError> {
        self.ensure_submitting("confirm a booking")?;

        self.confirmed_booking = Some(booking);
        self.phase = ScreenPhase::Succeeded;
        self.notice = Some(Notice::Info(String::from("Booking confirmed")));

        Ok(())
    }

    /// Returns to the chosen slot so the user can retry.
    pub fn submit_failed(&mut self, message: impl Into<String>) -> Result<(), ScreenError> {
        self.ensure_submitting("fail a submission")?;

        self.phase = ScreenPhase::SlotChosen;
        self.notice = Some(Notice::Error(message.into()));

        Ok(())
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && self.phase == ScreenPhase::Loading
    }

    fn clear_day(&mut self) {
        self.bookings.clear();
        self.available_slots.clear();
        self.selected_slot = None;
        self.already_booked_today = false;
        self.notice = None;
    }

    fn reject<T>(&mut self, error: ScreenError) -> Result<T, ScreenError> {
        self.notice = Some(Notice::Warning(error.to_string()));
        Err(error)
    }

    fn ensure_editable(&self, action: &'static str) -> Result<(), ScreenError> {
        match self.phase {
            ScreenPhase::Submitting => Err(ScreenError::SubmissionInFlight),
            ScreenPhase::Succeeded => Err(ScreenError::InvalidTransition {
                action,
                phase: self.phase,
            }),
            _ => Ok(()),
        }
    }

    fn ensure_submitting(&self, action: &'static str) -> Result<(), ScreenError> {
        if self.phase == ScreenPhase::Submitting {
            Ok(())
        } else {
            Err(ScreenError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }
}

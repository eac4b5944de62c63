use std::{collections::HashMap, sync::Arc};

use anyhow::bail;
use chargeslot_booking::{
    booking::{Booking, BookingId, BookingRequest, ResourceId, UserId},
    screen::controller::BookingController,
    service::BookingService,
    settings::SlotSettings,
    slot::{catalog::SlotCatalog, time_window::MidnightRollover},
};
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use parking_lot::Mutex;
use tokio::sync::Notify;

pub const CABINET: ResourceId = ResourceId::new(5);
pub const USER: UserId = UserId::new(3);
pub const OTHER_USER: UserId = UserId::new(8);

/// Lets a test hold one fetch in flight.
#[derive(Clone, Default)]
pub struct FetchGate {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub struct FakeBookingService {
    bookings: HashMap<Date, Vec<Booking>>,
    failing_dates: Vec<Date>,
    gates: HashMap<Date, FetchGate>,
    create_error: Mutex<Option<String>>,
    created: Mutex<Vec<BookingRequest>>,
    fetches: Mutex<Vec<Date>>,
}

impl FakeBookingService {
    pub fn with_bookings(mut self, date: Date, bookings: Vec<Booking>) -> Self {
        self.bookings.insert(date, bookings);
        self
    }

    pub fn with_failing_date(mut self, date: Date) -> Self {
        self.failing_dates.push(date);
        self
    }

    /// Holds the fetch of `date` until the gate is released.
    pub fn gate(&mut self, date: Date) -> FetchGate {
        let gate = FetchGate::default();
        self.gates.insert(date, gate.clone());
        gate
    }

    pub fn fail_next_create(&self, message: &str) {
        *self.create_error.lock() = Some(message.to_owned());
    }

    pub fn created(&self) -> Vec<BookingRequest> {
        self.created.lock().clone()
    }

    pub fn fetches(&self) -> Vec<Date> {
        self.fetches.lock().clone()
    }
}

impl BookingService for FakeBookingService {
    async fn list_bookings_by_resource_and_date(
        &self,
        resource_id: ResourceId,
        date: Date,
    ) -> anyhow::Result<Vec<Booking>> {
        self.fetches.lock().push(date);

        let gate = self.gates.get(&date).cloned();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        if self.failing_dates.contains(&date) {
            bail!("connection refused");
        }

        Ok(self
            .bookings
            .get(&date)
            .map(|bookings| {
                bookings
                    .iter()
                    .filter(|booking| booking.resource_id == Some(resource_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create_booking(&self, request: &BookingRequest) -> anyhow::Result<Booking> {
        let error = self.create_error.lock().take();
        if let Some(message) = error {
            bail!(message);
        }

        let mut created = self.created.lock();
        created.push(request.clone());

        Ok(Booking::new(request.start, request.end)
            .with_id(BookingId::new(created.len() as u64))
            .with_user(request.user_id)
            .with_resource(request.resource_id))
    }
}

pub fn utc_settings() -> SlotSettings {
    SlotSettings {
        time_zone: TimeZone::UTC,
        rollover: MidnightRollover::NextDay,
    }
}

pub fn controller(service: FakeBookingService) -> BookingController<FakeBookingService> {
    BookingController::new(
        service,
        CABINET,
        USER,
        SlotCatalog::standard(),
        utc_settings(),
    )
}

pub fn booking(start: &str, end: &str, user: UserId) -> Booking {
    Booking::new(
        start.parse::<Timestamp>().unwrap(),
        end.parse::<Timestamp>().unwrap(),
    )
    .with_user(user)
    .with_resource(CABINET)
}

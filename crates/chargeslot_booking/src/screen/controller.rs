use jiff::civil::Date;
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    booking::{Booking, ResourceId, UserId},
    error::ScreenError,
    service::BookingService,
    settings::SlotSettings,
    slot::catalog::SlotCatalog,
};

use super::booking_screen::{Applied, BookingScreen};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Confirmed(Booking),
    /// The backend refused or could not be reached. The screen is back on the
    /// chosen slot.
    Failed(String),
}

/// Drives a [`BookingScreen`] against a booking backend.
///
/// The screen lock is only taken between awaits, so concurrent date changes
/// interleave freely and the fetch generation decides which response wins.
pub struct BookingController<S> {
    service: S,
    screen: RwLock<BookingScreen>,
}

impl<S: BookingService> BookingController<S> {
    pub fn new(
        service: S,
        resource_id: ResourceId,
        user_id: UserId,
        catalog: SlotCatalog,
        settings: SlotSettings,
    ) -> Self {
        BookingController {
            service,
            screen: RwLock::new(BookingScreen::new(resource_id, user_id, catalog, settings)),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn screen(&self) -> BookingScreen {
        self.screen.read().clone()
    }

    /// Selects `date`, fetches its bookings and applies them unless another
    /// date was selected in the meantime.
    #[instrument(skip(self), level = "debug")]
    pub async fn select_date(&self, date: Date, today: Date) -> Result<Applied, ScreenError> {
        let ticket = self.screen.write().select_date(date, today)?;

        let result = self
            .service
            .list_bookings_by_resource_and_date(ticket.resource_id, ticket.date)
            .await;

        let applied = match result {
            Ok(bookings) => {
                debug!(
                    bookings = bookings.len(),
                    generation = ticket.generation,
                    "Fetched bookings"
                );
                self.screen.write().bookings_loaded(ticket, bookings)
            }
            Err(error) => {
                warn!(%date, "Failed to fetch bookings: {error:#}");
                self.screen
                    .write()
                    .bookings_failed(ticket, format!("Could not load bookings: {error}"))
            }
        };

        Ok(applied)
    }

    pub fn clear_date(&self) -> Result<(), ScreenError> {
        self.screen.write().clear_date()
    }

    pub fn choose_slot(&self, label: &str) -> Result<(), ScreenError> {
        self.screen.write().choose_slot(label)
    }

    /// Policy violations are returned as errors and never reach the backend.
    pub async fn submit(&self) -> Result<SubmitOutcome, ScreenError> {
        let request = self.screen.write().begin_submit()?;

        info!(
            resource_id = %request.resource_id,
            user_id = %request.user_id,
            start = %request.start,
            end = %request.end,
            "Submitting booking"
        );

        match self.service.create_booking(&request).await {
            Ok(booking) => {
                info!(booking_id = ?booking.id, "Booking confirmed");
                self.screen.write().submit_succeeded(booking.clone())?;
                Ok(SubmitOutcome::Confirmed(booking))
            }
            Err(error) => {
                warn!("Booking submission failed: {error:#}");
                let message = error.to_string();
                self.screen.write().submit_failed(message.clone())?;
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }
}

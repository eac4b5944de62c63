use std::future::Future;

use jiff::civil::Date;

use crate::booking::{Booking, BookingRequest, ResourceId};

/// The booking backend as seen by the booking screen.
///
/// `list_bookings_by_resource_and_date` must return every booking of the
/// resource that intersects `date`. `create_booking` is treated as atomic and
/// authoritative: overlap and one-booking-per-day rules have to be enforced
/// transactionally on the other side.
pub trait BookingService: Send + Sync {
    fn list_bookings_by_resource_and_date(
        &self,
        resource_id: ResourceId,
        date: Date,
    ) -> impl Future<Output = anyhow::Result<Vec<Booking>>> + Send;

    fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> impl Future<Output = anyhow::Result<Booking>> + Send;
}

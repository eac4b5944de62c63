use chargeslot_booking::{
    booking::{Booking, BookingRequest, ResourceId},
    service::BookingService,
};
use jiff::civil::Date;

use crate::backend_client::BackendClient;

impl BookingService for BackendClient {
    async fn list_bookings_by_resource_and_date(
        &self,
        resource_id: ResourceId,
        date: Date,
    ) -> anyhow::Result<Vec<Booking>> {
        Ok(self
            .list_bookings_intersecting_date(resource_id, date)
            .await?)
    }

    async fn create_booking(&self, request: &BookingRequest) -> anyhow::Result<Booking> {
        Ok(BackendClient::create_booking(self, request).await?)
    }
}

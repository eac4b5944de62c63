use schemars::schema_for;

use crate::{json::types, screen::booking_screen::BookingScreen};

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "booking": schema_for!(types::JsonBooking),
        "create_booking": schema_for!(types::JsonCreateBooking),
        "create_booking_response": schema_for!(types::JsonCreateBookingResponse),
        "error": schema_for!(types::JsonApiError),
        "booking_screen": schema_for!(BookingScreen),
    }))
}

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingId, BookingRequest, ResourceId, UserId};

/// A booking row as the backend serializes it. Extra bookkeeping columns
/// (`CreatedAt`, `EVCabinet`, ...) are ignored.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Booking")]
pub struct JsonBooking {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(rename = "StartDate")]
    pub start_date: Timestamp,

    #[serde(rename = "EndDate")]
    pub end_date: Timestamp,

    #[serde(rename = "UserID", default)]
    pub user_id: Option<u64>,

    #[serde(rename = "EVCabinetID", default)]
    pub ev_cabinet_id: Option<u64>,

    #[serde(rename = "User", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<JsonBookingUser>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "BookingUser")]
pub struct JsonBookingUser {
    #[serde(rename = "FirstName", default)]
    pub first_name: Option<String>,
}

impl From<JsonBooking> for Booking {
    fn from(value: JsonBooking) -> Self {
        Booking {
            id: value.id.map(BookingId::new),
            start: value.start_date,
            end: value.end_date,
            user_id: value.user_id.map(UserId::new),
            resource_id: value.ev_cabinet_id.map(ResourceId::new),
            user_name: value
                .user
                .and_then(|user| user.first_name)
                .filter(|name| !name.trim().is_empty()),
        }
    }
}

impl From<&Booking> for JsonBooking {
    fn from(value: &Booking) -> Self {
        JsonBooking {
            id: value.id.map(|id| id.get()),
            start_date: value.start,
            end_date: value.end,
            user_id: value.user_id.map(|id| id.get()),
            ev_cabinet_id: value.resource_id.map(|id| id.get()),
            user: value.user_name.as_ref().map(|name| JsonBookingUser {
                first_name: Some(name.clone()),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename = "CreateBooking")]
pub struct JsonCreateBooking {
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub user_id: u64,
    pub ev_cabinet_id: u64,
}

impl From<&BookingRequest> for JsonCreateBooking {
    fn from(value: &BookingRequest) -> Self {
        JsonCreateBooking {
            start_date: value.start,
            end_date: value.end,
            user_id: value.user_id.get(),
            ev_cabinet_id: value.resource_id.get(),
        }
    }
}

impl From<JsonCreateBooking> for BookingRequest {
    fn from(value: JsonCreateBooking) -> Self {
        BookingRequest {
            resource_id: ResourceId::new(value.ev_cabinet_id),
            user_id: UserId::new(value.user_id),
            start: value.start_date,
            end: value.end_date,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "CreateBookingResponse")]
pub struct JsonCreateBookingResponse {
    pub message: String,
    pub data: JsonBooking,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename = "Message")]
pub struct JsonMessage {
    pub message: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename = "ApiError")]
pub struct JsonApiError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_booking() {
        let json = r#"{
            "ID": 12,
            "CreatedAt": "2024-05-30T10:00:00.123456+07:00",
            "DeletedAt": null,
            "StartDate": "2024-06-01T09:00:00+07:00",
            "EndDate": "2024-06-01T12:00:00+07:00",
            "UserID": 3,
            "User": { "ID": 3, "FirstName": "Somchai" },
            "EVCabinetID": 5,
            "EVCabinet": { "ID": 5, "Name": "Cabinet A" },
            "IsEmailSent": false
        }"#;

        let booking = Booking::from(serde_json::from_str::<JsonBooking>(json).unwrap());

        assert_eq!(booking.id, Some(BookingId::new(12)));
        assert_eq!(
            booking.start,
            "2024-06-01T02:00:00Z".parse::<Timestamp>().unwrap()
        );
        assert_eq!(booking.user_id, Some(UserId::new(3)));
        assert_eq!(booking.resource_id, Some(ResourceId::new(5)));
        assert_eq!(booking.user_name.as_deref(), Some("Somchai"));
    }

    #[test]
    fn test_empty_user_name_is_dropped() {
        let json = r#"{
            "StartDate": "2024-06-01T09:00:00Z",
            "EndDate": "2024-06-01T12:00:00Z",
            "UserID": null,
            "User": { "FirstName": "" }
        }"#;

        let booking = Booking::from(serde_json::from_str::<JsonBooking>(json).unwrap());

        assert_eq!(booking.id, None);
        assert_eq!(booking.user_id, None);
        assert_eq!(booking.user_name, None);
    }

    #[test]
    fn test_create_booking_body() {
        let request = BookingRequest {
            resource_id: ResourceId::new(5),
            user_id: UserId::new(3),
            start: "2024-06-01T02:00:00Z".parse().unwrap(),
            end: "2024-06-01T05:00:00Z".parse().unwrap(),
        };

        let body = serde_json::to_value(JsonCreateBooking::from(&request)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "start_date": "2024-06-01T02:00:00Z",
                "end_date": "2024-06-01T05:00:00Z",
                "user_id": 3,
                "ev_cabinet_id": 5,
            })
        );
    }
}

use std::time::Duration;

use chargeslot_booking::{
    booking::{Booking, BookingId, BookingRequest, ResourceId, UserId},
    error::SettingsError,
    json::types::{
        JsonApiError, JsonBooking, JsonCreateBooking, JsonCreateBookingResponse, JsonMessage,
    },
    settings::SlotSettings,
};
use jiff::{civil::Date, tz::TimeZone};
use reqwest::{RequestBuilder, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

pub const API_URL_ENV_VAR: &str = "CHARGESLOT_API_URL";
pub const API_TOKEN_ENV_VAR: &str = "CHARGESLOT_API_TOKEN";
pub const API_TIMEOUT_ENV_VAR: &str = "CHARGESLOT_API_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(10);

pub const CREATE_BOOKING_PATH: &str = "/create-booking";
pub const DELETE_BOOKING_PATH: &str = "/delete-booking";
pub const CABINET_BOOKINGS_PATH: &str = "/bookings/evcabinet";
pub const USER_BOOKINGS_PATH: &str = "/bookings/user";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid backend URL {0}")]
    InvalidUrl(String),

    #[error("Invalid request timeout {0}")]
    InvalidTimeout(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Clone)]
pub struct BackendClientParams {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub token: Option<String>,
    pub timeout: Duration,
    /// Station time zone, used to decide which bookings reach into a day.
    pub time_zone: TimeZone,
}

impl Default for BackendClientParams {
    fn default() -> Self {
        BackendClientParams {
            base_url: DEFAULT_API_URL.to_owned(),
            token: None,
            timeout: DEFAULT_API_TIMEOUT,
            time_zone: SlotSettings::default().time_zone,
        }
    }
}

impl BackendClientParams {
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The time zone is read with the same variables as [`SlotSettings`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BackendError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut params = BackendClientParams {
            time_zone: SlotSettings::from_lookup(&lookup)?.time_zone,
            ..BackendClientParams::default()
        };

        if let Some(base_url) = lookup(API_URL_ENV_VAR).filter(|url| !url.trim().is_empty()) {
            params.base_url = base_url;
        }

        params.token = lookup(API_TOKEN_ENV_VAR).filter(|token| !token.trim().is_empty());

        if let Some(timeout) = lookup(API_TIMEOUT_ENV_VAR) {
            let seconds = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| BackendError::InvalidTimeout(timeout.clone()))?;
            params.timeout = Duration::from_secs(seconds);
        }

        Ok(params)
    }
}

/// REST client for the booking backend.
pub struct BackendClient {
    base_url: String,
    token: Option<String>,
    time_zone: TimeZone,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(params: BackendClientParams) -> Result<Self, BackendError> {
        let base_url = params.base_url.trim().trim_end_matches('/').to_owned();

        reqwest::Url::parse(&base_url).map_err(|_| BackendError::InvalidUrl(base_url.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(params.timeout)
            .build()?;

        Ok(Self {
            base_url,
            token: params.token,
            time_zone: params.time_zone,
            client,
        })
    }

    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(BackendClientParams::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bookings of `cabinet_id` that intersect `date` in station time.
    ///
    /// The backend matches on start date only, so bookings of the previous day
    /// that run past midnight are fetched separately and merged in.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_bookings_intersecting_date(
        &self,
        cabinet_id: ResourceId,
        date: Date,
    ) -> Result<Vec<Booking>, BackendError> {
        let mut bookings = self.list_bookings_by_cabinet_and_date(cabinet_id, date).await?;

        let Ok(previous_day) = date.yesterday() else {
            return Ok(bookings);
        };

        let day_start = date.at(0, 0, 0, 0);
        let carried_over = self
            .list_bookings_by_cabinet_and_date(cabinet_id, previous_day)
            .await?
            .into_iter()
            .filter(|booking| booking.civil_interval(&self.time_zone).end() > day_start)
            .filter(|booking| {
                booking.id.is_none() || bookings.iter().all(|other| other.id != booking.id)
            })
            .collect::<Vec<_>>();

        debug!(
            "Backend: {} bookings of {} reach into {}",
            carried_over.len(),
            previous_day,
            date
        );

        bookings.splice(0..0, carried_over);

        Ok(bookings)
    }

    /// Bookings of `cabinet_id` that start on `date`.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_bookings_by_cabinet_and_date(
        &self,
        cabinet_id: ResourceId,
        date: Date,
    ) -> Result<Vec<Booking>, BackendError> {
        let url = format!("{}{}/{}/date", self.base_url, CABINET_BOOKINGS_PATH, cabinet_id);
        let response = self
            .authorized(self.client.get(url))
            .query(&[("date", date.to_string())])
            .send()
            .await?;

        let bookings: Vec<JsonBooking> = self.handle_response(response).await?;

        debug!("Backend: Fetched {} bookings", bookings.len());

        Ok(bookings.into_iter().map(Booking::from).collect())
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn list_bookings_by_user(&self, user_id: UserId) -> Result<Vec<Booking>, BackendError> {
        let url = format!("{}{}/{}", self.base_url, USER_BOOKINGS_PATH, user_id);
        let response = self.authorized(self.client.get(url)).send().await?;

        let bookings: Vec<JsonBooking> = self.handle_response(response).await?;

        Ok(bookings.into_iter().map(Booking::from).collect())
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, BackendError> {
        let url = format!("{}{}", self.base_url, CREATE_BOOKING_PATH);
        let response = self
            .authorized(self.client.post(url))
            .json(&JsonCreateBooking::from(request))
            .send()
            .await?;

        let created: JsonCreateBookingResponse = self.handle_response(response).await?;

        debug!("Backend: {}", created.message);

        Ok(Booking::from(created.data))
    }

    /// Returns the backend's confirmation message.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_booking(&self, booking_id: BookingId) -> Result<String, BackendError> {
        let url = format!("{}{}/{}", self.base_url, DELETE_BOOKING_PATH, booking_id);
        let response = self.authorized(self.client.delete(url)).send().await?;

        let deleted: JsonMessage = self.handle_response(response).await?;

        Ok(deleted.message)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            let message = serde_json::from_str::<JsonApiError>(&body)
                .map(|error| error.error)
                .unwrap_or(body);
            Err(BackendError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

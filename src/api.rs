//! Typed client for the booking REST backend.
//!
//! Every backend answer is a JSON envelope `{ "success": bool, "error": str?, ...payload }`,
//! also on non-2xx statuses. A `success: false` envelope becomes [`ApiError::Rejected`]
//! carrying the backend's message verbatim.

use crate::dates::date_key;
use crate::i18n::Messages;
use crate::models::{
    Appointment, AppointmentQuery, AvailabilityPayload, AvailabilityRule, NewAppointment, Service,
    ServicePayload, TimeSlot,
};
use chrono::NaiveDate;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected backend response: {0}")]
    Decode(String),
    #[error("backend rejected the request: {}", .0.as_deref().unwrap_or("no details"))]
    Rejected(Option<String>),
}

impl ApiError {
    /// Text for the error notice: the backend's own message when it sent one,
    /// otherwise `fallback`. Transport and decoding failures read as "server unreachable".
    pub fn user_message(&self, fallback: &str, messages: &Messages) -> String {
        match self {
            ApiError::Rejected(Some(message)) if !message.trim().is_empty() => message.clone(),
            ApiError::Rejected(_) => fallback.to_string(),
            ApiError::Transport(_) | ApiError::Decode(_) => messages.server_unreachable.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Deserialize)]
struct Ack {}

#[derive(Debug, Deserialize)]
struct ServicesBody {
    #[serde(default)]
    services: Vec<Service>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityBody {
    #[serde(default)]
    availability: Vec<AvailabilityRule>,
}

#[derive(Debug, Deserialize)]
struct AppointmentsBody {
    #[serde(default)]
    appointments: Vec<Appointment>,
}

#[derive(Debug, Deserialize)]
struct SlotsBody {
    #[serde(default)]
    slots: Vec<TimeSlot>,
}

fn decode_envelope<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_slice(bytes)
        .map_err(|err| ApiError::Decode(format!("status {status}: {err}")))?;
    if envelope.success {
        Ok(envelope.body)
    } else {
        Err(ApiError::Rejected(envelope.error))
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|err| {
            warn!("backend request failed: {err}");
            ApiError::Transport(err)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::Transport)?;
        decode_envelope(status, &bytes).inspect_err(|err| warn!(%status, "backend call failed: {err}"))
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        let body: ServicesBody = self.send(self.client.get(self.url("/api/services"))).await?;
        Ok(body.services)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_service(&self, payload: &ServicePayload) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/api/services")).json(payload);
        self.send::<Ack>(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_service(&self, id: i64, payload: &ServicePayload) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/api/services/{id}")))
            .json(payload);
        self.send::<Ack>(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_service(&self, id: i64) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&format!("/api/services/{id}")));
        self.send::<Ack>(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_availability(&self) -> Result<Vec<AvailabilityRule>, ApiError> {
        let body: AvailabilityBody = self
            .send(self.client.get(self.url("/api/availability")))
            .await?;
        Ok(body.availability)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_availability(&self, payload: &AvailabilityPayload) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/api/availability")).json(payload);
        self.send::<Ack>(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_availability(
        &self,
        id: i64,
        payload: &AvailabilityPayload,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/api/availability/{id}")))
            .json(payload);
        self.send::<Ack>(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_availability(&self, id: i64) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/availability/{id}")));
        self.send::<Ack>(request).await.map(|_| ())
    }

    /// An empty `status` parameter asks the backend for every status.
    #[tracing::instrument(skip(self))]
    pub async fn list_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<Vec<Appointment>, ApiError> {
        let mut params = vec![(
            "status",
            query.status.map(|status| status.as_str()).unwrap_or("").to_string(),
        )];
        if let Some(date) = query.date {
            params.push(("date", date_key(date)));
        }
        let request = self.client.get(self.url("/api/appointments")).query(&params);
        let body: AppointmentsBody = self.send(request).await?;
        Ok(body.appointments)
    }

    #[tracing::instrument(skip(self, payload), fields(date = %payload.date, time = %payload.time))]
    pub async fn create_appointment(&self, payload: &NewAppointment) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/api/appointments")).json(payload);
        self.send::<Ack>(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel_appointment(&self, id: i64, cancel_all: bool) -> Result<(), ApiError> {
        let mut request = self
            .client
            .delete(self.url(&format!("/api/appointments/{id}")));
        if cancel_all {
            request = request.query(&[("cancel_all", "true")]);
        }
        self.send::<Ack>(request).await.map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub async fn available_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/api/available-slots/{}", date_key(date))));
        let body: SlotsBody = self.send(request).await?;
        Ok(body.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DisplayLocale;

    #[test]
    fn decodes_successful_slot_envelope() {
        let raw = br#"{"success":true,"slots":[{"time":"09:00","available":true},{"time":"09:15","available":false}]}"#;
        let body: SlotsBody = decode_envelope(StatusCode::OK, raw).unwrap();
        assert_eq!(body.slots.len(), 2);
        assert!(body.slots[0].available);
        assert!(!body.slots[1].available);
    }

    #[test]
    fn rejected_envelope_keeps_backend_message() {
        let raw = br#"{"success":false,"error":"Invalid phone number"}"#;
        let err = decode_envelope::<Ack>(StatusCode::BAD_REQUEST, raw).unwrap_err();
        let messages = DisplayLocale::Spanish.messages();
        assert!(matches!(err, ApiError::Rejected(Some(_))));
        assert_eq!(err.user_message(messages.booking_failed, messages), "Invalid phone number");
    }

    #[test]
    fn rejected_without_message_uses_fallback() {
        let raw = br#"{"success":false}"#;
        let err = decode_envelope::<ServicesBody>(StatusCode::INTERNAL_SERVER_ERROR, raw).unwrap_err();
        let messages = DisplayLocale::English.messages();
        assert_eq!(
            err.user_message(messages.service_save_failed, messages),
            "Could not save the service"
        );
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err = decode_envelope::<Ack>(StatusCode::BAD_GATEWAY, b"<html>502</html>").unwrap_err();
        let messages = DisplayLocale::Spanish.messages();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(
            err.user_message(messages.booking_failed, messages),
            messages.server_unreachable
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://backend:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://backend:5000");
        assert_eq!(client.url("/api/services"), "http://backend:5000/api/services");
    }
}

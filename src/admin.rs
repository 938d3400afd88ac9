//! Admin panel state: appointment filter and the service/availability forms.

use crate::api::ApiError;
use crate::dates::{clock_key, parse_clock, parse_date_key};
use crate::forms::{FieldErrors, checkbox, duration_minutes, optional_text, required_text};
use crate::i18n::Messages;
use crate::models::{
    Appointment, AppointmentQuery, AppointmentStatus, AvailabilityPayload, AvailabilityRule,
    Service, ServicePayload,
};
use crate::recurrence::occurrences;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    /// Absent or unknown values show active appointments; empty or `all` shows everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("") | Some("all") => StatusFilter::All,
            Some(raw) => AppointmentStatus::parse(raw)
                .map(StatusFilter::Only)
                .unwrap_or(StatusFilter::Only(AppointmentStatus::Active)),
            None => StatusFilter::Only(AppointmentStatus::Active),
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: StatusFilter,
}

impl AppointmentFilter {
    pub fn parse(date: Option<&str>, status: Option<&str>) -> Self {
        Self {
            date: date.and_then(parse_date_key),
            status: StatusFilter::parse(status),
        }
    }

    pub fn query(&self) -> AppointmentQuery {
        AppointmentQuery {
            date: self.date,
            status: match self.status {
                StatusFilter::All => None,
                StatusFilter::Only(status) => Some(status),
            },
        }
    }
}

/// Follow-up dates of a recurring appointment, empty for one-off bookings.
pub fn series_preview(appointment: &Appointment) -> Vec<NaiveDate> {
    match appointment.recurrence_end {
        Some(end) if appointment.recurrence.is_recurring() => {
            occurrences(appointment.date, appointment.recurrence, end)
        }
        _ => Vec::new(),
    }
}

/// A backend list that either loaded or did not.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Listing<T> {
    pub fn from_result(result: Result<Vec<T>, ApiError>, fallback: &str, messages: &Messages) -> Self {
        match result {
            Ok(items) => Listing::Ready(items),
            Err(err) => {
                warn!("could not load list: {err}");
                Listing::Failed(err.user_message(fallback, messages))
            }
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Listing::Ready(items) => items,
            Listing::Failed(_) => &[],
        }
    }
}

/// Create/edit form of an admin panel. `editing` holds the id of the record
/// being updated, `None` for a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState<I> {
    pub editing: Option<i64>,
    pub input: I,
    pub errors: FieldErrors,
}

impl<I> FormState<I> {
    pub fn new(editing: Option<i64>, input: I) -> Self {
        Self {
            editing,
            input,
            errors: FieldErrors::new(),
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }
}

const SERVICE_NAME_MAX_CHARS: usize = 100;
const SERVICE_DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceInput {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: String,
    pub active: Option<String>,
}

impl ServiceInput {
    pub fn blank() -> Self {
        Self {
            duration: "60".to_string(),
            price: "0".to_string(),
            active: Some("on".to_string()),
            ..Self::default()
        }
    }

    pub fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone().unwrap_or_default(),
            duration: service.duration.to_string(),
            price: format!("{:.2}", service.price),
            active: service.active.then(|| "on".to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        checkbox(&self.active)
    }

    pub fn validate(&self, messages: &Messages) -> Result<ServicePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", &self.name, SERVICE_NAME_MAX_CHARS, messages);
        let description = optional_text(
            &mut errors,
            "description",
            &self.description,
            SERVICE_DESCRIPTION_MAX_CHARS,
            messages,
        );
        let duration = duration_minutes(&mut errors, "duration", &self.duration, messages);
        let price = match self.price.trim().replace(',', ".").parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
            _ => {
                errors.insert("price", messages.price_invalid);
                None
            }
        };

        match (name, description, duration, price) {
            (Some(name), Some(description), Some(duration), Some(price)) if errors.is_empty() => {
                Ok(ServicePayload {
                    name,
                    description,
                    duration,
                    price,
                    active: self.is_active(),
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AvailabilityInput {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: String,
    pub enabled: Option<String>,
}

impl AvailabilityInput {
    /// New rules open 09:00-18:00 with one-hour slots.
    pub fn blank() -> Self {
        Self {
            day_of_week: "0".to_string(),
            start_time: "09:00".to_string(),
            end_time: "18:00".to_string(),
            duration_minutes: "60".to_string(),
            enabled: Some("on".to_string()),
        }
    }

    pub fn from_rule(rule: &AvailabilityRule) -> Self {
        Self {
            day_of_week: rule.day_of_week.to_string(),
            start_time: rule.start_time.clone(),
            end_time: rule.end_time.clone(),
            duration_minutes: rule.duration_minutes.to_string(),
            enabled: rule.enabled.then(|| "on".to_string()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        checkbox(&self.enabled)
    }

    pub fn validate(&self, messages: &Messages) -> Result<AvailabilityPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let day_of_week = match self.day_of_week.trim().parse::<u8>() {
            Ok(day) if day <= 6 => Some(day),
            _ => {
                errors.insert("day_of_week", messages.day_invalid);
                None
            }
        };
        let start = parse_clock(&self.start_time);
        if start.is_none() {
            errors.insert("start_time", messages.time_invalid);
        }
        let end = parse_clock(&self.end_time);
        if end.is_none() {
            errors.insert("end_time", messages.time_invalid);
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.insert("end_time", messages.time_range_invalid);
            }
        }
        let duration = duration_minutes(&mut errors, "duration_minutes", &self.duration_minutes, messages);

        match (day_of_week, start, end, duration) {
            (Some(day_of_week), Some(start), Some(end), Some(duration_minutes)) if errors.is_empty() => {
                Ok(AvailabilityPayload {
                    day_of_week,
                    start_time: clock_key(start),
                    end_time: clock_key(end),
                    duration_minutes,
                    enabled: self.is_enabled(),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DisplayLocale;
    use crate::models::Recurrence;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn status_filter_defaults_to_active() {
        assert_eq!(StatusFilter::parse(None), StatusFilter::Only(AppointmentStatus::Active));
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("cancelled")),
            StatusFilter::Only(AppointmentStatus::Cancelled)
        );
        assert_eq!(StatusFilter::parse(Some("bogus")), StatusFilter::Only(AppointmentStatus::Active));
    }

    #[test]
    fn filter_builds_backend_query() {
        let filter = AppointmentFilter::parse(Some("2024-03-15"), Some("all"));
        let query = filter.query();
        assert_eq!(query.date, Some(ymd(2024, 3, 15)));
        assert_eq!(query.status, None);

        let filter = AppointmentFilter::parse(Some("not-a-date"), None);
        assert_eq!(filter.query().date, None);
        assert_eq!(filter.query().status, Some(AppointmentStatus::Active));
    }

    #[test]
    fn series_preview_only_for_recurring() {
        let mut appointment = Appointment {
            id: 1,
            date: ymd(2024, 3, 15),
            time: "09:00".into(),
            client: "Ana".into(),
            phone: "600123123".into(),
            service_id: 1,
            service_name: None,
            recurrence: Recurrence::Weekly,
            recurrence_end: Some(ymd(2024, 3, 29)),
            parent_appointment_id: None,
            status: AppointmentStatus::Active,
            notes: None,
        };
        assert_eq!(series_preview(&appointment), vec![ymd(2024, 3, 22), ymd(2024, 3, 29)]);
        appointment.recurrence = Recurrence::None;
        assert!(series_preview(&appointment).is_empty());
    }

    #[test]
    fn listing_keeps_backend_message() {
        let messages = DisplayLocale::Spanish.messages();
        let listing: Listing<Service> = Listing::from_result(
            Err(ApiError::Rejected(Some("Base de datos ocupada".into()))),
            messages.services_failed,
            messages,
        );
        assert_eq!(listing, Listing::Failed("Base de datos ocupada".into()));
        assert!(listing.items().is_empty());

        let listing: Listing<Service> =
            Listing::from_result(Err(ApiError::Rejected(None)), messages.services_failed, messages);
        assert_eq!(listing, Listing::Failed(messages.services_failed.into()));
    }

    #[test]
    fn service_form_validation() {
        let messages = DisplayLocale::Spanish.messages();
        let input = ServiceInput {
            name: "Corte".into(),
            price: "12,50".into(),
            ..ServiceInput::blank()
        };
        let payload = input.validate(messages).expect("valid");
        assert_eq!(payload.duration, 60);
        assert_eq!(payload.price, 12.5);
        assert!(payload.active);

        let input = ServiceInput {
            name: " ".into(),
            duration: "5".into(),
            price: "-1".into(),
            active: None,
            ..ServiceInput::default()
        };
        let errors = input.validate(messages).unwrap_err();
        assert_eq!(errors.get("name"), Some(messages.field_required));
        assert_eq!(errors.get("duration"), Some(messages.duration_invalid));
        assert_eq!(errors.get("price"), Some(messages.price_invalid));
    }

    #[test]
    fn service_round_trips_into_form() {
        let service = Service {
            id: 3,
            name: "Tinte".into(),
            description: None,
            duration: 90,
            price: 30.0,
            active: false,
        };
        let input = ServiceInput::from_service(&service);
        assert_eq!(input.price, "30.00");
        assert!(!input.is_active());
        assert_eq!(input.validate(DisplayLocale::English.messages()).unwrap().duration, 90);
    }

    #[test]
    fn availability_form_validation() {
        let messages = DisplayLocale::English.messages();
        let payload = AvailabilityInput::blank().validate(messages).expect("valid");
        assert_eq!(payload.day_of_week, 0);
        assert_eq!(payload.start_time, "09:00");
        assert_eq!(payload.end_time, "18:00");
        assert!(payload.enabled);

        let input = AvailabilityInput {
            day_of_week: "7".into(),
            start_time: "18:00".into(),
            end_time: "09:00".into(),
            duration_minutes: "0".into(),
            enabled: None,
        };
        let errors = input.validate(messages).unwrap_err();
        assert_eq!(errors.get("day_of_week"), Some(messages.day_invalid));
        assert_eq!(errors.get("end_time"), Some(messages.time_range_invalid));
        assert_eq!(errors.get("duration_minutes"), Some(messages.duration_invalid));
    }
}

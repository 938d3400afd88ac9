//! Booking view state: the slot list for a day and the booking form.

use crate::api::{ApiError, BackendClient};
use crate::dates::{clock_key, date_key, day_after, parse_clock, parse_date_key};
use crate::forms::{FieldErrors, is_valid_phone, optional_text, required_text};
use crate::i18n::Messages;
use crate::models::{NewAppointment, Recurrence, TimeSlot};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

const CLIENT_MAX_CHARS: usize = 100;
const NOTES_MAX_CHARS: usize = 500;

/// Outcome of loading the slots of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotList {
    Ready(Vec<TimeSlot>),
    /// The day has no slots at all.
    Empty,
    /// The backend answered but declined (`success: false`).
    Unavailable,
    /// Network or decoding failure.
    Failed,
}

impl SlotList {
    pub fn from_result(result: Result<Vec<TimeSlot>, ApiError>) -> Self {
        match result {
            Ok(slots) if slots.is_empty() => SlotList::Empty,
            Ok(slots) => SlotList::Ready(slots),
            Err(ApiError::Rejected(_)) => SlotList::Unavailable,
            Err(_) => SlotList::Failed,
        }
    }

    pub async fn load(api: &BackendClient, date: NaiveDate) -> Self {
        let result = api.available_slots(date).await;
        if let Err(err) = &result {
            warn!(date = %date_key(date), "could not load slots: {err}");
        }
        Self::from_result(result)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            SlotList::Ready(slots) => slots,
            _ => &[],
        }
    }

    pub fn is_available(&self, time: &str) -> bool {
        self.slots()
            .iter()
            .any(|slot| slot.available && slot.time == time)
    }
}

/// Constraints on the recurrence-end input for a booking on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceEndRule {
    pub required: bool,
    pub min: NaiveDate,
}

pub fn recurrence_end_rule(date: NaiveDate, recurrence: Recurrence) -> RecurrenceEndRule {
    RecurrenceEndRule {
        required: recurrence.is_recurring(),
        min: day_after(date),
    }
}

/// Raw booking form as submitted by the browser.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BookingInput {
    pub date: String,
    pub time: String,
    pub client: String,
    pub phone: String,
    pub service_id: String,
    pub recurrence: String,
    pub recurrence_end: String,
    pub notes: String,
}

impl BookingInput {
    pub fn for_slot(date: NaiveDate, time: &str) -> Self {
        Self {
            date: date_key(date),
            time: time.to_string(),
            recurrence: Recurrence::None.as_str().to_string(),
            ..Self::default()
        }
    }

    pub fn booking_date(&self) -> Option<NaiveDate> {
        parse_date_key(&self.date)
    }

    /// Unknown or blank values read as a one-off booking.
    pub fn recurrence_kind(&self) -> Recurrence {
        Recurrence::parse(self.recurrence.trim()).unwrap_or_default()
    }

    /// Checks every field and builds the backend payload. Nothing is sent
    /// unless this succeeds.
    pub fn validate(&self, messages: &Messages) -> Result<NewAppointment, FieldErrors> {
        let mut errors = FieldErrors::new();

        let date = self.booking_date();
        if date.is_none() {
            errors.insert("date", messages.date_invalid);
        }
        let time = parse_clock(&self.time);
        if time.is_none() {
            errors.insert("time", messages.time_invalid);
        }

        let client = required_text(&mut errors, "client", &self.client, CLIENT_MAX_CHARS, messages);
        let phone = required_text(&mut errors, "phone", &self.phone, 20, messages);
        if phone.as_deref().is_some_and(|phone| !is_valid_phone(phone)) {
            errors.insert("phone", messages.phone_invalid);
        }

        let service_id = match self.service_id.trim() {
            "" => {
                errors.insert("service_id", messages.field_required);
                None
            }
            raw => match raw.parse::<i64>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.insert("service_id", messages.service_invalid);
                    None
                }
            },
        };

        let recurrence = match self.recurrence.trim() {
            "" => Some(Recurrence::None),
            raw => Recurrence::parse(raw),
        };
        if recurrence.is_none() {
            errors.insert("recurrence", messages.recurrence_invalid);
        }

        let mut recurrence_end = None;
        if let Some(kind) = recurrence.filter(|kind| kind.is_recurring()) {
            match self.recurrence_end.trim() {
                "" => errors.insert("recurrence_end", messages.recurrence_end_required),
                raw => match parse_date_key(raw) {
                    None => errors.insert("recurrence_end", messages.date_invalid),
                    Some(end) => {
                        let too_early = date.is_some_and(|date| end < recurrence_end_rule(date, kind).min);
                        if too_early {
                            errors.insert("recurrence_end", messages.recurrence_end_too_early);
                        }
                        recurrence_end = Some(date_key(end));
                    }
                },
            }
        }

        let notes = optional_text(&mut errors, "notes", &self.notes, NOTES_MAX_CHARS, messages);

        match (date, time, client, phone, service_id, recurrence, notes) {
            (Some(date), Some(time), Some(client), Some(phone), Some(service_id), Some(recurrence), Some(notes))
                if errors.is_empty() =>
            {
                Ok(NewAppointment {
                    date: date_key(date),
                    time: clock_key(time),
                    client,
                    phone,
                    service_id,
                    recurrence,
                    recurrence_end,
                    notes,
                })
            }
            _ => Err(errors),
        }
    }
}

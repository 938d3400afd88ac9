use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration: u32,
    pub price: f64,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Active,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [Self::Active, Self::Cancelled, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub const ALL: [Recurrence; 3] = [Self::None, Self::Weekly, Self::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn is_recurring(self) -> bool {
        self != Self::None
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub client: String,
    pub phone: String,
    pub service_id: i64,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub recurrence_end: Option<NaiveDate>,
    #[serde(default)]
    pub parent_appointment_id: Option<i64>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Weekly opening window; `day_of_week` counts from Monday = 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityRule {
    pub id: i64,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewAppointment {
    pub date: String,
    pub time: String,
    pub client: String,
    pub phone: String,
    pub service_id: i64,
    pub recurrence: Recurrence,
    pub recurrence_end: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServicePayload {
    pub name: String,
    pub description: String,
    pub duration: u32,
    pub price: f64,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AvailabilityPayload {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    pub enabled: bool,
}

/// Query for `GET /api/appointments`. A `None` status lists every status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_decodes_backend_shape() {
        let raw = serde_json::json!({
            "id": 7,
            "date": "2024-03-15",
            "time": "09:00",
            "client": "Ana",
            "phone": "600123123",
            "service_id": 2,
            "service_name": "Corte",
            "recurrence": "weekly",
            "recurrence_end": "2024-04-12",
            "parent_appointment_id": null,
            "status": "active",
            "notes": null,
            "created_at": "2024-03-01T10:00:00"
        });

        let appointment: Appointment = serde_json::from_value(raw).expect("decode");
        assert_eq!(appointment.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(appointment.recurrence, Recurrence::Weekly);
        assert_eq!(appointment.status, AppointmentStatus::Active);
        assert_eq!(appointment.service_name.as_deref(), Some("Corte"));
    }

    #[test]
    fn new_appointment_serializes_null_recurrence_end() {
        let payload = NewAppointment {
            date: "2024-03-15".into(),
            time: "09:00".into(),
            client: "Ana".into(),
            phone: "600123123".into(),
            service_id: 1,
            recurrence: Recurrence::None,
            recurrence_end: None,
            notes: String::new(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["recurrence"], "none");
        assert!(value["recurrence_end"].is_null());
    }

    #[test]
    fn status_and_recurrence_parse_their_wire_names() {
        assert_eq!(AppointmentStatus::parse("cancelled"), Some(AppointmentStatus::Cancelled));
        assert_eq!(AppointmentStatus::parse("all"), None);
        assert_eq!(Recurrence::parse("monthly"), Some(Recurrence::Monthly));
        assert!(!Recurrence::None.is_recurring());
    }
}

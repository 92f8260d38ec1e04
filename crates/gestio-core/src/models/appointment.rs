use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Appointment entity. `client_id` and `employee_id` must reference records in
/// the same tenant; the check happens before the store write, and later
/// deletion of the referent is tolerated (views render a placeholder).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: String,
    pub status: AppointmentStatus,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Calendar ordering key: by date, then by time of day.
    pub fn chronological_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }

    /// Apply a patch in place. Absent fields are untouched.
    pub fn apply_update(&mut self, update: UpdateAppointment) {
        if let Some(client_id) = update.client_id {
            self.client_id = client_id;
        }
        if let Some(employee_id) = update.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Payload for creating an appointment. Ids, date, and time are validated at
/// the type level; `notes` may be empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointment {
    pub client_id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Partial update for an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

impl UpdateAppointment {
    /// True when either referent changes, which re-triggers the referential check.
    pub fn changes_references(&self) -> bool {
        self.client_id.is_some() || self.employee_id.is_some()
    }
}

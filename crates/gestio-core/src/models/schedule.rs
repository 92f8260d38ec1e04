use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::constants::MISSING_REFERENCE_LABEL;
use crate::models::{Appointment, AppointmentStatus, Client, Employee};

/// Appointment joined with display names resolved from the client and
/// employee stores. References that no longer resolve within the tenant
/// render as [`MISSING_REFERENCE_LABEL`] rather than failing the view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: String,
    pub status: AppointmentStatus,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl AppointmentView {
    /// Join one appointment against optionally resolved referents.
    pub fn resolve(
        appointment: Appointment,
        client: Option<&Client>,
        employee: Option<&Employee>,
    ) -> Self {
        AppointmentView {
            id: appointment.id,
            client_id: appointment.client_id,
            client_name: client
                .map(|c| c.name.clone())
                .unwrap_or_else(|| MISSING_REFERENCE_LABEL.to_string()),
            employee_id: appointment.employee_id,
            employee_name: employee
                .map(Employee::full_name)
                .unwrap_or_else(|| MISSING_REFERENCE_LABEL.to_string()),
            date: appointment.date,
            time: appointment.time,
            notes: appointment.notes,
            status: appointment.status,
            company_id: appointment.company_id,
            created_at: appointment.created_at,
        }
    }
}

/// Optional filters for the schedule list view.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.date.is_none_or(|date| appointment.date == date)
            && self.status.is_none_or(|status| appointment.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment() -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            notes: String::new(),
            status: AppointmentStatus::Scheduled,
            company_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        let view = AppointmentView::resolve(appointment(), None, None);
        assert_eq!(view.client_name, MISSING_REFERENCE_LABEL);
        assert_eq!(view.employee_name, MISSING_REFERENCE_LABEL);
    }

    #[test]
    fn test_filter_matches_date_and_status() {
        let appt = appointment();

        let unfiltered = AppointmentFilter::default();
        assert!(unfiltered.matches(&appt));

        let by_date = AppointmentFilter {
            date: Some(appt.date),
            status: None,
        };
        assert!(by_date.matches(&appt));

        let wrong_status = AppointmentFilter {
            date: None,
            status: Some(AppointmentStatus::Completed),
        };
        assert!(!wrong_status.matches(&appt));

        let both = AppointmentFilter {
            date: Some(appt.date),
            status: Some(AppointmentStatus::Scheduled),
        };
        assert!(both.matches(&appt));
    }
}

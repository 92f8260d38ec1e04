//! Demo dataset for local development.
//!
//! Seeds one tenant with a handful of employees, clients, and appointments so
//! the API is usable straight after startup. Appointment dates are positioned
//! relative to `today` so the schedule and upcoming views always have content.

use chrono::{Days, NaiveDate, NaiveTime};
use uuid::Uuid;

use gestio_core::constants::DEMO_TENANT_ID;
use gestio_core::models::{
    AppointmentStatus, ClientStatus, CreateAppointment, CreateClient, CreateEmployee,
};
use gestio_core::AppError;

use crate::Stores;

/// What the seed run produced, for the startup log line.
#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    pub tenant_id: Uuid,
    pub employees: usize,
    pub clients: usize,
    pub appointments: usize,
}

fn clock(hour: u32, minute: u32) -> Result<NaiveTime, AppError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| AppError::Internal(format!("invalid seed time {hour:02}:{minute:02}")))
}

fn shift(today: NaiveDate, days: i64) -> Result<NaiveDate, AppError> {
    let shifted = if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| AppError::Internal(format!("seed date out of range: today{days:+}")))
}

/// Populate the stores with the demo tenant's data.
///
/// Everything goes through the ordinary store operations, so ids come back
/// stamped and the appointments can reference real employee and client
/// records.
#[tracing::instrument(skip(stores))]
pub async fn seed_demo_data(stores: &Stores, today: NaiveDate) -> Result<SeedSummary, AppError> {
    let tenant_id = DEMO_TENANT_ID;

    let employee_rows = [
        ("Luca", "Bianchi", "luca.bianchi@azienda.it", Some("+39 333 1234567"), "Tecnico", (2022, 3, 15)),
        ("Sara", "Moretti", "sara.moretti@azienda.it", Some("+39 334 7654321"), "Amministrazione", (2021, 9, 1)),
        ("Marco", "Ferretti", "marco.ferretti@azienda.it", None, "Tecnico", (2023, 6, 12)),
        ("Elena", "Conti", "elena.conti@azienda.it", Some("+39 340 9988776"), "Commerciale", (2024, 1, 8)),
    ];

    let mut employees = Vec::with_capacity(employee_rows.len());
    for (first, last, email, phone, role, (y, m, d)) in employee_rows {
        let hire_date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| AppError::Internal(format!("invalid seed hire date {y}-{m}-{d}")))?;
        let employee = stores
            .employees
            .create(
                tenant_id,
                CreateEmployee {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: email.to_string(),
                    phone: phone.map(str::to_string),
                    role: role.to_string(),
                    hire_date,
                },
            )
            .await?;
        employees.push(employee);
    }

    let client_rows = [
        ("Rossi Impianti SRL", "info@rossimpianti.it", "+39 055 2345678", "Via della Scala 12", "Firenze", "50123", ClientStatus::Active),
        ("Bar Centrale", "barcentrale@gmail.com", "+39 0574 456789", "Piazza del Duomo 3", "Prato", "59100", ClientStatus::Active),
        ("Studio Legale Verdi", "segreteria@studioverdi.it", "+39 055 8765432", "Lungarno Vespucci 22", "Firenze", "50121", ClientStatus::Active),
        ("Farmacia San Marco", "farmacia.sanmarco@pec.it", "+39 055 1122334", "Piazza San Marco 8", "Firenze", "50129", ClientStatus::Lead),
        ("Panificio Toscano", "ordini@panificiotoscano.it", "+39 0571 998877", "Via Garibaldi 45", "Empoli", "50053", ClientStatus::Inactive),
    ];

    let mut clients = Vec::with_capacity(client_rows.len());
    for (name, email, phone, address, city, zip, status) in client_rows {
        let client = stores
            .clients
            .create(
                tenant_id,
                CreateClient {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    address: address.to_string(),
                    city: city.to_string(),
                    zip_code: zip.to_string(),
                    status,
                },
            )
            .await?;
        clients.push(client);
    }

    // (client idx, employee idx, day offset, hour, minute, notes, status)
    let appointment_rows = [
        (0, 0, 0, 9, 0, "Manutenzione caldaia", AppointmentStatus::Scheduled),
        (1, 2, 0, 14, 30, "Sopralluogo impianto elettrico", AppointmentStatus::Scheduled),
        (2, 3, 1, 10, 0, "Presentazione offerta annuale", AppointmentStatus::Scheduled),
        (0, 1, -3, 11, 0, "Verifica fatturazione", AppointmentStatus::Completed),
        (4, 0, -7, 15, 0, "Riparazione forno", AppointmentStatus::Completed),
    ];

    let mut appointments = 0;
    for (client_idx, employee_idx, offset, hour, minute, notes, status) in appointment_rows {
        stores
            .appointments
            .create(
                tenant_id,
                CreateAppointment {
                    client_id: clients[client_idx].id,
                    employee_id: employees[employee_idx].id,
                    date: shift(today, offset)?,
                    time: clock(hour, minute)?,
                    notes: notes.to_string(),
                    status,
                },
            )
            .await?;
        appointments += 1;
    }

    let summary = SeedSummary {
        tenant_id,
        employees: employees.len(),
        clients: clients.len(),
        appointments,
    };

    tracing::info!(
        tenant_id = %summary.tenant_id,
        employees = summary.employees,
        clients = summary.clients,
        appointments = summary.appointments,
        "Seeded demo data"
    );

    Ok(summary)
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Employee entity. `company_id` is stamped by the server from the
/// authenticated tenant and is never taken from request bodies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: String,
    pub hire_date: NaiveDate,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Display name used by schedule views.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Apply a patch in place. Absent fields are untouched; `phone` supports
    /// explicit clearing via JSON null.
    pub fn apply_update(&mut self, update: UpdateEmployee) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(hire_date) = update.hire_date {
            self.hire_date = hire_date;
        }
    }
}

/// Payload for creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    pub hire_date: NaiveDate,
}

/// Partial update for an employee. `phone` uses a double `Option` so an
/// explicit JSON `null` clears the stored value while an absent key leaves it
/// alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub phone: Option<Option<String>>,
    #[validate(length(min = 1, message = "Role is required"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
}

impl UpdateEmployee {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.hire_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_employee() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            first_name: "Luca".to_string(),
            last_name: "Bianchi".to_string(),
            email: "luca.bianchi@azienda.it".to_string(),
            phone: Some("+39 333 1234567".to_string()),
            role: "Tecnico".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
            company_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_employee_validation() {
        let valid = CreateEmployee {
            first_name: "Luca".to_string(),
            last_name: "Bianchi".to_string(),
            email: "luca@azienda.it".to_string(),
            phone: None,
            role: "Tecnico".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
        };
        assert!(valid.validate().is_ok());

        let mut invalid = valid.clone();
        invalid.first_name = "L".to_string();
        invalid.email = "not-an-email".to_string();
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_apply_update_merges_only_supplied_fields() {
        let mut employee = sample_employee();
        let original_email = employee.email.clone();

        employee.apply_update(UpdateEmployee {
            role: Some("Manager".to_string()),
            ..Default::default()
        });

        assert_eq!(employee.role, "Manager");
        assert_eq!(employee.email, original_email);
        assert_eq!(employee.first_name, "Luca");
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut employee = sample_employee();
        let before = format!("{:?}", employee);
        let update = UpdateEmployee::default();
        assert!(update.is_empty());
        employee.apply_update(update);
        assert_eq!(format!("{:?}", employee), before);
    }

    #[test]
    fn test_phone_patch_distinguishes_null_from_absent() {
        // Absent key: outer None, phone untouched
        let absent: UpdateEmployee = serde_json::from_str(r#"{"role":"Manager"}"#).unwrap();
        assert_eq!(absent.phone, None);

        // Explicit null: Some(None), phone cleared
        let cleared: UpdateEmployee = serde_json::from_str(r#"{"phone":null}"#).unwrap();
        assert_eq!(cleared.phone, Some(None));

        // Value: Some(Some(..))
        let set: UpdateEmployee = serde_json::from_str(r#"{"phone":"+39 02 98765"}"#).unwrap();
        assert_eq!(set.phone, Some(Some("+39 02 98765".to_string())));

        let mut employee = sample_employee();
        employee.apply_update(cleared);
        assert_eq!(employee.phone, None);
    }

    #[test]
    fn test_employee_wire_format_is_camel_case() {
        let employee = sample_employee();
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("hireDate").is_some());
        assert!(json.get("companyId").is_some());
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_employee().full_name(), "Luca Bianchi");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Client lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
    Lead,
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientStatus::Active => write!(f, "active"),
            ClientStatus::Inactive => write!(f, "inactive"),
            ClientStatus::Lead => write!(f, "lead"),
        }
    }
}

/// Client (customer) entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub status: ClientStatus,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Apply a patch in place. Absent fields are untouched.
    pub fn apply_update(&mut self, update: UpdateClient) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(zip_code) = update.zip_code {
            self.zip_code = zip_code;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Payload for creating a client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 5, message = "Zip code must be at least 5 characters"))]
    pub zip_code: String,
    pub status: ClientStatus,
}

/// Partial update for a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone is required"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[validate(length(min = 5, message = "Zip code must be at least 5 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> Client {
        Client {
            id: Uuid::new_v4(),
            name: "Rossi Impianti SRL".to_string(),
            email: "info@rossimpianti.it".to_string(),
            phone: "+39 02 1234567".to_string(),
            address: "Via Milano 42".to_string(),
            city: "Milano".to_string(),
            zip_code: "20121".to_string(),
            status: ClientStatus::Active,
            company_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_client_validation() {
        let valid = CreateClient {
            name: "Rossi Impianti SRL".to_string(),
            email: "info@rossimpianti.it".to_string(),
            phone: "+39 02 1234567".to_string(),
            address: "Via Milano 42".to_string(),
            city: "Milano".to_string(),
            zip_code: "20121".to_string(),
            status: ClientStatus::Lead,
        };
        assert!(valid.validate().is_ok());

        let mut invalid = valid.clone();
        invalid.name = "R".to_string();
        invalid.zip_code = "201".to_string();
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("zip_code"));
    }

    #[test]
    fn test_status_round_trip_lowercase() {
        assert_eq!(serde_json::to_string(&ClientStatus::Lead).unwrap(), "\"lead\"");
        let parsed: ClientStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, ClientStatus::Inactive);
        assert!(serde_json::from_str::<ClientStatus>("\"gold\"").is_err());
    }

    #[test]
    fn test_apply_update_changes_status_only() {
        let mut client = sample_client();
        client.apply_update(UpdateClient {
            status: Some(ClientStatus::Inactive),
            ..Default::default()
        });
        assert_eq!(client.status, ClientStatus::Inactive);
        assert_eq!(client.name, "Rossi Impianti SRL");
        assert_eq!(client.city, "Milano");
    }

    #[test]
    fn test_client_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_client()).unwrap();
        assert!(json.get("zipCode").is_some());
        assert!(json.get("companyId").is_some());
        assert!(json.get("zip_code").is_none());
    }
}
